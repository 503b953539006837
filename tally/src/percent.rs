//! Share-of-total helper used by every caller that renders vote bars.

/// `count` as a percentage of `total`; zero when nobody voted.
pub fn percentage(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(count) * 100.0 / f64::from(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_is_zero_percent() {
        assert_eq!(percentage(0, 0), 0.0);
        assert!(!percentage(0, 0).is_nan());
    }

    #[test]
    fn share_of_total() {
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(3, 3), 100.0);
    }
}
