//! Poll registry for the Gauss polls.
//!
//! Resolves, for any `(match, poll_type)` pair, the closing instant and the valid
//! option set:
//! - `winner`: the match's two teams, closing with the match.
//! - `victory_margin`: tiers `A`..`D` whose wording depends on the match id,
//!   closing with the match.
//! - ad-hoc polls: free-form options, each with its own closing instant.
//!
//! Everything here is pure: the registry is built from rows fetched by the caller
//! and answers without I/O.

pub mod error;
pub mod margin;
pub mod registry;

pub use error::RegistryError;
pub use margin::{is_margin_key, margin_options_for, MarginTier, MARGIN_TABLES, WIDE_TIER_THRESHOLD};
pub use registry::{AdhocOption, AdhocPoll, PollRegistry};
