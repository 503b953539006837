//! Gauss poll service.
//!
//! Each call fetches what it needs from the stores, rebuilds the poll registry,
//! runs the core computation and returns a derived view. Nothing is cached between
//! calls.

pub mod config;
pub mod error;
pub mod import;
pub mod metrics;
pub mod service;
pub mod shutdown;
pub mod views;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use import::{ImportSummary, SeasonData};
pub use metrics::ServiceMetrics;
pub use service::{PollService, Stores};
pub use shutdown::ShutdownController;
pub use views::{AdhocPollView, PollSummary, VotesView};
