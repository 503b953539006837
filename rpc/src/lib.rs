//! HTTP API for the Gauss polls.
//!
//! Provides endpoints for:
//! - Upcoming matches and ad-hoc polls
//! - Vote submission and the aggregated tally
//! - Victory-margin tier tables
//! - The leaderboard and its cumulative earnings series
//! - Model pick reasoning
//! - Health and Prometheus metrics
//!
//! Identity is taken from headers set by the authenticating reverse proxy.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::{router, AppState, IdentityHeaders, RpcServer};
