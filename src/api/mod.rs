//! HTTP API module for the attendance engine.
//!
//! A thin REST layer over [`crate::rules`]. Identity arrives as
//! pre-verified headers (see [`request`]); everything else is JSON in,
//! JSON out.

mod handlers;
pub mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use response::ApiError;
pub use state::{AppState, Clock};
