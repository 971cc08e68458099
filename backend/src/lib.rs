//! Kanasu REST service
//!
//! Serves the prediction, roadmap, institutions, chat, scholarship and voice
//! command contracts the Kanasu client talks to.

pub mod api;
pub mod error;

pub use api::*;
pub use error::ApiError;
