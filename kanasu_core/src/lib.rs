//! Kanasu core: bilingual career guidance domain library.
//!
//! Voice navigation, form state, recommendation/roadmap/chat providers,
//! and the store-backed client sessions used by both the REST service and
//! the terminal client.

pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod form;
pub mod i18n;
pub mod institutions;
pub mod locale;
pub mod notification;
pub mod provider;
pub mod recommender;
pub mod roadmap;
pub mod scholarships;
pub mod session;
pub mod store;
pub mod types;
pub mod voice;

pub use error::{KanasuError, Result};
pub use locale::Locale;
