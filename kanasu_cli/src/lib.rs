//! Kanasu terminal client: ratatui screens, typed voice input, and the
//! HTTP providers that target the Kanasu API.

pub mod api_client;
pub mod components;
pub mod export;
pub mod keymap;
pub mod screens;
pub mod speech;
pub mod ui;
