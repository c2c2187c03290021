//! Carelens - hospital and medical-test price comparison backend
//!
//! A Rust API server providing:
//! - Combined full-text + filtered search over hospitals and medical tests
//! - Per-test price aggregation (lowest/highest/offer count) across hospitals
//! - Hospital comparison with per-test price tables
//! - Admin back-office CRUD for hospitals, tests, categories and prices

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod search;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
