//! Coursebook - a course catalog HTTP API
//!
//! CRUD endpoints for `Course` and `Student` resources under `/api/v1`,
//! backed by SQLite through sqlx. The crate is organized as a thin stack:
//! axum handlers extract, services validate, the store persists.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

pub use error::{Error, Result};
