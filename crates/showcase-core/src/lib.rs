//! # Showcase Core
//!
//! Pure logic for Showcase: content models, the category catalog,
//! capability-to-group match scoring, search scoring with history, mock
//! fixtures, and detail-page projections.
//!
//! This crate performs no I/O. Everything operates on in-memory records
//! fetched by the calling application.

pub mod categories;
pub mod groups;
pub mod matching;
pub mod mock;
pub mod models;
pub mod search;
pub mod views;
