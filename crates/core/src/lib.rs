#![warn(clippy::all, missing_docs)]

//! Core domain logic for the Cambrian Vault storefront.
//!
//! This crate hosts the catalog and library data models, the catalog
//! lookup and library filter pipeline, the HTML page templates, and the
//! configuration and data-file handling used by the terminal front end.

pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod format;
pub mod library;
pub mod models;
pub mod pages;
pub mod seed;
pub mod storefront;

pub use catalog::{parse_rating_count, Catalog, Lookup};
pub use config::AppConfig;
pub use error::{Result, VaultError};
pub use library::{render, FilterState, LibraryView, RenderResult};
pub use models::{GameRecord, GenreTag, LibraryEntry, Requirement, Review};
pub use pages::{Page, Route};
pub use storefront::Storefront;
