//! # glyph-store
//!
//! Local scan ledger for the Glyph application, backed by SQLite.
//!
//! Glyph payloads live in QR codes and shared images that nobody can recall
//! or delete, so read-once enforcement has to happen on the scanning device.
//! The crate exposes a synchronous `Database` handle that wraps a
//! `rusqlite::Connection` and records every scanned payload under its
//! content hash.

pub mod database;
pub mod migrations;
pub mod models;
pub mod scans;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use models::*;
