//! Database operations and SQLite management for drafts and reference data.
//!
//! This module provides the low-level storage behind
//! [`crate::gateway::SqliteGateway`]. Drafts are stored one row per draft,
//! with the searchable general fields as columns and the roster and ledger as
//! JSON documents. WBS nodes live in `wbs_nodes`, one row per node, so the
//! depth of a tree never reaches a recursive encoder.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod draft_queries;
pub mod migrations;
pub mod reference_queries;
pub mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
