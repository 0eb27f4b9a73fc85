//! Event store persistence.
//!
//! Built on SQLite through `rusqlite`. The store is append-only and every
//! write uses its own connection, see [`motions`].

/// Short-lived connection wrapper.
pub mod db;

/// The `motion` table: appending events and reading them back.
pub mod motions;
