//! # sql-schema
//!
//! In-memory model of relational database schemas: tables, columns, primary
//! keys, foreign keys and indexes as a mutable object graph with:
//!
//! - **Bidirectional bookkeeping** — every child element carries a
//!   back-reference to its owning table, maintained automatically by the
//!   table's mutators
//! - **Structural queries** — identity- and name-based lookups, plus
//!   order-sensitive primary-key and foreign-key shape tests
//! - **Canonical serialization** — a deterministic nested
//!   [`serde_json::Value`] representation for schema diffing and code
//!   generation, with stable key names, key order and sequence order
//! - **Driver vocabularies** — index kinds validated against an injected
//!   [`Dialect`], so non-MySQL drivers can supply their own token sets
//!
//! The crate is the representation layer beneath schema-diffing and
//! migration tooling; connectivity, SQL execution and DDL emission live in
//! its consumers.
//!
//! ## Example
//!
//! ```rust
//! use sql_schema::{Column, Index, MySqlDialect, PrimaryKey, Table};
//!
//! fn main() -> sql_schema::Result<()> {
//!     let id = Column::new();
//!     id.set_name("id")
//!         .set_data_type("INT")
//!         .set_nullable(false)
//!         .set_auto_incrementable(true);
//!
//!     let email = Column::new();
//!     email.set_name("email").set_data_type("VARCHAR").set_parameter("length", 255);
//!
//!     let table = Table::new();
//!     table.set_name("users").set_columns(vec![id.clone(), email.clone()]);
//!
//!     let pk = PrimaryKey::new();
//!     pk.add_column(id);
//!     table.set_primary_key(Some(pk));
//!
//!     let unique_email = Index::new();
//!     unique_email.set_name("unique_email").add_column(email);
//!     unique_email.set_kind("UNIQUE", &MySqlDialect::new())?;
//!     table.add_index(unique_email);
//!
//!     assert!(table.has_primary_key_with_columns_named(&["id"]));
//!     assert!(table.has_index_with_name("unique_email"));
//!
//!     let canonical = table.to_value();
//!     assert_eq!(canonical["primaryKey"]["columns"][0], "id");
//!     Ok(())
//! }
//! ```

pub mod dialect;
pub mod element;
pub mod error;

// Re-exports for convenient access
pub use dialect::{Dialect, DialectCatalog, MySqlDialect};
pub use element::{Column, ForeignKey, Index, PrimaryKey, ReferentialAction, Schema, Table};
pub use error::{Result, SchemaError};
