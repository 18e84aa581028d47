//! Schema element types: tables, columns, keys and indexes.
//!
//! This module provides the object graph at the heart of the crate:
//!
//! - [`Column`]: a single table column
//! - [`PrimaryKey`]: an ordered set of columns forming a table's primary key
//! - [`Index`]: a named, dialect-typed ordered set of columns
//! - [`ForeignKey`]: local columns referencing columns of another table
//! - [`Table`]: the aggregate root owning all of the above
//! - [`Schema`]: an ordered container of tables
//!
//! # Handles and ownership
//!
//! Every element type is a cheap-to-clone handle onto shared state. Cloning
//! a handle never copies the element; two clones refer to the same element,
//! and equality between handles is identity, not structural comparison. This
//! is what makes the ownership bookkeeping observable: after
//! `table.set_primary_key(Some(pk.clone()))`, the caller's `pk` handle
//! reports `table` as its owner.
//!
//! Back-references from a child to its owning table are weak and are
//! maintained only by the owning [`Table`]'s mutators. A child never sets
//! its own owner, and attaching a child that currently belongs to another
//! table detaches it from that table first, so no two tables ever claim the
//! same element.
//!
//! # Canonical serialization
//!
//! Each element exposes `to_value()`, producing a nested
//! [`serde_json::Value`] whose key names, key order and sequence order are a
//! stable contract consumed by diffing and code-generation tooling.

mod column;
mod foreign_key;
mod index;
mod primary_key;
mod schema;
mod table;

pub use column::Column;
pub use foreign_key::{ForeignKey, ReferentialAction};
pub use index::Index;
pub use primary_key::PrimaryKey;
pub use schema::Schema;
pub use table::Table;

use serde_json::Value;

/// Serialize a column list by name only, preserving order.
///
/// Primary keys, indexes and foreign keys identify their columns relative to
/// the owning table's already-serialized column list, so only names appear.
pub(crate) fn column_names(columns: &[Column]) -> Vec<Value> {
    columns
        .iter()
        .map(|column| match column.name() {
            Some(name) => Value::String(name),
            None => Value::Null,
        })
        .collect()
}
