//! Driver-specific vocabularies.
//!
//! The element model validates index kinds against an enumerated,
//! driver-specific set of permitted tokens, without itself knowing the full
//! enumeration. The [`Dialect`] trait is that injected capability; driver
//! modules implement it (here: [`MySqlDialect`]) and a [`DialectCatalog`]
//! registers implementations by name so hosting tools can resolve a dialect
//! from configuration without hard-coding one.

mod catalog;
mod mysql;

pub use catalog::DialectCatalog;
pub use mysql::{MySqlDialect, MYSQL_INDEX_KINDS};

use crate::element::ReferentialAction;

/// Vocabulary supplied by a database driver.
///
/// Implementations are plain value objects; they carry token sets, not
/// connections.
pub trait Dialect: Send + Sync + std::fmt::Debug {
    /// The dialect identifier (e.g. "mysql").
    fn name(&self) -> &str;

    /// Permitted index kind tokens, e.g. `UNIQUE` or `FULLTEXT`.
    fn index_kinds(&self) -> &[&'static str];

    /// Referential actions the driver accepts on foreign keys.
    fn referential_actions(&self) -> &[ReferentialAction];
}
