//! MySQL vocabulary.

use crate::element::ReferentialAction;

use super::Dialect;

/// Index kinds MySQL knows, in diagnostic order.
pub const MYSQL_INDEX_KINDS: &[&str] = &["PRIMARY", "UNIQUE", "INDEX", "FULLTEXT", "SPATIAL"];

/// Referential actions InnoDB accepts. SET DEFAULT parses but is rejected by
/// InnoDB, so it is not part of the vocabulary.
const MYSQL_REFERENTIAL_ACTIONS: &[ReferentialAction] = &[
    ReferentialAction::Restrict,
    ReferentialAction::Cascade,
    ReferentialAction::SetNull,
    ReferentialAction::NoAction,
];

/// The MySQL driver vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Create the dialect.
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &str {
        "mysql"
    }

    fn index_kinds(&self) -> &[&'static str] {
        MYSQL_INDEX_KINDS
    }

    fn referential_actions(&self) -> &[ReferentialAction] {
        MYSQL_REFERENTIAL_ACTIONS
    }
}
