//! Error types for the schema model.

use thiserror::Error;

/// Main error type for schema model operations.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// An index was assigned a kind outside the dialect's vocabulary.
    #[error("Unknown index type \"{}\". Known index types are {}.", .kind, .known.join(", "))]
    UnknownIndexKind {
        /// The rejected kind token.
        kind: String,
        /// The full accepted vocabulary, for diagnostics.
        known: Vec<String>,
    },

    /// A referential action token could not be parsed.
    #[error("Unknown referential action \"{}\". Known referential actions are {}.", .action, .known.join(", "))]
    UnknownReferentialAction {
        /// The rejected action token.
        action: String,
        /// The full accepted vocabulary, for diagnostics.
        known: Vec<String>,
    },

    /// A name-based column lookup found no match.
    #[error("Table \"{table}\" has no column with name \"{name}\".")]
    ColumnNotFound { table: String, name: String },

    /// A name-based index lookup found no match.
    #[error("Table \"{table}\" has no index with name \"{name}\".")]
    IndexNotFound { table: String, name: String },

    /// A name-based table lookup found no match.
    #[error("Schema has no table with name \"{name}\".")]
    TableNotFound { name: String },

    /// A dialect was requested from the catalog under an unregistered name.
    #[error("Unknown dialect \"{0}\".")]
    UnknownDialect(String),
}

impl SchemaError {
    /// Create an UnknownIndexKind error from the rejected token and the
    /// dialect's accepted vocabulary.
    pub fn unknown_index_kind(kind: impl Into<String>, known: &[&str]) -> Self {
        SchemaError::UnknownIndexKind {
            kind: kind.into(),
            known: known.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Create an UnknownReferentialAction error from the rejected token and
    /// the accepted vocabulary.
    pub fn unknown_referential_action(action: impl Into<String>, known: &[&str]) -> Self {
        SchemaError::UnknownReferentialAction {
            action: action.into(),
            known: known.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Create a ColumnNotFound error.
    pub fn column_not_found(table: impl Into<String>, name: impl Into<String>) -> Self {
        SchemaError::ColumnNotFound {
            table: table.into(),
            name: name.into(),
        }
    }

    /// Create an IndexNotFound error.
    pub fn index_not_found(table: impl Into<String>, name: impl Into<String>) -> Self {
        SchemaError::IndexNotFound {
            table: table.into(),
            name: name.into(),
        }
    }
}

/// Result type alias for schema model operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_index_kind_message_lists_vocabulary() {
        let err = SchemaError::unknown_index_kind("HASH", &["PRIMARY", "UNIQUE", "INDEX"]);
        assert_eq!(
            err.to_string(),
            "Unknown index type \"HASH\". Known index types are PRIMARY, UNIQUE, INDEX."
        );
    }

    #[test]
    fn test_column_not_found_message() {
        let err = SchemaError::column_not_found("testTable", "test");
        assert_eq!(
            err.to_string(),
            "Table \"testTable\" has no column with name \"test\"."
        );
    }

    #[test]
    fn test_index_not_found_message() {
        let err = SchemaError::index_not_found("testTable", "test");
        assert_eq!(
            err.to_string(),
            "Table \"testTable\" has no index with name \"test\"."
        );
    }

    #[test]
    fn test_table_not_found_message() {
        let err = SchemaError::TableNotFound {
            name: "missing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Schema has no table with name \"missing\"."
        );
    }
}
