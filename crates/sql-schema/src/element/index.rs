//! Index element.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde_json::{json, Value};

use crate::dialect::Dialect;
use crate::error::{Result, SchemaError};

use super::column::Column;
use super::table::{Table, TableState};

#[derive(Debug, Default)]
struct IndexState {
    name: Option<String>,
    kind: Option<String>,
    columns: Vec<Column>,
    table: Weak<RefCell<TableState>>,
}

/// A named, typed, ordered set of column references.
///
/// The kind token is drawn from a dialect-specific vocabulary and validated
/// on assignment; this is the one input-validation point in the element
/// model. Name uniqueness within a table is a caller responsibility — the
/// model only guarantees that lookup by name returns the first match.
#[derive(Debug, Clone)]
pub struct Index {
    inner: Rc<RefCell<IndexState>>,
}

impl Index {
    /// Create a detached, untyped index.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(IndexState::default())),
        }
    }

    /// The index name, if set.
    pub fn name(&self) -> Option<String> {
        self.inner.borrow().name.clone()
    }

    /// Set the index name.
    pub fn set_name(&self, name: impl Into<String>) -> &Self {
        self.inner.borrow_mut().name = Some(name.into());
        self
    }

    /// The kind token, if set.
    pub fn kind(&self) -> Option<String> {
        self.inner.borrow().kind.clone()
    }

    /// Set the kind token, validated against `dialect`'s vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownIndexKind`] if the token is not in the
    /// vocabulary; the index is left untouched in that case.
    pub fn set_kind(&self, kind: impl Into<String>, dialect: &dyn Dialect) -> Result<&Self> {
        let kind = kind.into();
        if !dialect.index_kinds().iter().any(|known| *known == kind) {
            return Err(SchemaError::unknown_index_kind(kind, dialect.index_kinds()));
        }
        self.inner.borrow_mut().kind = Some(kind);
        Ok(self)
    }

    /// The indexed columns, in order.
    pub fn columns(&self) -> Vec<Column> {
        self.inner.borrow().columns.clone()
    }

    /// Replace the column list.
    pub fn set_columns(&self, columns: Vec<Column>) -> &Self {
        self.inner.borrow_mut().columns = columns;
        self
    }

    /// Append a column to the index.
    pub fn add_column(&self, column: Column) -> &Self {
        self.inner.borrow_mut().columns.push(column);
        self
    }

    /// The table currently owning this index, if any.
    pub fn table(&self) -> Option<Table> {
        self.inner.borrow().table.upgrade().map(Table::from_inner)
    }

    /// Serialize to the canonical nested representation.
    ///
    /// Keys, in order: `name`, `kind`, `columns` (names only).
    pub fn to_value(&self) -> Value {
        let state = self.inner.borrow();
        json!({
            "name": state.name.clone(),
            "kind": state.kind.clone(),
            "columns": super::column_names(&state.columns),
        })
    }

    /// Name comparison helper for the table's name-based lookups.
    pub(crate) fn name_is(&self, name: &str) -> bool {
        self.inner.borrow().name.as_deref() == Some(name)
    }

    /// Point the back-reference at `table`, detaching from any previous
    /// owner first. Only called by the owning table's mutators.
    pub(crate) fn attach_to(&self, table: &Table) {
        if let Some(current) = self.table() {
            if current != *table {
                tracing::debug!(
                    index = ?self.inner.borrow().name,
                    from = ?current.name(),
                    to = ?table.name(),
                    "index changes owning table"
                );
                current.release_index(self);
            }
        }
        self.inner.borrow_mut().table = Rc::downgrade(&table.inner);
    }

    /// Clear the back-reference. Only called by the owning table's mutators.
    pub(crate) fn detach(&self) {
        self.inner.borrow_mut().table = Weak::new();
    }
}

impl Default for Index {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle identity, not structural equality.
impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Index {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MySqlDialect;

    fn named_column(name: &str) -> Column {
        let column = Column::new();
        column.set_name(name);
        column
    }

    #[test]
    fn test_set_kind_accepts_vocabulary_tokens() {
        let dialect = MySqlDialect::new();
        let index = Index::new();

        for kind in ["PRIMARY", "UNIQUE", "INDEX", "FULLTEXT", "SPATIAL"] {
            index.set_kind(kind, &dialect).unwrap();
            assert_eq!(index.kind().as_deref(), Some(kind));
        }
    }

    #[test]
    fn test_set_kind_rejects_unknown_token() {
        let dialect = MySqlDialect::new();
        let index = Index::new();
        index.set_name("idx");

        let err = index.set_kind("BTREE", &dialect).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown index type \"BTREE\". Known index types are \
             PRIMARY, UNIQUE, INDEX, FULLTEXT, SPATIAL."
        );
        // Rejected assignment must not mutate anything.
        assert_eq!(index.kind(), None);
        assert_eq!(index.name().as_deref(), Some("idx"));
    }

    #[test]
    fn test_set_kind_is_case_sensitive() {
        let dialect = MySqlDialect::new();
        let index = Index::new();
        assert!(index.set_kind("unique", &dialect).is_err());
    }

    #[test]
    fn test_to_value_shape() {
        let dialect = MySqlDialect::new();
        let index = Index::new();
        index
            .set_name("unique_dept_name")
            .set_columns(vec![named_column("dept_name")]);
        index.set_kind("UNIQUE", &dialect).unwrap();

        assert_eq!(
            index.to_value(),
            json!({
                "name": "unique_dept_name",
                "kind": "UNIQUE",
                "columns": ["dept_name"],
            })
        );
    }

    #[test]
    fn test_to_value_key_order() {
        let index = Index::new();
        let value = index.to_value();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["name", "kind", "columns"]);
    }
}
