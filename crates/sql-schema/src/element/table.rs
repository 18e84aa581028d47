//! Table element, the aggregate root.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::{json, Value};

use crate::error::{Result, SchemaError};

use super::column::Column;
use super::foreign_key::ForeignKey;
use super::index::Index;
use super::primary_key::PrimaryKey;

#[derive(Debug, Default)]
pub(crate) struct TableState {
    name: Option<String>,
    primary_key: Option<PrimaryKey>,
    columns: Vec<Column>,
    foreign_keys: Vec<ForeignKey>,
    indexes: Vec<Index>,
}

/// The aggregate root: a name, zero-or-one primary key, and ordered
/// sequences of columns, foreign keys and indexes.
///
/// The table owns its children and is the only place their back-references
/// are maintained. Replacing a collection clears the back-reference of every
/// child no longer present and sets it on every new child; membership is
/// decided by handle identity, and sequence order is preserved because it is
/// part of the serialization contract.
#[derive(Clone)]
pub struct Table {
    pub(crate) inner: Rc<RefCell<TableState>>,
}

impl Table {
    /// Create an empty, unnamed table.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(TableState::default())),
        }
    }

    pub(crate) fn from_inner(inner: Rc<RefCell<TableState>>) -> Self {
        Self { inner }
    }

    /// The table name, if set.
    pub fn name(&self) -> Option<String> {
        self.inner.borrow().name.clone()
    }

    /// Set the table name.
    pub fn set_name(&self, name: impl Into<String>) -> &Self {
        self.inner.borrow_mut().name = Some(name.into());
        self
    }

    /// The current primary key, if any.
    pub fn primary_key(&self) -> Option<PrimaryKey> {
        self.inner.borrow().primary_key.clone()
    }

    /// Replace the primary key.
    ///
    /// The previous key's back-reference is cleared; a non-null new key has
    /// its back-reference set to this table (vacating any other table it
    /// belonged to).
    pub fn set_primary_key(&self, primary_key: Option<PrimaryKey>) -> &Self {
        let previous = self.inner.borrow().primary_key.clone();
        if let Some(previous) = previous {
            previous.detach();
        }
        if let Some(primary_key) = &primary_key {
            primary_key.attach_to(self);
        }
        self.inner.borrow_mut().primary_key = primary_key;
        self
    }

    /// The columns, in order.
    pub fn columns(&self) -> Vec<Column> {
        self.inner.borrow().columns.clone()
    }

    /// Replace the whole column collection.
    pub fn set_columns(&self, columns: Vec<Column>) -> &Self {
        let previous = self.inner.borrow().columns.clone();
        for old in &previous {
            if !columns.contains(old) {
                old.detach();
            }
        }
        for column in &columns {
            column.attach_to(self);
        }
        self.inner.borrow_mut().columns = columns;
        self
    }

    /// Append a column and take ownership of it.
    pub fn add_column(&self, column: Column) -> &Self {
        column.attach_to(self);
        self.inner.borrow_mut().columns.push(column);
        self
    }

    /// The indexes, in order.
    pub fn indexes(&self) -> Vec<Index> {
        self.inner.borrow().indexes.clone()
    }

    /// Replace the whole index collection.
    pub fn set_indexes(&self, indexes: Vec<Index>) -> &Self {
        let previous = self.inner.borrow().indexes.clone();
        for old in &previous {
            if !indexes.contains(old) {
                old.detach();
            }
        }
        for index in &indexes {
            index.attach_to(self);
        }
        self.inner.borrow_mut().indexes = indexes;
        self
    }

    /// Append an index and take ownership of it.
    pub fn add_index(&self, index: Index) -> &Self {
        index.attach_to(self);
        self.inner.borrow_mut().indexes.push(index);
        self
    }

    /// The foreign keys, in order.
    pub fn foreign_keys(&self) -> Vec<ForeignKey> {
        self.inner.borrow().foreign_keys.clone()
    }

    /// Replace the whole foreign-key collection.
    pub fn set_foreign_keys(&self, foreign_keys: Vec<ForeignKey>) -> &Self {
        let previous = self.inner.borrow().foreign_keys.clone();
        for old in &previous {
            if !foreign_keys.contains(old) {
                old.detach();
            }
        }
        for foreign_key in &foreign_keys {
            foreign_key.attach_to(self);
        }
        self.inner.borrow_mut().foreign_keys = foreign_keys;
        self
    }

    /// Append a foreign key and take ownership of it.
    pub fn add_foreign_key(&self, foreign_key: ForeignKey) -> &Self {
        foreign_key.attach_to(self);
        self.inner.borrow_mut().foreign_keys.push(foreign_key);
        self
    }

    /// Identity-based membership test: is this exact column handle in the
    /// column sequence?
    pub fn has_column(&self, column: &Column) -> bool {
        self.inner.borrow().columns.contains(column)
    }

    /// Name-based existence test against the column sequence.
    pub fn has_column_with_name(&self, name: &str) -> bool {
        self.inner
            .borrow()
            .columns
            .iter()
            .any(|column| column.name_is(name))
    }

    /// Name-based existence test against the index sequence.
    pub fn has_index_with_name(&self, name: &str) -> bool {
        self.inner
            .borrow()
            .indexes
            .iter()
            .any(|index| index.name_is(name))
    }

    /// First column with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ColumnNotFound`] naming this table and the
    /// requested identifier when no column matches.
    pub fn column_with_name(&self, name: &str) -> Result<Column> {
        self.inner
            .borrow()
            .columns
            .iter()
            .find(|column| column.name_is(name))
            .cloned()
            .ok_or_else(|| SchemaError::column_not_found(self.name().unwrap_or_default(), name))
    }

    /// First index with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::IndexNotFound`] naming this table and the
    /// requested identifier when no index matches.
    pub fn index_with_name(&self, name: &str) -> Result<Index> {
        self.inner
            .borrow()
            .indexes
            .iter()
            .find(|index| index.name_is(name))
            .cloned()
            .ok_or_else(|| SchemaError::index_not_found(self.name().unwrap_or_default(), name))
    }

    /// True iff the table has a primary key whose column names equal
    /// `names`, in order.
    pub fn has_primary_key_with_columns_named(&self, names: &[&str]) -> bool {
        match self.primary_key() {
            Some(primary_key) => primary_key.has_columns_named(names),
            None => false,
        }
    }

    /// True iff some foreign key has exactly this local-column-name
    /// sequence, referenced-table name, and referenced-column-name sequence
    /// (both sequences order-sensitive).
    pub fn has_foreign_key_with_columns_and_referenced_columns_named(
        &self,
        columns: &[&str],
        referenced_table: &str,
        referenced_columns: &[&str],
    ) -> bool {
        self.foreign_keys()
            .iter()
            .any(|foreign_key| foreign_key.matches_names(columns, referenced_table, referenced_columns))
    }

    /// Serialize to the canonical nested representation.
    ///
    /// Keys, in order: `name`, `columns`, `primaryKey` (or null), `indexes`,
    /// `foreignKeys`; every sequence keeps its declared order. This is the
    /// wire contract consumed by diffing and code-generation tooling.
    pub fn to_value(&self) -> Value {
        let state = self.inner.borrow();
        let columns: Vec<Value> = state.columns.iter().map(Column::to_value).collect();
        let primary_key = state
            .primary_key
            .as_ref()
            .map(PrimaryKey::to_value)
            .unwrap_or(Value::Null);
        let indexes: Vec<Value> = state.indexes.iter().map(Index::to_value).collect();
        let foreign_keys: Vec<Value> = state
            .foreign_keys
            .iter()
            .map(ForeignKey::to_value)
            .collect();
        json!({
            "name": state.name.clone(),
            "columns": columns,
            "primaryKey": primary_key,
            "indexes": indexes,
            "foreignKeys": foreign_keys,
        })
    }

    /// Drop the exact column handle from the column sequence, without
    /// touching its back-reference. Used for ownership transfer.
    pub(crate) fn release_column(&self, column: &Column) {
        self.inner.borrow_mut().columns.retain(|c| c != column);
    }

    /// Drop the exact index handle from the index sequence.
    pub(crate) fn release_index(&self, index: &Index) {
        self.inner.borrow_mut().indexes.retain(|i| i != index);
    }

    /// Drop the exact foreign-key handle from the foreign-key sequence.
    pub(crate) fn release_foreign_key(&self, foreign_key: &ForeignKey) {
        self.inner
            .borrow_mut()
            .foreign_keys
            .retain(|fk| fk != foreign_key);
    }

    /// Vacate the primary-key slot if it holds exactly this key handle.
    pub(crate) fn release_primary_key(&self, primary_key: &PrimaryKey) {
        let mut state = self.inner.borrow_mut();
        if state.primary_key.as_ref() == Some(primary_key) {
            state.primary_key = None;
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle identity, not structural equality.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Table {}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("Table")
            .field("name", &state.name)
            .field("columns", &state.columns.len())
            .field("primary_key", &state.primary_key.is_some())
            .field("indexes", &state.indexes.len())
            .field("foreign_keys", &state.foreign_keys.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_column(name: &str) -> Column {
        let column = Column::new();
        column.set_name(name);
        column
    }

    #[test]
    fn test_new_table_is_empty() {
        let table = Table::new();
        assert_eq!(table.name(), None);
        assert!(table.primary_key().is_none());
        assert!(table.columns().is_empty());
        assert!(table.foreign_keys().is_empty());
        assert!(table.indexes().is_empty());
    }

    #[test]
    fn test_set_columns_sets_back_references() {
        let table = Table::new();
        let column = named_column("a");

        table.set_columns(vec![column.clone()]);
        assert_eq!(column.table(), Some(table.clone()));
        assert!(table.has_column(&column));
    }

    #[test]
    fn test_set_columns_clears_dropped_back_references() {
        let table = Table::new();
        let kept = named_column("kept");
        let dropped = named_column("dropped");

        table.set_columns(vec![kept.clone(), dropped.clone()]);
        table.set_columns(vec![kept.clone()]);

        assert_eq!(kept.table(), Some(table.clone()));
        assert!(dropped.table().is_none());
        assert!(!table.has_column(&dropped));
    }

    #[test]
    fn test_set_primary_key_both_sides() {
        let table = Table::new();
        let pk = PrimaryKey::new();

        table.set_primary_key(Some(pk.clone()));
        assert_eq!(pk.table(), Some(table.clone()));
        assert_eq!(table.primary_key(), Some(pk.clone()));

        table.set_primary_key(None);
        assert!(pk.table().is_none());
        assert!(table.primary_key().is_none());
    }

    #[test]
    fn test_column_cannot_belong_to_two_tables() {
        let first = Table::new();
        first.set_name("first");
        let second = Table::new();
        second.set_name("second");
        let column = named_column("shared");

        first.set_columns(vec![column.clone()]);
        second.set_columns(vec![column.clone()]);

        assert_eq!(column.table(), Some(second.clone()));
        assert!(!first.has_column(&column));
        assert!(second.has_column(&column));
    }

    #[test]
    fn test_primary_key_cannot_belong_to_two_tables() {
        let first = Table::new();
        let second = Table::new();
        let pk = PrimaryKey::new();

        first.set_primary_key(Some(pk.clone()));
        second.set_primary_key(Some(pk.clone()));

        assert_eq!(pk.table(), Some(second.clone()));
        assert!(first.primary_key().is_none());
        assert_eq!(second.primary_key(), Some(pk));
    }

    #[test]
    fn test_add_foreign_key_appends_and_attaches() {
        let table = Table::new();
        let first = ForeignKey::new();
        let second = ForeignKey::new();

        table.add_foreign_key(first.clone());
        table.add_foreign_key(second.clone());

        assert_eq!(table.foreign_keys(), vec![first.clone(), second.clone()]);
        assert_eq!(first.table(), Some(table.clone()));
        assert_eq!(second.table(), Some(table));
    }

    #[test]
    fn test_set_indexes_replaces_and_reattaches() {
        let table = Table::new();
        let old = Index::new();
        let new = Index::new();

        table.set_indexes(vec![old.clone()]);
        table.set_indexes(vec![new.clone()]);

        assert!(old.table().is_none());
        assert_eq!(new.table(), Some(table.clone()));
        assert_eq!(table.indexes(), vec![new]);
    }

    #[test]
    fn test_has_column_is_identity_based() {
        let table = Table::new();
        let in_table = named_column("name");
        let twin = named_column("name");

        table.set_columns(vec![in_table.clone()]);

        assert!(table.has_column(&in_table));
        assert!(!table.has_column(&twin));
        // ...while the name-based test matches both ways.
        assert!(table.has_column_with_name("name"));
    }

    #[test]
    fn test_has_column_with_name_on_empty_table() {
        let table = Table::new();
        assert!(!table.has_column_with_name("anything"));
    }

    #[test]
    fn test_column_with_name_returns_first_match() {
        let table = Table::new();
        let first = named_column("dup");
        let second = named_column("dup");
        table.set_columns(vec![first.clone(), second]);

        assert_eq!(table.column_with_name("dup").unwrap(), first);
    }

    #[test]
    fn test_column_with_name_error_names_table_and_identifier() {
        let table = Table::new();
        table.set_name("testTable");

        let err = table.column_with_name("test").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Table \"testTable\" has no column with name \"test\"."
        );
    }

    #[test]
    fn test_index_with_name_error_names_table_and_identifier() {
        let table = Table::new();
        table.set_name("testTable");

        let err = table.index_with_name("test").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Table \"testTable\" has no index with name \"test\"."
        );
    }

    #[test]
    fn test_has_primary_key_with_columns_named() {
        let table = Table::new();
        assert!(!table.has_primary_key_with_columns_named(&["test"]));

        let pk = PrimaryKey::new();
        pk.set_columns(vec![named_column("test"), named_column("test2")]);
        table.set_primary_key(Some(pk));

        assert!(table.has_primary_key_with_columns_named(&["test", "test2"]));
        assert!(!table.has_primary_key_with_columns_named(&["test2", "test"]));
        assert!(!table.has_primary_key_with_columns_named(&["test"]));
    }

    #[test]
    fn test_has_foreign_key_with_columns_and_referenced_columns_named() {
        let other = Table::new();
        other.set_name("other_table");

        let table = Table::new();
        let fk = ForeignKey::new();
        fk.set_columns(vec![named_column("fk_col")])
            .set_referenced_table(&other)
            .set_referenced_columns(vec![named_column("other_col")]);
        table.add_foreign_key(fk);

        assert!(table.has_foreign_key_with_columns_and_referenced_columns_named(
            &["fk_col"],
            "other_table",
            &["other_col"],
        ));
        assert!(!table.has_foreign_key_with_columns_and_referenced_columns_named(
            &["fk_col"],
            "other_table",
            &["wrong_col"],
        ));
    }

    #[test]
    fn test_to_value_key_order() {
        let table = Table::new();
        let value = table.to_value();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            ["name", "columns", "primaryKey", "indexes", "foreignKeys"]
        );
    }

    #[test]
    fn test_to_value_empty_table() {
        let table = Table::new();
        table.set_name("empty");
        assert_eq!(
            table.to_value(),
            json!({
                "name": "empty",
                "columns": [],
                "primaryKey": null,
                "indexes": [],
                "foreignKeys": [],
            })
        );
    }
}
