//! Primary key element.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde_json::{json, Value};

use super::column::Column;
use super::table::{Table, TableState};

#[derive(Debug, Default)]
struct PrimaryKeyState {
    columns: Vec<Column>,
    table: Weak<RefCell<TableState>>,
}

/// An ordered set of column references forming a table's primary key.
///
/// A table has zero or one primary key. The columns are references into the
/// owning table's column list; the primary key itself does not own them and
/// does not touch their back-references.
#[derive(Debug, Clone)]
pub struct PrimaryKey {
    inner: Rc<RefCell<PrimaryKeyState>>,
}

impl PrimaryKey {
    /// Create a detached, empty primary key.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(PrimaryKeyState::default())),
        }
    }

    /// The columns of the key, in order.
    pub fn columns(&self) -> Vec<Column> {
        self.inner.borrow().columns.clone()
    }

    /// Replace the column list.
    pub fn set_columns(&self, columns: Vec<Column>) -> &Self {
        self.inner.borrow_mut().columns = columns;
        self
    }

    /// Append a column to the key.
    pub fn add_column(&self, column: Column) -> &Self {
        self.inner.borrow_mut().columns.push(column);
        self
    }

    /// The table currently owning this primary key, if any.
    pub fn table(&self) -> Option<Table> {
        self.inner.borrow().table.upgrade().map(Table::from_inner)
    }

    /// Serialize to the canonical nested representation: `{columns: [...]}`
    /// with columns listed by name only.
    pub fn to_value(&self) -> Value {
        let state = self.inner.borrow();
        json!({
            "columns": super::column_names(&state.columns),
        })
    }

    /// Order-sensitive comparison of the key's column names.
    pub(crate) fn has_columns_named(&self, names: &[&str]) -> bool {
        let state = self.inner.borrow();
        state.columns.len() == names.len()
            && state
                .columns
                .iter()
                .zip(names)
                .all(|(column, name)| column.name_is(name))
    }

    /// Point the back-reference at `table`, vacating any previous owner's
    /// primary-key slot first. Only called by the owning table's mutators.
    pub(crate) fn attach_to(&self, table: &Table) {
        if let Some(current) = self.table() {
            if current != *table {
                tracing::debug!(
                    from = ?current.name(),
                    to = ?table.name(),
                    "primary key changes owning table"
                );
                current.release_primary_key(self);
            }
        }
        self.inner.borrow_mut().table = Rc::downgrade(&table.inner);
    }

    /// Clear the back-reference. Only called by the owning table's mutators.
    pub(crate) fn detach(&self) {
        self.inner.borrow_mut().table = Weak::new();
    }
}

impl Default for PrimaryKey {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle identity, not structural equality.
impl PartialEq for PrimaryKey {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for PrimaryKey {}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_column(name: &str) -> Column {
        let column = Column::new();
        column.set_name(name);
        column
    }

    #[test]
    fn test_new_primary_key_is_empty() {
        let pk = PrimaryKey::new();
        assert!(pk.columns().is_empty());
        assert!(pk.table().is_none());
    }

    #[test]
    fn test_columns_keep_order() {
        let pk = PrimaryKey::new();
        pk.add_column(named_column("b")).add_column(named_column("a"));

        let names: Vec<_> = pk.columns().iter().map(|c| c.name().unwrap()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn test_to_value_lists_names_only() {
        let pk = PrimaryKey::new();
        pk.set_columns(vec![named_column("dept_no"), named_column("dept_name")]);

        assert_eq!(
            pk.to_value(),
            json!({ "columns": ["dept_no", "dept_name"] })
        );
    }

    #[test]
    fn test_has_columns_named_is_order_sensitive() {
        let pk = PrimaryKey::new();
        pk.set_columns(vec![named_column("test"), named_column("test2")]);

        assert!(pk.has_columns_named(&["test", "test2"]));
        assert!(!pk.has_columns_named(&["test2", "test"]));
        assert!(!pk.has_columns_named(&["test"]));
        assert!(!pk.has_columns_named(&["test", "test2", "test3"]));
    }
}
