//! Column element.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde_json::{json, Map, Value};

use super::table::{Table, TableState};

#[derive(Debug, Default)]
struct ColumnState {
    name: Option<String>,
    data_type: Option<String>,
    nullable: bool,
    parameters: Map<String, Value>,
    auto_incrementable: bool,
    table: Weak<RefCell<TableState>>,
}

/// A single table column: name, data type token, nullability, a map of
/// driver-specific parameters (e.g. length) and an auto-increment flag.
///
/// Data-type tokens are not validated at this layer; that is a driver
/// concern. Mutators are fluent so a column can be configured in one chain:
///
/// ```
/// use sql_schema::Column;
///
/// let column = Column::new();
/// column
///     .set_name("dept_no")
///     .set_data_type("VARCHAR")
///     .set_nullable(false)
///     .set_parameter("length", 4);
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    inner: Rc<RefCell<ColumnState>>,
}

impl Column {
    /// Create a detached column with no name or data type.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ColumnState::default())),
        }
    }

    /// The column name, if set.
    pub fn name(&self) -> Option<String> {
        self.inner.borrow().name.clone()
    }

    /// Set the column name.
    pub fn set_name(&self, name: impl Into<String>) -> &Self {
        self.inner.borrow_mut().name = Some(name.into());
        self
    }

    /// The data type token, if set.
    pub fn data_type(&self) -> Option<String> {
        self.inner.borrow().data_type.clone()
    }

    /// Set the data type token (e.g. `VARCHAR`, `INT`).
    pub fn set_data_type(&self, data_type: impl Into<String>) -> &Self {
        self.inner.borrow_mut().data_type = Some(data_type.into());
        self
    }

    /// Whether the column accepts NULL.
    pub fn is_nullable(&self) -> bool {
        self.inner.borrow().nullable
    }

    /// Set the nullability flag.
    pub fn set_nullable(&self, nullable: bool) -> &Self {
        self.inner.borrow_mut().nullable = nullable;
        self
    }

    /// The driver-specific parameter map, in insertion order.
    pub fn parameters(&self) -> Map<String, Value> {
        self.inner.borrow().parameters.clone()
    }

    /// Replace the whole parameter map.
    pub fn set_parameters(&self, parameters: Map<String, Value>) -> &Self {
        self.inner.borrow_mut().parameters = parameters;
        self
    }

    /// Set a single driver-specific parameter, e.g. `length`.
    pub fn set_parameter(&self, key: impl Into<String>, value: impl Into<Value>) -> &Self {
        self.inner
            .borrow_mut()
            .parameters
            .insert(key.into(), value.into());
        self
    }

    /// Whether the column is auto-incrementable.
    pub fn is_auto_incrementable(&self) -> bool {
        self.inner.borrow().auto_incrementable
    }

    /// Set the auto-increment flag.
    pub fn set_auto_incrementable(&self, auto_incrementable: bool) -> &Self {
        self.inner.borrow_mut().auto_incrementable = auto_incrementable;
        self
    }

    /// The table currently owning this column, if any.
    pub fn table(&self) -> Option<Table> {
        self.inner.borrow().table.upgrade().map(Table::from_inner)
    }

    /// Serialize to the canonical nested representation.
    ///
    /// Keys, in order: `name`, `dataType`, `nullable`, `parameters`,
    /// `autoIncrementable`. Parameters keep their insertion order.
    pub fn to_value(&self) -> Value {
        let state = self.inner.borrow();
        json!({
            "name": state.name.clone(),
            "dataType": state.data_type.clone(),
            "nullable": state.nullable,
            "parameters": state.parameters.clone(),
            "autoIncrementable": state.auto_incrementable,
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
                    column = ?self.inner.borrow().name,
                    from = ?current.name(),
                    to = ?table.name(),
                    "column changes owning table"
                );
                current.release_column(self);
            }
        }
        self.inner.borrow_mut().table = Rc::downgrade(&table.inner);
    }

    /// Clear the back-reference. Only called by the owning table's mutators.
    pub(crate) fn detach(&self) {
        self.inner.borrow_mut().table = Weak::new();
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle identity, not structural equality: two handles are equal iff they
/// refer to the same column.
impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Column {}
