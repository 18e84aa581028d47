//! Foreign key element and referential actions.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::SchemaError;

use super::column::Column;
use super::table::{Table, TableState};

/// Behavior applied to dependent rows when a referenced row is deleted or
/// updated. Recorded by the model, never enforced by it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferentialAction {
    /// Reject the delete/update (the SQL default).
    #[default]
    #[serde(rename = "RESTRICT")]
    Restrict,
    /// Propagate the delete/update to dependent rows.
    #[serde(rename = "CASCADE")]
    Cascade,
    /// Set the referencing columns to NULL.
    #[serde(rename = "SET NULL")]
    SetNull,
    /// Defer the check to the end of the statement.
    #[serde(rename = "NO ACTION")]
    NoAction,
    /// Set the referencing columns to their default values.
    #[serde(rename = "SET DEFAULT")]
    SetDefault,
}

impl ReferentialAction {
    /// Every action, in vocabulary order.
    pub const ALL: [ReferentialAction; 5] = [
        ReferentialAction::Restrict,
        ReferentialAction::Cascade,
        ReferentialAction::SetNull,
        ReferentialAction::NoAction,
        ReferentialAction::SetDefault,
    ];

    /// The SQL token for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::SetDefault => "SET DEFAULT",
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferentialAction {
    type Err = SchemaError;

    /// Parse a SQL action token, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReferentialAction::ALL
            .iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| {
                let known: Vec<&str> =
                    ReferentialAction::ALL.iter().map(|a| a.as_str()).collect();
                SchemaError::unknown_referential_action(s, &known)
            })
    }
}

#[derive(Debug, Default)]
struct ForeignKeyState {
    columns: Vec<Column>,
    referenced_table: Weak<RefCell<TableState>>,
    referenced_columns: Vec<Column>,
    on_delete: ReferentialAction,
    on_update: ReferentialAction,
    table: Weak<RefCell<TableState>>,
}

/// An ordered set of local column references, a reference to another table,
/// a positionally matched ordered set of referenced column references, and
/// ON DELETE / ON UPDATE actions (both defaulting to RESTRICT).
///
/// The referenced table is held by a non-owning reference: the foreign key
/// never keeps that table alive, and serializes `referencedTable: null` if
/// it has been dropped. The model does not require the local and referenced
/// column lists to have equal length, nor that the referenced columns
/// actually belong to the referenced table; a length mismatch is logged at
/// warn level but accepted.
#[derive(Debug, Clone)]
pub struct ForeignKey {
    inner: Rc<RefCell<ForeignKeyState>>,
}

impl ForeignKey {
    /// Create a detached foreign key with RESTRICT/RESTRICT actions.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ForeignKeyState::default())),
        }
    }

    /// The local columns, in order.
    pub fn columns(&self) -> Vec<Column> {
        self.inner.borrow().columns.clone()
    }

    /// Replace the local column list.
    pub fn set_columns(&self, columns: Vec<Column>) -> &Self {
        self.inner.borrow_mut().columns = columns;
        self.warn_on_arity_mismatch();
        self
    }

    /// Append a local column.
    pub fn add_column(&self, column: Column) -> &Self {
        self.inner.borrow_mut().columns.push(column);
        self
    }

    /// The referenced table, if set and still alive.
    pub fn referenced_table(&self) -> Option<Table> {
        self.inner
            .borrow()
            .referenced_table
            .upgrade()
            .map(Table::from_inner)
    }

    /// Set the referenced table (non-owning reference).
    pub fn set_referenced_table(&self, table: &Table) -> &Self {
        self.inner.borrow_mut().referenced_table = Rc::downgrade(&table.inner);
        self
    }

    /// The referenced columns, in order.
    pub fn referenced_columns(&self) -> Vec<Column> {
        self.inner.borrow().referenced_columns.clone()
    }

    /// Replace the referenced column list.
    pub fn set_referenced_columns(&self, columns: Vec<Column>) -> &Self {
        self.inner.borrow_mut().referenced_columns = columns;
        self.warn_on_arity_mismatch();
        self
    }

    /// Append a referenced column.
    pub fn add_referenced_column(&self, column: Column) -> &Self {
        self.inner.borrow_mut().referenced_columns.push(column);
        self
    }

    /// The ON DELETE action.
    pub fn on_delete(&self) -> ReferentialAction {
        self.inner.borrow().on_delete
    }

    /// Set the ON DELETE action.
    pub fn set_on_delete(&self, action: ReferentialAction) -> &Self {
        self.inner.borrow_mut().on_delete = action;
        self
    }

    /// The ON UPDATE action.
    pub fn on_update(&self) -> ReferentialAction {
        self.inner.borrow().on_update
    }

    /// Set the ON UPDATE action.
    pub fn set_on_update(&self, action: ReferentialAction) -> &Self {
        self.inner.borrow_mut().on_update = action;
        self
    }

    /// The table currently owning this foreign key, if any.
    pub fn table(&self) -> Option<Table> {
        self.inner.borrow().table.upgrade().map(Table::from_inner)
    }

    /// Serialize to the canonical nested representation.
    ///
    /// Keys, in order: `columns`, `referencedTable` (name or null),
    /// `referencedColumns`, `onDelete`, `onUpdate`. Column lists are names
    /// only.
    pub fn to_value(&self) -> Value {
        let referenced_table = self.referenced_table().and_then(|table| table.name());
        let state = self.inner.borrow();
        json!({
            "columns": super::column_names(&state.columns),
            "referencedTable": referenced_table,
            "referencedColumns": super::column_names(&state.referenced_columns),
            "onDelete": state.on_delete,
            "onUpdate": state.on_update,
        })
    }

    /// Order-sensitive structural comparison used by the table's
    /// foreign-key lookup.
    pub(crate) fn matches_names(
        &self,
        columns: &[&str],
        referenced_table: &str,
        referenced_columns: &[&str],
    ) -> bool {
        let table_matches = self
            .referenced_table()
            .and_then(|table| table.name())
            .is_some_and(|name| name == referenced_table);
        if !table_matches {
            return false;
        }

        let state = self.inner.borrow();
        state.columns.len() == columns.len()
            && state.referenced_columns.len() == referenced_columns.len()
            && state
                .columns
                .iter()
                .zip(columns)
                .all(|(column, name)| column.name_is(name))
            && state
                .referenced_columns
                .iter()
                .zip(referenced_columns)
                .all(|(column, name)| column.name_is(name))
    }

    /// Point the back-reference at `table`, detaching from any previous
    /// owner first. Only called by the owning table's mutators.
    pub(crate) fn attach_to(&self, table: &Table) {
        if let Some(current) = self.table() {
            if current != *table {
                tracing::debug!(
                    from = ?current.name(),
                    to = ?table.name(),
                    "foreign key changes owning table"
                );
                current.release_foreign_key(self);
            }
        }
        self.inner.borrow_mut().table = Rc::downgrade(&table.inner);
    }

    /// Clear the back-reference. Only called by the owning table's mutators.
    pub(crate) fn detach(&self) {
        self.inner.borrow_mut().table = Weak::new();
    }

    fn warn_on_arity_mismatch(&self) {
        let state = self.inner.borrow();
        if !state.columns.is_empty()
            && !state.referenced_columns.is_empty()
            && state.columns.len() != state.referenced_columns.len()
        {
            tracing::warn!(
                local = state.columns.len(),
                referenced = state.referenced_columns.len(),
                "foreign key column lists have mismatched lengths"
            );
        }
    }
}

impl Default for ForeignKey {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle identity, not structural equality.
impl PartialEq for ForeignKey {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for ForeignKey {}
