//! Schema container.

use serde_json::{json, Value};

use crate::error::{Result, SchemaError};

use super::table::Table;

/// An ordered container of tables.
///
/// The schema holds table handles, so the same table can simultaneously sit
/// in a schema and be referenced by foreign keys of other tables. Unlike
/// [`Table`], the schema maintains no back-references, so it is a plain
/// owned value with `&mut self` mutators.
#[derive(Debug, Default)]
pub struct Schema {
    tables: Vec<Table>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tables, in order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Replace the table list.
    pub fn set_tables(&mut self, tables: Vec<Table>) -> &mut Self {
        self.tables = tables;
        self
    }

    /// Append a table.
    pub fn add_table(&mut self, table: Table) -> &mut Self {
        self.tables.push(table);
        self
    }

    /// Name-based existence test against the table sequence.
    pub fn has_table_with_name(&self, name: &str) -> bool {
        self.tables
            .iter()
            .any(|table| table.name().as_deref() == Some(name))
    }

    /// First table with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::TableNotFound`] when no table matches.
    pub fn table_with_name(&self, name: &str) -> Result<Table> {
        self.tables
            .iter()
            .find(|table| table.name().as_deref() == Some(name))
            .cloned()
            .ok_or_else(|| SchemaError::TableNotFound {
                name: name.to_string(),
            })
    }

    /// Serialize to the canonical nested representation:
    /// `{tables: [Table.to_value()…]}` in sequence order.
    pub fn to_value(&self) -> Value {
        let tables: Vec<Value> = self.tables.iter().map(Table::to_value).collect();
        json!({ "tables": tables })
    }
}
