//! In-memory host model.
//!
//! Backs the CLI's CSV tables and the test suites. Insertion order of tables,
//! fields and records is preserved.

use std::collections::HashMap;

use crate::model::{FieldInfo, FieldKind, RecordSource, Schema, TableInfo, ViewKind};

#[derive(Debug, Clone)]
struct MemoryTable {
    info: TableInfo,
    fields: Vec<FieldInfo>,
    views: Vec<(String, ViewKind)>,
    /// record id -> (field id -> text)
    records: Vec<(String, HashMap<String, String>)>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBase {
    tables: Vec<MemoryTable>,
}

impl MemoryBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(&mut self, id: impl Into<String>, name: impl Into<String>) -> &mut Self {
        self.tables.push(MemoryTable {
            info: TableInfo { id: id.into(), name: name.into() },
            fields: Vec::new(),
            views: Vec::new(),
            records: Vec::new(),
        });
        self
    }

    pub fn add_field(
        &mut self,
        table_id: &str,
        id: impl Into<String>,
        name: impl Into<String>,
        kind: FieldKind,
    ) -> &mut Self {
        if let Some(table) = self.table_mut(table_id) {
            table.fields.push(FieldInfo { id: id.into(), name: name.into(), kind });
        }
        self
    }

    pub fn add_view(&mut self, table_id: &str, id: impl Into<String>, kind: ViewKind) -> &mut Self {
        if let Some(table) = self.table_mut(table_id) {
            table.views.push((id.into(), kind));
        }
        self
    }

    /// Add a record. `cells` are (field id, text) pairs; unlisted fields are empty.
    pub fn add_record<I, K, V>(&mut self, table_id: &str, id: impl Into<String>, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        if let Some(table) = self.table_mut(table_id) {
            let cells = cells.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
            table.records.push((id.into(), cells));
        }
        self
    }

    pub fn remove_field(&mut self, table_id: &str, field_id: &str) -> &mut Self {
        if let Some(table) = self.table_mut(table_id) {
            table.fields.retain(|f| f.id != field_id);
        }
        self
    }

    pub fn remove_record(&mut self, record_id: &str) -> &mut Self {
        for table in &mut self.tables {
            table.records.retain(|(id, _)| id != record_id);
        }
        self
    }

    pub fn fields(&self, table_id: &str) -> &[FieldInfo] {
        self.table_ref(table_id).map(|t| t.fields.as_slice()).unwrap_or(&[])
    }

    /// Record ids of a table, in insertion order.
    pub fn record_ids(&self, table_id: &str) -> Vec<&str> {
        self.table_ref(table_id)
            .map(|t| t.records.iter().map(|(id, _)| id.as_str()).collect())
            .unwrap_or_default()
    }

    /// Find a field by id or, failing that, by name (case-insensitive).
    pub fn find_field(&self, table_id: &str, id_or_name: &str) -> Option<&FieldInfo> {
        let fields = self.fields(table_id);
        fields
            .iter()
            .find(|f| f.id == id_or_name)
            .or_else(|| fields.iter().find(|f| f.name.eq_ignore_ascii_case(id_or_name)))
    }

    fn table_ref(&self, table_id: &str) -> Option<&MemoryTable> {
        self.tables.iter().find(|t| t.info.id == table_id)
    }

    fn table_mut(&mut self, table_id: &str) -> Option<&mut MemoryTable> {
        self.tables.iter_mut().find(|t| t.info.id == table_id)
    }
}

impl Schema for MemoryBase {
    fn table(&self, table_id: &str) -> Option<TableInfo> {
        self.table_ref(table_id).map(|t| t.info.clone())
    }

    fn field(&self, table_id: &str, field_id: &str) -> Option<FieldInfo> {
        self.table_ref(table_id)?
            .fields
            .iter()
            .find(|f| f.id == field_id)
            .cloned()
    }

    fn view_kind(&self, table_id: &str, view_id: &str) -> Option<ViewKind> {
        self.table_ref(table_id)?
            .views
            .iter()
            .find(|(id, _)| id == view_id)
            .map(|(_, kind)| *kind)
    }
}

impl RecordSource for MemoryBase {
    fn record_table(&self, record_id: &str) -> Option<String> {
        self.tables
            .iter()
            .find(|t| t.records.iter().any(|(id, _)| id == record_id))
            .map(|t| t.info.id.clone())
    }

    fn cell_text(&self, table_id: &str, record_id: &str, field_id: &str) -> Option<String> {
        let table = self.table_ref(table_id)?;
        table.fields.iter().find(|f| f.id == field_id)?;
        let (_, cells) = table.records.iter().find(|(id, _)| id == record_id)?;
        Some(cells.get(field_id).cloned().unwrap_or_default())
    }
}
