use serde::{Deserialize, Serialize};

/// Kind of view the cursor is in. Previews follow cell selection only in grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Grid,
    Form,
    Calendar,
    Gallery,
    Kanban,
    Other,
}

/// Field types known to the preview panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    SingleLineText,
    MultilineText,
    RichText,
    Url,
    Email,
    Formula,
    Lookup,
    Number,
    Checkbox,
    Attachment,
    Other,
}

impl FieldKind {
    /// Field kinds that can hold a previewable URL as text.
    pub const URL_CAPABLE: [FieldKind; 6] = [
        FieldKind::SingleLineText,
        FieldKind::MultilineText,
        FieldKind::RichText,
        FieldKind::Url,
        FieldKind::Formula,
        FieldKind::Lookup,
    ];

    pub fn is_url_capable(&self) -> bool {
        Self::URL_CAPABLE.contains(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub id: String,
    pub name: String,
    pub kind: FieldKind,
}

/// Read-only view of the host's tables, fields and views.
///
/// Every lookup returns `None` for ids that no longer exist; tables and
/// fields can be deleted while the panel holds their ids.
pub trait Schema {
    fn table(&self, table_id: &str) -> Option<TableInfo>;

    fn field(&self, table_id: &str, field_id: &str) -> Option<FieldInfo>;

    fn view_kind(&self, table_id: &str, view_id: &str) -> Option<ViewKind>;
}

/// Read-only access to record contents.
pub trait RecordSource {
    /// Id of the table the record belongs to, or `None` if it was deleted.
    fn record_table(&self, record_id: &str) -> Option<String>;

    /// A cell rendered as text. Empty cells yield `Some("")`.
    fn cell_text(&self, table_id: &str, record_id: &str, field_id: &str) -> Option<String>;
}

/// Snapshot of the host cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorState {
    pub active_table_id: Option<String>,
    pub active_view_id: Option<String>,
    pub selected_record_ids: Vec<String>,
    pub selected_field_ids: Vec<String>,
}

impl CursorState {
    pub fn new(table_id: impl Into<String>, view_id: impl Into<String>) -> Self {
        Self {
            active_table_id: Some(table_id.into()),
            active_view_id: Some(view_id.into()),
            ..Self::default()
        }
    }

    /// Builder: select one cell
    pub fn with_cell(mut self, record_id: impl Into<String>, field_id: impl Into<String>) -> Self {
        self.selected_record_ids = vec![record_id.into()];
        self.selected_field_ids = vec![field_id.into()];
        self
    }

    /// Builder: select one record without a field (e.g. expanded record)
    pub fn with_record(mut self, record_id: impl Into<String>) -> Self {
        self.selected_record_ids = vec![record_id.into()];
        self
    }
}
