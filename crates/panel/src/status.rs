use serde::Serialize;

use cellpreview_resolver::Preview;

/// What the panel should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PanelStatus {
    /// Nothing; the active table is briefly missing while the host switches tables
    Hidden,
    /// The settings form is open
    Settings,
    /// Enforced settings point at another table than the active one
    SwitchTable { table_name: String },
    /// No record is selected and the active view is not a grid
    SwitchToGridView,
    /// No record or no preview field selected yet
    SelectCell,
    FieldEmpty { field_name: String },
    /// The cell has text but no service recognizes it
    NoPreview,
    Preview(Preview),
}

impl PanelStatus {
    /// User-facing message, for statuses that show one.
    pub fn message(&self) -> Option<String> {
        match self {
            PanelStatus::Hidden | PanelStatus::Settings | PanelStatus::Preview(_) => None,
            PanelStatus::SwitchTable { table_name } => {
                Some(format!("Switch to the \u{201c}{table_name}\u{201d} table to see previews."))
            }
            PanelStatus::SwitchToGridView => Some("Switch to a grid view to see previews".to_string()),
            PanelStatus::SelectCell => Some("Select a cell to see a preview".to_string()),
            PanelStatus::FieldEmpty { field_name } => {
                Some(format!("The \u{201c}{field_name}\u{201d} field is empty"))
            }
            PanelStatus::NoPreview => Some("No preview".to_string()),
        }
    }

    /// Whether the "View supported URLs" button accompanies this status.
    pub fn offers_supported_services(&self) -> bool {
        matches!(
            self,
            PanelStatus::SelectCell | PanelStatus::FieldEmpty { .. } | PanelStatus::NoPreview
        )
    }

    /// Whether a "Settings" shortcut accompanies this status.
    pub fn offers_settings(&self) -> bool {
        matches!(self, PanelStatus::SwitchTable { .. })
    }

    pub fn embed_url(&self) -> Option<&str> {
        match self {
            PanelStatus::Preview(preview) => Some(&preview.embed_url),
            _ => None,
        }
    }
}
