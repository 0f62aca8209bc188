// Preview panel state machine.
//
// Inputs arrive from the host as cursor snapshots, record actions (button
// fields) and settings. The panel never reads host state on its own: every
// query takes the schema/records it should look at.

use cellpreview_config::{PreviewSettings, SettingsValidation, ENFORCE_LABEL};
use cellpreview_core::{CursorState, RecordSource, Schema, SelectionCache, ViewKind};

use crate::status::PanelStatus;

#[derive(Debug, Clone, Default)]
pub struct PreviewPanel {
    selection: SelectionCache,
    settings_open: bool,
    services_dialog_open: bool,
    record_action_error: Option<String>,
}

impl PreviewPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &SelectionCache {
        &self.selection
    }

    pub fn is_settings_open(&self) -> bool {
        self.settings_open
    }

    pub fn is_services_dialog_open(&self) -> bool {
        self.services_dialog_open
    }

    /// Message for the "Can't preview URL" dialog, if one is showing.
    pub fn record_action_error(&self) -> Option<&str> {
        self.record_action_error.as_deref()
    }

    /// Feed a cursor snapshot (selection, active table or view changed).
    pub fn observe_cursor(&mut self, cursor: &CursorState) {
        let change = self.selection.observe(cursor);
        if change.record_changed || change.cleared {
            self.on_record_changed();
        }
    }

    /// A record was opened from a button field.
    ///
    /// Ignored while settings are open; settings are guaranteed valid otherwise
    /// because invalid settings keep the form open.
    pub fn on_record_action<B: Schema>(
        &mut self,
        table_id: &str,
        record_id: &str,
        settings: &PreviewSettings,
        base: &B,
    ) {
        if self.settings_open {
            return;
        }

        if !settings.enforced {
            self.record_action_error = Some(format!(
                "You must enable \"{ENFORCE_LABEL}\" to preview URLs with a button field."
            ));
            return;
        }

        let validation = settings.validate(base);
        match validation.table {
            Some(table) if table.id == table_id => {
                if self.selection.select_record(record_id) {
                    self.on_record_changed();
                }
            }
            Some(table) => {
                log::debug!("record action from {} ignored, preview table is {}", table_id, table.id);
                self.record_action_error = Some(format!(
                    "This panel is set up to preview URLs using records from the \"{}\" table, but was opened from a different table.",
                    table.name
                ));
            }
            None => {
                log::debug!("record action from {} ignored, preview table not found", table_id);
            }
        }
    }

    /// Force the settings form open while settings are invalid.
    pub fn sync_settings(&mut self, validation: &SettingsValidation) {
        if !validation.is_valid && !self.settings_open {
            log::info!("opening settings: {}", validation.message.unwrap_or("invalid settings"));
            self.set_settings_open(true);
        }
    }

    /// The host's settings button.
    pub fn toggle_settings(&mut self) {
        self.set_settings_open(!self.settings_open);
    }

    /// The "Done" button. Refused (returns false) while settings are invalid.
    pub fn close_settings(&mut self, validation: &SettingsValidation) -> bool {
        if !validation.is_valid {
            return false;
        }
        self.set_settings_open(false);
        true
    }

    pub fn open_supported_services(&mut self) {
        self.services_dialog_open = true;
    }

    pub fn close_supported_services(&mut self) {
        self.services_dialog_open = false;
    }

    pub fn dismiss_error(&mut self) {
        self.record_action_error = None;
    }

    /// Decide what the panel shows for the current cursor.
    pub fn status<B: Schema + RecordSource>(
        &self,
        cursor: &CursorState,
        settings: &PreviewSettings,
        base: &B,
    ) -> PanelStatus {
        let Some(active_table) = cursor.active_table_id.as_deref().and_then(|id| base.table(id)) else {
            return PanelStatus::Hidden;
        };

        if self.settings_open {
            return PanelStatus::Settings;
        }

        let validation = settings.validate(base);
        if !validation.is_valid {
            return PanelStatus::Settings;
        }

        let table = match (settings.enforced, validation.table) {
            (true, Some(table)) => table,
            _ => active_table.clone(),
        };

        // Cached ids may refer to deleted fields or records, or to another table.
        let selected_field = self
            .selection
            .field_id()
            .and_then(|id| base.field(&table.id, id));
        let preview_field = match (settings.enforced, validation.field) {
            (true, Some(field)) => Some(field),
            _ => selected_field,
        };
        let selected_record = self
            .selection
            .record_id()
            .filter(|id| base.record_table(id).as_deref() == Some(table.id.as_str()));

        if settings.enforced && active_table.id != table.id && selected_record.is_none() {
            return PanelStatus::SwitchTable { table_name: table.name };
        }

        let in_grid = cursor
            .active_view_id
            .as_deref()
            .and_then(|view_id| base.view_kind(&active_table.id, view_id))
            == Some(ViewKind::Grid);
        if selected_record.is_none() && !in_grid {
            return PanelStatus::SwitchToGridView;
        }

        let (Some(record_id), Some(field)) = (selected_record, preview_field) else {
            return PanelStatus::SelectCell;
        };

        let text = base
            .cell_text(&table.id, record_id, &field.id)
            .unwrap_or_default();
        if text.is_empty() {
            return PanelStatus::FieldEmpty { field_name: field.name };
        }

        match cellpreview_resolver::resolve(text.as_str()) {
            Some(preview) => PanelStatus::Preview(preview),
            None => PanelStatus::NoPreview,
        }
    }

    fn set_settings_open(&mut self, open: bool) {
        self.settings_open = open;
        self.record_action_error = None;
    }

    fn on_record_changed(&mut self) {
        self.services_dialog_open = false;
        self.record_action_error = None;
    }
}
