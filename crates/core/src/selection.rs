// Cached cell selection.
//
// The preview keeps showing the last selected cell after the user clicks
// away (e.g. to resize the panel). Switching table or view drops the cache so
// an old preview never reappears without a selection.

use serde::Serialize;

use crate::model::CursorState;

/// What changed after observing a cursor snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionChange {
    pub record_changed: bool,
    pub field_changed: bool,
    pub cleared: bool,
}

impl SelectionChange {
    pub fn any(&self) -> bool {
        self.record_changed || self.field_changed || self.cleared
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionCache {
    record_id: Option<String>,
    field_id: Option<String>,
    #[serde(skip)]
    last_table_id: Option<String>,
    #[serde(skip)]
    last_view_id: Option<String>,
}

impl SelectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    pub fn field_id(&self) -> Option<&str> {
        self.field_id.as_deref()
    }

    /// Apply a cursor snapshot.
    ///
    /// A table or view switch clears the cache first. Then the first selected
    /// record and field (if any) replace the cached ones; empty selections
    /// keep whatever was cached.
    pub fn observe(&mut self, cursor: &CursorState) -> SelectionChange {
        let mut change = SelectionChange::default();

        if cursor.active_table_id != self.last_table_id || cursor.active_view_id != self.last_view_id {
            // The very first snapshot is not a switch.
            let first = self.last_table_id.is_none() && self.last_view_id.is_none();
            self.last_table_id = cursor.active_table_id.clone();
            self.last_view_id = cursor.active_view_id.clone();
            if !first {
                change.cleared = self.clear();
            }
        }

        if let Some(record_id) = cursor.selected_record_ids.first() {
            change.record_changed = self.select_record(record_id);
        }
        if let Some(field_id) = cursor.selected_field_ids.first() {
            if self.field_id.as_deref() != Some(field_id.as_str()) {
                self.field_id = Some(field_id.clone());
                change.field_changed = true;
            }
        }

        change
    }

    /// Select a record directly (button-field record actions).
    /// Returns true if the cached record changed.
    pub fn select_record(&mut self, record_id: &str) -> bool {
        if self.record_id.as_deref() == Some(record_id) {
            return false;
        }
        log::debug!("selected record {}", record_id);
        self.record_id = Some(record_id.to_string());
        true
    }

    /// Drop the cached record and field. Returns true if anything was cached.
    pub fn clear(&mut self) -> bool {
        let had_selection = self.record_id.is_some() || self.field_id.is_some();
        self.record_id = None;
        self.field_id = None;
        had_selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_selection_is_cached() {
        let mut cache = SelectionCache::new();
        let change = cache.observe(&CursorState::new("tbl1", "viw1").with_cell("rec1", "fld1"));
        assert!(change.record_changed);
        assert!(change.field_changed);
        assert!(!change.cleared);
        assert_eq!(cache.record_id(), Some("rec1"));
        assert_eq!(cache.field_id(), Some("fld1"));
    }

    #[test]
    fn test_deselect_keeps_cache() {
        let mut cache = SelectionCache::new();
        cache.observe(&CursorState::new("tbl1", "viw1").with_cell("rec1", "fld1"));
        let change = cache.observe(&CursorState::new("tbl1", "viw1"));
        assert!(!change.any());
        assert_eq!(cache.record_id(), Some("rec1"));
        assert_eq!(cache.field_id(), Some("fld1"));
    }

    #[test]
    fn test_multi_select_uses_first() {
        let mut cache = SelectionCache::new();
        let mut cursor = CursorState::new("tbl1", "viw1");
        cursor.selected_record_ids = vec!["recA".into(), "recB".into()];
        cursor.selected_field_ids = vec!["fldA".into(), "fldB".into()];
        cache.observe(&cursor);
        assert_eq!(cache.record_id(), Some("recA"));
        assert_eq!(cache.field_id(), Some("fldA"));
    }

    #[test]
    fn test_table_switch_clears() {
        let mut cache = SelectionCache::new();
        cache.observe(&CursorState::new("tbl1", "viw1").with_cell("rec1", "fld1"));
        let change = cache.observe(&CursorState::new("tbl2", "viw9"));
        assert!(change.cleared);
        assert_eq!(cache.record_id(), None);
        assert_eq!(cache.field_id(), None);

        // switching back does not resurrect the old preview
        cache.observe(&CursorState::new("tbl1", "viw1"));
        assert_eq!(cache.record_id(), None);
    }

    #[test]
    fn test_view_switch_clears() {
        let mut cache = SelectionCache::new();
        cache.observe(&CursorState::new("tbl1", "viw1").with_cell("rec1", "fld1"));
        cache.observe(&CursorState::new("tbl1", "viw2"));
        assert_eq!(cache.record_id(), None);
    }

    #[test]
    fn test_switch_with_new_selection_keeps_new_selection() {
        let mut cache = SelectionCache::new();
        cache.observe(&CursorState::new("tbl1", "viw1").with_cell("rec1", "fld1"));
        cache.observe(&CursorState::new("tbl2", "viw2").with_cell("rec2", "fld2"));
        assert_eq!(cache.record_id(), Some("rec2"));
        assert_eq!(cache.field_id(), Some("fld2"));
    }

    #[test]
    fn test_select_record_reports_change() {
        let mut cache = SelectionCache::new();
        assert!(cache.select_record("rec1"));
        assert!(!cache.select_record("rec1"));
        assert!(cache.select_record("rec2"));
    }
}
