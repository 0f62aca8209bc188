//! `cellpreview-core`: host data model seen by the preview panel.
//!
//! Tables, fields, views and records belong to the host application; this
//! crate only describes how the panel reads them.

pub mod memory;
pub mod model;
pub mod selection;

pub use memory::MemoryBase;
pub use model::{CursorState, FieldInfo, FieldKind, RecordSource, Schema, TableInfo, ViewKind};
pub use selection::{SelectionCache, SelectionChange};
