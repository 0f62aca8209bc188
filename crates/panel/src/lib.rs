//! `cellpreview-panel`: headless model of the preview panel.
//!
//! Turns cursor snapshots, record actions and settings into a [`PanelStatus`]:
//! a message to show, or the preview to embed.

pub mod panel;
pub mod status;

pub use panel::PreviewPanel;
pub use status::PanelStatus;

pub use cellpreview_resolver::{FramePolicy, Preview, Service};
