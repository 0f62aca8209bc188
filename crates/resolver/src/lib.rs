//! `cellpreview-resolver`: turns a cell's text into an embeddable preview URL.
//!
//! Pure crate: no I/O, no state. Recognizers are tried in a fixed order and
//! the first one that produces a URL wins.
//!
//! ```
//! use cellpreview_resolver::resolve_preview_url;
//!
//! assert_eq!(
//!     resolve_preview_url("https://youtu.be/KYz2wyBy3kc").as_deref(),
//!     Some("https://www.youtube.com/embed/KYz2wyBy3kc"),
//! );
//! assert_eq!(resolve_preview_url("hello world"), None);
//! ```

pub mod recognizers;
pub mod service;

use serde::Serialize;

pub use service::{supported_services_summary, Service, REQUEST_SERVICE_URL, SHARE_LINK_HELP_URL};

/// A resolved preview: which service matched and the URL to embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub service: Service,
    pub embed_url: String,
}

/// Resolve a candidate string into a preview.
///
/// Empty or absent input returns `None` without consulting any recognizer.
pub fn resolve<'a>(candidate: impl Into<Option<&'a str>>) -> Option<Preview> {
    let text = candidate.into().filter(|s| !s.is_empty())?;

    for recognizer in recognizers::RECOGNIZERS {
        if let Some(embed_url) = (recognizer.convert)(text) {
            log::trace!("resolved {} preview for {:?}", recognizer.service.id(), text);
            return Some(Preview { service: recognizer.service, embed_url });
        }
    }

    None
}

/// Resolve a candidate string into an embed URL, or `None` if no service matches.
pub fn resolve_preview_url<'a>(candidate: impl Into<Option<&'a str>>) -> Option<String> {
    resolve(candidate).map(|p| p.embed_url)
}

/// Attributes the host should apply to the frame that loads an embed URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FramePolicy {
    /// Permissions-policy `allow` list
    pub allow: &'static str,
    pub allow_fullscreen: bool,
    pub frame_border: u8,
}

impl Default for FramePolicy {
    fn default() -> Self {
        Self {
            allow: "accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture",
            allow_fullscreen: true,
            frame_border: 0,
        }
    }
}
