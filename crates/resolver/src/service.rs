//! Supported preview services.

use serde::{Deserialize, Serialize};

/// Link offered to users who want a service added.
pub const REQUEST_SERVICE_URL: &str = "https://airtable.com/shrQSwIety6rqfJZX";

/// Help article for creating Airtable share links.
pub const SHARE_LINK_HELP_URL: &str =
    "https://support.airtable.com/hc/en-us/articles/205752117-Creating-a-base-share-link-or-a-view-share-link";

/// A service whose links can be turned into an embed URL.
///
/// Variants are declared in resolution precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Airtable,
    #[serde(rename = "youtube")]
    YouTube,
    Vimeo,
    Spotify,
    #[serde(rename = "soundcloud")]
    SoundCloud,
    Figma,
}

impl Service {
    /// All services, in the order recognizers are tried.
    pub const ALL: [Service; 6] = [
        Service::Airtable,
        Service::YouTube,
        Service::Vimeo,
        Service::Spotify,
        Service::SoundCloud,
        Service::Figma,
    ];

    /// Stable identifier (matches the serde representation)
    pub fn id(&self) -> &'static str {
        match self {
            Service::Airtable => "airtable",
            Service::YouTube => "youtube",
            Service::Vimeo => "vimeo",
            Service::Spotify => "spotify",
            Service::SoundCloud => "soundcloud",
            Service::Figma => "figma",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Service::Airtable => "Airtable share links",
            Service::YouTube => "YouTube",
            Service::Vimeo => "Vimeo",
            Service::Spotify => "Spotify",
            Service::SoundCloud => "SoundCloud",
            Service::Figma => "Figma",
        }
    }

    /// Look up a service by its stable identifier.
    pub fn from_id(id: &str) -> Option<Service> {
        Service::ALL.into_iter().find(|s| s.id() == id)
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The "supported services" sentence: share links first, the rest alphabetical.
pub fn supported_services_summary() -> String {
    let mut others: Vec<&str> = Service::ALL
        .iter()
        .filter(|s| **s != Service::Airtable)
        .map(|s| s.label())
        .collect();
    others.sort_unstable();

    let mut labels = vec![Service::Airtable.label()];
    labels.extend(others);
    labels.join(", ")
}
