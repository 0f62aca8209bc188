//! Per-service recognizers.
//!
//! Each recognizer is a pure `fn(&str) -> Option<String>`. Patterns are
//! unanchored substring matches; inputs need not be well-formed URLs.

use std::sync::LazyLock;

use regex::Regex;

use crate::service::Service;

/// Any character except a line terminator.
const ANY: &str = r"[^\n\r\x{2028}\x{2029}]";

/// ASCII word character plus '-' (video/track ids).
const ID: &str = r"[A-Za-z0-9_-]";

static RE_AIRTABLE_SHARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"airtable\.com(/embed)?/(shr[A-Za-z0-9]{{14}}{ANY}*)")).unwrap()
});

static RE_YOUTUBE_WATCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"youtube\.com/{ANY}*v=({ID}+)(&|$)")).unwrap()
});
static RE_YOUTUBE_SHORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"youtu\.be/({ID}+)(\?|$)")).unwrap());
static RE_YOUTUBE_PLAYLIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"youtube\.com/playlist\?{ANY}*list=({ID}+)(&|$)")).unwrap()
});

static RE_VIMEO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"vimeo\.com/({ID}+)(\?|$)")).unwrap());

static RE_SPOTIFY_MEDIA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"spotify\.com/(track|album|artist|playlist)/({ID}+)(\?|$)")).unwrap()
});
static RE_SPOTIFY_PODCAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"spotify\.com/(show|episode)/({ID}+)(\?|$)")).unwrap()
});

// Figma's published pattern. The dot in "figma.com" is intentionally unescaped.
static RE_FIGMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(https://([A-Za-z0-9_.-]+\.)?)?figma{ANY}com/(file|proto)/([0-9a-zA-Z]{{22,128}})(?:/{ANY}*)?$"
    ))
    .unwrap()
});

/// Player options appended to every SoundCloud embed.
const SOUNDCLOUD_PLAYER_OPTIONS: &str = "&color=%23ff5500&auto_play=false&hide_related=false&show_comments=true&show_user=true&show_reposts=false&show_teaser=true";

/// One entry in the resolution table.
pub(crate) struct Recognizer {
    pub service: Service,
    pub convert: fn(&str) -> Option<String>,
}

/// Resolution table, in precedence order. First match wins.
pub(crate) const RECOGNIZERS: &[Recognizer] = &[
    Recognizer { service: Service::Airtable, convert: airtable },
    Recognizer { service: Service::YouTube, convert: youtube },
    Recognizer { service: Service::Vimeo, convert: vimeo },
    Recognizer { service: Service::Spotify, convert: spotify },
    Recognizer { service: Service::SoundCloud, convert: soundcloud },
    Recognizer { service: Service::Figma, convert: figma },
];

/// Airtable share links, optionally already in `/embed` form.
pub fn airtable(text: &str) -> Option<String> {
    let caps = RE_AIRTABLE_SHARE.captures(text)?;
    Some(format!("https://airtable.com/embed/{}", &caps[2]))
}

/// Watch URLs, youtu.be short links, then playlists.
pub fn youtube(text: &str) -> Option<String> {
    if let Some(caps) = RE_YOUTUBE_WATCH.captures(text) {
        return Some(format!("https://www.youtube.com/embed/{}", &caps[1]));
    }

    if let Some(caps) = RE_YOUTUBE_SHORT.captures(text) {
        return Some(format!("https://www.youtube.com/embed/{}", &caps[1]));
    }

    let caps = RE_YOUTUBE_PLAYLIST.captures(text)?;
    Some(format!("https://www.youtube.com/embed/videoseries?list={}", &caps[1]))
}

pub fn vimeo(text: &str) -> Option<String> {
    let caps = RE_VIMEO.captures(text)?;
    Some(format!("https://player.vimeo.com/video/{}", &caps[1]))
}

/// Tracks, albums, artists and playlists share one embed shape; shows and
/// episodes use the podcast player.
pub fn spotify(text: &str) -> Option<String> {
    if let Some(caps) = RE_SPOTIFY_MEDIA.captures(text) {
        return Some(format!("https://open.spotify.com/embed/{}/{}", &caps[1], &caps[2]));
    }

    let caps = RE_SPOTIFY_PODCAST.captures(text)?;
    Some(format!("https://open.spotify.com/embed-podcast/{}/{}", &caps[1], &caps[2]))
}

/// SoundCloud URLs have no stable shape, so any mention of the domain is
/// handed to the player as-is.
pub fn soundcloud(text: &str) -> Option<String> {
    if !text.contains("soundcloud.com") {
        return None;
    }
    Some(format!("https://w.soundcloud.com/player/?url={text}{SOUNDCLOUD_PLAYER_OPTIONS}"))
}

/// Figma file and prototype links. The original text is passed through unescaped.
pub fn figma(text: &str) -> Option<String> {
    if !RE_FIGMA.is_match(text) {
        return None;
    }
    Some(format!("https://www.figma.com/embed?embed_host=astra&url={text}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIGMA_ID_22: &str = "abcdefghijklmnopqrstuv";

    // ========================================================================
    // Airtable
    // ========================================================================

    #[test]
    fn test_airtable_share_link() {
        assert_eq!(
            airtable("https://airtable.com/shrABCDEFGHIJKLMN"),
            Some("https://airtable.com/embed/shrABCDEFGHIJKLMN".to_string())
        );
    }

    #[test]
    fn test_airtable_embed_link_is_normalized() {
        assert_eq!(
            airtable("https://airtable.com/embed/shrABCDEFGHIJKLMN?backgroundColor=red"),
            Some("https://airtable.com/embed/shrABCDEFGHIJKLMN?backgroundColor=red".to_string())
        );
    }

    #[test]
    fn test_airtable_share_id_must_follow_domain() {
        assert_eq!(airtable("airtable.com/appXYZ/shrABCDEFGHIJKLMN/tblFoo"), None);
    }

    #[test]
    fn test_airtable_keeps_trailing_path() {
        assert_eq!(
            airtable("https://airtable.com/shrABCDEFGHIJKLMN/tblFoo"),
            Some("https://airtable.com/embed/shrABCDEFGHIJKLMN/tblFoo".to_string())
        );
    }

    #[test]
    fn test_airtable_short_share_id_rejected() {
        assert_eq!(airtable("https://airtable.com/shrABCDEFGHIJKLM"), None);
    }

    #[test]
    fn test_airtable_non_share_rejected() {
        assert_eq!(airtable("https://airtable.com/appABCDEFGHIJKLMN"), None);
    }

    // ========================================================================
    // YouTube
    // ========================================================================

    #[test]
    fn test_youtube_watch() {
        assert_eq!(
            youtube("https://www.youtube.com/watch?v=KYz2wyBy3kc"),
            Some("https://www.youtube.com/embed/KYz2wyBy3kc".to_string())
        );
    }

    #[test]
    fn test_youtube_watch_with_more_params() {
        assert_eq!(
            youtube("https://www.youtube.com/watch?v=KYz2wyBy3kc&t=42s"),
            Some("https://www.youtube.com/embed/KYz2wyBy3kc".to_string())
        );
    }

    #[test]
    fn test_youtube_watch_id_followed_by_fragment_rejected() {
        // the id must end at '&' or end of input
        assert_eq!(youtube("https://www.youtube.com/watch?v=KYz2wyBy3kc#t=1"), None);
    }

    #[test]
    fn test_youtube_short_link() {
        assert_eq!(
            youtube("https://youtu.be/KYz2wyBy3kc"),
            Some("https://www.youtube.com/embed/KYz2wyBy3kc".to_string())
        );
        assert_eq!(
            youtube("https://youtu.be/KYz2wyBy3kc?t=10"),
            Some("https://www.youtube.com/embed/KYz2wyBy3kc".to_string())
        );
    }

    #[test]
    fn test_youtube_playlist() {
        assert_eq!(
            youtube("https://www.youtube.com/playlist?list=PLrAXtmErZgOe"),
            Some("https://www.youtube.com/embed/videoseries?list=PLrAXtmErZgOe".to_string())
        );
    }

    #[test]
    fn test_youtube_watch_inside_playlist_wins() {
        // watch pattern is tried before the playlist pattern
        assert_eq!(
            youtube("https://www.youtube.com/watch?v=abc123&list=PL999"),
            Some("https://www.youtube.com/embed/abc123".to_string())
        );
    }

    #[test]
    fn test_youtube_unicode_id_rejected() {
        assert_eq!(youtube("https://youtu.be/ビデオ"), None);
    }

    // ========================================================================
    // Vimeo
    // ========================================================================

    #[test]
    fn test_vimeo() {
        assert_eq!(
            vimeo("https://vimeo.com/12345"),
            Some("https://player.vimeo.com/video/12345".to_string())
        );
        assert_eq!(
            vimeo("https://vimeo.com/12345?share=copy"),
            Some("https://player.vimeo.com/video/12345".to_string())
        );
    }

    #[test]
    fn test_vimeo_nested_path_rejected() {
        assert_eq!(vimeo("https://vimeo.com/channels/staffpicks/12345"), None);
    }

    // ========================================================================
    // Spotify
    // ========================================================================

    #[test]
    fn test_spotify_media_kinds() {
        for kind in ["track", "album", "artist", "playlist"] {
            assert_eq!(
                spotify(&format!("https://open.spotify.com/{kind}/4uLU6hMCjMI75M1A2tKUQC")),
                Some(format!("https://open.spotify.com/embed/{kind}/4uLU6hMCjMI75M1A2tKUQC"))
            );
        }
    }

    #[test]
    fn test_spotify_podcast_kinds() {
        assert_eq!(
            spotify("https://open.spotify.com/episode/7makk4oTQel546B0PZlDM5?si=abc"),
            Some("https://open.spotify.com/embed-podcast/episode/7makk4oTQel546B0PZlDM5".to_string())
        );
        assert_eq!(
            spotify("https://open.spotify.com/show/2mTUnDkuKUkhiueKcVWoP0"),
            Some("https://open.spotify.com/embed-podcast/show/2mTUnDkuKUkhiueKcVWoP0".to_string())
        );
    }

    #[test]
    fn test_spotify_unknown_kind_rejected() {
        assert_eq!(spotify("https://open.spotify.com/user/someone"), None);
    }

    // ========================================================================
    // SoundCloud
    // ========================================================================

    #[test]
    fn test_soundcloud_wraps_raw_text() {
        let url = "https://soundcloud.com/artist/track-name";
        assert_eq!(
            soundcloud(url),
            Some(format!(
                "https://w.soundcloud.com/player/?url={url}&color=%23ff5500&auto_play=false&hide_related=false&show_comments=true&show_user=true&show_reposts=false&show_teaser=true"
            ))
        );
    }

    #[test]
    fn test_soundcloud_substring_only() {
        assert!(soundcloud("listen on soundcloud.com later").is_some());
        assert_eq!(soundcloud("soundcloud dot com"), None);
    }

    // ========================================================================
    // Figma
    // ========================================================================

    #[test]
    fn test_figma_file() {
        let url = format!("https://www.figma.com/file/{FIGMA_ID_22}/My-Design");
        assert_eq!(
            figma(&url),
            Some(format!("https://www.figma.com/embed?embed_host=astra&url={url}"))
        );
    }

    #[test]
    fn test_figma_proto_without_scheme() {
        let url = format!("figma.com/proto/{FIGMA_ID_22}");
        assert!(figma(&url).is_some());
    }

    #[test]
    fn test_figma_id_length_bounds() {
        let short = &FIGMA_ID_22[..21];
        assert_eq!(figma(&format!("https://www.figma.com/file/{short}")), None);

        let max = "a".repeat(128);
        assert!(figma(&format!("https://www.figma.com/file/{max}")).is_some());

        let too_long = "a".repeat(129);
        assert_eq!(figma(&format!("https://www.figma.com/file/{too_long}")), None);
    }

    #[test]
    fn test_figma_anchored_at_end() {
        // trailing text after the id must start with '/'
        assert_eq!(figma(&format!("https://www.figma.com/file/{FIGMA_ID_22}?node-id=1")), None);
    }

    #[test]
    fn test_figma_design_path_rejected() {
        assert_eq!(figma(&format!("https://www.figma.com/design/{FIGMA_ID_22}")), None);
    }

    // ========================================================================
    // Table
    // ========================================================================

    #[test]
    fn test_table_matches_service_order() {
        let services: Vec<Service> = RECOGNIZERS.iter().map(|r| r.service).collect();
        assert_eq!(services, Service::ALL.to_vec());
    }
}
