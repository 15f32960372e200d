//! Terminal rendering of highlight segments.
//!
//! Snippets parsed by [`crate::sanitize::segments`] are plain text plus
//! highlight flags; this module turns them into something readable on a
//! terminal. With color enabled, highlighted runs use ANSI reverse video;
//! without it they are bracketed with `>>>`/`<<<` markers so matches stay
//! visible in piped output.

use crate::sanitize::HighlightSegment;

const ANSI_HIGHLIGHT: &str = "\x1b[7m";
const ANSI_RESET: &str = "\x1b[0m";

const MARKER_BEGIN: &str = ">>>";
const MARKER_END: &str = "<<<";

/// Color mode for CLI output: resolved from the `output.color` config key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RenderMode {
    Auto,
    Always,
    Never,
}

impl RenderMode {
    /// Parse a config value. `load_config` has already validated it, so
    /// anything unexpected falls back to `Auto`.
    pub fn from_config(value: &str) -> Self {
        match value {
            "always" => RenderMode::Always,
            "never" => RenderMode::Never,
            _ => RenderMode::Auto,
        }
    }

    /// Whether to emit ANSI sequences. `Auto` means color only when stdout
    /// is a TTY.
    pub fn color_enabled(&self) -> bool {
        match self {
            RenderMode::Always => true,
            RenderMode::Never => false,
            RenderMode::Auto => atty::is(atty::Stream::Stdout),
        }
    }
}

/// Render segments as a single line for terminal display.
pub fn render_segments(segments: &[HighlightSegment], color: bool) -> String {
    let mut out = String::new();
    for seg in segments {
        if seg.highlighted {
            if color {
                out.push_str(ANSI_HIGHLIGHT);
                out.push_str(&seg.text);
                out.push_str(ANSI_RESET);
            } else {
                out.push_str(MARKER_BEGIN);
                out.push_str(&seg.text);
                out.push_str(MARKER_END);
            }
        } else {
            out.push_str(&seg.text);
        }
    }
    out
}

/// Parse and render a raw snippet in one step, flattening newlines the way
/// search output does.
pub fn render_snippet(raw: &str, color: bool) -> String {
    let segments = crate::sanitize::segments(raw);
    render_segments(&segments, color).replace('\n', " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str, highlighted: bool) -> HighlightSegment {
        HighlightSegment {
            text: text.to_string(),
            highlighted,
        }
    }

    #[test]
    fn test_render_markers_without_color() {
        let segs = vec![seg("a ", false), seg("b", true), seg(" c", false)];
        assert_eq!(render_segments(&segs, false), "a >>>b<<< c");
    }

    #[test]
    fn test_render_ansi_with_color() {
        let segs = vec![seg("x ", false), seg("hit", true)];
        assert_eq!(render_segments(&segs, true), "x \x1b[7mhit\x1b[0m");
    }

    #[test]
    fn test_render_snippet_strips_foreign_tags() {
        assert_eq!(
            render_snippet("<b>bold</b> <mark>hit</mark>", false),
            "bold >>>hit<<<"
        );
    }

    #[test]
    fn test_render_snippet_flattens_newlines() {
        assert_eq!(
            render_snippet("line one\nline <mark>two</mark>", false),
            "line one line >>>two<<<"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_segments(&[], false), "");
        assert_eq!(render_snippet("", false), "");
    }

    #[test]
    fn test_mode_from_config() {
        assert_eq!(RenderMode::from_config("always"), RenderMode::Always);
        assert_eq!(RenderMode::from_config("never"), RenderMode::Never);
        assert_eq!(RenderMode::from_config("auto"), RenderMode::Auto);
    }

    #[test]
    fn test_mode_forced_values() {
        assert!(RenderMode::Always.color_enabled());
        assert!(!RenderMode::Never.color_enabled());
    }
}
