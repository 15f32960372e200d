//! Search-snippet sanitizer.
//!
//! The backend's full-text-search endpoint wraps matched terms in literal
//! `<mark>…</mark>` pairs inside every snippet field. Snippets are injected
//! into rendered output as markup, so everything that is not a mark pair must
//! be treated as data: foreign tags are removed and the remaining text is
//! entity-escaped before the mark tags are re-emitted.
//!
//! The pipeline is decode → lex → strip → escape → rewrap:
//! 1. Decode the five basic HTML entities (`&amp;` first, so double-encoded
//!    payloads collapse to literal tags — inherited behavior).
//! 2. Single left-to-right pass pairing each `<mark>` with the nearest
//!    following `</mark>` (tag names case-insensitive, non-overlapping).
//! 3. Plain runs lose every `<…>`-shaped tag; `<script>`/`<style>` elements
//!    lose their text content as well.
//! 4. Plain runs and highlight inner text are entity-escaped.
//! 5. Highlight runs come back wrapped in lowercase `<mark>…</mark>`.
//!
//! One asymmetry is kept deliberately: a snippet containing no mark pair at
//! all is returned tag-stripped but *unescaped*. Downstream rendering relies
//! on that today; see `test_no_match_branch_skips_escaping` before changing it.
//!
//! Sanitizing is not idempotent — running the output through again can
//! double-escape entities. Callers must sanitize exactly once per snippet.

/// A run of snippet text, either plain or inside a `<mark>` pair.
///
/// The segment sequence reconstructs the snippet's text content with
/// disallowed tags already removed; only the `highlighted` flag carries
/// markup information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSegment {
    pub text: String,
    pub highlighted: bool,
}

const MARK_OPEN: &str = "<mark>";
const MARK_CLOSE: &str = "</mark>";

/// Elements whose text content is dropped along with the tags themselves.
/// Leaving executable/style payload text behind after removing its tags
/// would surface garbage (or worse) in rendered snippets.
const CONTENT_STRIPPED_TAGS: &[&str] = &["script", "style"];

/// Sanitize a raw snippet into a string safe to emit as HTML.
///
/// Total over all inputs: never errors, never panics, empty in → empty out.
/// The output contains `<mark>`/`</mark>` as its only markup.
pub fn sanitize(raw: &str) -> String {
    let decoded = decode_entities(raw);
    let segs = parse_segments(&decoded);

    if !segs.iter().any(|s| s.highlighted) {
        // No mark pair anywhere: tag-strip only. The skipped escaping is
        // inherited behavior (see module docs).
        return strip_tags(&decoded);
    }

    let mut out = String::with_capacity(decoded.len());
    for seg in &segs {
        if seg.highlighted {
            out.push_str(MARK_OPEN);
            out.push_str(&escape_html(&seg.text));
            out.push_str(MARK_CLOSE);
        } else {
            out.push_str(&escape_html(&seg.text));
        }
    }
    out
}

/// Parse a raw snippet into highlight segments.
///
/// Entities are decoded first, so entity-encoded mark tags count as real
/// highlights. Plain segments come back with foreign tags already stripped;
/// highlight inner text is kept verbatim (nested tags inside a highlight are
/// data, not markup). Unmatched mark tags end up in plain runs and vanish
/// under the generic strip rule.
pub fn segments(snippet: &str) -> Vec<HighlightSegment> {
    parse_segments(&decode_entities(snippet))
}

fn parse_segments(decoded: &str) -> Vec<HighlightSegment> {
    let mut segs = Vec::new();
    let mut pos = 0;

    while let Some(open) = find_ci(decoded, MARK_OPEN, pos) {
        let inner_start = open + MARK_OPEN.len();
        let close = match find_ci(decoded, MARK_CLOSE, inner_start) {
            Some(c) => c,
            // Unclosed mark: no match, the rest is one plain run.
            None => break,
        };

        if open > pos {
            push_plain(&mut segs, &decoded[pos..open]);
        }
        segs.push(HighlightSegment {
            text: decoded[inner_start..close].to_string(),
            highlighted: true,
        });
        pos = close + MARK_CLOSE.len();
    }

    if pos < decoded.len() {
        push_plain(&mut segs, &decoded[pos..]);
    }
    segs
}

fn push_plain(segs: &mut Vec<HighlightSegment>, text: &str) {
    let stripped = strip_tags(text);
    if !stripped.is_empty() {
        segs.push(HighlightSegment {
            text: stripped,
            highlighted: false,
        });
    }
}

/// Decode the five basic HTML entities, ampersand first.
///
/// The ordering makes double-encoded sequences (`&amp;lt;` → `&lt;` → `<`)
/// collapse to literal characters before the tag scan runs.
pub fn decode_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Escape `&`, `<`, `>`, `"` and `'` for safe HTML emission.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Remove every `<…>`-shaped tag from `s`.
///
/// Script and style elements lose their content as well. A `<` with no
/// following `>` never forms a tag and survives verbatim.
fn strip_tags(s: &str) -> String {
    let text = strip_content_blocks(s);
    let mut out = String::with_capacity(text.len());
    let mut rest = text.as_str();

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        match rest[lt..].find('>') {
            Some(gt) => rest = &rest[lt + gt + 1..],
            None => {
                out.push_str(&rest[lt..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Drop `<script>…</script>` and `<style>…</style>` elements wholesale,
/// case-insensitively. Unclosed elements fall through to the generic tag
/// strip, which removes the open tag but keeps the text.
fn strip_content_blocks(s: &str) -> String {
    let mut text = s.to_string();

    for tag in CONTENT_STRIPPED_TAGS {
        let open = format!("<{}", tag);
        let close = format!("</{}", tag);
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;

        while let Some(start) = find_ci(&text, &open, pos) {
            let close_at = match find_ci(&text, &close, start + open.len()) {
                Some(c) => c,
                None => break,
            };
            let gt = match text[close_at..].find('>') {
                Some(g) => g,
                None => break,
            };
            out.push_str(&text[pos..start]);
            pos = close_at + gt + 1;
        }
        out.push_str(&text[pos..]);
        text = out;
    }
    text
}

/// Find `needle` in `haystack` at or after byte offset `from`,
/// ASCII-case-insensitively. Needles are the ASCII tag literals above, so
/// every match sits on char boundaries.
fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    let last = h.len().checked_sub(n.len())?;
    (from..=last).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}
