//! Response-boundary sanitization. Free-text fields are HTML-escaped so an
//! embedded `<script>` tag or event-handler attribute renders as inert text
//! in whatever consumes the API. Persisted bytes are never rewritten.

use crate::db::bookmark::Bookmark;

// Entities the escaper emits. A `&` that already begins one of these is
// left alone, which makes the escape idempotent.
const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"];

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, c) in input.char_indices() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '&' if !ENTITIES.iter().any(|e| input[i..].starts_with(e)) => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes `title` and `description`; `id`, `url` and `rating` pass through.
pub fn sanitize(bookmark: Bookmark) -> Bookmark {
    Bookmark {
        title: escape_html(&bookmark.title),
        description: escape_html(&bookmark.description),
        ..bookmark
    }
}
