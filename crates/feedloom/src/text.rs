//! Terminal presentation of a [`FeedView`].

use std::fmt::Write as _;

use crate::record::FeedView;

/// Replace control characters so a body cannot drive the terminal.
///
/// Newlines survive and are indented under the entry.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() && c != '\n' { '\u{FFFD}' } else { c })
        .collect::<String>()
        .replace('\n', "\n    ")
}

/// Render the feed as plain text, with truecolor avatars when `color` is set.
pub fn render_feed(view: &FeedView, color: bool) -> String {
    let mut out = String::new();
    for record in &view.records {
        let avatar = if color { record.avatar.to_ansi() } else { String::new() };
        let marker = if record.is_self { view.self_marker.as_str() } else { "" };
        let _ = writeln!(
            out,
            "{avatar}{sep}{key} {marker}\n    {posted_at}\n    {body}\n",
            sep = if color { " " } else { "" },
            key = record.short_key,
            posted_at = record.posted_at,
            body = sanitize(&record.body),
        );
    }
    if view.records.is_empty() {
        out.push_str("(no posts)\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::record::build_view;
    use feedloom_core::{AuthorKey, Identity, Operation};

    fn key(s: &str) -> AuthorKey {
        AuthorKey::parse(s).unwrap()
    }

    #[test]
    fn test_sanitize_strips_escape_sequences() {
        assert_eq!(sanitize("a\x1b[31mb"), "a\u{FFFD}[31mb");
        assert_eq!(sanitize("one\ntwo"), "one\n    two");
    }

    #[test]
    fn test_plain_render() {
        let me = key("aaa111bbb222");
        let feed = vec![
            Operation::new(key("ccc333ddd444"), 50, "yo"),
            Operation::new(me.clone(), 100, "hi"),
        ];
        let view = build_view(&feed, &Identity::new(me), &FeedConfig::default());
        let text = render_feed(&view, false);

        assert!(text.starts_with("ccc333ddd \n"));
        assert!(text.contains("aaa111bbb (Me)\n"));
        assert!(text.contains("    1970-01-01 00:01:40 UTC\n    hi\n"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_color_render_includes_avatar() {
        let me = key("aaa111bbb222");
        let feed = vec![Operation::new(me.clone(), 1, "x")];
        let view = build_view(&feed, &Identity::new(me), &FeedConfig::default());
        let text = render_feed(&view, true);
        assert!(text.starts_with(&view.records[0].avatar.to_ansi()));
    }

    #[test]
    fn test_empty_feed() {
        let me = key("aaa111bbb222");
        let view = build_view(&[], &Identity::new(me), &FeedConfig::default());
        assert_eq!(render_feed(&view, false), "(no posts)\n");
    }
}
