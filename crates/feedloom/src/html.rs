//! HTML presentation of a [`FeedView`].
//!
//! Bodies are untrusted and always escaped. Avatars come from validated hex
//! keys and are embedded as-is.

use std::fmt::Write as _;

use crate::error::FailureKind;
use crate::record::{DisplayRecord, FeedView};

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_record(out: &mut String, record: &DisplayRecord, self_marker: &str) {
    let marker = if record.is_self { escape(self_marker) } else { String::new() };
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "<div class=\"post\">\
         <div>\
         <div class=\"post-author\">{avatar} {key} {marker}</div>\
         <div>{posted_at}<br></div>\
         </div>\
         {body}\
         </div>\n",
        avatar = record.avatar.to_html(),
        key = escape(&record.short_key),
        posted_at = escape(&record.posted_at),
        body = escape(&record.body),
    );
}

/// Markup for the post list container.
pub fn render_feed(view: &FeedView) -> String {
    let mut out = String::new();
    for record in &view.records {
        render_record(&mut out, record, &view.self_marker);
    }
    out
}

/// A complete page: identity avatar, submit form, and the post list.
pub fn render_page(view: &FeedView) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n<head><meta charset=\"utf-8\"><title>feedloom</title></head>\n<body>\n\
         <div class=\"avatar-here\">{avatar}</div>\n\
         <div class=\"whoami\">{key}</div>\n\
         <textarea id=\"post-text\"></textarea>\n\
         <button id=\"post-button\">Post</button>\n\
         <div id=\"post-list\">\n{feed}</div>\n\
         </body>\n</html>\n",
        avatar = view.identity_avatar.to_html(),
        key = escape(view.identity.public_key.as_str()),
        feed = render_feed(view),
    )
}

/// A complete page showing a load or submission failure.
pub fn render_error_page(kind: FailureKind, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n<head><meta charset=\"utf-8\"><title>feedloom</title></head>\n<body>\n\
         <div id=\"post-list\" class=\"error\">\
         <h2>{headline}</h2>\
         <p>{message}</p>\
         </div>\n\
         </body>\n</html>\n",
        headline = escape(kind.headline()),
        message = escape(message),
    )
}
