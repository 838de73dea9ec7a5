//! Plain-text rendering of conversation state.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write;

use time::OffsetDateTime;
use time::macros::format_description;
use widget::message::ImageRef;
use widget::{BugResult, Message, MessageContent, MessageKind, Visibility};

const CARD_RULE: &str = "  +--------------------------------------------------";

/// `HH:MM` in UTC.
#[must_use]
pub fn clock(timestamp: OffsetDateTime) -> String {
    let format = format_description!("[hour]:[minute]");
    timestamp.format(&format).unwrap_or_default()
}

/// Human-readable byte size, one decimal above a kilobyte.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

pub fn render_message(message: &Message) -> String {
    let who = match message.kind {
        MessageKind::User => "you",
        MessageKind::Response => "assistant",
    };
    let mut out = format!("[{}] {who}: ", clock(message.timestamp));
    match &message.content {
        MessageContent::Text(text) => out.push_str(text),
        MessageContent::Image(image) => out.push_str(&render_image(image)),
        MessageContent::Error(error) => {
            let _ = write!(out, "error: {error}");
        }
        MessageContent::Bugs(bugs) if bugs.is_empty() => out.push_str("no matching bugs found"),
        MessageContent::Bugs(bugs) => {
            let _ = write!(out, "found {} similar bug(s)", bugs.len());
            for bug in bugs {
                out.push('\n');
                out.push_str(&render_bug_card(bug));
            }
        }
    }
    out
}

fn render_image(image: &ImageRef) -> String {
    format!("[image] {} ({}, {})", image.name, image.mime_type, format_size(image.size_bytes))
}

/// A result card: header line, title, description, optional resolution.
pub fn render_bug_card(bug: &BugResult) -> String {
    let mut out = String::from(CARD_RULE);
    let _ = write!(
        out,
        "\n  | {} [{}] {} / {}  {}% match",
        bug.id,
        bug.product,
        bug.status.as_str(),
        bug.severity.as_str(),
        bug.match_percentage()
    );
    let _ = write!(out, "\n  | {}", bug.title);
    let _ = write!(out, "\n  | {}", bug.description);
    if let Some(resolution) = &bug.resolution {
        let _ = write!(out, "\n  | resolution: {resolution}");
    }
    out.push('\n');
    out.push_str(CARD_RULE);
    out
}

#[must_use]
pub fn visibility_banner(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Closed => "(chat closed; /open to launch)",
        Visibility::Expanded => "(chat open)",
        Visibility::Minimized => "(chat minimized; /open to restore)",
    }
}
