use super::*;
use widget::{BugStatus, Severity};

fn bug(resolution: Option<&str>) -> BugResult {
    BugResult {
        id: "BUG-1234".into(),
        title: "Application crashes when disk space is low".into(),
        description: "Crashes without warning.".into(),
        status: BugStatus::Resolved,
        severity: Severity::High,
        product: "DAPA".into(),
        resolution: resolution.map(str::to_string),
        similarity_score: 0.92,
    }
}

#[test]
fn clock_formats_hours_and_minutes() {
    let ts = OffsetDateTime::UNIX_EPOCH + time::Duration::minutes(75);
    assert_eq!(clock(ts), "01:15");
}

#[test]
fn format_size_units() {
    assert_eq!(format_size(512), "512 B");
    assert_eq!(format_size(51_200), "50.0 KB");
    assert_eq!(format_size(10 * 1024 * 1024), "10.0 MB");
}

#[test]
fn card_shows_match_and_resolution() {
    let card = render_bug_card(&bug(Some("Added checks.")));
    assert!(card.contains("BUG-1234 [DAPA] resolved / high  92% match"));
    assert!(card.contains("resolution: Added checks."));
}

#[test]
fn card_omits_missing_resolution() {
    assert!(!render_bug_card(&bug(None)).contains("resolution"));
}

#[test]
fn user_text_message() {
    let msg = Message::user_text("disk full", OffsetDateTime::UNIX_EPOCH);
    assert_eq!(render_message(&msg), "[00:00] you: disk full");
}

#[test]
fn image_message_shows_metadata() {
    let image = ImageRef { name: "err.png".into(), size_bytes: 2048, mime_type: "image/png".into() };
    let msg = Message::user_image(image, OffsetDateTime::UNIX_EPOCH);
    assert_eq!(render_message(&msg), "[00:00] you: [image] err.png (image/png, 2.0 KB)");
}

#[test]
fn bugs_message_lists_cards() {
    let msg = Message::response(MessageContent::Bugs(vec![bug(None), bug(None)]), OffsetDateTime::UNIX_EPOCH);
    let out = render_message(&msg);
    assert!(out.starts_with("[00:00] assistant: found 2 similar bug(s)"));
    assert_eq!(out.matches("92% match").count(), 2);
}

#[test]
fn empty_bugs_and_errors() {
    let empty = Message::response(MessageContent::Bugs(vec![]), OffsetDateTime::UNIX_EPOCH);
    assert!(render_message(&empty).ends_with("no matching bugs found"));

    let err = Message::error("server rejected the request", OffsetDateTime::UNIX_EPOCH);
    assert!(render_message(&err).ends_with("error: server rejected the request"));
}

#[test]
fn banner_per_state() {
    assert!(visibility_banner(Visibility::Minimized).contains("minimized"));
    assert!(visibility_banner(Visibility::Closed).contains("closed"));
}
