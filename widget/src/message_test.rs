use super::*;

fn bug(score: f64) -> BugResult {
    BugResult {
        id: "BUG-1".into(),
        title: "t".into(),
        description: "d".into(),
        status: BugStatus::Open,
        severity: Severity::Low,
        product: "P".into(),
        resolution: None,
        similarity_score: score,
    }
}

// =============================================================
// BugStatus / Severity
// =============================================================

#[test]
fn status_parses_known_values_case_insensitively() {
    assert_eq!(BugStatus::from("Resolved".to_string()), BugStatus::Resolved);
    assert_eq!(BugStatus::from("in-progress".to_string()), BugStatus::InProgress);
    assert_eq!(BugStatus::from("OPEN".to_string()), BugStatus::Open);
}

#[test]
fn status_keeps_unknown_values() {
    let status = BugStatus::from("wont-fix".to_string());
    assert_eq!(status, BugStatus::Other("wont-fix".into()));
    assert_eq!(status.as_str(), "wont-fix");
}

#[test]
fn severity_parses_and_keeps_unknown() {
    assert_eq!(Severity::from("critical".to_string()), Severity::Critical);
    assert_eq!(Severity::from("Medium".to_string()), Severity::Medium);
    assert_eq!(Severity::from("blocker".to_string()), Severity::Other("blocker".into()));
}

// =============================================================
// BugResult
// =============================================================

#[test]
fn bug_result_reads_camel_case_wire_form() {
    let json = serde_json::json!({
        "id": "BUG-1234",
        "title": "Application crashes when disk space is low",
        "description": "crash",
        "status": "resolved",
        "severity": "high",
        "product": "DAPA",
        "resolution": "Added checks.",
        "similarityScore": 0.92
    });
    let result: BugResult = serde_json::from_value(json).unwrap();
    assert_eq!(result.status, BugStatus::Resolved);
    assert_eq!(result.severity, Severity::High);
    assert_eq!(result.resolution.as_deref(), Some("Added checks."));
    assert!((result.similarity_score - 0.92).abs() < f64::EPSILON);
}

#[test]
fn bug_result_writes_status_strings() {
    let mut b = bug(0.5);
    b.status = BugStatus::InProgress;
    let json = serde_json::to_value(&b).unwrap();
    assert_eq!(json["status"], "in-progress");
    assert_eq!(json["severity"], "low");
    assert_eq!(json["similarityScore"], 0.5);
}

#[test]
fn bug_result_missing_resolution_is_none() {
    let json = serde_json::json!({
        "id": "B", "title": "t", "description": "d", "status": "open",
        "severity": "low", "product": "P", "similarityScore": 0.1
    });
    let result: BugResult = serde_json::from_value(json).unwrap();
    assert!(result.resolution.is_none());
}

#[test]
fn match_percentage_rounds() {
    assert_eq!(bug(0.92).match_percentage(), 92);
    assert_eq!(bug(0.785).match_percentage(), 79);
    assert_eq!(bug(0.0).match_percentage(), 0);
    assert_eq!(bug(1.0).match_percentage(), 100);
}

#[test]
fn match_percentage_clamps_out_of_range() {
    assert_eq!(bug(1.7).match_percentage(), 100);
    assert_eq!(bug(-0.3).match_percentage(), 0);
    assert_eq!(bug(f64::NAN).match_percentage(), 0);
}

// =============================================================
// Message
// =============================================================

#[test]
fn user_text_message_is_not_image() {
    let msg = Message::user_text("disk full", OffsetDateTime::UNIX_EPOCH);
    assert_eq!(msg.kind, MessageKind::User);
    assert!(!msg.is_image);
    assert_eq!(msg.content, MessageContent::Text("disk full".into()));
}

#[test]
fn user_image_message_sets_flag() {
    let image = ImageRef { name: "err.png".into(), size_bytes: 10, mime_type: "image/png".into() };
    let msg = Message::user_image(image.clone(), OffsetDateTime::UNIX_EPOCH);
    assert!(msg.is_image);
    assert_eq!(msg.content, MessageContent::Image(image));
}

#[test]
fn error_message_is_a_response() {
    let msg = Message::error("boom", OffsetDateTime::UNIX_EPOCH);
    assert_eq!(msg.kind, MessageKind::Response);
    assert!(msg.is_error());
}

#[test]
fn message_serializes_tagged_content() {
    let msg = Message::user_text("hi", OffsetDateTime::UNIX_EPOCH);
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["kind"], "user");
    assert_eq!(json["content"], serde_json::json!({ "type": "text", "value": "hi" }));
    assert_eq!(json["timestamp"], "1970-01-01T00:00:00Z");
}

#[test]
fn message_wire_form_is_camel_case() {
    let image = ImageRef { name: "err.png".into(), size_bytes: 51_200, mime_type: "image/png".into() };
    let json = serde_json::to_value(Message::user_image(image, OffsetDateTime::UNIX_EPOCH)).unwrap();
    assert_eq!(json["isImage"], true);
    assert!(json.get("is_image").is_none());
    assert_eq!(
        json["content"]["value"],
        serde_json::json!({ "name": "err.png", "sizeBytes": 51_200, "mimeType": "image/png" })
    );

    let back: Message = serde_json::from_value(json).unwrap();
    assert!(back.is_image);
}
