use super::*;

#[test]
fn is_image_mime_accepts_image_types() {
    for mime in ["image/png", "image/jpeg", "image/gif", "image/webp", "image/svg+xml"] {
        assert!(is_image_mime(mime), "expected {mime} to be accepted");
    }
}

#[test]
fn is_image_mime_ignores_case() {
    assert!(is_image_mime("image/PNG"));
    assert!(is_image_mime("Image/Jpeg"));
    assert!(!is_image_mime("TEXT/PLAIN"));
}

#[test]
fn is_image_mime_rejects_other_types() {
    for mime in ["text/plain", "application/pdf", "image/", "", "video/mp4", "imagex/png"] {
        assert!(!is_image_mime(mime), "expected {mime:?} to be rejected");
    }
}

#[test]
fn response_serializes_camel_case() {
    let resp = ProcessImageResponse {
        error: false,
        image: ImageSummary { name: "err.png".into(), size: 10, mime_type: "image/png".into() },
        ai_response: "Try restarting.".into(),
    };
    assert_eq!(
        serde_json::to_value(&resp).unwrap(),
        serde_json::json!({
            "error": false,
            "image": { "name": "err.png", "size": 10, "type": "image/png" },
            "aiResponse": "Try restarting."
        })
    );
}
