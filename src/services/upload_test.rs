use super::*;

fn png(name: &str) -> UploadedImage {
    UploadedImage { original_name: name.into(), mime_type: "image/png".into(), bytes: vec![0x89, b'P', b'N', b'G'] }
}

// =========================================================================
// naming
// =========================================================================

#[test]
fn unique_name_uses_original_extension() {
    assert_eq!(unique_file_name("err.PNG", "image/png", 1_700_000_000_000, 42), "image-1700000000000-42.png");
}

#[test]
fn unique_name_falls_back_to_mime_subtype() {
    assert_eq!(unique_file_name("screenshot", "image/jpeg", 1, 2), "image-1-2.jpg");
    assert_eq!(unique_file_name("vector", "image/svg+xml", 1, 2), "image-1-2.svg");
}

#[test]
fn unique_name_rejects_path_like_extensions() {
    assert_eq!(unique_file_name("x.png/../../etc", "image/gif", 1, 2), "image-1-2.gif");
}

#[test]
fn unique_name_unknown_everything_is_bin() {
    assert_eq!(unique_file_name("noext", "application/x-weird-thing", 1, 2), "image-1-2.bin");
    assert_eq!(unique_file_name("", "", 1, 2), "image-1-2.bin");
}

#[test]
fn unique_name_rejects_overlong_extension() {
    assert_eq!(unique_file_name("a.averyveryverylongext", "image/webp", 1, 2), "image-1-2.webp");
}

#[test]
fn size_bytes_is_buffer_length() {
    assert_eq!(png("a.png").size_bytes(), 4);
}

// =========================================================================
// TempUpload
// =========================================================================

#[tokio::test]
async fn persist_writes_file_with_contents() {
    let dir = tempfile::tempdir().unwrap();
    let image = png("err.png");

    let upload = TempUpload::persist(dir.path(), &image).await.unwrap();
    assert!(upload.path().starts_with(dir.path()));
    assert_eq!(upload.path().extension().and_then(|e| e.to_str()), Some("png"));
    assert_eq!(std::fs::read(upload.path()).unwrap(), image.bytes);
}

#[tokio::test]
async fn drop_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let upload = TempUpload::persist(dir.path(), &png("err.png")).await.unwrap();
    let path = upload.path().to_path_buf();
    assert!(path.exists());

    drop(upload);
    assert!(!path.exists());
}

#[tokio::test]
async fn drop_tolerates_already_removed_file() {
    let dir = tempfile::tempdir().unwrap();
    let upload = TempUpload::persist(dir.path(), &png("err.png")).await.unwrap();
    std::fs::remove_file(upload.path()).unwrap();
    drop(upload);
}

#[tokio::test]
async fn persist_into_missing_dir_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(TempUpload::persist(&missing, &png("err.png")).await.is_err());
}

#[tokio::test]
async fn two_uploads_get_distinct_names() {
    let dir = tempfile::tempdir().unwrap();
    let a = TempUpload::persist(dir.path(), &png("err.png")).await.unwrap();
    let b = TempUpload::persist(dir.path(), &png("err.png")).await.unwrap();
    assert_ne!(a.path(), b.path());
}
