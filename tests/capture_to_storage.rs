//! Screenshot capture against a real directory standing in for external storage.

use chrono::NaiveDate;
use distance_calc::capture::{save_view, SCREENSHOT_DIR};
use distance_calc::{
    save_view_in_background, CaptureError, ExternalStorage, FrameSnapshot, ImageFileSnapshot,
    Notice, Notifier, SnapshotSource, TracingNotifier,
};
use image::{Rgba, RgbaImage};
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .try_init();
}

#[derive(Clone, Default)]
struct SharedNotifier(Arc<Mutex<Vec<Notice>>>);

impl Notifier for SharedNotifier {
    fn notify(&self, notice: &Notice) {
        self.0.lock().unwrap().push(notice.clone());
    }
}

fn checkerboard() -> RgbaImage {
    RgbaImage::from_fn(8, 8, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    })
}

#[test]
fn test_capture_writes_decodable_png() {
    tracing_init();

    let root = TempDir::new().expect("temp root");
    let storage = ExternalStorage::new(root.path());
    let notifier = SharedNotifier::default();
    let now = NaiveDate::from_ymd_opt(2024, 7, 21)
        .unwrap()
        .and_hms_opt(6, 30, 0)
        .unwrap();

    let path =
        save_view(&FrameSnapshot(checkerboard()), &storage, &notifier, now).expect("capture");

    assert_eq!(
        path,
        root.path().join(SCREENSHOT_DIR).join("2024.Jul.21_06.30.00.png")
    );
    let decoded = image::open(&path).expect("decode").to_rgba8();
    assert_eq!(decoded, checkerboard());
    assert_eq!(*notifier.0.lock().unwrap(), vec![Notice::Saved(path)]);
}

#[test]
fn test_capture_reuses_existing_directory() {
    tracing_init();

    let root = TempDir::new().expect("temp root");
    fs::create_dir(root.path().join(SCREENSHOT_DIR)).expect("screenshot dir");
    let storage = ExternalStorage::new(root.path());
    let now = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();

    let path = save_view(&FrameSnapshot(checkerboard()), &storage, &TracingNotifier, now)
        .expect("capture");
    assert!(path.is_file());
}

#[test]
fn test_unmounted_storage_creates_nothing() {
    tracing_init();

    let root = TempDir::new().expect("temp root");
    let missing = root.path().join("not-mounted");
    let storage = ExternalStorage::new(&missing);
    let notifier = SharedNotifier::default();
    let now = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();

    let result = save_view(&FrameSnapshot(checkerboard()), &storage, &notifier, now);

    assert!(matches!(result, Err(CaptureError::StorageUnavailable)));
    assert!(!missing.exists());
    assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
    assert_eq!(*notifier.0.lock().unwrap(), vec![Notice::NoStorage]);
}

#[test]
fn test_directory_blocked_by_file() {
    tracing_init();

    let root = TempDir::new().expect("temp root");
    fs::write(root.path().join(SCREENSHOT_DIR), b"not a directory").expect("blocking file");
    let storage = ExternalStorage::new(root.path());
    let notifier = SharedNotifier::default();
    let now = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();

    let result = save_view(&FrameSnapshot(checkerboard()), &storage, &notifier, now);

    assert!(matches!(result, Err(CaptureError::Directory { .. })));
    assert_eq!(*notifier.0.lock().unwrap(), vec![Notice::UnableToSave]);
}

#[test]
fn test_image_file_snapshot() {
    let dir = TempDir::new().expect("temp dir");
    let frame_path = dir.path().join("frame.png");
    checkerboard().save(&frame_path).expect("save frame");

    let snapshot = ImageFileSnapshot::new(&frame_path).snapshot().expect("snapshot");
    assert_eq!(snapshot, checkerboard());

    let missing_path = dir.path().join("missing.png");
    let missing = ImageFileSnapshot::new(&missing_path).snapshot();
    match missing {
        Err(CaptureError::Decode { path, source }) => {
            assert_eq!(path, missing_path);
            assert!(matches!(source, image::ImageError::IoError(_)));
        }
        other => panic!("expected decode error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_background_capture() {
    tracing_init();

    let root = TempDir::new().expect("temp root");
    let notifier = SharedNotifier::default();

    let path = save_view_in_background(
        FrameSnapshot(checkerboard()),
        ExternalStorage::new(root.path()),
        notifier.clone(),
    )
    .await
    .expect("background capture");

    assert!(path.starts_with(root.path().join(SCREENSHOT_DIR)));
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
    assert!(path.is_file());
    assert_eq!(*notifier.0.lock().unwrap(), vec![Notice::Saved(path)]);
}
