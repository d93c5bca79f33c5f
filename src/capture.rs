//! Screenshot capture to external storage.
//!
//! The procedure is composed from three capabilities so the host decides how a
//! view is rendered ([`SnapshotSource`]), where files go ([`FileSink`]) and how
//! the user hears about it ([`Notifier`]).

use crate::error::CaptureError;
use chrono::{Local, NaiveDateTime};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Directory under the storage root that receives screenshots
pub const SCREENSHOT_DIR: &str = "distancecalc";

/// File name pattern, e.g. "2024.Mar.05_14.07.09"
pub const FILE_NAME_PATTERN: &str = "%Y.%b.%d_%H.%M.%S";

/// Renders the current view into an in-memory bitmap
pub trait SnapshotSource {
    fn snapshot(&self) -> Result<RgbaImage, CaptureError>;
}

/// External storage the screenshot is written to
pub trait FileSink {
    fn is_mounted(&self) -> bool;
    fn root(&self) -> &Path;
    fn ensure_dir(&self, dir: &Path) -> io::Result<()>;
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// Transient user-facing notifications
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoStorage,
    Saved(PathBuf),
    UnableToSave,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoStorage => f.write_str("External storage is not available"),
            Notice::Saved(path) => write!(f, "Screenshot saved to {}", path.display()),
            Notice::UnableToSave => f.write_str("Unable to save screenshot"),
        }
    }
}

/// Screenshot file name for the given local time
pub fn screenshot_file_name(now: NaiveDateTime) -> String {
    format!("{}.png", now.format(FILE_NAME_PATTERN))
}

/// Encode an RGBA bitmap as PNG
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut bytes, CompressionType::Default, FilterType::Adaptive);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Capture the view and save it under `<root>/distancecalc/` using the current time
pub fn save_view_now<S, F, N>(source: &S, sink: &F, notifier: &N) -> Result<PathBuf, CaptureError>
where
    S: SnapshotSource + ?Sized,
    F: FileSink + ?Sized,
    N: Notifier + ?Sized,
{
    save_view(source, sink, notifier, Local::now().naive_local())
}

/// Capture the view and save it as `<root>/distancecalc/<now>.png`.
///
/// Storage is checked before anything is rendered; an unmounted sink is never
/// asked to create a directory. Every failure is reported through `notifier`
/// and returned. Nothing is retried and partial files are left in place.
pub fn save_view<S, F, N>(
    source: &S,
    sink: &F,
    notifier: &N,
    now: NaiveDateTime,
) -> Result<PathBuf, CaptureError>
where
    S: SnapshotSource + ?Sized,
    F: FileSink + ?Sized,
    N: Notifier + ?Sized,
{
    if !sink.is_mounted() {
        info!("external storage not mounted");
        notifier.notify(&Notice::NoStorage);
        return Err(CaptureError::StorageUnavailable);
    }

    match write_screenshot(source, sink, now) {
        Ok(path) => {
            info!(path = %path.display(), "screenshot captured");
            notifier.notify(&Notice::Saved(path.clone()));
            Ok(path)
        }
        Err(e) => {
            error!("unable to capture screenshot: {}", e);
            notifier.notify(&Notice::UnableToSave);
            Err(e)
        }
    }
}

fn write_screenshot<S, F>(
    source: &S,
    sink: &F,
    now: NaiveDateTime,
) -> Result<PathBuf, CaptureError>
where
    S: SnapshotSource + ?Sized,
    F: FileSink + ?Sized,
{
    let dir = sink.root().join(SCREENSHOT_DIR);
    sink.ensure_dir(&dir).map_err(|source| CaptureError::Directory {
        path: dir.clone(),
        source,
    })?;

    let bitmap = source.snapshot()?;

    let path = dir.join(screenshot_file_name(now));
    info!(path = %path.display(), "writing screenshot");

    let bytes = encode_png(&bitmap)?;
    sink.write(&path, &bytes).map_err(|source| CaptureError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Run [`save_view_now`] on the blocking thread pool
pub async fn save_view_in_background<S, F, N>(
    source: S,
    sink: F,
    notifier: N,
) -> Result<PathBuf, CaptureError>
where
    S: SnapshotSource + Send + 'static,
    F: FileSink + Send + 'static,
    N: Notifier + Send + 'static,
{
    tokio::task::spawn_blocking(move || save_view_now(&source, &sink, &notifier))
        .await
        .map_err(|e| CaptureError::Task(e.to_string()))?
}

/// Storage rooted at a filesystem directory; mounted while the root exists
#[derive(Debug, Clone)]
pub struct ExternalStorage {
    root: PathBuf,
}

impl ExternalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileSink for ExternalStorage {
    fn is_mounted(&self) -> bool {
        self.root.is_dir()
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self, dir: &Path) -> io::Result<()> {
        if dir.is_dir() {
            return Ok(());
        }
        fs::create_dir(dir)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        fs::write(path, bytes)
    }
}

/// Reports notices through the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::Saved(_) => info!("{}", notice),
            Notice::NoStorage | Notice::UnableToSave => error!("{}", notice),
        }
    }
}

/// An already rendered frame
#[derive(Debug, Clone)]
pub struct FrameSnapshot(pub RgbaImage);

impl SnapshotSource for FrameSnapshot {
    fn snapshot(&self) -> Result<RgbaImage, CaptureError> {
        Ok(self.0.clone())
    }
}

/// A frame decoded from an image file on disk
#[derive(Debug, Clone)]
pub struct ImageFileSnapshot {
    path: PathBuf,
}

impl ImageFileSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for ImageFileSnapshot {
    fn snapshot(&self) -> Result<RgbaImage, CaptureError> {
        image::open(&self.path)
            .map(|img| img.to_rgba8())
            .map_err(|source| CaptureError::Decode {
                path: self.path.clone(),
                source,
            })
    }
}
