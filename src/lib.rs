//! Display formatting and screenshot capture helpers for a distance/speed tracker.

pub mod capture;
pub mod config;
pub mod error;
pub mod format;
pub mod status;
pub mod units;

pub use capture::{
    save_view, save_view_in_background, save_view_now, ExternalStorage, FileSink, FrameSnapshot,
    ImageFileSnapshot, Notice, Notifier, SnapshotSource, TracingNotifier,
};
pub use config::Config;
pub use error::{CaptureError, ConfigError, FormatError};
pub use status::{error_text_id, MessageId, ProviderStatus};
pub use units::{DisplayUnits, UnitSystem};
