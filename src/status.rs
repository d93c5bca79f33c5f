use serde::Serialize;
use tracing::{debug, warn};

/// Raw identifier handed to hosts that expect an integer when no message applies
pub const UNKNOWN_MESSAGE_ID: i32 = -1;

/// Availability reported by a location provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    OutOfService,
    TemporarilyUnavailable,
    Available,
}

impl ProviderStatus {
    pub const OUT_OF_SERVICE: i32 = 0;
    pub const TEMPORARILY_UNAVAILABLE: i32 = 1;
    pub const AVAILABLE: i32 = 2;

    pub fn code(self) -> i32 {
        match self {
            ProviderStatus::OutOfService => Self::OUT_OF_SERVICE,
            ProviderStatus::TemporarilyUnavailable => Self::TEMPORARILY_UNAVAILABLE,
            ProviderStatus::Available => Self::AVAILABLE,
        }
    }
}

impl TryFrom<i32> for ProviderStatus {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            Self::OUT_OF_SERVICE => Ok(ProviderStatus::OutOfService),
            Self::TEMPORARILY_UNAVAILABLE => Ok(ProviderStatus::TemporarilyUnavailable),
            Self::AVAILABLE => Ok(ProviderStatus::Available),
            other => Err(other),
        }
    }
}

/// Message shown to the user for a provider status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageId {
    ServiceNotAvailable,
    ServiceTempNotAvailable,
    /// Clears any previously shown status message
    Empty,
}

impl MessageId {
    pub fn raw(self) -> i32 {
        match self {
            MessageId::ServiceNotAvailable => 1,
            MessageId::ServiceTempNotAvailable => 2,
            MessageId::Empty => 3,
        }
    }

    pub fn default_text(self) -> &'static str {
        match self {
            MessageId::ServiceNotAvailable => "GPS service not available",
            MessageId::ServiceTempNotAvailable => "GPS service temporarily not available",
            MessageId::Empty => "",
        }
    }
}

impl From<ProviderStatus> for MessageId {
    fn from(status: ProviderStatus) -> Self {
        match status {
            ProviderStatus::OutOfService => MessageId::ServiceNotAvailable,
            ProviderStatus::TemporarilyUnavailable => MessageId::ServiceTempNotAvailable,
            ProviderStatus::Available => MessageId::Empty,
        }
    }
}

/// Resolve a location provider status code to the message to display.
///
/// Unknown codes return `None`: there is nothing to show, and it is not an error.
pub fn error_text_id(error_code: i32) -> Option<MessageId> {
    match ProviderStatus::try_from(error_code) {
        Ok(ProviderStatus::OutOfService) => {
            debug!("GPS service not available");
            Some(MessageId::ServiceNotAvailable)
        }
        Ok(ProviderStatus::TemporarilyUnavailable) => {
            debug!("GPS service temporarily not available");
            Some(MessageId::ServiceTempNotAvailable)
        }
        Ok(ProviderStatus::Available) => {
            debug!("GPS service is back and running");
            Some(MessageId::Empty)
        }
        Err(code) => {
            warn!(code, "unknown location provider status code");
            None
        }
    }
}

/// Integer form of [`error_text_id`], with [`UNKNOWN_MESSAGE_ID`] for unknown codes
pub fn error_text_raw_id(error_code: i32) -> i32 {
    error_text_id(error_code).map_or(UNKNOWN_MESSAGE_ID, MessageId::raw)
}
