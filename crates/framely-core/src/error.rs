//! Error types module
//!
//! Validation failures, resource API failures and composition failures. Every
//! error implements [`ErrorMetadata`] so the console can print exactly one
//! human-readable message per failure.

use crate::composition::CompositionStep;
use crate::draft::BatchKind;
use crate::models::CampaignId;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for rejected requests and incomplete campaigns
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Describes how an error should be presented to the console user
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "NO_VALID_IMAGES")
    fn error_code(&self) -> &'static str;

    /// Whether trying the same action again may succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Input problems detected before any network call is made
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No valid image files were selected")]
    NoValidImages,

    #[error("Campaign name is required")]
    EmptyName,

    #[error("At least one {0} image is required")]
    MissingFiles(BatchKind),

    #[error("{0} files are not part of this workflow")]
    KindNotInWorkflow(BatchKind),

    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(err: validator::ValidationErrors) -> Self {
        ValidationError::InvalidInput(err.to_string())
    }
}

/// Failures of a single resource API call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Network failure or timeout; the server may never have seen the request
    #[error("Transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Success status but the body could not be understood
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The request could not be built locally
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 401, .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure of a campaign submission
#[derive(Debug, thiserror::Error)]
pub enum CompositionError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The create-campaign call never reached the server or timed out
    #[error("Failed to reach the server: {0}")]
    Transport(String),

    /// The create-campaign call was refused; nothing exists on the server
    #[error("Campaign creation rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The server answered the create call but the campaign id could not be read
    #[error("Campaign creation could not be confirmed: {0}")]
    Unconfirmed(String),

    /// The campaign exists but a follow-up call failed; it is incomplete
    #[error("Campaign {campaign_id} was created but {failed_at} failed: {source}")]
    PartialComposition {
        campaign_id: CampaignId,
        failed_at: CompositionStep,
        #[source]
        source: ApiError,
    },
}

impl CompositionError {
    /// Map a failure of the first (campaign-creating) call.
    pub fn from_primary(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { status, message } => CompositionError::Rejected { status, message },
            ApiError::Decode(message) => CompositionError::Unconfirmed(message),
            ApiError::Transport(message) | ApiError::InvalidRequest(message) => {
                CompositionError::Transport(message)
            }
        }
    }

    /// The step the submission was in when it failed.
    pub fn failed_at(&self) -> CompositionStep {
        match self {
            CompositionError::Validation(_) => CompositionStep::Validating,
            CompositionError::Transport(_)
            | CompositionError::Rejected { .. }
            | CompositionError::Unconfirmed(_) => CompositionStep::CreatingPrimary,
            CompositionError::PartialComposition { failed_at, .. } => *failed_at,
        }
    }

    /// Id of the campaign left on the server, if one was created.
    pub fn campaign_id(&self) -> Option<CampaignId> {
        match self {
            CompositionError::PartialComposition { campaign_id, .. } => Some(*campaign_id),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        match self {
            CompositionError::Rejected { status, .. } => *status == 401,
            CompositionError::PartialComposition { source, .. } => source.is_unauthorized(),
            _ => false,
        }
    }
}

const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Run `framely login` to sign in again.";

impl ErrorMetadata for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            ValidationError::NoValidImages => "NO_VALID_IMAGES",
            ValidationError::EmptyName => "EMPTY_NAME",
            ValidationError::MissingFiles(_) => "MISSING_FILES",
            ValidationError::KindNotInWorkflow(_) => "KIND_NOT_IN_WORKFLOW",
            ValidationError::Required(_) => "REQUIRED_FIELD",
            ValidationError::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }

    fn suggested_action(&self) -> Option<&'static str> {
        match self {
            ValidationError::NoValidImages => Some("Select PNG, JPEG, GIF or WebP files"),
            ValidationError::MissingFiles(_) => Some("Add at least one image of each required kind"),
            _ => Some("Check the command arguments and try again"),
        }
    }

    fn client_message(&self) -> String {
        match self {
            ValidationError::NoValidImages => {
                "Please select valid image files (PNG recommended)".to_string()
            }
            ValidationError::MissingFiles(BatchKind::Frame) => {
                "Please upload at least one frame image".to_string()
            }
            ValidationError::MissingFiles(BatchKind::Poster) => {
                "Poster background is required".to_string()
            }
            other => other.to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

impl ErrorMetadata for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "TRANSPORT_ERROR",
            ApiError::Rejected { status: 401, .. } => "UNAUTHORIZED",
            ApiError::Rejected { status: 404, .. } => "NOT_FOUND",
            ApiError::Rejected { .. } => "REJECTED",
            ApiError::Decode(_) => "DECODE_ERROR",
            ApiError::InvalidRequest(_) => "INVALID_REQUEST",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Rejected { status, .. } => *status >= 500,
            ApiError::Decode(_) | ApiError::InvalidRequest(_) => false,
        }
    }

    fn suggested_action(&self) -> Option<&'static str> {
        match self {
            ApiError::Transport(_) => {
                Some("Check FRAMELY_API_URL; a sleeping backend may need 30-60 seconds to wake up")
            }
            ApiError::Rejected { status: 401, .. } => Some("Run `framely login`"),
            ApiError::Rejected { status: 404, .. } => Some("Verify the resource ID exists"),
            ApiError::Rejected { status, .. } if *status >= 500 => {
                Some("Retry after a short delay")
            }
            _ => None,
        }
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "Cannot connect to server".to_string(),
            ApiError::Rejected { status: 401, .. } => SESSION_EXPIRED_MESSAGE.to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Decode(_) => "Unexpected response from server".to_string(),
            ApiError::InvalidRequest(msg) => msg.clone(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            ApiError::Rejected { status, .. } if *status < 500 => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

impl ErrorMetadata for CompositionError {
    fn error_code(&self) -> &'static str {
        match self {
            CompositionError::Validation(err) => err.error_code(),
            CompositionError::Transport(_) => "TRANSPORT_ERROR",
            CompositionError::Rejected { status: 401, .. } => "UNAUTHORIZED",
            CompositionError::Rejected { .. } => "REJECTED",
            CompositionError::Unconfirmed(_) => "UNCONFIRMED_CREATION",
            CompositionError::PartialComposition { .. } => "PARTIAL_COMPOSITION",
        }
    }

    // Submissions are not idempotent: a timed-out create may still have landed.
    fn is_recoverable(&self) -> bool {
        false
    }

    fn suggested_action(&self) -> Option<&'static str> {
        match self {
            CompositionError::Validation(err) => err.suggested_action(),
            CompositionError::Transport(_) => Some(
                "Check FRAMELY_API_URL, then run `framely campaigns` before retrying; \
                 a timed-out request may still have created the campaign",
            ),
            CompositionError::Rejected { status: 401, .. } => Some("Run `framely login`"),
            CompositionError::Rejected { .. } => None,
            CompositionError::Unconfirmed(_) => {
                Some("Run `framely campaigns` to check whether it exists before retrying")
            }
            CompositionError::PartialComposition { .. } => {
                Some("Open the campaign and add the missing images, or delete it and start over")
            }
        }
    }

    fn client_message(&self) -> String {
        match self {
            CompositionError::Validation(err) => err.client_message(),
            CompositionError::Transport(_) => {
                "Failed to create campaign: cannot connect to server".to_string()
            }
            CompositionError::Rejected { status: 401, .. } => SESSION_EXPIRED_MESSAGE.to_string(),
            CompositionError::Rejected { message, .. } if !message.is_empty() => message.clone(),
            CompositionError::Rejected { .. } => "Failed to create campaign".to_string(),
            CompositionError::Unconfirmed(_) => {
                "The server accepted the campaign but its reply could not be read; \
                 it may already exist"
                    .to_string()
            }
            CompositionError::PartialComposition {
                campaign_id,
                failed_at,
                source,
            } => format!(
                "Campaign {} was created but is incomplete: {} failed ({})",
                campaign_id,
                failed_at,
                source.client_message()
            ),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            CompositionError::Validation(_) => LogLevel::Debug,
            CompositionError::Rejected { .. }
            | CompositionError::Unconfirmed(_)
            | CompositionError::PartialComposition { .. } => LogLevel::Warn,
            CompositionError::Transport(_) => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_metadata() {
        let err = ValidationError::NoValidImages;
        assert_eq!(err.error_code(), "NO_VALID_IMAGES");
        assert!(!err.is_recoverable());
        assert_eq!(
            err.client_message(),
            "Please select valid image files (PNG recommended)"
        );
        assert_eq!(err.log_level(), LogLevel::Debug);

        assert_eq!(ValidationError::EmptyName.client_message(), "Campaign name is required");
    }

    #[test]
    fn test_api_error_unauthorized() {
        let err = ApiError::Rejected {
            status: 401,
            message: "Invalid token".to_string(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.error_code(), "UNAUTHORIZED");
        assert!(err.client_message().contains("framely login"));
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_api_error_recoverability() {
        assert!(ApiError::Transport("timeout".to_string()).is_recoverable());
        assert!(ApiError::Rejected {
            status: 503,
            message: String::new()
        }
        .is_recoverable());
        assert!(!ApiError::Rejected {
            status: 400,
            message: String::new()
        }
        .is_recoverable());
        assert_eq!(ApiError::Decode("eof".to_string()).status(), None);
    }

    #[test]
    fn test_from_primary_maps_kinds() {
        let err = CompositionError::from_primary(ApiError::Rejected {
            status: 400,
            message: "Name taken".to_string(),
        });
        assert!(matches!(err, CompositionError::Rejected { status: 400, .. }));
        assert_eq!(err.client_message(), "Name taken");
        assert_eq!(err.failed_at(), CompositionStep::CreatingPrimary);
        assert_eq!(err.campaign_id(), None);

        let err = CompositionError::from_primary(ApiError::Transport("refused".to_string()));
        assert!(matches!(err, CompositionError::Transport(_)));
        assert!(!err.is_recoverable());
        assert!(err.suggested_action().unwrap().contains("before retrying"));
    }

    #[test]
    fn test_unreadable_create_reply_is_unconfirmed() {
        let err = CompositionError::from_primary(ApiError::Decode("missing field `id`".to_string()));
        assert!(matches!(err, CompositionError::Unconfirmed(_)));
        assert_eq!(err.error_code(), "UNCONFIRMED_CREATION");
        assert_eq!(err.failed_at(), CompositionStep::CreatingPrimary);
        assert_eq!(err.campaign_id(), None);
        assert!(!err.is_recoverable());
        assert!(err.client_message().contains("may already exist"));
        assert!(err.suggested_action().unwrap().contains("framely campaigns"));
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_no_composition_failure_is_recoverable() {
        let errors = [
            CompositionError::Validation(ValidationError::EmptyName),
            CompositionError::Transport("timed out".to_string()),
            CompositionError::Rejected {
                status: 503,
                message: String::new(),
            },
            CompositionError::Unconfirmed("eof".to_string()),
            CompositionError::PartialComposition {
                campaign_id: CampaignId(1),
                failed_at: CompositionStep::AddingSecondary { position: 0 },
                source: ApiError::Transport("reset".to_string()),
            },
        ];
        for err in errors {
            assert!(!err.is_recoverable(), "{err}");
        }
    }

    #[test]
    fn test_partial_composition_metadata() {
        let err = CompositionError::PartialComposition {
            campaign_id: CampaignId(12),
            failed_at: CompositionStep::AddingPrimaryRemainder { position: 2 },
            source: ApiError::Rejected {
                status: 413,
                message: "File too large".to_string(),
            },
        };
        assert_eq!(err.error_code(), "PARTIAL_COMPOSITION");
        assert_eq!(err.campaign_id(), Some(CampaignId(12)));
        assert!(!err.is_unauthorized());
        let message = err.client_message();
        assert!(message.contains("12"));
        assert!(message.contains("File too large"));
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_validation_converts_into_composition_error() {
        let err: CompositionError = ValidationError::EmptyName.into();
        assert_eq!(err.failed_at(), CompositionStep::Validating);
        assert_eq!(err.error_code(), "EMPTY_NAME");
    }
}
