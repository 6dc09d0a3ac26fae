// Error taxonomy shared by the client components
use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Unexpected response from the analysis service";

/// Failures talking to the remote service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401/403; the message is surfaced verbatim.
    #[error("{message}")]
    Auth { status: u16, message: String },

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Could not connect to backend: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ApiError {
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Auth { message, .. } | ApiError::Status { message, .. } => message.clone(),
            ApiError::Transport(_) => self.to_string(),
            // Reported to the operator the same way as a transport failure
            ApiError::MalformedResponse(_) => GENERIC_FAILURE.to_string(),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter username and password.")]
    MissingCredentials,

    #[error("Please select a CSV file first.")]
    MissingFile,

    #[error("Only .csv files can be uploaded (got {file_name}).")]
    UnsupportedFile { file_name: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("An upload is already in progress.")]
    InFlight,

    /// Credentials changed while the request was in flight; the response was dropped.
    #[error("Upload result discarded because the session changed.")]
    Discarded,

    #[error("Upload Failed: {}", .0.user_message())]
    Api(#[from] ApiError),
}

impl UploadError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// A newer trigger arrived before this fetch completed.
    #[error("History fetch superseded by a newer request")]
    Superseded,

    #[error("Failed to fetch history: {}", .0.user_message())]
    Api(#[from] ApiError),
}

impl FetchError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DownloadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to download PDF: {}", .0.user_message())]
    Api(#[from] ApiError),

    #[error("Failed to save report {file_name}: {message}")]
    Save { file_name: String, message: String },
}

impl DownloadError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_error_messages() {
        let missing = UploadError::from(ValidationError::MissingCredentials);
        assert_eq!(missing.user_message(), "Please enter username and password.");

        let no_file = UploadError::from(ValidationError::MissingFile);
        assert_eq!(no_file.user_message(), "Please select a CSV file first.");

        let server = UploadError::from(ApiError::Status {
            status: 400,
            message: "Missing column: Flowrate".to_string(),
        });
        assert_eq!(server.user_message(), "Upload Failed: Missing column: Flowrate");
    }

    #[test]
    fn test_malformed_reads_like_transport_failure() {
        let err = ApiError::MalformedResponse("missing field `summary_data`".to_string());
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert!(!err.is_auth());
    }

    #[test]
    fn test_auth_message_is_verbatim() {
        let err = ApiError::Auth {
            status: 401,
            message: "Invalid username/password.".to_string(),
        };
        assert!(err.is_auth());
        assert_eq!(err.user_message(), "Invalid username/password.");
    }
}
