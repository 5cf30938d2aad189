use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes let scripts distinguish a local input problem from a
/// remote failure without parsing stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, file I/O error, etc.)
    ApplicationError = 3,
    /// Input rejected locally before any request was sent
    ValidationFailed = 4,
    /// The upload was processed but the extraction pipeline reported a failure step
    ExtractionFailed = 5,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
            ExitCode::ValidationFailed => write!(f, "Validation Failed (4)"),
            ExitCode::ExtractionFailed => write!(f, "Extraction Failed (5)"),
        }
    }
}

/// Input problems caught before any network call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No SDS file selected\n\n💡 Hint: Pass the path of a PDF file to upload")]
    MissingFile,

    #[error("File {name} is too large ({size} bytes). Maximum allowed size is {max} bytes.\n\n💡 Hint: Split or compress the PDF before uploading")]
    FileTooLarge { name: String, size: u64, max: u64 },

    #[error("File {name} is not a PDF document\n\n💡 Hint: Only PDF safety data sheets can be uploaded")]
    NotPdf { name: String },

    #[error("Either an SDS ID or a PDF MD5 is required\n\n💡 Hint: Use --sds-id or --pdf-md5")]
    MissingLookupKey,

    #[error("API key must not be empty\n\n💡 Hint: Use `sds-client api-key clear` to remove a stored key")]
    EmptyApiKey,
}

/// Application-specific errors for the SDS client.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping user-facing messages next to the variants they describe.
#[derive(Debug, Error)]
pub enum SdsError {
    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Invalid API base URL: {url}\nReason: {reason}\n\n💡 Hint: Use an absolute http:// or https:// URL")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Cannot locate the API key store\nReason: {reason}\n\n💡 Hint: Set SDS_CLIENT_HOME to a writable directory")]
    KeyStoreUnavailable { reason: String },

    #[error("Upload of {name} was cancelled before the server answered\n\n💡 Hint: The file may still have been received; check with `sds-client revision` before retrying")]
    UploadCancelled { name: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
