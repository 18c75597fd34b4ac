//! JSON output types for machine-readable CLI output.
//!
//! These back the `--json` flag of `inspect`. Field names and error codes are stable so
//! other tools can parse the output.

use riffwave::{LoadError, WavError, WavHeader};
use serde::Serialize;

/// Error codes for CLI operations.
///
/// Validation failures pass through the parser's own codes (`WAV_001`..`WAV_005`).
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Input directory could not be walked
    pub const DIR_WALK: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "WAV_003")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Header field the failure is attributed to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Header fields decoded before the failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial: Option<WavHeader>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            file: None,
            partial: None,
        }
    }

    /// Converts a parser failure, keeping its field and partial header.
    pub fn from_wav_error(err: &WavError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            field: Some(err.field.to_string()),
            file: None,
            partial: Some((*err.partial).clone()),
        }
    }

    /// Converts a load failure; read errors get [`error_codes::FILE_READ`].
    pub fn from_load_error(err: &LoadError) -> Self {
        match err {
            LoadError::Parse(wav) => Self::from_wav_error(wav),
            LoadError::Read { .. } | LoadError::TooLarge { .. } => {
                Self::new(error_codes::FILE_READ, err.to_string())
            }
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Details of one successfully parsed file.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InspectResult {
    /// Input file path
    pub input: String,
    /// File size in bytes
    pub size: usize,
    /// BLAKE3 hash of the whole file
    pub input_hash: String,
    /// BLAKE3 hash of the data chunk payload
    pub data_hash: String,
    /// Length of the sliced data region
    pub data_len: usize,
    /// Decoded header fields
    pub header: WavHeader,
    /// Playback duration in milliseconds
    pub milliseconds: f64,
}

/// Output of `inspect --input <file> --json`.
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    /// Whether the file parsed
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InspectResult>,
}

impl InspectOutput {
    /// Creates a successful inspect output.
    pub fn success(result: InspectResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed inspect output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Result for a single file in batch mode (either success or error).
#[derive(Debug, Clone, Serialize)]
pub struct BatchInspectItem {
    /// Input file path
    pub input: String,
    /// Whether the file parsed
    pub success: bool,
    /// Result (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InspectResult>,
    /// Error (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

impl BatchInspectItem {
    pub fn from_outcome(input: impl Into<String>, outcome: Result<InspectResult, JsonError>) -> Self {
        match outcome {
            Ok(result) => Self {
                input: input.into(),
                success: true,
                result: Some(result),
                error: None,
            },
            Err(error) => Self {
                input: input.into(),
                success: false,
                result: None,
                error: Some(error),
            },
        }
    }
}

/// Output of `inspect --input-dir <dir> --json`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchInspectOutput {
    /// Whether every file parsed
    pub success: bool,
    /// Number of files inspected
    pub total: usize,
    /// Number of files that parsed
    pub passed: usize,
    /// Number of files that failed
    pub failed: usize,
    /// Per-file results in path order
    pub items: Vec<BatchInspectItem>,
}

impl BatchInspectOutput {
    pub fn new(items: Vec<BatchInspectItem>) -> Self {
        let passed = items.iter().filter(|item| item.success).count();
        let failed = items.len() - passed;
        Self {
            success: failed == 0,
            total: items.len(),
            passed,
            failed,
            items,
        }
    }
}
