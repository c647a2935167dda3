//! Error types for the Meal Stipend Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while reading attendance
//! workbooks and producing balances.
//!
//! Rows that fail to parse are not errors: the extractor drops them silently.

use thiserror::Error;

/// The main error type for the Meal Stipend Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use stipend_engine::error::EngineError;
///
/// let error = EngineError::SheetNotFound {
///     sheet: "식대".to_string(),
/// };
/// assert_eq!(error.to_string(), "Sheet not found: 식대");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The expected worksheet is absent from a workbook.
    #[error("Sheet not found: {sheet}")]
    SheetNotFound {
        /// The name of the missing sheet.
        sheet: String,
    },

    /// A cell range string did not match the `A1:B2` pattern.
    #[error("Invalid cell range: '{range}'")]
    RangeFormatInvalid {
        /// The offending range string.
        range: String,
    },

    /// A document could not be found in the document source.
    #[error("Document not found: {id}")]
    DocumentNotFound {
        /// The document identifier.
        id: String,
    },

    /// A document's bytes could not be read as a workbook.
    #[error("Failed to parse document '{id}': {message}")]
    DocumentParseError {
        /// The document identifier.
        id: String,
        /// A description of the parse error.
        message: String,
    },

    /// The document source could not be listed or read.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the storage failure.
        message: String,
    },

    /// A download link could not be produced for a document.
    #[error("Failed to resolve link for '{id}': {message}")]
    LinkError {
        /// The document identifier.
        id: String,
        /// A description of the failure.
        message: String,
    },

    /// The results spreadsheet could not be written.
    #[error("Failed to write results: {message}")]
    SinkError {
        /// A description of the write failure.
        message: String,
    },

    /// The requested year/month is not a valid billing period.
    #[error("Invalid period: {message}")]
    InvalidPeriod {
        /// A description of what made the period invalid.
        message: String,
    },

    /// No document produced any data for the batch.
    #[error("No documents could be processed")]
    NothingToProcess,
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/stipend.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/stipend.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_range_format_invalid_displays_range() {
        let error = EngineError::RangeFormatInvalid {
            range: "B3-L204".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid cell range: 'B3-L204'");
    }

    #[test]
    fn test_document_parse_error_displays_id_and_message() {
        let error = EngineError::DocumentParseError {
            id: "홍길동.xlsx".to_string(),
            message: "not a zip archive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse document '홍길동.xlsx': not a zip archive"
        );
    }

    #[test]
    fn test_nothing_to_process_message() {
        assert_eq!(
            EngineError::NothingToProcess.to_string(),
            "No documents could be processed"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_sheet_not_found() -> EngineResult<()> {
            Err(EngineError::SheetNotFound {
                sheet: "식대".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_sheet_not_found()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::SheetNotFound { .. })
        ));
    }
}
