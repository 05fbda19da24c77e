use thiserror::Error;

use crate::save::ImageFormat;

/// Errors raised when a stroke violates the model's invariants
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidStrokeError {
    #[error("stroke has no points")]
    EmptyPoints,

    #[error("stroke width must be positive, got {0}")]
    NonPositiveWidth(f32),

    #[error("stroke point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
}

/// Errors raised while parsing a vector document
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedDocumentError {
    #[error("document is not well-formed XML: {0}")]
    Xml(String),

    #[error("document has no root element")]
    MissingRoot,

    #[error("expected <svg> root element, found <{0}>")]
    UnexpectedRoot(String),

    #[error("root element is never closed")]
    UnclosedRoot,

    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("attribute `{attribute}` has invalid value {value:?}")]
    InvalidAttribute { attribute: String, value: String },

    #[error("unsupported path command `{0}`")]
    UnsupportedCommand(char),

    #[error("invalid path data: {0}")]
    InvalidPathData(String),

    #[error("path does not describe a valid stroke: {0}")]
    InvalidStroke(#[from] InvalidStrokeError),
}

impl From<quick_xml::Error> for MalformedDocumentError {
    fn from(error: quick_xml::Error) -> Self {
        MalformedDocumentError::Xml(error.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for MalformedDocumentError {
    fn from(error: quick_xml::events::attributes::AttrError) -> Self {
        MalformedDocumentError::Xml(error.to_string())
    }
}

/// Errors from the undo/redo history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

/// Errors that can occur while saving a drawing to a file
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Filename cannot be empty")]
    EmptyFilename,

    #[error("Filename contains invalid characters: {0}")]
    InvalidFilename(String),

    #[error("No raster encoder available for {0:?}")]
    UnsupportedFormat(ImageFormat),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while opening a drawing from a file
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("File could not be opened: {0}")]
    Malformed(#[from] MalformedDocumentError),
}

/// Errors that can occur during settings and session persistence
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize state: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to write state: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to read state file: {0}")]
    ReadError(String),

    #[error("Invalid state data: {0}")]
    InvalidState(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;
