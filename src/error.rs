use std::fmt;
use std::path::PathBuf;

/// Error types for telemetry log decoding and export
#[derive(Debug)]
pub enum DecodeError {
    /// Timestamp slice is not a digit pair or a field is out of range
    MalformedTimestamp(String),
    /// Fewer bytes left in the stream than the next block needs
    ShortRead { expected: usize, actual: usize },
    /// Configuration rejected before decoding starts
    InvalidConfig(String),
    /// A header or value cannot be represented in the output encoding
    Encoding(String),
    /// I/O errors
    Io(std::io::Error),
    /// CSV serialization errors
    Csv(csv::Error),
    /// Configuration file could not be parsed
    Json(String),
    /// Any of the above, tagged with the file it happened in
    File {
        path: PathBuf,
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Attach the identity of the file being processed
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            DecodeError::File { .. } => self,
            other => DecodeError::File {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, skipping any file tags
    pub fn root(&self) -> &DecodeError {
        match self {
            DecodeError::File { source, .. } => source.root(),
            other => other,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MalformedTimestamp(msg) => write!(f, "Malformed timestamp: {}", msg),
            DecodeError::ShortRead { expected, actual } => write!(
                f,
                "Short read: expected {} bytes, {} available",
                expected, actual
            ),
            DecodeError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            DecodeError::Encoding(msg) => write!(f, "Encoding error: {}", msg),
            DecodeError::Io(err) => write!(f, "I/O error: {}", err),
            DecodeError::Csv(err) => write!(f, "CSV error: {}", err),
            DecodeError::Json(msg) => write!(f, "Config file error: {}", msg),
            DecodeError::File { path, source } => write!(f, "{}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Io(err) => Some(err),
            DecodeError::Csv(err) => Some(err),
            DecodeError::File { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError::Io(err)
    }
}

impl From<csv::Error> for DecodeError {
    fn from(err: csv::Error) -> Self {
        DecodeError::Csv(err)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
