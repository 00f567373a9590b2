use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse network JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write edge report: {0}")]
    ReportError(#[from] csv::Error),

    #[error("Id '{0}' is not numeric")]
    NonNumericId(String),

    #[error("Node {0} has non-finite coordinates")]
    NonFiniteCoordinates(i64),

    #[error("Node id {0} is defined more than once")]
    DuplicateNodeId(i64),

    #[error("Edge {from} -> {to} references unknown node {missing}")]
    UnknownEdgeEndpoint { from: i64, to: i64, missing: i64 },

    #[error("Edge {from} -> {to} has invalid length {length}")]
    InvalidEdgeLength { from: i64, to: i64, length: f64 },

    #[error("Invalid simulation configuration: {0}")]
    InvalidConfiguration(String),
}

impl Error {
    /// Returns `true` for errors that reject a network definition.
    pub fn is_load_error(&self) -> bool {
        !matches!(self, Error::ReportError(_) | Error::InvalidConfiguration(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
