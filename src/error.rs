/// Errors that can occur when operating on a ConMap.
///
/// Key absence is never an error: lookups return `Option`/`bool` instead.
#[derive(Debug)]
pub enum Error {
    /// The shard count is invalid (must be a power of two and greater than 0).
    InvalidShardCount,
    /// Deserialization failed on malformed or type-mismatched input.
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidShardCount => {
                write!(f, "shard count must be a power of two and greater than 0")
            }
            Error::Json(err) => write!(f, "json: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidShardCount => None,
            Error::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
