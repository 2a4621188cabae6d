use thiserror::Error;

/// Broad failure classes, for callers that branch on the taxonomy rather
/// than on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Startup misconfiguration; the loop must not start.
    Fatal,
    /// Network-level failure reaching the API.
    Transport,
    /// The API answered, but not with the agreed shape.
    Protocol,
    /// A well-shaped response carrying an unusable submission record.
    Data,
    /// Delivery to the messaging endpoint failed.
    Dispatch,
}

#[derive(Debug, Error)]
pub enum HomewatchError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingConfig(Vec<String>),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API returned HTTP {status} for {url} (from_date={cursor})")]
    BadStatus { status: u16, url: String, cursor: i64 },

    #[error("API response for {url} was not valid JSON: {source}")]
    BadBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API reported failure: {key} = {value} (from_date={cursor})")]
    ApiReported {
        key: &'static str,
        value: String,
        cursor: i64,
    },

    #[error("expected the response to be a JSON object, got {got}")]
    NotAnObject { got: &'static str },

    #[error("response is missing the '{0}' key")]
    MissingKey(&'static str),

    #[error("expected '{key}' to be {expected}, got {got}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    #[error("submission is missing the '{0}' field")]
    MissingField(&'static str),

    #[error("unknown submission status: '{0}'")]
    UnknownStatus(String),

    #[error("failed to deliver notification: {0}")]
    Dispatch(String),
}

impl HomewatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HomewatchError::MissingConfig(_) => ErrorKind::Fatal,
            HomewatchError::Transport { .. } => ErrorKind::Transport,
            HomewatchError::BadStatus { .. }
            | HomewatchError::BadBody { .. }
            | HomewatchError::ApiReported { .. }
            | HomewatchError::NotAnObject { .. }
            | HomewatchError::MissingKey(_)
            | HomewatchError::WrongType { .. } => ErrorKind::Protocol,
            HomewatchError::MissingField(_) | HomewatchError::UnknownStatus(_) => ErrorKind::Data,
            HomewatchError::Dispatch(_) => ErrorKind::Dispatch,
        }
    }
}

pub type Result<T> = std::result::Result<T, HomewatchError>;
