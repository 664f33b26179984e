use serde::Serialize;

/// Transport or parse failure of one dashboard request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchError {
    #[error("request failed: {message}")]
    Network { message: String },
    #[error("response read failed: {message}")]
    Read { message: String },
    #[error("request failed with status {status}: {body}")]
    Http { status: u16, body: String },
    #[error("failed to decode response: {message}")]
    Decode { message: String },
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Read { .. } => "read",
            Self::Http { .. } => "http",
            Self::Decode { .. } => "decode",
        }
    }
}
