use thiserror::Error;

/// Longest slice of an error body kept for display.
pub const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("HTTP {status} {status_text} {body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Response was not valid JSON: {0}")]
    InvalidResponse(String),

    #[error("Invalid API base URL: {0}")]
    InvalidBase(String),
}

impl ApiError {
    pub fn http(status: u16, status_text: &str, body: &str) -> Self {
        Self::Http {
            status,
            status_text: status_text.trim().to_string(),
            body: truncate_body(body),
        }
    }

    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Keeps at most [`MAX_ERROR_BODY_CHARS`] characters, never splitting a code point.
pub fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect::<String>().trim().to_string()
}
