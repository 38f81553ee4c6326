use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to the Events API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid API url: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Message to show the user: the server's own words when it gave any,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

/// A form that cannot be sent as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Event title is required")]
    MissingTitle,
    #[error("Event date is required")]
    MissingDate,
    #[error("Start and end times are required")]
    MissingTimes,
    #[error("Date must look like YYYY-MM-DD, got {0:?}")]
    InvalidDate(String),
    #[error("Times must look like HH:MM, got {0:?}")]
    InvalidTime(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_is_shown_verbatim() {
        let err = ApiError::Status {
            status: 400,
            message: Some("time data '25:00' does not match format '%H:%M'".into()),
        };
        assert_eq!(
            err.user_message("Failed to save event"),
            "time data '25:00' does not match format '%H:%M'"
        );
    }

    #[test]
    fn missing_or_blank_message_falls_back() {
        let bare = ApiError::Status {
            status: 500,
            message: None,
        };
        let blank = ApiError::Status {
            status: 500,
            message: Some("  ".into()),
        };
        assert_eq!(bare.user_message("Failed to delete event"), "Failed to delete event");
        assert_eq!(blank.user_message("Failed to delete event"), "Failed to delete event");
        assert_eq!(bare.to_string(), "server responded 500");
    }
}
