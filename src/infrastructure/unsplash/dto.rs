use serde::Deserialize;

/// Unsplash API error response structure.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error messages from Unsplash.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    /// Joins all messages into one line.
    #[must_use]
    pub fn message(&self) -> String {
        self.errors.join("; ")
    }
}
