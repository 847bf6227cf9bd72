//! Error types for the content-generation assistant.

/// Error from a content-generation request.
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// The model produced no candidates, e.g. because the prompt was blocked.
    #[error("model returned no content: {0}")]
    EmptyResponse(String),

    /// Another request is still in flight.
    #[error("a content generation request is already in progress")]
    Busy,

    /// No API key configured.
    #[error("API key not configured")]
    MissingApiKey,
}
