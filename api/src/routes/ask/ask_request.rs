use serde::{Deserialize, Serialize};

/// Request payload for POST /ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Natural language question.
    pub question: String,
}

/// Response payload for POST /ask.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Normalized question (trimmed, ending with `?`).
    pub question: String,
    pub answer: String,
    /// Cache entry id.
    pub id: i64,
}
