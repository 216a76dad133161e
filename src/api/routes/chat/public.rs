//! Public types for the chat API
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub status: String,
}

impl ChatResponse {
    pub fn success(response: String) -> Self {
        Self {
            response,
            status: "success".to_string(),
        }
    }
}
