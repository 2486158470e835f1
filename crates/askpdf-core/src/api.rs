//! Typed shapes of the two backend endpoints
//!
//! The contract is assumed, not negotiated: any body that does not match the
//! expected shape is treated as a failed exchange by the caller.

use serde::Deserialize;

use crate::error::ApiError;

/// Body of a successful `POST /upload-pdf` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    pub file_id: String,
}

/// Body of a `POST /chat` response. The backend returns either an error
/// object or an answer with zero-based page citations. A body carrying both
/// resolves to the error, so the error-first handling mirrors the server's
/// precedence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChatReply {
    Failure {
        error: String,
    },
    Answer {
        response: String,
        citations: Vec<u32>,
    },
}

impl ChatReply {
    /// First citation, if the backend supplied any. Zero-based.
    pub fn first_citation(&self) -> Option<u32> {
        match self {
            ChatReply::Failure { .. } => None,
            ChatReply::Answer { citations, .. } => citations.first().copied(),
        }
    }
}

/// Decode an `/upload-pdf` body.
pub fn parse_upload_response(body: &str) -> Result<UploadResponse, ApiError> {
    Ok(serde_json::from_str(body)?)
}

/// Decode a `/chat` body.
pub fn parse_chat_reply(body: &str) -> Result<ChatReply, ApiError> {
    Ok(serde_json::from_str(body)?)
}
