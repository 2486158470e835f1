//! Client-side domain logic for the AskPDF front-end
//!
//! Everything here is pure Rust with no browser dependency: the chat
//! transcript, the scroll-synchronized view position, drop validation, the
//! backend payload shapes, and route parsing. The wasm app in
//! `apps/askpdf-web` wires these into the DOM and the network.

pub mod api;
pub mod chat;
pub mod error;
pub mod routes;
pub mod upload;
pub mod view;

pub use api::{parse_chat_reply, parse_upload_response, ChatReply, UploadResponse};
pub use chat::{ChatLog, Message, GREETING, SEND_FAILURE_TEXT};
pub use error::ApiError;
pub use routes::Route;
pub use upload::{
    format_megabytes, validate_candidate, validate_file_count, DropRejection, FileCandidate,
    MAX_FILE_BYTES, PDF_MIME,
};
pub use view::ViewPosition;
