//! Requests to the analysis backend
//!
//! Two endpoints, each a single multipart POST with no timeout, retry, or
//! cancellation. Response bodies are decoded by `askpdf-core` so the shapes
//! stay testable off the browser.

use askpdf_core::{parse_chat_reply, parse_upload_response, ChatReply, UploadResponse};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

pub(crate) const UPLOAD_ENDPOINT: &str = "/upload-pdf";
pub(crate) const CHAT_ENDPOINT: &str = "/chat";

/// POST the selected file as multipart field `file`; returns the document
/// identifier the backend assigned.
pub(crate) async fn upload_pdf(api_base: &str, file: &File) -> Result<UploadResponse, JsValue> {
    let form = FormData::new()?;
    form.append_with_blob_and_filename("file", file, &file.name())?;

    let body = post_form(&format!("{}{}", api_base, UPLOAD_ENDPOINT), &form).await?;
    parse_upload_response(&body).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// POST one chat turn as multipart fields `prompt` and `file_id`. The prompt
/// is sent verbatim, blank input included.
pub(crate) async fn send_chat(
    api_base: &str,
    prompt: &str,
    file_id: &str,
) -> Result<ChatReply, JsValue> {
    let form = FormData::new()?;
    form.append_with_str("prompt", prompt)?;
    form.append_with_str("file_id", file_id)?;

    let body = post_form(&format!("{}{}", api_base, CHAT_ENDPOINT), &form).await?;
    parse_chat_reply(&body).map_err(|e| JsValue::from_str(&e.to_string()))
}

async fn post_form(url: &str, form: &FormData) -> Result<String, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    // The browser sets the multipart content type, boundary included.
    opts.set_body(form.as_ref());

    let request = Request::new_with_str_and_init(url, &opts)?;

    let window = web_sys::window().ok_or("No window")?;
    let response = JsFuture::from(window.fetch_with_request(&request)).await?;
    let response: Response = response.dyn_into()?;

    let text = JsFuture::from(response.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}
