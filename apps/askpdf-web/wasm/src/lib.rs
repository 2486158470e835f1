//! WASM bindings for the AskPDF browser client
//!
//! Upload a PDF, read it in a two-pane view, and chat with a backend that
//! answers from the document's content. All state is held in Rust via
//! [`AskPdfApp`]; JavaScript only wires DOM events and re-renders from the
//! snapshots the app returns.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { AskPdfApp, init_pdf_js } from './pkg/askpdf_wasm.js';
//!
//! await init();
//! await init_pdf_js();
//!
//! const app = new AskPdfApp(BACKEND_URL);
//! app.syncRoute();
//!
//! dropArea.addEventListener('drop', (e) => { app.handleDrop(e); render(); });
//! uploadButton.addEventListener('click', async () => { await app.upload(); render(); });
//!
//! // Analysis screen
//! await app.openDocument(viewerContainer);
//! sendButton.addEventListener('click', async () => { await app.sendMessage(); render(); });
//! ```

pub mod app;
mod chat_panel;
mod net;
pub mod pdf_viewer;
mod uploader;
mod view_state;

use wasm_bindgen::prelude::*;

// Re-export the JavaScript-facing surface
pub use app::AskPdfApp;
pub use pdf_viewer::{init_pdf_js, init_pdf_js_with_worker};

/// Initialize the WASM module. Called automatically by wasm-bindgen.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        assert!(!get_version().is_empty());
    }
}
