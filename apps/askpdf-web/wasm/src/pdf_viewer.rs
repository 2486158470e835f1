//! pdf.js integration for rendering the selected document
//!
//! Rendering, layout, and pagination of the PDF bytes are delegated to
//! pdf.js through the JavaScript bridge; the loaded document lives on the
//! bridge side. This module sequences the work: load from a local object
//! URL, record the page count, then render every page in order into wrapper
//! elements whose ids the navigation layer resolves by page number. The
//! `PdfViewer` struct tracks what has been loaded.

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement};

use crate::view_state::page_anchor_id;

// External JavaScript functions from pdf-bridge.js
#[wasm_bindgen(module = "/www/js/pdf-bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = initPdfJs)]
    async fn init_pdf_js_internal(worker_src: &str) -> JsValue;

    #[wasm_bindgen(js_name = loadDocument)]
    async fn load_document_internal(url: &str) -> JsValue;

    #[wasm_bindgen(js_name = renderPage)]
    async fn render_page_internal(page_num: u32, canvas: &HtmlCanvasElement, scale: f64)
        -> JsValue;
}

/// Fixed render scale the two-pane layout was designed around.
const RENDER_SCALE: f64 = 1.3;

/// Tracks the document currently held by the pdf.js bridge.
pub(crate) struct PdfViewer {
    loaded: bool,
    page_count: u32,
}

impl PdfViewer {
    pub fn new() -> Self {
        Self {
            loaded: false,
            page_count: 0,
        }
    }

    /// Record a successful load and its page count.
    pub fn set_loaded(&mut self, page_count: u32) {
        self.loaded = true;
        self.page_count = page_count;
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded && self.page_count > 0
    }
}

/// Load a document from a local object URL into the bridge and return its
/// page count.
pub(crate) async fn load_document(url: &str) -> Result<u32, JsValue> {
    let doc = load_document_internal(url).await;
    if doc.is_undefined() || doc.is_null() {
        return Err(JsValue::from_str("Failed to load PDF document"));
    }

    let num_pages = Reflect::get(&doc, &JsValue::from_str("numPages"))?
        .as_f64()
        .unwrap_or(0.0) as u32;
    Ok(num_pages)
}

/// Render pages 1..=`page_count`, in page order, into `container`. Each page
/// sits in a wrapper div tagged `page-{n}` so `go_to_page` can locate it.
pub(crate) async fn render_pages(page_count: u32, container: &Element) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document object available"))?;

    container.set_inner_html("");
    for page_num in 1..=page_count {
        let wrapper = document.create_element("div")?;
        wrapper.set_id(&page_anchor_id(page_num));
        wrapper.set_class_name("pdf-page");

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        wrapper.append_child(&canvas)?;
        container.append_child(&wrapper)?;

        render_page_internal(page_num, &canvas, RENDER_SCALE).await;
    }
    Ok(())
}

/// Initialize pdf.js with the default worker. Must run before documents are
/// loaded.
#[wasm_bindgen]
pub async fn init_pdf_js() -> Result<(), JsValue> {
    init_pdf_js_internal(
        "https://cdn.jsdelivr.net/npm/pdfjs-dist@3.11.174/build/pdf.worker.min.js",
    )
    .await;
    Ok(())
}

/// Initialize pdf.js with a custom worker URL.
#[wasm_bindgen]
pub async fn init_pdf_js_with_worker(worker_src: &str) -> Result<(), JsValue> {
    init_pdf_js_internal(worker_src).await;
    Ok(())
}
