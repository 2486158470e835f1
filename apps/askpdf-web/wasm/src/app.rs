//! Application facade exported to JavaScript
//!
//! All state is held in Rust: one `AskPdfApp` per browser tab owns the
//! shared view state, the uploader, the viewer, and the chat panel.
//! JavaScript wires DOM events to these methods and re-renders from the
//! snapshots they return.
//!
//! Every exported method borrows `self` shared so the app stays queryable
//! while an async request is pending (the in-flight future holds the
//! wasm-bindgen borrow for its whole lifetime); mutation goes through the
//! inner `RefCell`, which is never held across an await.

use std::cell::RefCell;

use askpdf_core::{format_megabytes, Route, UploadResponse};
use wasm_bindgen::prelude::*;
use web_sys::{console, DragEvent, Element, HtmlInputElement};

use crate::chat_panel::{ChatPanel, SendOutcome};
use crate::net;
use crate::pdf_viewer::{self, PdfViewer};
use crate::uploader::Uploader;
use crate::view_state::ViewState;

struct AppInner {
    /// `None` when the location matched no known route.
    route: Option<Route>,
    state: ViewState,
    uploader: Uploader,
    uploading: bool,
    viewer: PdfViewer,
    chat: Option<ChatPanel>,
}

impl AppInner {
    fn new() -> Self {
        Self {
            route: Some(Route::Upload),
            state: ViewState::new(),
            uploader: Uploader::new(),
            uploading: false,
            viewer: PdfViewer::new(),
            chat: None,
        }
    }

    fn enter_route(&mut self, route: Route) {
        if let Route::Analyze { ref file_id } = route {
            let fresh = self
                .chat
                .as_ref()
                .is_none_or(|chat| chat.file_id() != file_id.as_str());
            if fresh {
                self.chat = Some(ChatPanel::new(file_id, js_sys::Date::now()));
            }
        }
        self.route = Some(route);
    }

    fn navigate_to_analysis(&mut self, file_id: &str) -> Result<(), JsValue> {
        let route = Route::Analyze {
            file_id: file_id.to_string(),
        };
        let window = web_sys::window().ok_or("No window")?;
        window
            .history()?
            .push_state_with_url(&JsValue::NULL, "", Some(&route.path()))?;
        self.enter_route(route);
        Ok(())
    }
}

/// The AskPDF client. Construct once at startup with the backend base URL,
/// then call `syncRoute` to pick the screen for the current location.
#[wasm_bindgen]
pub struct AskPdfApp {
    api_base: String,
    inner: RefCell<AppInner>,
}

#[wasm_bindgen]
impl AskPdfApp {
    #[wasm_bindgen(constructor)]
    pub fn new(api_base: &str) -> Self {
        console_error_panic_hook::set_once();
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            inner: RefCell::new(AppInner::new()),
        }
    }

    // ---- routing ----

    /// Re-read the route from the browser location. Call at startup and on
    /// popstate.
    #[wasm_bindgen(js_name = syncRoute)]
    pub fn sync_route(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let path = window.location().pathname()?;
        let mut inner = self.inner.borrow_mut();
        match Route::parse(&path) {
            Some(route) => inner.enter_route(route),
            None => inner.route = None,
        }
        Ok(())
    }

    /// Which screen to show: "upload", "analyze", or "unknown" (the
    /// "No file ID provided" placeholder).
    #[wasm_bindgen(js_name = currentRoute)]
    pub fn current_route(&self) -> String {
        match &self.inner.borrow().route {
            Some(Route::Upload) => "upload".to_string(),
            Some(Route::Analyze { .. }) => "analyze".to_string(),
            None => "unknown".to_string(),
        }
    }

    #[wasm_bindgen(js_name = fileId)]
    pub fn file_id(&self) -> Option<String> {
        self.inner
            .borrow()
            .route
            .as_ref()
            .and_then(Route::file_id)
            .map(str::to_string)
    }

    // ---- upload screen ----

    #[wasm_bindgen(js_name = handleDragOver)]
    pub fn handle_drag_over(&self, event: DragEvent) {
        event.prevent_default();
        self.inner
            .borrow_mut()
            .uploader
            .update_drag(event.data_transfer().map(|dt| dt.items()));
    }

    #[wasm_bindgen(js_name = handleDragLeave)]
    pub fn handle_drag_leave(&self) {
        self.inner.borrow_mut().uploader.drag_leave();
    }

    /// Drop-target feedback: "idle", "accept", or "reject".
    #[wasm_bindgen(js_name = dragStatus)]
    pub fn drag_status(&self) -> String {
        self.inner.borrow().uploader.drag_status().as_str().to_string()
    }

    #[wasm_bindgen(js_name = handleDrop)]
    pub fn handle_drop(&self, event: DragEvent) -> Result<(), JsValue> {
        event.prevent_default();
        let files = event.data_transfer().and_then(|dt| dt.files());
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        inner.uploader.offer(&mut inner.state, files)
    }

    #[wasm_bindgen(js_name = handlePick)]
    pub fn handle_pick(&self, input: HtmlInputElement) -> Result<(), JsValue> {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        inner.uploader.offer(&mut inner.state, input.files())
    }

    #[wasm_bindgen(js_name = uploadError)]
    pub fn upload_error(&self) -> Option<String> {
        self.inner.borrow().uploader.error().map(str::to_string)
    }

    #[wasm_bindgen(js_name = hasSelectedFile)]
    pub fn has_selected_file(&self) -> bool {
        self.inner.borrow().state.selected_file().is_some()
    }

    #[wasm_bindgen(js_name = selectedFileName)]
    pub fn selected_file_name(&self) -> Option<String> {
        self.inner.borrow().state.selected_file().map(|f| f.name())
    }

    /// Size line shown under the selected file name.
    #[wasm_bindgen(js_name = selectedFileSummary)]
    pub fn selected_file_summary(&self) -> Option<String> {
        self.inner
            .borrow()
            .state
            .selected_file()
            .map(|f| format!("{} - Ready for analysis", format_megabytes(f.size() as u64)))
    }

    #[wasm_bindgen(js_name = isUploading)]
    pub fn is_uploading(&self) -> bool {
        self.inner.borrow().uploading
    }

    /// Upload the selected file and enter the analysis view on success. With
    /// no file selected this logs and resets the flag; on failure it logs
    /// and resets the flag without navigating.
    pub async fn upload(&self) -> Result<(), JsValue> {
        let file = {
            let mut inner = self.inner.borrow_mut();
            inner.uploading = true;
            match inner.state.selected_file().cloned() {
                Some(file) => file,
                None => {
                    console::error_1(&JsValue::from_str("No file selected"));
                    inner.uploading = false;
                    return Ok(());
                }
            }
        };

        match net::upload_pdf(&self.api_base, &file).await {
            Ok(UploadResponse { file_id }) => {
                self.inner.borrow_mut().navigate_to_analysis(&file_id)?
            }
            Err(err) => {
                console::error_1(&format!("Error uploading PDF: {:?}", err).into());
                self.inner.borrow_mut().uploading = false;
            }
        }
        Ok(())
    }

    // ---- analysis screen ----

    /// Whether the tab still holds the file the analysis view renders.
    #[wasm_bindgen(js_name = hasDocument)]
    pub fn has_document(&self) -> bool {
        self.inner.borrow().state.preview_url().is_some()
    }

    /// Load the selected document into the viewer and render all pages into
    /// `container`. Returns the page count.
    #[wasm_bindgen(js_name = openDocument)]
    pub async fn open_document(&self, container: Element) -> Result<u32, JsValue> {
        let url = self
            .inner
            .borrow()
            .state
            .preview_url()
            .map(str::to_string)
            .ok_or_else(|| JsValue::from_str("No file uploaded"))?;

        let pages = pdf_viewer::load_document(&url).await?;
        {
            let mut inner = self.inner.borrow_mut();
            inner.viewer.set_loaded(pages);
            inner.state.position_mut().set_total(pages);
        }
        pdf_viewer::render_pages(pages, &container).await?;
        Ok(pages)
    }

    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> u32 {
        self.inner.borrow().viewer.page_count()
    }

    #[wasm_bindgen(js_name = currentPage)]
    pub fn current_page(&self) -> u32 {
        self.inner.borrow().state.position().current()
    }

    /// The shared navigation operation. Any trigger (viewer buttons, chat
    /// citations) funnels through here.
    #[wasm_bindgen(js_name = goToPage)]
    pub fn go_to_page(&self, page: u32) {
        self.inner.borrow_mut().state.go_to_page(page);
    }

    #[wasm_bindgen(js_name = prevPage)]
    pub fn prev_page(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(target) = inner.state.position().prev_target() {
            inner.state.go_to_page(target);
        }
    }

    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(target) = inner.state.position().next_target() {
            inner.state.go_to_page(target);
        }
    }

    #[wasm_bindgen(js_name = canGoPrev)]
    pub fn can_go_prev(&self) -> bool {
        !self.inner.borrow().state.position().at_first()
    }

    #[wasm_bindgen(js_name = canGoNext)]
    pub fn can_go_next(&self) -> bool {
        !self.inner.borrow().state.position().at_last()
    }

    // ---- chat panel ----

    #[wasm_bindgen(js_name = setDraft)]
    pub fn set_draft(&self, text: &str) {
        if let Some(chat) = self.inner.borrow_mut().chat.as_mut() {
            chat.set_draft(text);
        }
    }

    pub fn draft(&self) -> String {
        self.inner
            .borrow()
            .chat
            .as_ref()
            .map_or_else(String::new, |c| c.draft().to_string())
    }

    #[wasm_bindgen(js_name = isResponding)]
    pub fn is_responding(&self) -> bool {
        self.inner
            .borrow()
            .chat
            .as_ref()
            .is_some_and(ChatPanel::is_responding)
    }

    /// Send the current draft to the backend. The user message is appended
    /// before the request goes out; the draft and responding flag are reset
    /// whatever the outcome.
    #[wasm_bindgen(js_name = sendMessage)]
    pub async fn send_message(&self) -> Result<(), JsValue> {
        let (prompt, file_id) = {
            let mut inner = self.inner.borrow_mut();
            let Some(chat) = inner.chat.as_mut() else {
                return Err(JsValue::from_str("No analysis session"));
            };
            chat.begin_send(js_sys::Date::now())
        };

        let outcome = match net::send_chat(&self.api_base, &prompt, &file_id).await {
            Ok(reply) => SendOutcome::Reply(reply),
            Err(err) => SendOutcome::Failed(format!("{:?}", err)),
        };

        if let Some(chat) = self.inner.borrow_mut().chat.as_mut() {
            chat.finish_send(outcome, js_sys::Date::now());
        }
        Ok(())
    }

    /// Snapshot of the transcript as an array of `{id, text, isUser,
    /// timestamp, pageNumber}` objects.
    pub fn messages(&self) -> Result<JsValue, JsValue> {
        let inner = self.inner.borrow();
        let messages = inner.chat.as_ref().map_or(&[][..], ChatPanel::messages);
        serde_wasm_bindgen::to_value(messages)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = messageCount)]
    pub fn message_count(&self) -> usize {
        self.inner
            .borrow()
            .chat
            .as_ref()
            .map_or(0, |c| c.messages().len())
    }

    /// Label for a message's citation link, e.g. "[Page 4]".
    #[wasm_bindgen(js_name = citationLabel)]
    pub fn citation_label(&self, message_index: usize) -> Option<String> {
        self.inner
            .borrow()
            .chat
            .as_ref()?
            .messages()
            .get(message_index)?
            .cited_display_page()
            .map(|page| format!("[Page {}]", page))
    }

    #[wasm_bindgen(js_name = citationClicked)]
    pub fn citation_clicked(&self, message_index: usize) {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        if let Some(chat) = &inner.chat {
            chat.citation_clicked(&mut inner.state, message_index);
        }
    }
}
