//! Shared file/page state injected into the uploader, viewer, and chat panel
//!
//! One instance lives inside `AskPdfApp` for the lifetime of the tab. The
//! navigation operation is the only way the current page changes, so the
//! chat panel and the viewer controls always agree on it.

use askpdf_core::ViewPosition;
use wasm_bindgen::JsValue;
use web_sys::{File, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Url};

/// DOM id of the wrapper element for a rendered page.
pub(crate) fn page_anchor_id(page: u32) -> String {
    format!("page-{}", page)
}

/// Object URL for a local blob, revoked on drop so a superseded preview
/// never leaks.
pub(crate) struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    pub fn for_file(file: &File) -> Result<Self, JsValue> {
        Ok(Self {
            url: Url::create_object_url_with_blob(file)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let _ = Url::revoke_object_url(&self.url);
    }
}

/// The selected file, its preview URL, and the active page.
pub(crate) struct ViewState {
    selected: Option<File>,
    preview: Option<ObjectUrl>,
    position: ViewPosition,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            selected: None,
            preview: None,
            position: ViewPosition::new(),
        }
    }

    pub fn selected_file(&self) -> Option<&File> {
        self.selected.as_ref()
    }

    /// Store a newly accepted file. The previous preview URL is revoked when
    /// its wrapper drops.
    pub fn set_selected_file(&mut self, file: File) -> Result<(), JsValue> {
        self.preview = Some(ObjectUrl::for_file(&file)?);
        self.selected = Some(file);
        Ok(())
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().map(ObjectUrl::as_str)
    }

    pub fn position(&self) -> &ViewPosition {
        &self.position
    }

    pub fn position_mut(&mut self) -> &mut ViewPosition {
        &mut self.position
    }

    /// The navigation operation: record the new page, then bring its element
    /// into view. No range validation happens here; callers own bounds.
    pub fn go_to_page(&mut self, page: u32) {
        self.position.navigate(page);
        scroll_page_into_view(page);
    }
}

/// Smooth-scroll the element tagged for `page` into view. A page that has
/// not been rendered yet simply has no element and the request is ignored.
fn scroll_page_into_view(page: u32) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(element) = document.get_element_by_id(&page_anchor_id(page)) {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        opts.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}
