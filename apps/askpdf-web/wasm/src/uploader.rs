//! Drop target and file picker handling for the upload screen
//!
//! Purely local: validation and state capture, no network. After any attempt
//! exactly one of {stored file, error message} is meaningfully set; a
//! rejection never touches a previously stored file.

use askpdf_core::{validate_candidate, validate_file_count, DropRejection, FileCandidate, PDF_MIME};
use wasm_bindgen::JsValue;
use web_sys::{DataTransferItemList, FileList};

use crate::view_state::ViewState;

/// Feedback for the drop target while a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DragStatus {
    Idle,
    Accept,
    Reject,
}

impl DragStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DragStatus::Idle => "idle",
            DragStatus::Accept => "accept",
            DragStatus::Reject => "reject",
        }
    }
}

pub(crate) struct Uploader {
    error: Option<String>,
    drag: DragStatus,
}

impl Uploader {
    pub fn new() -> Self {
        Self {
            error: None,
            drag: DragStatus::Idle,
        }
    }

    /// Handle the files offered by a drop or a picker selection.
    pub fn offer(&mut self, state: &mut ViewState, files: Option<FileList>) -> Result<(), JsValue> {
        self.drag = DragStatus::Idle;
        // Previous error is cleared on every new attempt.
        self.error = None;

        let Some(files) = files else {
            self.error = Some(DropRejection::Invalid.to_string());
            return Ok(());
        };
        if let Err(rejection) = validate_file_count(files.length()) {
            self.error = Some(rejection.to_string());
            return Ok(());
        }
        let Some(file) = files.get(0) else {
            self.error = Some(DropRejection::Invalid.to_string());
            return Ok(());
        };

        let candidate = FileCandidate::new(file.name(), file.size() as u64, file.type_());
        match validate_candidate(&candidate) {
            Ok(()) => state.set_selected_file(file)?,
            // Rejections never change the stored file.
            Err(rejection) => self.error = Some(rejection.to_string()),
        }
        Ok(())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn drag_status(&self) -> DragStatus {
        self.drag
    }

    /// Called on dragover: classify the dragged payload so the target can
    /// style itself before the drop lands.
    pub fn update_drag(&mut self, items: Option<DataTransferItemList>) {
        let Some(items) = items else {
            self.drag = DragStatus::Reject;
            return;
        };
        if items.length() != 1 {
            self.drag = DragStatus::Reject;
            return;
        }
        let accept = items
            .get(0)
            .map(|item| {
                // Some browsers withhold the media type mid-drag.
                item.kind() == "file" && (item.type_() == PDF_MIME || item.type_().is_empty())
            })
            .unwrap_or(false);
        self.drag = if accept {
            DragStatus::Accept
        } else {
            DragStatus::Reject
        };
    }

    pub fn drag_leave(&mut self) {
        self.drag = DragStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_with_no_error() {
        let uploader = Uploader::new();
        assert_eq!(uploader.error(), None);
        assert_eq!(uploader.drag_status(), DragStatus::Idle);
    }

    #[test]
    fn drag_status_strings_for_js() {
        assert_eq!(DragStatus::Idle.as_str(), "idle");
        assert_eq!(DragStatus::Accept.as_str(), "accept");
        assert_eq!(DragStatus::Reject.as_str(), "reject");
    }
}
