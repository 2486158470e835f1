//! Client-side validation for files offered to the drop target
//!
//! No network activity happens here; a candidate either passes and may be
//! stored as the selected file, or is rejected with a user-facing message.

use thiserror::Error;

/// Largest accepted upload, in bytes.
pub const MAX_FILE_BYTES: u64 = 50 * 1024 * 1024;

/// The only accepted media type.
pub const PDF_MIME: &str = "application/pdf";

/// Why a dropped or picked file was rejected. The `Display` text is shown to
/// the user as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejection {
    #[error("Please upload only PDF files.")]
    WrongType,

    #[error("File size must be less than 50MB.")]
    TooLarge,

    #[error("Invalid file. Please try again.")]
    Invalid,
}

/// Metadata of a file offered via drag-and-drop or the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime: mime.into(),
        }
    }
}

/// Validate a single candidate against the type and size constraints.
pub fn validate_candidate(candidate: &FileCandidate) -> Result<(), DropRejection> {
    if !is_pdf_type(&candidate.mime, &candidate.name) {
        return Err(DropRejection::WrongType);
    }
    if candidate.size > MAX_FILE_BYTES {
        return Err(DropRejection::TooLarge);
    }
    Ok(())
}

/// The drop target accepts exactly one file per attempt.
pub fn validate_file_count(count: u32) -> Result<(), DropRejection> {
    if count == 1 {
        Ok(())
    } else {
        Err(DropRejection::Invalid)
    }
}

/// Browsers occasionally report an empty media type; fall back to the
/// extension in that case.
fn is_pdf_type(mime: &str, name: &str) -> bool {
    match mime {
        PDF_MIME => true,
        "" => name.to_ascii_lowercase().ends_with(".pdf"),
        _ => false,
    }
}

/// Format a byte count as megabytes with two decimals, e.g. "2.00 MB".
pub fn format_megabytes(bytes: u64) -> String {
    const MB: f64 = 1024.0 * 1024.0;
    format!("{:.2} MB", bytes as f64 / MB)
}
