//! Item kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The discriminator between folders and the recognized file categories.
///
/// Stored as the `item_kind` Postgres enum; unknown kind strings are
/// rejected at the boundary rather than accepted as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "item_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A folder; may contain other items.
    Folder,
    /// A word-processing document.
    Document,
    /// A spreadsheet or CSV.
    Spreadsheet,
    /// A PDF.
    Pdf,
    /// An image.
    Image,
    /// Anything else.
    Other,
}

impl ItemKind {
    /// Whether this kind is the folder discriminant.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }

    /// Classify an uploaded file's MIME type into a kind.
    ///
    /// Mirrors what the browser sends: the match is on substrings because
    /// office MIME types are long vendor strings.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.to_ascii_lowercase();
        if mime.starts_with("image/") {
            Self::Image
        } else if mime.contains("pdf") {
            Self::Pdf
        } else if mime.contains("spreadsheet") || mime.contains("excel") || mime.contains("csv") {
            Self::Spreadsheet
        } else if mime.contains("document") || mime.contains("word") {
            Self::Document
        } else {
            Self::Other
        }
    }

    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Document => "document",
            Self::Spreadsheet => "spreadsheet",
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = drivebox_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "folder" => Ok(Self::Folder),
            "document" => Ok(Self::Document),
            "spreadsheet" => Ok(Self::Spreadsheet),
            "pdf" => Ok(Self::Pdf),
            "image" => Ok(Self::Image),
            "other" => Ok(Self::Other),
            _ => Err(drivebox_core::AppError::validation(format!(
                "Invalid item kind: '{s}'. Expected one of: folder, document, spreadsheet, pdf, image, other"
            ))),
        }
    }
}
