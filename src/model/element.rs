//! Text element types shared by both extraction pipelines.

use serde::{Deserialize, Serialize};

/// Style flag bit for bold text (bit 4).
pub const FLAG_BOLD: u32 = 1 << 4;

/// Style flag bit for italic text (bit 6).
pub const FLAG_ITALIC: u32 = 1 << 6;

/// Bounding box in page units, top-left origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box from its corner coordinates.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

/// One styled run of text on one page.
///
/// Produced once per document parse by a [`TextLayoutSource`] and read-only
/// thereafter. Coordinates use a top-left origin: `relative_y` increases
/// downward, `relative_x` increases rightward, both normalized to `[0, 1]`
/// by the page dimensions.
///
/// [`TextLayoutSource`]: crate::source::TextLayoutSource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextElement {
    /// Text content, whitespace-normalized and non-empty
    pub text: String,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Font size in points
    pub size: f32,
    /// Style flag bit-set (bit 4 = bold, bit 6 = italic)
    pub flags: u32,
    /// Page number (1-indexed)
    pub page: u32,
    /// Bounding box in page units
    pub bbox: BBox,
    /// Page width in points
    pub page_width: f32,
    /// Page height in points
    pub page_height: f32,
}

impl TextElement {
    /// Create a new text element.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        text: impl Into<String>,
        font_name: impl Into<String>,
        size: f32,
        flags: u32,
        page: u32,
        bbox: BBox,
        page_width: f32,
        page_height: f32,
    ) -> Self {
        Self {
            text: text.into(),
            font_name: font_name.into(),
            size,
            flags,
            page,
            bbox,
            page_width,
            page_height,
        }
    }

    /// Whether the bold style flag is set.
    pub fn is_bold(&self) -> bool {
        self.flags & FLAG_BOLD != 0
    }

    /// Whether the italic style flag is set.
    pub fn is_italic(&self) -> bool {
        self.flags & FLAG_ITALIC != 0
    }

    /// Horizontal position normalized to `[0, 1]` by page width.
    pub fn relative_x(&self) -> f32 {
        if self.page_width > 0.0 {
            self.bbox.x0 / self.page_width
        } else {
            0.0
        }
    }

    /// Vertical position normalized to `[0, 1]` by page height, increasing
    /// downward.
    pub fn relative_y(&self) -> f32 {
        if self.page_height > 0.0 {
            self.bbox.y0 / self.page_height
        } else {
            0.0
        }
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f32 {
        self.bbox.x1 - self.bbox.x0
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f32 {
        self.bbox.y1 - self.bbox.y0
    }

    /// Horizontal center of the bounding box, normalized by page width.
    pub fn center_x(&self) -> f32 {
        if self.page_width > 0.0 {
            self.relative_x() + (self.width() / self.page_width) / 2.0
        } else {
            0.0
        }
    }
}

/// All text of one document: per-page ordered element lists plus whatever
/// title the source's metadata supplies.
#[derive(Debug, Clone, Default)]
pub struct DocumentText {
    /// Title from document metadata, if any
    pub metadata_title: Option<String>,
    /// Elements per page, in reading order
    pub pages: Vec<Vec<TextElement>>,
}

impl DocumentText {
    /// Create a document from per-page element lists.
    pub fn new(pages: Vec<Vec<TextElement>>) -> Self {
        Self {
            metadata_title: None,
            pages,
        }
    }

    /// Attach a metadata title.
    pub fn with_metadata_title(mut self, title: impl Into<String>) -> Self {
        self.metadata_title = Some(title.into());
        self
    }

    /// Iterate all elements across pages in document order.
    pub fn elements(&self) -> impl Iterator<Item = &TextElement> {
        self.pages.iter().flatten()
    }

    /// Whether any page carries at least one element.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.is_empty())
    }

    /// Elements of the first page, or an empty slice.
    pub fn first_page(&self) -> &[TextElement] {
        self.pages.first().map(Vec::as_slice).unwrap_or(&[])
    }
}
