//! lopdf-backed layout source.
//!
//! Walks each page's content stream tracking the text matrix, decodes
//! strings through the font's encoding when one is available, and emits
//! [`TextElement`]s in top-left page coordinates. Glyph metrics are
//! approximated: advance width as half the font size per character,
//! ascender/descender as 0.8/0.2 of the font size.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Encoding, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::{BBox, TextElement, FLAG_BOLD, FLAG_ITALIC};
use crate::source::TextLayoutSource;

/// Default page size (US Letter) when a page carries no MediaBox.
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// TJ adjustments beyond this many text-space units read as word gaps.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// PDF file layout source.
#[derive(Debug)]
pub struct PdfSource {
    doc: LopdfDocument,
}

impl PdfSource {
    /// Open a PDF file.
    ///
    /// A nonexistent path yields [`Error::MissingSource`] so collection
    /// runs can skip the document; any load failure yields
    /// [`Error::ParseFailure`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingSource(path.to_path_buf()));
        }
        let doc = LopdfDocument::load(path)?;
        Ok(Self { doc })
    }

    /// Load a PDF from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc })
    }

    /// Page dimensions from the MediaBox, falling back to US Letter.
    fn page_dimensions(&self, page_id: ObjectId) -> (f32, f32) {
        self.doc
            .get_dictionary(page_id)
            .ok()
            .and_then(|dict| dict.get(b"MediaBox").ok())
            .and_then(|obj| obj.as_array().ok())
            .and_then(|arr| {
                let mut corners = [0.0f32; 4];
                for (i, obj) in arr.iter().take(4).enumerate() {
                    corners[i] = get_number(obj)?;
                }
                Some((corners[2] - corners[0], corners[3] - corners[1]))
            })
            .filter(|(w, h)| *w > 0.0 && *h > 0.0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Extract the elements of one page.
    fn extract_page(&self, page_num: u32, page_id: ObjectId) -> Result<Vec<TextElement>> {
        let (page_width, page_height) = self.page_dimensions(page_id);

        let content = self.doc.get_and_decode_page_content(page_id)?;

        let fonts = self.doc.get_page_fonts(page_id).unwrap_or_default();
        let encodings: BTreeMap<Vec<u8>, Encoding> = fonts
            .iter()
            .filter_map(|(name, font)| {
                font.get_font_encoding(&self.doc)
                    .ok()
                    .map(|enc| (name.clone(), enc))
            })
            .collect();
        let base_fonts: BTreeMap<Vec<u8>, String> = fonts
            .iter()
            .map(|(name, font)| {
                let base = font
                    .get(b"BaseFont")
                    .ok()
                    .and_then(|o| o.as_name().ok())
                    .map(|n| String::from_utf8_lossy(n).to_string())
                    .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                (name.clone(), base)
            })
            .collect();

        let mut elements = Vec::new();
        let mut matrix = TextMatrix::default();
        let mut current_resource: Vec<u8> = Vec::new();
        let mut current_font = String::new();
        let mut current_size: f32 = 12.0;
        let mut in_text_block = false;

        for op in &content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    matrix = TextMatrix::default();
                }
                "ET" => {
                    in_text_block = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(name) = &op.operands[0] {
                            current_resource = name.clone();
                            current_font = base_fonts
                                .get(name.as_slice())
                                .cloned()
                                .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                        }
                        current_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => {
                    matrix.next_line();
                }
                "Tj" | "TJ" => {
                    if !in_text_block {
                        continue;
                    }
                    let encoding = encodings.get(&current_resource);
                    let text = if op.operator == "TJ" {
                        decode_tj_array(op.operands.first(), encoding)
                    } else if let Some(Object::String(bytes, _)) = op.operands.first() {
                        decode_string(bytes, encoding)
                    } else {
                        String::new()
                    };
                    push_element(
                        &mut elements,
                        &text,
                        &current_font,
                        current_size,
                        &matrix,
                        page_num,
                        page_width,
                        page_height,
                    );
                }
                "'" | "\"" => {
                    matrix.next_line();
                    if !in_text_block {
                        continue;
                    }
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        let encoding = encodings.get(&current_resource);
                        let text = decode_string(bytes, encoding);
                        push_element(
                            &mut elements,
                            &text,
                            &current_font,
                            current_size,
                            &matrix,
                            page_num,
                            page_width,
                            page_height,
                        );
                    }
                }
                _ => {}
            }
        }

        Ok(elements)
    }
}

impl TextLayoutSource for PdfSource {
    fn metadata_title(&self) -> Option<String> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        let dict = match info {
            Object::Reference(id) => self.doc.get_dictionary(*id).ok()?,
            Object::Dictionary(dict) => dict,
            _ => return None,
        };
        match dict.get(b"Title").ok()? {
            Object::String(bytes, _) => {
                let title = decode_text_simple(bytes);
                let title = title.trim();
                (!title.is_empty()).then(|| title.to_string())
            }
            _ => None,
        }
    }

    fn extract(&self) -> Result<Vec<Vec<TextElement>>> {
        let pages = self.doc.get_pages();
        let mut out = Vec::with_capacity(pages.len());
        for (page_num, page_id) in pages {
            out.push(self.extract_page(page_num, page_id)?);
        }
        Ok(out)
    }
}

/// Append an element for a decoded run, skipping whitespace-only text.
#[allow(clippy::too_many_arguments)]
fn push_element(
    elements: &mut Vec<TextElement>,
    text: &str,
    font_name: &str,
    font_size: f32,
    matrix: &TextMatrix,
    page: u32,
    page_width: f32,
    page_height: f32,
) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }

    let size = font_size * matrix.scale();
    let (x, y) = matrix.position();

    let ascent = size * 0.8;
    let descent = size * 0.2;
    let width = size * 0.5 * text.chars().count() as f32;

    // Content-stream y is bottom-up; elements carry top-left coordinates.
    let y0 = page_height - y - ascent;
    let y1 = page_height - y + descent;

    elements.push(TextElement::new(
        text,
        font_name,
        size,
        style_flags_for_font(font_name),
        page,
        BBox::new(x, y0, x + width, y1),
        page_width,
        page_height,
    ));
}

/// Read a numeric content-stream operand as `f32`.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

/// Infer style flag bits from a base font name.
fn style_flags_for_font(font_name: &str) -> u32 {
    let lower = font_name.to_lowercase();
    let mut flags = 0;
    if lower.contains("bold") || lower.contains("black") || lower.contains("heavy") {
        flags |= FLAG_BOLD;
    }
    if lower.contains("italic") || lower.contains("oblique") {
        flags |= FLAG_ITALIC;
    }
    flags
}

/// Decode one string operand through the font encoding when available.
fn decode_string(bytes: &[u8], encoding: Option<&Encoding>) -> String {
    match encoding {
        Some(enc) => LopdfDocument::decode_text(enc, bytes).unwrap_or_default(),
        None => decode_text_simple(bytes),
    }
}

/// Decode a TJ operand array: strings interleaved with kerning
/// adjustments, where large negative adjustments read as word gaps.
fn decode_tj_array(operand: Option<&Object>, encoding: Option<&Encoding>) -> String {
    let Some(Object::Array(items)) = operand else {
        return String::new();
    };

    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode_string(bytes, encoding)),
            Object::Integer(n) => {
                if -(*n as f32) > TJ_SPACE_THRESHOLD {
                    push_word_gap(&mut combined);
                }
            }
            Object::Real(n) => {
                if -n > TJ_SPACE_THRESHOLD {
                    push_word_gap(&mut combined);
                }
            }
            _ => {}
        }
    }
    combined
}

fn push_word_gap(combined: &mut String) {
    if !combined.is_empty() && !combined.ends_with(' ') && !combined.ends_with('\u{00A0}') {
        combined.push(' ');
    }
}

/// Simple text decoding fallback when no encoding is available:
/// UTF-16BE with BOM, then UTF-8, then Latin-1.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    bytes.iter().map(|&b| b as char).collect()
}

/// Text matrix for tracking position and scale in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default leading; a TL-aware reader would use the set value.
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}
