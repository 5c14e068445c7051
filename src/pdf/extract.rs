//! Positioned text extraction from PDF content streams.
//!
//! A best-effort walk over the page's text operators. The text matrix is
//! approximated by its translation and vertical scale; glyph widths are
//! not computed, so horizontal advances are estimated. This is good
//! enough for the line reconstruction pass, which only needs relative
//! positions.

use super::TextFragment;
use crate::error::{Error, Result};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

/// Map from font resource name (e.g. `F1`) to its BaseFont name.
type FontMap = HashMap<Vec<u8>, String>;

/// Extract positioned text fragments from one page.
pub fn extract_page(doc: &Document, page_id: ObjectId) -> Result<Vec<TextFragment>> {
    let content_data = doc.get_page_content(page_id)?;
    let content = Content::decode(&content_data)
        .map_err(|e| Error::PdfParse(format!("content stream: {e}")))?;
    let fonts = collect_fonts(doc, page_id);

    let mut state = TextState::default();
    let mut fragments = Vec::new();

    for op in &content.operations {
        match op.operator.as_str() {
            "BT" => state.begin_text(),
            "ET" => {}
            "Tf" => {
                if let (Some(Object::Name(name)), Some(size)) =
                    (op.operands.first(), op.operands.get(1).and_then(as_f32))
                {
                    state.font_size = size;
                    state.font_name = fonts
                        .get(name.as_slice())
                        .cloned()
                        .unwrap_or_else(|| String::from_utf8_lossy(name).into_owned());
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (
                    op.operands.first().and_then(as_f32),
                    op.operands.get(1).and_then(as_f32),
                ) {
                    state.translate_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (
                    op.operands.first().and_then(as_f32),
                    op.operands.get(1).and_then(as_f32),
                ) {
                    state.leading = -ty;
                    state.translate_line(tx, ty);
                }
            }
            "Tm" => {
                let ops: Vec<f32> = op.operands.iter().filter_map(as_f32).collect();
                if ops.len() == 6 {
                    state.set_matrix(ops[3], ops[4], ops[5]);
                }
            }
            "TL" => {
                if let Some(tl) = op.operands.first().and_then(as_f32) {
                    state.leading = tl;
                }
            }
            "T*" => state.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    push_fragment(&mut fragments, &mut state, decode_text(bytes));
                }
            }
            "'" => {
                state.next_line();
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    push_fragment(&mut fragments, &mut state, decode_text(bytes));
                }
            }
            "\"" => {
                state.next_line();
                if let Some(Object::String(bytes, _)) = op.operands.get(2) {
                    push_fragment(&mut fragments, &mut state, decode_text(bytes));
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    let mut text = String::new();
                    for item in items {
                        if let Object::String(bytes, _) = item {
                            text.push_str(&decode_text(bytes));
                        }
                    }
                    push_fragment(&mut fragments, &mut state, text);
                }
            }
            _ => {}
        }
    }

    Ok(fragments)
}

/// Text positioning state within one content stream.
struct TextState {
    /// Current drawing position
    x: f32,
    y: f32,
    /// Start of the current text line
    line_x: f32,
    line_y: f32,
    /// Vertical scale from the last Tm (fonts are often sized via Tm)
    scale: f32,
    leading: f32,
    font_size: f32,
    font_name: String,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            line_x: 0.0,
            line_y: 0.0,
            scale: 1.0,
            leading: 0.0,
            font_size: 0.0,
            font_name: String::new(),
        }
    }
}

impl TextState {
    fn begin_text(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.line_x = 0.0;
        self.line_y = 0.0;
        self.scale = 1.0;
    }

    fn translate_line(&mut self, tx: f32, ty: f32) {
        self.line_x += tx;
        self.line_y += ty;
        self.x = self.line_x;
        self.y = self.line_y;
    }

    fn set_matrix(&mut self, d: f32, e: f32, f: f32) {
        self.scale = if d == 0.0 { 1.0 } else { d.abs() };
        self.line_x = e;
        self.line_y = f;
        self.x = e;
        self.y = f;
    }

    fn next_line(&mut self) {
        self.line_y -= self.leading;
        self.x = self.line_x;
        self.y = self.line_y;
    }

    fn effective_size(&self) -> f32 {
        self.font_size * self.scale
    }
}

fn push_fragment(fragments: &mut Vec<TextFragment>, state: &mut TextState, text: String) {
    if text.is_empty() {
        return;
    }
    let size = state.effective_size();
    fragments.push(TextFragment::new(
        text.clone(),
        state.x,
        state.y,
        size,
        state.font_name.clone(),
    ));
    // Estimated advance; glyph widths are not resolved.
    state.x += text.chars().count() as f32 * size * 0.5;
}

/// Decode a PDF string object into Rust text.
///
/// UTF-16BE when BOM-prefixed, Latin-1 otherwise. No ToUnicode CMap
/// handling; the output is normalized to NFC.
fn decode_text(bytes: &[u8]) -> String {
    let raw = if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    };
    raw.nfc().collect()
}

/// Build the font resource map for a page.
fn collect_fonts(doc: &Document, page_id: ObjectId) -> FontMap {
    let mut fonts = FontMap::new();
    let Ok((resources, resource_ids)) = doc.get_page_resources(page_id) else {
        return fonts;
    };

    if let Some(dict) = resources {
        collect_fonts_from_resources(doc, dict, &mut fonts);
    }
    for id in resource_ids {
        if let Ok(Object::Dictionary(dict)) = doc.get_object(id) {
            collect_fonts_from_resources(doc, dict, &mut fonts);
        }
    }
    fonts
}

fn collect_fonts_from_resources(doc: &Document, resources: &Dictionary, fonts: &mut FontMap) {
    let font_dict = match resources.get(b"Font").and_then(|obj| resolve(doc, obj)) {
        Ok(Object::Dictionary(dict)) => dict,
        _ => return,
    };

    for (name, value) in font_dict.iter() {
        let base_font = resolve(doc, value)
            .ok()
            .and_then(|obj| obj.as_dict().ok())
            .and_then(|dict| dict.get(b"BaseFont").ok())
            .and_then(|obj| obj.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).into_owned());

        if let Some(base) = base_font {
            fonts.insert(name.clone(), base);
        } else {
            log::warn!(
                "font resource {} has no BaseFont",
                String::from_utf8_lossy(name)
            );
        }
    }
}

/// Follow a reference to its object, or return the object itself.
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> lopdf::Result<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id),
        other => Ok(other),
    }
}

fn as_f32(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(f) => Some(*f),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_latin1() {
        assert_eq!(decode_text(b"Hello"), "Hello");
        assert_eq!(decode_text(&[0x48, 0xE9]), "H\u{e9}"); // Hé
    }

    #[test]
    fn test_decode_utf16be() {
        // BOM + "Hi"
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text(&bytes), "Hi");
    }

    #[test]
    fn test_as_f32() {
        assert_eq!(as_f32(&Object::Integer(12)), Some(12.0));
        assert_eq!(as_f32(&Object::Real(1.5)), Some(1.5));
        assert_eq!(as_f32(&Object::Name(b"x".to_vec())), None);
    }

    #[test]
    fn test_collect_fonts_tolerates_missing_page() {
        let doc = Document::with_version("1.5");
        let fonts = collect_fonts(&doc, (1, 0));
        assert!(fonts.is_empty());
    }

    #[test]
    fn test_state_line_movement() {
        let mut state = TextState::default();
        state.leading = 14.0;
        state.translate_line(72.0, 700.0);
        assert_eq!(state.y, 700.0);
        state.next_line();
        assert_eq!(state.y, 686.0);
        assert_eq!(state.x, 72.0);
    }

    #[test]
    fn test_effective_size_uses_matrix_scale() {
        let mut state = TextState::default();
        state.font_size = 1.0;
        state.set_matrix(24.0, 72.0, 700.0);
        assert_eq!(state.effective_size(), 24.0);
    }
}
