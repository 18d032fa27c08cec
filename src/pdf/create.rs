//! Minimal PDF generation for seeding input folders and test fixtures

use std::path::Path;

use lopdf::{Dictionary, Document, Object, Stream};

use crate::error::Result;

// Portrait A4 in points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;

/// Create a labeled dummy PDF with `page_count` pages
///
/// Each page carries a single Helvetica line naming the document and the page
/// number, which is enough to eyeball reading order on an imposed sheet.
pub fn create_dummy_pdf(path: &Path, page_count: usize, label: &str) -> Result<()> {
    let mut doc = Document::with_version("1.5");

    let font_id = {
        let mut font = Dictionary::new();
        font.set("Type", Object::Name(b"Font".to_vec()));
        font.set("Subtype", Object::Name(b"Type1".to_vec()));
        font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
        doc.add_object(font)
    };

    let pages_id = doc.new_object_id();
    let mut kids = Vec::with_capacity(page_count);

    for number in 1..=page_count {
        let text = escape_pdf_text(&format!("{} - Page {}", label, number));
        let body = format!(
            "BT /F1 12 Tf 28 {} Td ({}) Tj ET\n",
            PAGE_HEIGHT - 40.0,
            text
        );
        let content_id = doc.add_object(Stream::new(Dictionary::new(), body.into_bytes()));

        let mut fonts = Dictionary::new();
        fonts.set("F1", Object::Reference(font_id));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(PAGE_WIDTH),
                Object::Real(PAGE_HEIGHT),
            ]),
        );
        page.set("Contents", Object::Reference(content_id));
        page.set("Resources", Object::Dictionary(resources));

        kids.push(Object::Reference(doc.add_object(page)));
    }

    let count = kids.len() as i64;
    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(count)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.compress();
    doc.save(path)?;

    Ok(())
}

/// Escape the characters with meaning inside a PDF literal string
fn escape_pdf_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_pdf_text() {
        assert_eq!(escape_pdf_text("plain"), "plain");
        assert_eq!(escape_pdf_text("a (b) c"), "a \\(b\\) c");
        assert_eq!(escape_pdf_text("back\\slash"), "back\\\\slash");
    }
}
