//! Page box extraction and page counting

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};
use crate::layout::PageBox;

/// Extract the bounding box of a page: CropBox when present, MediaBox
/// otherwise
///
/// Both keys may be indirect references and may be inherited from an ancestor
/// Pages node, so the Parent chain is walked when the page itself carries
/// neither box.
pub fn page_box(doc: &Document, page_id: ObjectId) -> Result<PageBox> {
    let mut dict_id = page_id;

    // Bounded walk in case of a malformed, cyclic page tree
    for _ in 0..16 {
        let dict = doc.get_dictionary(dict_id)?;
        if let Some(values) = find_box(doc, dict) {
            return parse_box(&values);
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => dict_id = *parent,
            _ => break,
        }
    }

    Err(Error::MissingPageBox(format!(
        "object {} {}",
        page_id.0, page_id.1
    )))
}

/// Count the number of pages in a PDF file
pub fn count_pages(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    let count = doc.get_pages().len();

    if count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(count)
}

/// Look up CropBox, then MediaBox, resolving an indirect reference if needed
fn find_box(doc: &Document, dict: &Dictionary) -> Option<Vec<Object>> {
    for key in [b"CropBox".as_slice(), b"MediaBox".as_slice()] {
        let Ok(value) = dict.get(key) else {
            continue;
        };
        let value = match value {
            Object::Reference(id) => match doc.get_object(*id) {
                Ok(resolved) => resolved,
                Err(_) => continue,
            },
            direct => direct,
        };
        if let Object::Array(values) = value {
            return Some(values.clone());
        }
    }
    None
}

/// Interpret a `[x0 y0 x1 y1]` box array, normalizing swapped corners
fn parse_box(values: &[Object]) -> Result<PageBox> {
    let numbers: Vec<f64> = values.iter().filter_map(box_number).collect();
    if numbers.len() != 4 {
        return Err(Error::MissingPageBox(
            "box array does not hold four numbers".to_string(),
        ));
    }

    let (x0, y0, x1, y1) = (numbers[0], numbers[1], numbers[2], numbers[3]);
    Ok(PageBox {
        x: x0.min(x1),
        y: y0.min(y1),
        width: (x1 - x0).abs(),
        height: (y1 - y0).abs(),
    })
}

fn box_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}
