//! N-up page compositing using lopdf
//!
//! Each source page becomes a form XObject drawn into one grid cell of a
//! landscape output sheet. The uniform scale comes from the first page's
//! bounding box and is reused for the whole document, so every placed page
//! keeps its aspect ratio and shares the same cell geometry.

use std::collections::HashMap;
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};
use crate::layout::{NupGrid, PageBox, SheetSize};
use crate::pdf::geometry::page_box;

/// Options for one N-up conversion
#[derive(Debug, Clone, Copy)]
pub struct NupOptions {
    pub grid: NupGrid,
    pub sheet: SheetSize,
}

impl Default for NupOptions {
    /// 6 pages per sheet as 3 columns x 2 rows on landscape A4
    fn default() -> Self {
        Self {
            grid: NupGrid::six_up(),
            sheet: SheetSize::a4_landscape(),
        }
    }
}

/// Convert a PDF into its N-up rendition
///
/// Groups of up to `pages_per_sheet` consecutive source pages are composited
/// onto blank landscape sheets; a trailing short group leaves the remaining
/// cells blank. The output holds exactly `ceil(pages / pages_per_sheet)`
/// sheets and overwrites any existing file at `output`.
///
/// The output file is rewritten from scratch after every completed sheet,
/// matching the observable behavior of the tool this replaces.
pub fn convert_to_nup(input: &Path, output: &Path, options: &NupOptions) -> Result<()> {
    if !input.exists() {
        return Err(Error::FileNotFound(input.to_path_buf()));
    }

    let source = Document::load(input)?;
    let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
    if page_ids.is_empty() {
        return Err(Error::EmptyPdf(input.to_path_buf()));
    }

    // One scale and one cell-relative placement set for the whole document,
    // derived from the first page. All pages are assumed the same size.
    let first_box = page_box(&source, page_ids[0])?;
    let scale = options.grid.fit_scale(options.sheet, &first_box);

    let mut out = Document::with_version("1.5");
    let pages_id = out.new_object_id();

    let catalog_id = out.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    out.trailer.set("Root", Object::Reference(catalog_id));

    // Shared across the whole document so resources referenced by several
    // source pages are imported once
    let mut imported: HashMap<ObjectId, ObjectId> = HashMap::new();
    let mut kids: Vec<Object> = Vec::new();

    for chunk in page_ids.chunks(options.grid.pages_per_sheet()) {
        let sheet_id = compose_sheet(
            &mut out,
            &source,
            chunk,
            options,
            &first_box,
            scale,
            pages_id,
            &mut imported,
        )?;
        kids.push(Object::Reference(sheet_id));

        set_page_tree(&mut out, pages_id, kids.clone());
        out.compress();
        out.save(output)?;
    }

    Ok(())
}

/// Build one output sheet holding up to `pages_per_sheet` source pages
fn compose_sheet(
    out: &mut Document,
    source: &Document,
    chunk: &[ObjectId],
    options: &NupOptions,
    first_box: &PageBox,
    scale: f64,
    parent_id: ObjectId,
    imported: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let mut content = String::new();
    let mut xobjects = Dictionary::new();

    for (slot, &page_id) in chunk.iter().enumerate() {
        let place = options.grid.placement(options.sheet, slot, first_box, scale);

        let name = format!("P{}", slot);
        let xobject_id = page_to_xobject(out, source, page_id, imported)?;
        xobjects.set(name.as_bytes(), Object::Reference(xobject_id));

        // The form keeps its own coordinate space, so the translation must
        // cancel the scaled box origin.
        let tx = place.x - place.scale * first_box.x;
        let ty = place.y - place.scale * first_box.y;
        content.push_str(&format!(
            "q {:.4} 0 0 {:.4} {:.4} {:.4} cm /{} Do Q\n",
            place.scale, place.scale, tx, ty, name
        ));
    }

    let content_id = out.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let mut sheet = Dictionary::new();
    sheet.set("Type", Object::Name(b"Page".to_vec()));
    sheet.set("Parent", Object::Reference(parent_id));
    sheet.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(options.sheet.width as f32),
            Object::Real(options.sheet.height as f32),
        ]),
    );
    sheet.set("Contents", Object::Reference(content_id));
    sheet.set("Resources", Object::Dictionary(resources));

    Ok(out.add_object(sheet))
}

/// Rewrite the page tree node with the sheets added so far
fn set_page_tree(out: &mut Document, pages_id: ObjectId, kids: Vec<Object>) {
    let count = kids.len() as i64;
    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(count)),
    ]);
    out.objects.insert(pages_id, Object::Dictionary(pages));
}

/// Turn a source page into a form XObject in the output document
///
/// The page's content streams are concatenated into the form body and its
/// resources are imported by deep copy, with `imported` mapping source object
/// IDs to output IDs so shared resources are not duplicated. The form BBox is
/// the page's resolved bounding box, so inherited and indirect boxes survive
/// the conversion.
fn page_to_xobject(
    out: &mut Document,
    source: &Document,
    page_id: ObjectId,
    imported: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let page_dict = source.get_dictionary(page_id)?;

    // Same resolution as the scale derivation: CropBox over MediaBox,
    // following references and the Parent chain
    let pbox = page_box(source, page_id)?;
    let bbox = vec![
        Object::Real(pbox.x as f32),
        Object::Real(pbox.y as f32),
        Object::Real((pbox.x + pbox.width) as f32),
        Object::Real((pbox.y + pbox.height) as f32),
    ];

    let body = page_content_bytes(source, page_dict)?;

    let mut form = Dictionary::new();
    form.set("Type", Object::Name(b"XObject".to_vec()));
    form.set("Subtype", Object::Name(b"Form".to_vec()));
    form.set("FormType", Object::Integer(1));
    form.set("BBox", Object::Array(bbox));

    if let Ok(resources) = page_dict.get(b"Resources") {
        form.set("Resources", import_object(out, source, resources, imported)?);
    }

    Ok(out.add_object(Stream::new(form, body)))
}

/// Concatenate a page's content streams into one decompressed body
fn page_content_bytes(source: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(contents) => contents,
        Err(_) => return Ok(Vec::new()),
    };

    let ids: Vec<ObjectId> = match contents {
        Object::Reference(id) => vec![*id],
        Object::Array(refs) => refs
            .iter()
            .filter_map(|obj| match obj {
                Object::Reference(id) => Some(*id),
                _ => None,
            })
            .collect(),
        _ => return Ok(Vec::new()),
    };

    let mut body = Vec::new();
    for id in ids {
        if let Ok(stream) = source.get_object(id)?.as_stream() {
            // Fall back to the raw bytes when the stream is not compressed
            let data = stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone());
            body.extend_from_slice(&data);
            body.push(b'\n');
        }
    }
    Ok(body)
}

/// Deep-copy an object from the source document, following references
fn import_object(
    out: &mut Document,
    source: &Document,
    obj: &Object,
    imported: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = imported.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let referenced = source.get_object(*id)?;
            let copied = import_object(out, source, referenced, imported)?;

            let new_id = out.add_object(copied);
            imported.insert(*id, new_id);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => {
            let mut copied = Dictionary::new();
            for (key, value) in dict.iter() {
                copied.set(key.clone(), import_object(out, source, value, imported)?);
            }
            Ok(Object::Dictionary(copied))
        }
        Object::Array(values) => {
            let mut copied = Vec::with_capacity(values.len());
            for value in values {
                copied.push(import_object(out, source, value, imported)?);
            }
            Ok(Object::Array(copied))
        }
        Object::Stream(stream) => {
            let mut dict = Dictionary::new();
            for (key, value) in stream.dict.iter() {
                dict.set(key.clone(), import_object(out, source, value, imported)?);
            }
            Ok(Object::Stream(Stream {
                dict,
                content: stream.content.clone(),
                allows_compression: stream.allows_compression,
                start_position: None,
            }))
        }
        _ => Ok(obj.clone()),
    }
}
