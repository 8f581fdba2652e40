use lopdf::Document as LopdfDocument;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object};

/// Decoded content-stream operations of a 1-based page.
pub fn page_operations(doc: &LopdfDocument, page: u32) -> Vec<Operation> {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page) else {
        return Vec::new();
    };
    doc.get_page_content(*page_id)
        .ok()
        .and_then(|content| Content::decode(&content).ok())
        .map(|content| content.operations)
        .unwrap_or_default()
}

/// Strings passed to `Tj`, decoded from WinAnsi.
pub fn shown_strings(doc: &LopdfDocument, page: u32) -> Vec<String> {
    page_operations(doc, page)
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first()?.as_str().ok())
        .map(|bytes| bytes.iter().map(|&b| b as char).collect())
        .collect()
}

/// The non-stroking color in effect at each `f` (fill) operator, in page order.
pub fn fill_colors(doc: &LopdfDocument, page: u32) -> Vec<[f32; 3]> {
    let mut current = [0.0; 3];
    let mut fills = Vec::new();
    let mut saved = Vec::new();
    for op in page_operations(doc, page) {
        match op.operator.as_str() {
            "rg" => {
                for (slot, operand) in current.iter_mut().zip(&op.operands) {
                    *slot = operand.as_float().unwrap_or(0.0);
                }
            }
            "q" => saved.push(current),
            "Q" => current = saved.pop().unwrap_or(current),
            "f" => fills.push(current),
            _ => {}
        }
    }
    fills
}

/// Number of `cm` (transformation) operators on a page.
pub fn transform_count(doc: &LopdfDocument, page: u32) -> usize {
    page_operations(doc, page)
        .iter()
        .filter(|op| op.operator == "cm")
        .count()
}

/// Width and height from the page's MediaBox.
pub fn media_box(doc: &LopdfDocument, page: u32) -> Option<(f32, f32)> {
    let page_id = *doc.get_pages().get(&page)?;
    let dict = doc.get_object(page_id).ok()?.as_dict().ok()?;
    let media_box = dict.get(b"MediaBox").ok()?.as_array().ok()?;
    let value = |i: usize| media_box.get(i)?.as_float().ok();
    Some((value(2)? - value(0)?, value(3)? - value(1)?))
}

fn resolve_dict<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj.as_reference() {
        Ok(id) => doc.get_object(id).ok()?.as_dict().ok(),
        Err(_) => obj.as_dict().ok(),
    }
}

/// BaseFont names referenced by the page's font resources.
pub fn font_names(doc: &LopdfDocument, page: u32) -> Vec<String> {
    let fonts = (|| {
        let page_id = *doc.get_pages().get(&page)?;
        let page_dict = doc.get_object(page_id).ok()?.as_dict().ok()?;
        let resources = resolve_dict(doc, page_dict.get(b"Resources").ok()?)?;
        resolve_dict(doc, resources.get(b"Font").ok()?)
    })();
    let Some(fonts) = fonts else {
        return Vec::new();
    };
    fonts
        .iter()
        .filter_map(|(_, font)| resolve_dict(doc, font)?.get(b"BaseFont").ok()?.as_name().ok())
        .map(|name| String::from_utf8_lossy(name).to_string())
        .collect()
}

/// The document title from the Info dictionary, decoding UTF-16BE text strings.
pub fn info_title(doc: &LopdfDocument) -> Option<String> {
    let info = doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
    let title = doc.get_object(info).ok()?.as_dict().ok()?.get(b"Title").ok()?;
    let bytes = title.as_str().ok()?;
    match bytes.strip_prefix(&[0xFE, 0xFF]) {
        Some(utf16) => {
            let units: Vec<u16> = utf16
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16(&units).ok()
        }
        None => Some(String::from_utf8_lossy(bytes).to_string()),
    }
}
