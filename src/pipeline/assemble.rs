//! Result assembly: re-embed extracted images into the page markdown.
//!
//! The service returns each page's markdown with image placeholders of the
//! form `![id](id)`, plus (when requested) the image bytes as base64. This
//! stage performs literal substring substitution — `![id](id)` becomes
//! `![id](base64-payload)` — producing a self-contained rendering, and keeps
//! the untouched per-page markdown alongside as the raw view.
//!
//! Deliberately NOT a markdown parser: the contract is exact substring
//! replacement. A placeholder whose id has no payload in the page's image
//! mapping is left unresolved, untouched.

use crate::service::OcrResponse;
use std::collections::HashMap;

/// The two derived text blobs for one OCR response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledText {
    /// Per-page markdown with every resolvable image reference replaced by
    /// its base64 payload; pages joined with one blank line.
    pub rendered: String,
    /// The original per-page markdown, concatenated the same way.
    pub raw: String,
    /// How many image references were actually substituted.
    pub images_inlined: usize,
}

/// Walk the response's pages in order and build both outputs.
///
/// Pure and deterministic: assembling the same response twice yields
/// byte-identical results. A page with no images passes through unchanged.
pub fn combine_pages(response: &OcrResponse) -> AssembledText {
    let mut rendered = Vec::with_capacity(response.pages.len());
    let mut raw = Vec::with_capacity(response.pages.len());
    let mut images_inlined = 0;

    for page in &response.pages {
        let images: HashMap<&str, &str> = page
            .images
            .iter()
            .filter_map(|img| img.image_base64.as_deref().map(|b64| (img.id.as_str(), b64)))
            .collect();

        let (inlined, count) = inline_images(&page.markdown, &images);
        images_inlined += count;
        rendered.push(inlined);
        raw.push(page.markdown.clone());
    }

    AssembledText {
        rendered: rendered.join("\n\n"),
        raw: raw.join("\n\n"),
        images_inlined,
    }
}

/// Replace every `![id](id)` occurrence with `![id](payload)`.
///
/// Iteration order over the mapping does not matter: base64 payloads (and
/// the `data:` URI prefix) contain no `![`/`](` sequences, so one
/// substitution can never create or destroy another's needle.
fn inline_images(markdown: &str, images: &HashMap<&str, &str>) -> (String, usize) {
    let mut out = markdown.to_string();
    let mut count = 0;
    for (id, payload) in images {
        let needle = format!("![{id}]({id})");
        if out.contains(&needle) {
            out = out.replace(&needle, &format!("![{id}]({payload})"));
            count += 1;
        }
    }
    (out, count)
}
