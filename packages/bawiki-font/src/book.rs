use std::path::Path;
use std::sync::Arc;

use bawiki_assets::AssetSource;
use kurbo::BezPath;
use ttf_parser::{Face, GlyphId};
use url::Url;

use crate::error::FontError;
use crate::metrics::TextMetrics;
use crate::outline::OutlinePen;
use crate::system;

pub(crate) struct FontEntry {
    family: String,
    data: Arc<Vec<u8>>,
    index: u32,
    system: bool,
}

/// Ordered registry of font binaries.
///
/// Faces are indexed by their family name at registration time; resolving
/// a family list yields a [`FontStack`] borrowing the registered bytes.
#[derive(Default)]
pub struct FontBook {
    entries: Vec<FontEntry>,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every face in a font binary (single face or collection).
    /// Returns the family names that became available.
    pub fn register(&mut self, data: Vec<u8>) -> Result<Vec<String>, FontError> {
        self.register_with(Arc::new(data), false)
    }

    /// Register the faces found in a font file.
    pub fn register_file(&mut self, path: &Path) -> Result<Vec<String>, FontError> {
        let data = std::fs::read(path)?;
        self.register(data)
    }

    /// Fetch a font binary through an [`AssetSource`] and register it.
    ///
    /// Completion of this call is the readiness signal: a face is either
    /// fully registered or absent when the stack is resolved.
    pub async fn register_asset<S>(&mut self, source: &S, url: &Url) -> Result<Vec<String>, FontError>
    where
        S: AssetSource + ?Sized,
    {
        let bytes = source.fetch(url).await?;
        self.register(bytes.to_vec())
    }

    /// Scan the platform font directories and register everything that
    /// parses. Returns the number of faces added; unreadable files are
    /// skipped with a debug log.
    pub fn load_system_fonts(&mut self) -> usize {
        let mut added = 0;
        for path in system::collect_font_files() {
            let data = match std::fs::read(&path) {
                Ok(data) => Arc::new(data),
                Err(err) => {
                    log::debug!("skipping unreadable font file {}: {err}", path.display());
                    continue;
                }
            };
            match self.register_with(data, true) {
                Ok(families) => added += families.len(),
                Err(err) => {
                    log::debug!("skipping font file {}: {err}", path.display());
                }
            }
        }
        log::debug!("registered {added} system faces");
        added
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn face_count(&self) -> usize {
        self.entries.len()
    }

    fn register_with(
        &mut self,
        data: Arc<Vec<u8>>,
        system: bool,
    ) -> Result<Vec<String>, FontError> {
        let count = ttf_parser::fonts_in_collection(&data).unwrap_or(1);
        let mut families = Vec::new();
        for index in 0..count {
            let face =
                Face::parse(&data, index).map_err(|err| FontError::Parse(err.to_string()))?;
            let family = family_name(&face).unwrap_or_else(|| format!("face-{index}"));
            log::debug!("registered font family `{family}`");
            families.push(family.clone());
            self.entries.push(FontEntry {
                family,
                data: Arc::clone(&data),
                index,
                system,
            });
        }
        Ok(families)
    }

    /// Resolve an ordered family list into a [`FontStack`].
    ///
    /// Unknown families are skipped; the generic `sans-serif`, `serif` and
    /// `monospace` names fall back to a suitable registered or system
    /// face. Errors only when nothing at all matches.
    pub fn resolve(&self, families: &[&str]) -> Result<FontStack<'_>, FontError> {
        let mut picked: Vec<&FontEntry> = Vec::new();
        for family in families {
            let family = family.trim();
            let found = if is_generic(family) {
                self.generic(&family.to_ascii_lowercase())
            } else {
                self.by_family(family)
            };
            match found {
                Some(entry) => {
                    if !picked
                        .iter()
                        .any(|e| std::ptr::eq::<FontEntry>(*e, entry))
                    {
                        picked.push(entry);
                    }
                }
                None => log::debug!("font family `{family}` not available"),
            }
        }
        if picked.is_empty() {
            return Err(FontError::NoMatch(
                families.iter().map(|f| f.to_string()).collect(),
            ));
        }
        let faces = picked
            .into_iter()
            .map(|entry| {
                Face::parse(entry.data.as_slice(), entry.index)
                    .map_err(|err| FontError::Parse(err.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FontStack { faces })
    }

    fn by_family(&self, family: &str) -> Option<&FontEntry> {
        self.entries
            .iter()
            .find(|entry| entry.family.eq_ignore_ascii_case(family))
    }

    fn generic(&self, class: &str) -> Option<&FontEntry> {
        let preferred: &[&str] = match class {
            "sans-serif" => &["DejaVu Sans", "Liberation Sans", "Noto Sans", "Arial"],
            "serif" => &[
                "DejaVu Serif",
                "Liberation Serif",
                "Noto Serif",
                "Times New Roman",
            ],
            _ => &["DejaVu Sans Mono", "Liberation Mono", "Courier New"],
        };
        for want in preferred {
            if let Some(entry) = self.by_family(want) {
                return Some(entry);
            }
        }
        let needle = match class {
            "sans-serif" => "sans",
            "serif" => "serif",
            _ => "mono",
        };
        self.entries
            .iter()
            .find(|entry| {
                let family = entry.family.to_ascii_lowercase();
                family.contains(needle) && (class != "sans-serif" || !family.contains("mono"))
            })
            .or_else(|| self.entries.iter().find(|entry| entry.system))
            .or_else(|| self.entries.first())
    }
}

/// An ordered set of parsed faces resolved from a [`FontBook`].
///
/// The first face is primary: it supplies the string's vertical bounding
/// metrics (the browser font-group behavior); later faces only serve
/// characters the earlier ones lack.
pub struct FontStack<'book> {
    faces: Vec<Face<'book>>,
}

impl FontStack<'_> {
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Measure `text` at `size` pixels: advance-summed width plus pair
    /// kerning, with the primary face's scaled ascent/descent.
    pub fn measure(&self, text: &str, size: f64) -> TextMetrics {
        let primary = &self.faces[0];
        let upem = primary.units_per_em() as f64;
        let ascent = primary.ascender() as f64 / upem * size;
        let descent = -(primary.descender() as f64) / upem * size;

        let mut width = 0.0;
        let mut prev: Option<(usize, GlyphId)> = None;
        for ch in text.chars() {
            match self.glyph_for(ch) {
                Some((face_idx, glyph)) => {
                    let face = &self.faces[face_idx];
                    let scale = size / face.units_per_em() as f64;
                    if let Some((prev_idx, prev_glyph)) = prev {
                        if prev_idx == face_idx {
                            width += kerning(face, prev_glyph, glyph) * scale;
                        }
                    }
                    width += face.glyph_hor_advance(glyph).unwrap_or(0) as f64 * scale;
                    prev = Some((face_idx, glyph));
                }
                None => {
                    width += self.missing_glyph_advance(size);
                    prev = None;
                }
            }
        }
        TextMetrics {
            width,
            ascent,
            descent,
        }
    }

    /// Build the filled outline of `text` at `size` pixels.
    ///
    /// The path starts at x = 0 with its baseline on y = 0, ready to be
    /// positioned with an affine transform. Characters without an outline
    /// (whitespace, missing glyphs) contribute advance only.
    pub fn outline(&self, text: &str, size: f64) -> BezPath {
        let mut path = BezPath::new();
        let mut pen_x = 0.0;
        let mut prev: Option<(usize, GlyphId)> = None;
        for ch in text.chars() {
            match self.glyph_for(ch) {
                Some((face_idx, glyph)) => {
                    let face = &self.faces[face_idx];
                    let scale = size / face.units_per_em() as f64;
                    if let Some((prev_idx, prev_glyph)) = prev {
                        if prev_idx == face_idx {
                            pen_x += kerning(face, prev_glyph, glyph) * scale;
                        }
                    }
                    let mut pen = OutlinePen::new(&mut path, scale, pen_x);
                    face.outline_glyph(glyph, &mut pen);
                    pen_x += face.glyph_hor_advance(glyph).unwrap_or(0) as f64 * scale;
                    prev = Some((face_idx, glyph));
                }
                None => {
                    pen_x += self.missing_glyph_advance(size);
                    prev = None;
                }
            }
        }
        path
    }

    fn glyph_for(&self, ch: char) -> Option<(usize, GlyphId)> {
        self.faces
            .iter()
            .enumerate()
            .find_map(|(idx, face)| face.glyph_index(ch).map(|glyph| (idx, glyph)))
    }

    fn missing_glyph_advance(&self, size: f64) -> f64 {
        let primary = &self.faces[0];
        let scale = size / primary.units_per_em() as f64;
        primary
            .glyph_index(' ')
            .and_then(|glyph| primary.glyph_hor_advance(glyph))
            .unwrap_or(0) as f64
            * scale
    }
}

fn kerning(face: &Face, left: GlyphId, right: GlyphId) -> f64 {
    let Some(kern) = face.tables().kern else {
        return 0.0;
    };
    for subtable in kern.subtables {
        if !subtable.horizontal || subtable.variable {
            continue;
        }
        if let Some(value) = subtable.glyphs_kerning(left, right) {
            return value as f64;
        }
    }
    0.0
}

fn family_name(face: &Face) -> Option<String> {
    let mut family = None;
    for name in face.names() {
        if !name.is_unicode() {
            continue;
        }
        match name.name_id {
            ttf_parser::name_id::TYPOGRAPHIC_FAMILY => {
                if let Some(name) = name.to_string() {
                    return Some(name);
                }
            }
            ttf_parser::name_id::FAMILY => {
                if family.is_none() {
                    family = name.to_string();
                }
            }
            _ => {}
        }
    }
    family
}

fn is_generic(family: &str) -> bool {
    matches!(
        family.to_ascii_lowercase().as_str(),
        "sans-serif" | "serif" | "monospace"
    )
}
