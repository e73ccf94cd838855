//! TrueType font embedding for stamped text.
//!
//! Stamp fonts are read from disk at run time (see
//! [`crate::util::resource_path`]) and embedded as CIDFonts with Identity-H
//! encoding, so any glyph a font carries can be drawn, Latin or not. A
//! [`FontStack`] splits text into runs so each character is drawn with the
//! first font that has it, and only fonts that are actually used get embedded.
//!
//! # PDF Font Structure
//!
//! - **Type0 font**: The top-level font dictionary that references:
//!   - **CIDFont**: Contains glyph metrics and references:
//!     - **FontDescriptor**: Font metadata (flags, bounding box, etc.)
//!     - **FontFile2**: The embedded TrueType font program
//!   - **ToUnicode CMap**: Maps glyph IDs back to Unicode for copy/paste

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use ttf_parser::{Face, GlyphId};

use crate::error::{Error, Result};

/// Raw font program loaded from disk.
pub struct FontFile {
    path: PathBuf,
    data: Vec<u8>,
}

impl FontFile {
    /// Read a font file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = std::fs::read(&path).map_err(|e| Error::FontLoad {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        tracing::debug!("Loaded font {} ({} bytes)", path.display(), data.len());
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the font program.
    pub fn parse(&self) -> Result<EmbeddedFont<'_>> {
        let face = Face::parse(&self.data, 0).map_err(|e| {
            Error::FontParse(format!("{}: {e}", self.path.display()))
        })?;
        Ok(EmbeddedFont {
            data: &self.data,
            face,
            base_name: base_font_name(&self.path),
        })
    }
}

/// Outcome of [`EmbeddedFont::ensure_on_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStatus {
    /// The page already declared a font under the requested name
    AlreadyPresent,
    /// The font was embedded and registered on the page
    Embedded,
}

/// Handles TrueType font embedding in PDFs.
pub struct EmbeddedFont<'a> {
    data: &'a [u8],
    face: Face<'a>,
    base_name: String,
}

impl EmbeddedFont<'_> {
    /// Get the glyph ID for a character, falling back to .notdef (0) if not found.
    pub fn glyph_id(&self, c: char) -> u16 {
        self.face.glyph_index(c).map_or(0, |g| g.0)
    }

    /// Get the advance width of a glyph in font units.
    pub fn glyph_width(&self, glyph_id: u16) -> u16 {
        self.face.glyph_hor_advance(GlyphId(glyph_id)).unwrap_or(0)
    }

    /// Get the font's units per em.
    pub fn units_per_em(&self) -> u16 {
        self.face.units_per_em()
    }

    /// PostScript-style name used for BaseFont.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Whether the font maps `c` to a real glyph.
    pub fn has_glyph(&self, c: char) -> bool {
        self.face.glyph_index(c).is_some_and(|g| g.0 != 0)
    }

    /// Convert text to a hex string of glyph IDs for PDF content streams.
    /// Returns the hex string without angle brackets.
    pub fn text_to_hex_glyphs(&self, text: &str) -> String {
        text.chars().fold(String::new(), |mut acc, c| {
            let _ = write!(acc, "{:04X}", self.glyph_id(c));
            acc
        })
    }

    /// Make sure the page declares this font under `resource_name`.
    ///
    /// Looks through the page's own and inherited font resources first; a
    /// font already registered under that name is left as is. Otherwise the
    /// font objects are added to the document and the name is bound in the
    /// page's Resources.
    pub fn ensure_on_page(
        &self,
        doc: &mut Document,
        page_id: ObjectId,
        resource_name: &str,
    ) -> Result<FontStatus> {
        let declared = doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::FontEmbed(format!("Failed to read page fonts: {e}")))?;
        if declared.contains_key(resource_name.as_bytes()) {
            tracing::debug!("Font /{} already present on page", resource_name);
            return Ok(FontStatus::AlreadyPresent);
        }

        let type0_font_id = self.embed_in_document(doc);
        add_font_to_page(doc, page_id, resource_name, type0_font_id)?;
        tracing::debug!("Embedded font {} as /{}", self.base_name, resource_name);

        Ok(FontStatus::Embedded)
    }

    /// Add all font objects to the document, returning the Type0 font id.
    fn embed_in_document(&self, doc: &mut Document) -> ObjectId {
        let font_file_id = self.create_font_file(doc);
        let font_descriptor_id = self.create_font_descriptor(doc, font_file_id);
        let cid_font_id = self.create_cid_font(doc, font_descriptor_id);
        let to_unicode_id = self.create_to_unicode_cmap(doc);
        self.create_type0_font(doc, cid_font_id, to_unicode_id)
    }

    /// Create the FontFile2 stream containing the raw TrueType data.
    #[allow(clippy::cast_possible_wrap)] // Font size always fits in i64
    fn create_font_file(&self, doc: &mut Document) -> ObjectId {
        let mut dict = Dictionary::new();
        dict.set("Length1", Object::Integer(self.data.len() as i64));

        let mut stream = Stream::new(dict, self.data.to_vec());
        compress_stream(&mut stream);
        doc.add_object(Object::Stream(stream))
    }

    /// Create the FontDescriptor dictionary with font metrics.
    fn create_font_descriptor(&self, doc: &mut Document, font_file_id: ObjectId) -> ObjectId {
        let bbox = self.face.global_bounding_box();
        let scale = |v: i16| self.scale_metric(i64::from(v));

        let dict = Dictionary::from_iter([
            ("Type", Object::Name(b"FontDescriptor".to_vec())),
            ("FontName", Object::Name(self.base_name.as_bytes().to_vec())),
            ("Flags", Object::Integer(32)), // Nonsymbolic
            ("FontBBox", Object::Array(vec![
                Object::Integer(scale(bbox.x_min)),
                Object::Integer(scale(bbox.y_min)),
                Object::Integer(scale(bbox.x_max)),
                Object::Integer(scale(bbox.y_max)),
            ])),
            ("ItalicAngle", Object::Integer(0)),
            ("Ascent", Object::Integer(scale(self.face.ascender()))),
            ("Descent", Object::Integer(scale(self.face.descender()))),
            ("CapHeight", Object::Integer(scale(
                self.face.capital_height().unwrap_or_else(|| self.face.ascender()),
            ))),
            ("StemV", Object::Integer(80)),
            ("FontFile2", Object::Reference(font_file_id)),
        ]);

        doc.add_object(Object::Dictionary(dict))
    }

    /// Create the CIDFont dictionary with per-glyph width information.
    fn create_cid_font(&self, doc: &mut Document, font_descriptor_id: ObjectId) -> ObjectId {
        let default_width = self.scale_metric(i64::from(self.glyph_width(self.glyph_id(' '))));

        let dict = Dictionary::from_iter([
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"CIDFontType2".to_vec())),
            ("BaseFont", Object::Name(self.base_name.as_bytes().to_vec())),
            ("CIDSystemInfo", Object::Dictionary(Dictionary::from_iter([
                ("Registry", Object::String(b"Adobe".to_vec(), StringFormat::Literal)),
                ("Ordering", Object::String(b"Identity".to_vec(), StringFormat::Literal)),
                ("Supplement", Object::Integer(0)),
            ]))),
            ("FontDescriptor", Object::Reference(font_descriptor_id)),
            ("DW", Object::Integer(default_width)),
            ("W", Object::Array(self.build_widths_array())),
            ("CIDToGIDMap", Object::Name(b"Identity".to_vec())),
        ]);

        doc.add_object(Object::Dictionary(dict))
    }

    /// Scale a font-unit value to PDF's 1000-unit glyph space.
    fn scale_metric(&self, value: i64) -> i64 {
        let units_per_em = i64::from(self.units_per_em().max(1));
        value * 1000 / units_per_em
    }

    /// Build the W (widths) array for CIDFont.
    ///
    /// With Identity CID-to-GID mapping every glyph in the font is reachable,
    /// so widths are listed for all of them as one consecutive run.
    fn build_widths_array(&self) -> Vec<Object> {
        let widths: Vec<Object> = (0..self.face.number_of_glyphs())
            .map(|gid| Object::Integer(self.scale_metric(i64::from(self.glyph_width(gid)))))
            .collect();

        if widths.is_empty() {
            return Vec::new();
        }
        vec![Object::Integer(0), Object::Array(widths)]
    }

    /// Glyph ID to Unicode mapping taken from the font's cmap.
    fn unicode_map(&self) -> BTreeMap<u16, char> {
        let mut map = BTreeMap::new();
        let Some(cmap) = self.face.tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables {
            if !subtable.is_unicode() {
                continue;
            }
            subtable.codepoints(|cp| {
                if let (Some(c), Some(gid)) = (char::from_u32(cp), subtable.glyph_index(cp))
                    && gid.0 != 0
                {
                    map.entry(gid.0).or_insert(c);
                }
            });
        }

        map
    }

    /// Create a ToUnicode CMap for text extraction/copy-paste support.
    fn create_to_unicode_cmap(&self, doc: &mut Document) -> ObjectId {
        let entries: Vec<(u16, char)> = self.unicode_map().into_iter().collect();

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries each
        for chunk in entries.chunks(100) {
            let _ = writeln!(cmap, "{} beginbfchar", chunk.len());
            for (gid, c) in chunk {
                let mut utf16 = [0u16; 2];
                let hex: String = c
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04X}"))
                    .collect();
                let _ = writeln!(cmap, "<{gid:04X}> <{hex}>");
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str(
            "endcmap\n\
             CMapName currentdict /CMap defineresource pop\n\
             end\n\
             end\n",
        );

        let mut stream = Stream::new(Dictionary::new(), cmap.into_bytes());
        compress_stream(&mut stream);
        doc.add_object(Object::Stream(stream))
    }

    /// Create the Type0 (composite) font dictionary.
    fn create_type0_font(
        &self,
        doc: &mut Document,
        cid_font_id: ObjectId,
        to_unicode_id: ObjectId,
    ) -> ObjectId {
        let dict = Dictionary::from_iter([
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type0".to_vec())),
            ("BaseFont", Object::Name(self.base_name.as_bytes().to_vec())),
            ("Encoding", Object::Name(b"Identity-H".to_vec())),
            ("DescendantFonts", Object::Array(vec![Object::Reference(cid_font_id)])),
            ("ToUnicode", Object::Reference(to_unicode_id)),
        ]);

        doc.add_object(Object::Dictionary(dict))
    }
}

/// A stretch of text drawn with one font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRun {
    /// Page font resource the run is drawn with
    pub resource_name: String,
    /// Glyph IDs as hex, without angle brackets
    pub hex_glyphs: String,
}

/// Ordered fonts with their page resource names; earlier fonts win.
pub struct FontStack<'a> {
    fonts: Vec<(String, EmbeddedFont<'a>)>,
}

impl<'a> FontStack<'a> {
    pub const fn new(fonts: Vec<(String, EmbeddedFont<'a>)>) -> Self {
        Self { fonts }
    }

    fn font_for(&self, c: char) -> Option<usize> {
        self.fonts.iter().position(|(_, font)| font.has_glyph(c))
    }

    /// Characters of `text` no font in the stack can draw, sorted and deduplicated.
    pub fn missing_chars(&self, text: &str) -> Vec<char> {
        text.chars()
            .filter(|c| !c.is_control() && self.font_for(*c).is_none())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Font index per character run. Characters no font covers stay in the
    /// current run and render as .notdef.
    fn split(&self, text: &str) -> Vec<(usize, Vec<char>)> {
        let mut runs: Vec<(usize, Vec<char>)> = Vec::new();
        for c in text.chars() {
            let current = runs.last().map_or(0, |(index, _)| *index);
            let index = self.font_for(c).unwrap_or(current);
            match runs.last_mut() {
                Some((last, chars)) if *last == index => chars.push(c),
                _ => runs.push((index, vec![c])),
            }
        }
        runs
    }

    /// Glyph runs for `text`, in drawing order.
    pub fn runs(&self, text: &str) -> Vec<GlyphRun> {
        self.split(text)
            .into_iter()
            .filter_map(|(index, chars)| {
                let (resource_name, font) = self.fonts.get(index)?;
                Some(GlyphRun {
                    resource_name: resource_name.clone(),
                    hex_glyphs: font.text_to_hex_glyphs(&chars.into_iter().collect::<String>()),
                })
            })
            .collect()
    }

    /// Make sure every font `text` needs is declared on the page.
    ///
    /// Returns [`FontStatus::Embedded`] if any font had to be added.
    pub fn ensure_for_text(
        &self,
        doc: &mut Document,
        page_id: ObjectId,
        text: &str,
    ) -> Result<FontStatus> {
        let used: BTreeSet<usize> = self.split(text).into_iter().map(|(index, _)| index).collect();

        let mut status = FontStatus::AlreadyPresent;
        for (resource_name, font) in used.into_iter().filter_map(|index| self.fonts.get(index)) {
            if font.ensure_on_page(doc, page_id, resource_name)? == FontStatus::Embedded {
                status = FontStatus::Embedded;
            }
        }
        Ok(status)
    }
}

/// Flate-compress a stream we created; left as is if compression fails.
fn compress_stream(stream: &mut Stream) {
    if let Err(e) = stream.compress() {
        tracing::debug!("Leaving font stream uncompressed: {e}");
    }
}

/// BaseFont name derived from the file stem, restricted to PDF name-safe characters.
fn base_font_name(path: &Path) -> String {
    let name: String = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    if name.is_empty() {
        "StampFont".to_string()
    } else {
        name
    }
}

/// Add the font to a page's Resources dictionary.
///
/// Handles both inline Resources dictionaries and indirect references, as
/// well as Resources inherited from parent Pages nodes. The merged result is
/// written back inline on the page so sibling pages are unaffected.
fn add_font_to_page(
    doc: &mut Document,
    page_id: ObjectId,
    resource_name: &str,
    font_id: ObjectId,
) -> Result<()> {
    let mut resources = resolve_resources(doc, page_id)?;

    let mut fonts = match resources.get(b"Font") {
        Ok(font_obj) => resolve_dict_object(doc, font_obj).unwrap_or_default(),
        Err(_) => Dictionary::new(),
    };

    fonts.set(resource_name, Object::Reference(font_id));
    resources.set("Font", Object::Dictionary(fonts));

    let page = doc.get_object_mut(page_id)
        .map_err(|e| Error::FontEmbed(format!("Failed to get page: {e}")))?;

    match page {
        Object::Dictionary(page_dict) => {
            page_dict.set("Resources", Object::Dictionary(resources));
            Ok(())
        }
        _ => Err(Error::FontEmbed("Page object is not a dictionary".to_string())),
    }
}

/// Resolve the Resources dictionary for a page, handling indirect references
/// and inheritance from parent Pages nodes.
fn resolve_resources(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let page = doc.get_object(page_id)
        .map_err(|e| Error::FontEmbed(format!("Failed to get page: {e}")))?;

    if let Object::Dictionary(page_dict) = page {
        if let Ok(res_obj) = page_dict.get(b"Resources")
            && let Some(dict) = resolve_dict_object(doc, res_obj)
        {
            return Ok(dict);
        }

        if let Ok(parent_obj) = page_dict.get(b"Parent")
            && let Some(dict) = resolve_inherited_resources(doc, parent_obj, 10)
        {
            return Ok(dict);
        }
    }

    Ok(Dictionary::new())
}

/// Resolve an object that should be a Dictionary (handles References).
fn resolve_dict_object(doc: &Document, obj: &Object) -> Option<Dictionary> {
    match obj {
        Object::Dictionary(d) => Some(d.clone()),
        Object::Reference(ref_id) => match doc.get_object(*ref_id) {
            Ok(Object::Dictionary(d)) => Some(d.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Walk up the Pages tree to find inherited Resources.
///
/// `depth` bounds the walk on malformed PDFs with circular Parent references.
fn resolve_inherited_resources(doc: &Document, parent_obj: &Object, depth: usize) -> Option<Dictionary> {
    if depth == 0 {
        return None;
    }

    let Object::Reference(parent_id) = parent_obj else {
        return None;
    };

    let Ok(Object::Dictionary(parent)) = doc.get_object(*parent_id) else {
        return None;
    };

    if let Ok(res_obj) = parent.get(b"Resources")
        && let Some(dict) = resolve_dict_object(doc, res_obj)
    {
        return Some(dict);
    }

    parent
        .get(b"Parent")
        .ok()
        .and_then(|grandparent| resolve_inherited_resources(doc, grandparent, depth - 1))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bundled_font() -> FontFile {
        FontFile::load(crate::util::source_assets_dir().join("DejaVuSans.ttf")).unwrap()
    }

    fn hangul_font() -> FontFile {
        FontFile::load(crate::util::source_assets_dir().join("NanumBarunGothic.ttf")).unwrap()
    }

    fn one_page_doc() -> (Document, ObjectId) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("MediaBox", Object::Array(vec![0.into(), 0.into(), 595.into(), 842.into()])),
        ]));
        doc.objects.insert(pages_id, Object::Dictionary(Dictionary::from_iter([
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
            ("Count", Object::Integer(1)),
        ])));
        (doc, page_id)
    }

    #[test]
    fn test_font_loads() {
        let file = bundled_font();
        let font = file.parse().unwrap();
        assert!(font.units_per_em() > 0);
        assert_eq!(font.base_name(), "DejaVuSans");
    }

    #[test]
    fn test_missing_font_file() {
        let err = FontFile::load("/nonexistent/NanumGothic.ttf").err().unwrap();
        assert!(err.is_font_error());
    }

    #[test]
    fn test_garbage_font_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        let file = FontFile::load(&path).unwrap();
        assert!(matches!(file.parse(), Err(Error::FontParse(_))));
    }

    #[test]
    fn test_hex_conversion() {
        let file = bundled_font();
        let font = file.parse().unwrap();
        let hex = font.text_to_hex_glyphs("A-1");
        assert_eq!(hex.len(), 12);
        assert_eq!(&hex[..4], format!("{:04X}", font.glyph_id('A')));
    }

    #[test]
    fn test_non_latin_glyphs_present() {
        let file = bundled_font();
        let font = file.parse().unwrap();
        assert!("Ωмир".chars().all(|c| font.has_glyph(c)));
        assert!(font.glyph_id('Ω') != 0);
        assert!(!font.has_glyph('한'));
    }

    #[test]
    fn test_hangul_font_covers_hangul() {
        let file = hangul_font();
        let font = file.parse().unwrap();
        assert!("한국어가힣".chars().all(|c| font.has_glyph(c)));
        assert_eq!(font.base_name(), "NanumBarunGothic");
    }

    #[test]
    fn test_font_stack_splits_runs_by_coverage() {
        let (hangul, latin) = (hangul_font(), bundled_font());
        let stack = FontStack::new(vec![
            ("FStamp".to_string(), hangul.parse().unwrap()),
            ("FStamp1".to_string(), latin.parse().unwrap()),
        ]);

        let runs = stack.runs("한국-123어");
        let names: Vec<&str> = runs.iter().map(|r| r.resource_name.as_str()).collect();
        assert_eq!(names, ["FStamp", "FStamp1", "FStamp"]);
        assert_eq!(runs[1].hex_glyphs, latin.parse().unwrap().text_to_hex_glyphs("-123"));
        assert!(runs.iter().all(|r| r.hex_glyphs.as_bytes().chunks(4).all(|g| g != b"0000")));
        assert!(stack.missing_chars("한국-123어").is_empty());
    }

    #[test]
    fn test_font_stack_missing_chars_deduplicated() {
        let file = hangul_font();
        let stack = FontStack::new(vec![("FStamp".to_string(), file.parse().unwrap())]);
        assert_eq!(stack.missing_chars("a1a1한a"), vec!['1', 'a']);
    }

    #[test]
    fn test_font_stack_embeds_only_used_fonts() {
        let (hangul, latin) = (hangul_font(), bundled_font());
        let stack = FontStack::new(vec![
            ("FStamp".to_string(), hangul.parse().unwrap()),
            ("FStamp1".to_string(), latin.parse().unwrap()),
        ]);
        let (mut doc, page_id) = one_page_doc();

        assert_eq!(stack.ensure_for_text(&mut doc, page_id, "A-1").unwrap(), FontStatus::Embedded);
        let fonts = doc.get_page_fonts(page_id).unwrap();
        assert_eq!(fonts.len(), 1);
        assert!(fonts.contains_key(b"FStamp1".as_slice()));

        assert_eq!(stack.ensure_for_text(&mut doc, page_id, "B-2").unwrap(), FontStatus::AlreadyPresent);
        assert_eq!(stack.ensure_for_text(&mut doc, page_id, "한-2").unwrap(), FontStatus::Embedded);
        assert_eq!(doc.get_page_fonts(page_id).unwrap().len(), 2);
    }

    #[test]
    fn test_ensure_on_page_is_idempotent() {
        let file = bundled_font();
        let font = file.parse().unwrap();
        let (mut doc, page_id) = one_page_doc();

        let first = font.ensure_on_page(&mut doc, page_id, "FStamp").unwrap();
        let objects_after_first = doc.objects.len();
        let second = font.ensure_on_page(&mut doc, page_id, "FStamp").unwrap();

        assert_eq!(first, FontStatus::Embedded);
        assert_eq!(second, FontStatus::AlreadyPresent);
        assert_eq!(doc.objects.len(), objects_after_first);

        let fonts = doc.get_page_fonts(page_id).unwrap();
        assert_eq!(fonts.len(), 1);
        assert!(fonts.contains_key(b"FStamp".as_slice()));
    }

    #[test]
    fn test_inherited_resources_are_merged() {
        let file = bundled_font();
        let font = file.parse().unwrap();
        let (mut doc, page_id) = one_page_doc();

        let helvetica_id = doc.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type1".to_vec())),
            ("BaseFont", Object::Name(b"Helvetica".to_vec())),
        ]));
        let pages_id = doc.get_dictionary(page_id).unwrap().get(b"Parent").unwrap().as_reference().unwrap();
        if let Ok(Object::Dictionary(pages)) = doc.get_object_mut(pages_id) {
            pages.set("Resources", Dictionary::from_iter([(
                "Font",
                Object::Dictionary(Dictionary::from_iter([("F1", Object::Reference(helvetica_id))])),
            )]));
        }

        font.ensure_on_page(&mut doc, page_id, "FStamp").unwrap();

        let fonts = doc.get_page_fonts(page_id).unwrap();
        assert!(fonts.contains_key(b"F1".as_slice()));
        assert!(fonts.contains_key(b"FStamp".as_slice()));
    }

    #[test]
    fn test_to_unicode_maps_ascii() {
        let file = bundled_font();
        let font = file.parse().unwrap();
        let map = font.unicode_map();
        assert_eq!(map.get(&font.glyph_id('A')), Some(&'A'));
    }

    #[test]
    fn test_base_font_name_sanitized() {
        assert_eq!(base_font_name(Path::new("/x/Nanum Gothic-Bold.ttf")), "NanumGothicBold");
        assert_eq!(base_font_name(Path::new("/x/---.ttf")), "StampFont");
    }
}
