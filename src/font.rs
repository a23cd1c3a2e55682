use crate::{
    layout::TextMeasure,
    refs::{ObjectReferences, RefType},
    standard_font::StandardFont,
    LabelError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use pdf_writer::{
    types::{FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;
use std::path::Path;

/// Where the glyphs of a [Font] come from
pub enum Face {
    /// One of the standard fonts every PDF reader provides, referenced by name only
    Standard(StandardFont),
    /// A TrueType / OpenType face that is embedded in its entirety
    TrueType(OwnedFace),
}

/// A font captions are set in. TrueType fonts are embedded in their entirety in the
/// generated PDF, so large fonts may dramatically increase the size of a sheet; the
/// standard fonts cost nothing.
///
/// Typically, fonts are referred to by their [Id] within the document itself, and not
/// by any typed references
pub struct Font {
    pub face: Face,
}

impl Default for Font {
    fn default() -> Self {
        Font::standard(StandardFont::Helvetica)
    }
}

impl Font {
    /// Use one of the standard PDF fonts
    pub fn standard(font: StandardFont) -> Font {
        Font {
            face: Face::Standard(font),
        }
    }

    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, LabelError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font {
            face: Face::TrueType(face),
        })
    }

    /// Read and parse a TrueType / OpenType font file
    pub fn load_from_disk<P: AsRef<Path>>(path: P) -> Result<Font, LabelError> {
        Self::load(std::fs::read(path)?)
    }

    /// Obtain the full name of the font
    pub fn name(&self) -> String {
        match &self.face {
            Face::Standard(font) => font.name().to_string(),
            Face::TrueType(face) => face
                .as_face_ref()
                .names()
                .into_iter()
                .find(|name| {
                    name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode()
                })
                .and_then(|name| name.to_string())
                .unwrap_or_else(|| "Unnamed".to_string()),
        }
    }

    /// Obtain the family name of the font
    pub fn family(&self) -> String {
        match &self.face {
            Face::Standard(font) => font.name().to_string(),
            Face::TrueType(face) => face
                .as_face_ref()
                .names()
                .into_iter()
                .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
                .and_then(|name| name.to_string())
                .unwrap_or_else(|| self.name()),
        }
    }

    fn units_per_em(&self) -> f32 {
        match &self.face {
            Face::Standard(_) => StandardFont::UNITS_PER_EM,
            Face::TrueType(face) => face.as_face_ref().units_per_em() as f32,
        }
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        let scaling: Pt = size / self.units_per_em();
        match &self.face {
            Face::Standard(font) => scaling * font.ascender() as f32,
            Face::TrueType(face) => scaling * face.as_face_ref().ascender() as f32,
        }
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        let scaling: Pt = size / self.units_per_em();
        match &self.face {
            Face::Standard(font) => scaling * font.descender() as f32,
            Face::TrueType(face) => scaling * face.as_face_ref().descender() as f32,
        }
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    ///
    /// Standard fonts use the font size itself, the way classic PDF cell layout does.
    pub fn line_height(&self, size: Pt) -> Pt {
        match &self.face {
            Face::Standard(_) => size,
            Face::TrueType(face) => {
                let scaling: Pt = size / self.units_per_em();
                let leading: Pt = scaling * face.as_face_ref().line_gap() as f32;
                let ascent: Pt = scaling * face.as_face_ref().ascender() as f32;
                let descent: Pt = scaling * face.as_face_ref().descender() as f32;
                leading + ascent - descent
            }
        }
    }

    /// Calculate the width of a given string of text at the given font size. Newlines and
    /// glyphs missing from the font are ignored
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let scaling = size / self.units_per_em();
        match &self.face {
            Face::Standard(font) => text
                .chars()
                .filter(|ch| !ch.is_control())
                .map(|ch| scaling * font.advance(ch) as f32)
                .sum(),
            Face::TrueType(face) => text
                .chars()
                .filter_map(|ch| self.glyph_id(ch))
                .map(|gid| {
                    scaling
                        * face
                            .as_face_ref()
                            .glyph_hor_advance(owned_ttf_parser::GlyphId(gid))
                            .unwrap_or_default() as f32
                })
                .sum(),
        }
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        match &self.face {
            Face::Standard(_) => Some(StandardFont::encode(ch) as u16),
            Face::TrueType(face) => face.as_face_ref().glyph_index(ch).map(|i| i.0),
        }
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}').or_else(|| self.glyph_id('?'))
    }

    /// Encode text into the character codes a content stream shows with this font:
    /// single WinAnsi bytes for standard fonts, big-endian glyph ids for embedded ones
    pub fn encode_text(&self, text: &str) -> Vec<u8> {
        match &self.face {
            Face::Standard(_) => text.chars().map(StandardFont::encode).collect(),
            Face::TrueType(_) => text
                .chars()
                .flat_map(|ch| {
                    self.glyph_id(ch)
                        .or_else(|| self.replacement_glyph_id())
                        .unwrap_or_default()
                        .to_be_bytes()
                })
                .collect(),
        }
    }

    fn write_cid(
        &self,
        face: &OwnedFace,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_descriptor_id = self.write_descriptor(face, refs, font_index, writer);

        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(pdf_writer::types::CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let ids = glyph_ids(face);
        let ids_augmented = glyphs_sizing(face, &ids);

        let scaling = 1000.0 / face.as_face_ref().units_per_em() as f32;

        // the most popular width becomes the default
        // <width, count>
        let mut widths_counts: HashMap<u16, usize> = HashMap::new();
        for (_, (_, (width, _))) in ids_augmented.iter() {
            *widths_counts.entry(*width).or_insert(0) += 1;
        }
        let most_common_width = widths_counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(&sz, _)| sz as f32 * scaling)
            .unwrap_or(1000.0);

        let mut id_widths: Vec<(u16, f32)> = ids_augmented
            .iter()
            .map(|(&cid, &(_, (width, _)))| (cid, width as f32 * scaling))
            .collect();
        id_widths.sort_by_key(|(id, _)| *id);

        let mut widths = cid_font.widths();
        widths.consecutive(0, [1000.0]);
        if let Some(&(first_cid, first_width)) = id_widths.first() {
            let mut start_cid: u16 = first_cid;
            let mut current_widths: Vec<f32> = vec![first_width];
            for (cid, width) in id_widths.into_iter().skip(1) {
                if (cid - start_cid) as usize > current_widths.len() {
                    // gap in the cids, start a new block
                    widths.consecutive(start_cid, current_widths.clone());
                    start_cid = cid;
                    current_widths.clear();
                }

                current_widths.push(width);
            }
            widths.consecutive(start_cid, current_widths);
        }
        widths.finish();

        cid_font.default_width(most_common_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_descriptor(
        &self,
        face: &OwnedFace,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_stream_id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(font_data_stream_id, face.as_slice())
            .pair(Name(b"Length1"), face.as_slice().len() as i32);

        let gids = glyph_ids(face);
        let gids_augmented = glyphs_sizing(face, &gids);
        let face = face.as_face_ref();

        let max_width = gids_augmented
            .values()
            .map(|&(_, (w, _))| w)
            .max()
            .unwrap_or_default();
        let max_height = gids_augmented
            .values()
            .map(|&(_, (_, h))| h)
            .max()
            .unwrap_or_default();
        let sum_width: usize = gids_augmented.values().map(|&(_, (w, _))| w as usize).sum();
        let avg_width = sum_width as f32 / gids_augmented.len().max(1) as f32;

        let id = refs.gen(RefType::FontDescriptor(font_index));

        let name = self.name();
        let family = self.family();
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags: FontFlags = FontFlags::empty();
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        descriptor.flags(flags);

        let scaling = 1000.0 / face.units_per_em() as f32;
        descriptor.bbox(pdf_writer::Rect {
            x1: 0.0,
            y1: 0.0,
            x2: max_width as f32 * scaling,
            y2: max_height as f32 * scaling,
        });
        // readers only use the slant for substitution, an approximation is enough
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(
            face.x_height()
                .unwrap_or_else(|| face.capital_height().unwrap_or_default()) as f32
                * scaling,
        );
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);

        descriptor.font_file2(font_data_stream_id);

        id
    }

    fn write_to_unicode(
        &self,
        face: &OwnedFace,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map: String = r#"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe)
/Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
"#
        .replace("\r\n", "\n");

        let mut ids: Vec<(u16, char)> = glyph_ids(face).into_iter().collect();
        ids.sort_by_key(|&(id, _)| id);

        // each bfchar block holds at most 100 entries sharing a high byte
        let mut cmap_blocks: Vec<Vec<(u16, char)>> = Vec::new();
        let mut current_block: Vec<(u16, char)> = Vec::new();
        let mut high_byte: u8 = 0;
        for (id, ch) in ids.iter() {
            if (id >> 8) as u8 != high_byte || current_block.len() >= 100 {
                if !current_block.is_empty() {
                    cmap_blocks.push(std::mem::take(&mut current_block));
                }
                high_byte = (id >> 8) as u8;
            }

            current_block.push((*id, *ch));
        }
        if !current_block.is_empty() {
            cmap_blocks.push(current_block);
        }

        for block in cmap_blocks.into_iter() {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (id, ch) in block.into_iter() {
                let ch: u32 = ch.into();
                map.push_str(&format!("<{id:04x}> <{ch:04x}>\n"));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(pdf_writer::Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));

        match &self.face {
            Face::Standard(standard) => {
                let mut font = writer.type1_font(font_id);
                font.base_font(Name(standard.base_font()));
                font.encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            Face::TrueType(face) => {
                let cid_font_id = self.write_cid(face, refs, font_index, writer);
                let to_unicode_id = self.write_to_unicode(face, refs, font_index, writer);

                let mut font = writer.type0_font(font_id);
                font.base_font(Name(format!("F{font_index}").as_bytes()));
                font.encoding_predefined(Name(b"Identity-H"));
                font.descendant_font(cid_font_id);
                font.to_unicode(to_unicode_id);
            }
        }
    }
}

impl TextMeasure for Font {
    fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        Font::width_of_text(self, text, size)
    }

    fn line_height(&self, size: Pt) -> Pt {
        Font::line_height(self, size)
    }
}

fn glyph_ids(face: &OwnedFace) -> HashMap<u16, char> {
    let mut map: HashMap<u16, char> = HashMap::new();
    let Some(cmap) = face.as_face_ref().tables().cmap else {
        return map;
    };

    for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
        subtable.codepoints(|codepoint: u32| {
            if let Ok(ch) = char::try_from(codepoint) {
                if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0) {
                    map.entry(index.0).or_insert(ch);
                }
            }
        });
    }

    map
}

fn glyphs_sizing(face: &OwnedFace, ids: &HashMap<u16, char>) -> HashMap<u16, (char, (u16, i16))> {
    let face = face.as_face_ref();
    let mut ids_augmented: HashMap<u16, (char, (u16, i16))> = HashMap::new();
    for (&id, &ch) in ids.iter() {
        if let Some(gid) = face.glyph_index(ch) {
            if let Some(h_advance) = face.glyph_hor_advance(gid) {
                let height = face
                    .glyph_bounding_box(gid)
                    .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                    .unwrap_or(1000);
                ids_augmented.insert(id, (ch, (h_advance, height)));
            }
        }
    }
    ids_augmented
}
