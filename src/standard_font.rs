/// The PDF standard fonts every conforming reader ships with. They are referenced by
/// name and never embedded, so sheets using them stay small.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum StandardFont {
    #[default]
    Helvetica,
    HelveticaBold,
}

/// Glyph advances in 1/1000 em for the printable ASCII range `' '..='~'`, from the
/// Adobe font metrics shipped with the core fonts
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

impl StandardFont {
    pub const UNITS_PER_EM: f32 = 1000.0;

    /// The `BaseFont` name readers resolve the font by
    pub fn base_font(self) -> &'static [u8] {
        match self {
            StandardFont::Helvetica => b"Helvetica",
            StandardFont::HelveticaBold => b"Helvetica-Bold",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    pub fn ascender(self) -> i16 {
        718
    }

    pub fn descender(self) -> i16 {
        -207
    }

    /// Horizontal advance of a character in font units. Characters outside of
    /// WinAnsi are drawn as `?` and measured as such.
    pub fn advance(self, ch: char) -> u16 {
        let table = match self {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        let code = Self::encode(ch);
        match code {
            0x20..=0x7e => table[(code - 0x20) as usize],
            // latin-1 supplement; close enough to an average lowercase glyph
            _ => 556,
        }
    }

    /// Map a character to its single byte WinAnsi code
    pub fn encode(ch: char) -> u8 {
        match ch as u32 {
            code @ 0x20..=0x7e => code as u8,
            code @ 0xa0..=0xff => code as u8,
            _ => b'?',
        }
    }
}
