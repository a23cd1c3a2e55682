//! Pre-defined page sizes for common paper formats.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height,
//! except `LEDGER`, which is `TABLOID` on its side. Use [`named`](crate::pagesize::named)
//! to look a size up by the name a user typed.
//!
//! # Available Sizes
//!
//! ## North American
//! `LETTER`, `HALF_LETTER`, `JUNIOR_LEGAL`, `LEGAL`, `TABLOID`, `LEDGER`
//!
//! ## ANSI
//! `ANSI_A` through `ANSI_E`
//!
//! ## ISO A-Series
//! `A0` through `A6`
//!
//! ## Traditional
//! `FOLIO`, `QUARTO`, `OCTAVO`
//!
//! # Example
//!
//! ```
//! use qrlabel::pagesize::{self, A4};
//!
//! assert_eq!(pagesize::named("a4"), Some(A4));
//! assert!(A4.0 < A4.1);
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

// north american sizes
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const HALF_LETTER: PageSize = (Pt(5.5 * 72.0), Pt(8.5 * 72.0));
pub const JUNIOR_LEGAL: PageSize = (Pt(5.0 * 72.0), Pt(8.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));
pub const TABLOID: PageSize = (Pt(11.0 * 72.0), Pt(17.0 * 72.0));
pub const LEDGER: PageSize = (Pt(17.0 * 72.0), Pt(11.0 * 72.0));

// ansi sizes
pub const ANSI_A: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const ANSI_B: PageSize = (Pt(11.0 * 72.0), Pt(17.0 * 72.0));
pub const ANSI_C: PageSize = (Pt(17.0 * 72.0), Pt(22.0 * 72.0));
pub const ANSI_D: PageSize = (Pt(22.0 * 72.0), Pt(34.0 * 72.0));
pub const ANSI_E: PageSize = (Pt(34.0 * 72.0), Pt(44.0 * 72.0));

// traditional sizes
pub const FOLIO: PageSize = (Pt(12.0 * 72.0), Pt(19.0 * 72.0));
pub const QUARTO: PageSize = (Pt(9.5 * 72.0), Pt(12.0 * 72.0));
pub const OCTAVO: PageSize = (Pt(6.0 * 72.0), Pt(9.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A0: PageSize = (Pt(841.0 * 72.0 / 25.4), Pt(1189.0 * 72.0 / 25.4));
pub const A1: PageSize = (Pt(594.0 * 72.0 / 25.4), Pt(841.0 * 72.0 / 25.4));
pub const A2: PageSize = (Pt(420.0 * 72.0 / 25.4), Pt(594.0 * 72.0 / 25.4));
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));
pub const A6: PageSize = (Pt(105.0 * 72.0 / 25.4), Pt(148.0 * 72.0 / 25.4));

/// The names accepted by [named], in the order they are offered for shell completion
pub const NAMES: &[&str] = &[
    "A3", "A4", "A5", "Letter", "Legal", "A0", "A1", "A2", "A6", "Tabloid", "Ledger",
    "HalfLetter", "JuniorLegal", "AnsiA", "AnsiB", "AnsiC", "AnsiD", "AnsiE", "Folio",
    "Quarto", "Octavo",
];

/// Look up a page size by name, ignoring case, spaces, dashes and underscores
pub fn named(name: &str) -> Option<PageSize> {
    let key: String = name
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .to_ascii_lowercase();

    let size = match key.as_str() {
        "a0" => A0,
        "a1" => A1,
        "a2" => A2,
        "a3" => A3,
        "a4" => A4,
        "a5" => A5,
        "a6" => A6,
        "letter" => LETTER,
        "halfletter" => HALF_LETTER,
        "juniorlegal" => JUNIOR_LEGAL,
        "legal" => LEGAL,
        "tabloid" => TABLOID,
        "ledger" => LEDGER,
        "ansia" => ANSI_A,
        "ansib" => ANSI_B,
        "ansic" => ANSI_C,
        "ansid" => ANSI_D,
        "ansie" => ANSI_E,
        "folio" => FOLIO,
        "quarto" => QUARTO,
        "octavo" => OCTAVO,
        _ => return None,
    };
    Some(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_advertised_name_resolves() {
        for name in NAMES {
            assert!(named(name).is_some(), "{name}");
        }
    }

    #[test]
    fn lookup_is_forgiving_about_spelling() {
        assert_eq!(named("half-letter"), Some(HALF_LETTER));
        assert_eq!(named("ANSI_A"), Some(ANSI_A));
        assert_eq!(named("B5"), None);
    }

    #[test]
    fn ledger_is_tabloid_on_its_side() {
        assert_eq!((LEDGER.1, LEDGER.0), TABLOID);
    }
}
