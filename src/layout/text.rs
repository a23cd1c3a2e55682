use crate::units::Pt;

/// Measures text set at a given size. This is all the cell layout needs to know about
/// fonts, which keeps it testable without real font files.
pub trait TextMeasure {
    /// Calculate the width of a single line of text
    fn width_of_text(&self, text: &str, size: Pt) -> Pt;

    /// How far apart consecutive lines of text are set
    fn line_height(&self, size: Pt) -> Pt;
}

const TABSIZE: usize = 4;

/// Wraps text into lines no wider than `max_width` with natural boundary wrapping.
///
/// # Wrapping Behavior
///
/// Explicit newlines always start a new line. Otherwise the algorithm tracks the most
/// recent whitespace as a potential break point; when a line would overflow it
/// "rewinds" to that break point and continues on the next line, keeping words intact.
/// If no break point exists (e.g. a URL wider than the line) the word is broken at
/// character level instead.
///
/// Every line receives at least one character, so wrapping terminates even when
/// `max_width` is zero or negative. Lines never start with whitespace, and
/// whitespace-only text yields no lines at all.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    size: Pt,
    max_width: Pt,
) -> Vec<String> {
    // replace tabs with spaces and normalize newlines
    let text = text
        .replace('\t', &" ".repeat(TABSIZE))
        .replace("\r\n", "\n")
        .replace('\r', "\n");
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(measure, paragraph, size, max_width, &mut lines);
    }
    lines
}

/// Tracks a position in the current line where we can safely break to a new line.
struct BreakPoint {
    /// number of characters of the line to keep
    keep: usize,
    /// character index within the paragraph to resume from
    resume: usize,
}

fn wrap_paragraph<M: TextMeasure + ?Sized>(
    measure: &M,
    paragraph: &str,
    size: Pt,
    max_width: Pt,
    lines: &mut Vec<String>,
) {
    let first_line = lines.len();
    let chars: Vec<char> = paragraph.chars().collect();

    let mut line = String::new();
    let mut width = Pt(0.0);
    let mut last_break: Option<BreakPoint> = None;
    let mut buf = [0u8; 4];

    // a line never starts with whitespace, neither after a break nor at the start
    let mut ci = chars.iter().take_while(|c| c.is_whitespace()).count();
    while ci < chars.len() {
        let ch = chars[ci];
        let advance = measure.width_of_text(ch.encode_utf8(&mut buf), size);

        if width + advance > max_width && !line.is_empty() {
            if let Some(bp) = last_break.take() {
                // rewind to the whitespace break point
                let kept: String = line.chars().take(bp.keep).collect();
                lines.push(kept.trim_end().to_string());
                ci = bp.resume;
            } else {
                // no break point, force a character break
                lines.push(line.trim_end().to_string());
            }

            line.clear();
            width = Pt(0.0);
            while ci < chars.len() && chars[ci].is_whitespace() {
                ci += 1;
            }
            continue;
        }

        line.push(ch);
        width += advance;
        if ch.is_whitespace() && !line.trim().is_empty() {
            last_break = Some(BreakPoint {
                keep: line.chars().count(),
                resume: ci + 1,
            });
        }
        ci += 1;
    }

    if !line.trim().is_empty() || lines.len() == first_line {
        lines.push(line.trim_end().to_string());
    }
}

/// The width of the widest of the given lines
pub fn longest_line_width<M: TextMeasure + ?Sized, S: AsRef<str>>(
    measure: &M,
    lines: &[S],
    size: Pt,
) -> Pt {
    lines
        .iter()
        .map(|line| measure.width_of_text(line.as_ref(), size))
        .fold(Pt(0.0), Pt::max)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Every character is half as wide as the font size and lines are set solid
    pub(crate) struct Monospace;

    impl TextMeasure for Monospace {
        fn width_of_text(&self, text: &str, size: Pt) -> Pt {
            size * 0.5 * text.chars().count() as f32
        }

        fn line_height(&self, size: Pt) -> Pt {
            size
        }
    }

    fn wrap(text: &str, columns: usize) -> Vec<String> {
        // at 2pt every character is 1pt wide
        wrap_text(&Monospace, text, Pt(2.0), Pt(columns as f32))
    }

    #[test]
    fn keeps_short_text_on_one_line() {
        assert_eq!(wrap("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn breaks_at_whitespace() {
        assert_eq!(
            wrap("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn breaks_long_words_at_characters() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("ab abcdefgh", 4), vec!["ab", "abcd", "efgh"]);
    }

    #[test]
    fn honours_explicit_newlines() {
        assert_eq!(wrap("one\r\ntwo\n\nthree", 20), vec!["one", "two", "", "three"]);
    }

    #[test]
    fn leading_whitespace_never_becomes_a_line_of_its_own() {
        assert_eq!(wrap("   abcdef", 2), vec!["ab", "cd", "ef"]);
        assert_eq!(wrap("one\n  two", 20), vec!["one", "two"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap("", 10).is_empty());
        assert!(wrap(" \n\t", 10).is_empty());
    }

    #[test]
    fn always_makes_progress_on_degenerate_widths() {
        assert_eq!(wrap("abc", 0), vec!["a", "b", "c"]);
        assert_eq!(
            wrap_text(&Monospace, "ab", Pt(2.0), Pt(-5.0)),
            vec!["a", "b"]
        );
    }

    #[test]
    fn no_line_is_wider_than_the_limit() {
        let text = "A very long label text that does not fit anywhere near one line";
        for columns in 1..30 {
            for line in wrap(text, columns) {
                assert!(line.chars().count() <= columns, "{line:?} @ {columns}");
            }
        }
    }

    #[test]
    fn measures_the_longest_line() {
        let lines = vec!["ab", "abcd", "a"];
        assert_eq!(longest_line_width(&Monospace, &lines[..], Pt(2.0)), Pt(4.0));
        assert_eq!(longest_line_width::<_, &str>(&Monospace, &[], Pt(2.0)), Pt(0.0));
    }
}
