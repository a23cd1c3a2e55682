use std::io::Read;

use crate::LabelError;

/// One label to print: `content` is encoded into the QR code, `caption` is printed
/// next to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub content: String,
    pub caption: String,
}

impl Label {
    pub fn new<C: Into<String>, T: Into<String>>(content: C, caption: T) -> Label {
        Label {
            content: content.into(),
            caption: caption.into(),
        }
    }
}

/// Parses label definitions, one per line.
///
/// Each line is split at the first `separator` into the QR content and the caption; a
/// line without the separator (or any line, if `separator` is empty) uses the whole
/// line for both. Blank lines are skipped.
///
/// ```
/// use qrlabel::{parse_labels, Label};
///
/// let labels = parse_labels("https://example.org;Example\n\nplain\n", ";");
/// assert_eq!(
///     labels,
///     vec![
///         Label::new("https://example.org", "Example"),
///         Label::new("plain", "plain"),
///     ]
/// );
/// ```
pub fn parse_labels(input: &str, separator: &str) -> Vec<Label> {
    input
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(|line| match separator {
            "" => Label::new(line, line),
            sep => match line.split_once(sep) {
                Some((content, caption)) => Label::new(content, caption),
                None => Label::new(line, line),
            },
        })
        .collect()
}

/// Reads all of `reader` (a file, or standard input) and parses it with [parse_labels]
pub fn read_labels<R: Read>(mut reader: R, separator: &str) -> Result<Vec<Label>, LabelError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    let labels = parse_labels(&input, separator);
    tracing::debug!(count = labels.len(), "read label definitions");
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_only_at_the_first_separator() {
        let labels = parse_labels("a;b;c", ";");
        assert_eq!(labels, vec![Label::new("a", "b;c")]);
    }

    #[test]
    fn keeps_empty_halves() {
        let labels = parse_labels("content;\n;caption", ";");
        assert_eq!(
            labels,
            vec![Label::new("content", ""), Label::new("", "caption")]
        );
    }

    #[test]
    fn handles_windows_line_endings_and_blank_lines() {
        let labels = parse_labels("one|1\r\n\r\n   \r\ntwo|2\r\n", "|");
        assert_eq!(labels, vec![Label::new("one", "1"), Label::new("two", "2")]);
    }

    #[test]
    fn empty_separator_disables_splitting() {
        let labels = parse_labels("a;b", "");
        assert_eq!(labels, vec![Label::new("a;b", "a;b")]);
    }

    #[test]
    fn multi_character_separators() {
        let labels = parse_labels("x => y", " => ");
        assert_eq!(labels, vec![Label::new("x", "y")]);
    }

    #[test]
    fn reads_from_any_reader() {
        let labels = read_labels("first\nsecond;2nd\n".as_bytes(), ";").unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[1], Label::new("second", "2nd"));
    }
}
