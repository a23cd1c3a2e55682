//! Content stream rendering for pages.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{PageContents, SpanFont, SpanLayout, StrokeLayout};
use id_arena::Arena;
use std::io::Write;

/// Renders page contents to a PDF content stream, converting high-level content
/// items into low-level PDF operators.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    if contents.is_empty() {
        return Ok(Vec::default());
    }

    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                render_text_spans(&mut content, spans, fonts)?;
            }
            PageContents::Image(image) => {
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    image.position.width(),
                    image.position.height(),
                    image.position.x1,
                    image.position.y1
                )?;
                write!(&mut content, "/I{} Do\n", image.image_id.index())?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Stroke(stroke) => {
                render_stroke(&mut content, stroke)?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;

    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        current_font.size
    )?;
    write_fill_colour(content, current_colour)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_fill_colour(content, current_colour)?;
        }

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
        write!(content, "<")?;
        let codes = fonts
            .get(current_font.id)
            .map(|font| font.encode_text(&span.text))
            .unwrap_or_default();
        for code in codes {
            write!(content, "{code:02x}")?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_stroke(content: &mut Vec<u8>, stroke: &StrokeLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    write!(content, "{} w\n", stroke.line_width)?;
    write_stroke_colour(content, stroke.colour)?;
    write!(
        content,
        "{} {} {} {} re S\n",
        stroke.rect.x1,
        stroke.rect.y1,
        stroke.rect.width(),
        stroke.rect.height()
    )?;
    write!(content, "Q\n")
}

#[allow(clippy::write_with_newline)]
fn write_fill_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[allow(clippy::write_with_newline)]
fn write_stroke_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} RG\n"),
        Colour::Grey { g } => write!(content, "{g} G\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::rect::Rect;
    use crate::units::Pt;

    #[test]
    fn renders_text_as_hex_codes_of_the_span_font() {
        let mut fonts = Arena::new();
        let id = fonts.alloc(Font::default());
        let contents = vec![PageContents::Text(vec![SpanLayout {
            text: "AB".into(),
            font: SpanFont { id, size: Pt(10.0) },
            colour: colours::BLACK,
            coords: (Pt(1.0), Pt(2.0)),
        }])];

        let rendered = String::from_utf8(render_contents(&contents, &fonts).unwrap()).unwrap();
        assert!(rendered.contains("/F0 10 Tf\n"));
        assert!(rendered.contains("1 2 Td\n<4142> Tj\n"));
    }

    #[test]
    fn renders_strokes_as_rectangles() {
        let fonts = Arena::new();
        let contents = vec![PageContents::Stroke(StrokeLayout {
            rect: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: Pt(10.0),
                y2: Pt(5.0),
            },
            colour: colours::GUIDE,
            line_width: Pt(0.5),
        })];

        let rendered = String::from_utf8(render_contents(&contents, &fonts).unwrap()).unwrap();
        assert!(rendered.contains("0.5 w\n0.6 G\n0 0 10 5 re S\n"));
    }
}
