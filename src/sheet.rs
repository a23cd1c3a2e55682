//! Drawing a whole sheet of labels and writing it out.

use std::ffi::OsString;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use id_arena::Id;

use crate::colour::colours;
use crate::config::{EncodeFailurePolicy, SheetOptions};
use crate::document::Document;
use crate::font::Font;
use crate::image::Image;
use crate::info::Info;
use crate::labels::Label;
use crate::layout::{layout_cell, FlowEvent, LayoutResult, PageFlow};
use crate::page::{ImageLayout, Page, SpanFont, SpanLayout, StrokeLayout};
use crate::qr::with_encoded_labels;
use crate::rect::Frame;
use crate::units::Pt;
use crate::LabelError;

/// Line width of the cutting guide drawn around each cell
const BORDER_WIDTH: Pt = Pt(0.5);

/// A label that was left off the sheet
#[derive(Debug)]
pub struct SkippedLabel {
    /// Position of the label in the input, counting from 0
    pub index: usize,
    pub content: String,
    pub reason: LabelError,
}

/// What happened while rendering a sheet
#[derive(Debug, Default)]
pub struct SheetReport {
    pub pages: usize,
    pub rendered: usize,
    pub skipped: Vec<SkippedLabel>,
    /// How many labels needed a smaller font to fit
    pub shrunk: usize,
}

/// Lays out and draws every label, in order, onto as many pages as needed.
///
/// QR codes are encoded on a helper thread while the sheet is assembled. A label whose
/// content cannot be encoded is either skipped (it does not take up a cell) or stops
/// the whole sheet, depending on [SheetOptions::on_encode_error].
pub fn render_sheet(
    options: &SheetOptions,
    font: Font,
    labels: &[Label],
) -> Result<(Document, SheetReport), LabelError> {
    options.validate()?;
    let layout = &options.layout;

    let mut doc = Document::default();
    let font_id = doc.add_font(font);
    let mut flow = PageFlow::new(layout, layout.page);
    let mut report = SheetReport::default();
    let mut current: Option<Page> = None;

    with_encoded_labels(labels, options.recovery_level, |stream| -> Result<(), LabelError> {
        for (index, label) in labels.iter().enumerate() {
            let png = match stream.next_code()? {
                Ok(png) => png,
                Err(err) => match options.on_encode_error {
                    EncodeFailurePolicy::Abort => return Err(err),
                    EncodeFailurePolicy::Skip => {
                        tracing::warn!(
                            label = index + 1,
                            content = %label.content,
                            "skipping label: {err}"
                        );
                        report.skipped.push(SkippedLabel {
                            index,
                            content: label.content.clone(),
                            reason: err,
                        });
                        continue;
                    }
                },
            };
            let image_id = doc.add_image(Image::new_raster_from_memory(&png)?);

            let (cursor, event) = flow.advance();
            if event == FlowEvent::NewPage {
                if let Some(page) = current.take() {
                    doc.add_page(page);
                }
                current = Some(Page::new(layout.page, Some(flow.margins())));
            }
            let page = current.as_mut().ok_or(LabelError::PageMissing)?;

            let font = &doc.fonts[font_id];
            let result = layout_cell(
                layout,
                label,
                options.min_qr_size_percentage,
                &cursor,
                font,
            );
            if result.font_reduced() {
                report.shrunk += 1;
            }

            draw_label(page, &result, image_id, font_id, font);
            if options.border {
                let cell = Frame::new(cursor.x, cursor.y, layout.cell.width, layout.cell.height);
                draw_border(page, cell);
            }
            report.rendered += 1;
        }
        Ok(())
    })?;

    match current.take() {
        Some(page) => {
            doc.add_page(page);
        }
        // an empty sheet still gets a page, a PDF without any is not much use
        None => {
            doc.add_page(Page::new(layout.page, Some(flow.margins())));
        }
    }
    report.pages = doc.page_count();

    let mut info = Info::new();
    info.subject(format!("{} QR code labels", report.rendered));
    if let Some(title) = &options.title {
        info.title(title);
    }
    doc.set_info(info);

    tracing::debug!(
        pages = report.pages,
        rendered = report.rendered,
        skipped = report.skipped.len(),
        "rendered label sheet"
    );
    Ok((doc, report))
}

fn draw_label(
    page: &mut Page,
    result: &LayoutResult,
    image_id: Id<Image>,
    font_id: Id<Font>,
    font: &Font,
) {
    let page_height = page.height();

    page.add_image(ImageLayout {
        image_id,
        position: result.qr.to_pdf(page_height),
    });

    let (Some(area), Some(block)) = (result.caption, result.text_block(font)) else {
        return;
    };

    // center the glyph box (ascent to descent) inside each line
    let size = result.font_size;
    let glyph_height = font.ascent(size) - font.descent(size);
    let baseline = (result.line_height - glyph_height) / 2.0 + font.ascent(size);

    let spans = result
        .lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| {
            let width = font.width_of_text(line, size);
            let x = area.x + (area.width - width) / 2.0;
            let y = block.y + result.line_height * i as f32 + baseline;
            SpanLayout {
                text: line.clone(),
                font: SpanFont { id: font_id, size },
                colour: colours::BLACK,
                coords: (x, page_height - y),
            }
        })
        .collect();
    page.add_spans(spans);
}

fn draw_border(page: &mut Page, cell: Frame) {
    let rect = cell.to_pdf(page.height());
    page.add_stroke(StrokeLayout {
        rect,
        colour: colours::GUIDE,
        line_width: BORDER_WIDTH,
    });
}

/// The path a sheet is written to: `path` with `.pdf` appended unless it already
/// ends that way
pub fn output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let has_suffix = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if has_suffix {
        path.to_path_buf()
    } else {
        let mut name = OsString::from(path.as_os_str());
        name.push(".pdf");
        PathBuf::from(name)
    }
}

/// Writes the document next to its destination and moves it into place once it is
/// complete, so a failed run never leaves half a PDF behind. Returns the path written.
pub fn write_sheet<P: AsRef<Path>>(document: Document, path: P) -> Result<PathBuf, LabelError> {
    let path = output_path(path);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(&dir)?;
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        document.write(&mut writer)?;
        writer.flush()?;
    }
    file.persist(&path).map_err(|err| LabelError::Io(err.error))?;

    tracing::debug!(path = %path.display(), "wrote label sheet");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PageLayout, PageSizeSpec};
    use crate::layout::Placement;
    use crate::page::PageContents;
    use crate::units::Unit;
    use pretty_assertions::assert_eq;

    fn options(placement: Placement) -> SheetOptions {
        let layout = PageLayout::new(
            38.0,
            21.2,
            10,
            5,
            Unit::Mm,
            PageSizeSpec::Named("A4".into()),
            placement,
            10.0,
        )
        .unwrap();
        SheetOptions::new(layout)
    }

    fn labels(count: usize) -> Vec<Label> {
        (0..count)
            .map(|i| Label::new(format!("item-{i}"), format!("Item {i}")))
            .collect()
    }

    #[test]
    fn appends_the_pdf_extension() {
        assert_eq!(output_path("labels"), PathBuf::from("labels.pdf"));
        assert_eq!(output_path("labels.PDF"), PathBuf::from("labels.PDF"));
        assert_eq!(output_path("dir/a.b"), PathBuf::from("dir/a.b.pdf"));
    }

    #[test]
    fn full_sheets_have_no_trailing_page() {
        for (count, pages) in [(1, 1), (50, 1), (51, 2)] {
            let (doc, report) =
                render_sheet(&options(Placement::Right), Font::default(), &labels(count)).unwrap();
            assert_eq!(report.pages, pages, "{count} labels");
            assert_eq!(doc.page_count(), pages);
            assert_eq!(report.rendered, count);
        }
    }

    #[test]
    fn an_empty_sheet_has_one_blank_page() {
        let (doc, report) = render_sheet(&options(Placement::Top), Font::default(), &[]).unwrap();
        assert_eq!(report.pages, 1);
        assert!(doc.page(0).unwrap().contents.is_empty());
    }

    #[test]
    fn skips_unencodable_labels_without_using_a_cell() {
        let mut labels = labels(3);
        labels[1].content = String::new();
        let (doc, report) = render_sheet(&options(Placement::Bottom), Font::default(), &labels).unwrap();

        assert_eq!(report.rendered, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].index, 1);
        let images = doc
            .page(0)
            .unwrap()
            .contents
            .iter()
            .filter(|c| matches!(c, PageContents::Image(_)))
            .count();
        assert_eq!(images, 2);
    }

    #[test]
    fn strict_mode_aborts_on_unencodable_labels() {
        let mut options = options(Placement::Bottom);
        options.on_encode_error = EncodeFailurePolicy::Abort;
        let mut labels = labels(3);
        labels[2].content = "x".repeat(5000);

        let result = render_sheet(&options, Font::default(), &labels);
        assert!(matches!(result, Err(LabelError::QrEncoding { .. })));
    }

    #[test]
    fn draws_borders_and_centered_captions() {
        let mut options = options(Placement::Bottom);
        options.border = true;
        let (doc, _) = render_sheet(&options, Font::default(), &labels(1)).unwrap();
        let page = doc.page(0).unwrap();

        let strokes: Vec<&StrokeLayout> = page
            .contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Stroke(s) => Some(s),
                _ => None,
            })
            .collect();
        assert_eq!(strokes.len(), 1);
        let cell_width = options.layout.cell.width;
        assert!((strokes[0].rect.width() - cell_width).0.abs() < 1e-3);

        let image = page
            .contents
            .iter()
            .find_map(|c| match c {
                PageContents::Image(i) => Some(i),
                _ => None,
            })
            .unwrap();
        let span = page
            .contents
            .iter()
            .find_map(|c| match c {
                PageContents::Text(spans) => spans.first(),
                _ => None,
            })
            .unwrap();
        assert_eq!(span.text, "Item 0");
        // the caption sits below the code
        assert!(span.coords.1 < image.position.y1);
        // and is centered under it
        let font = Font::default();
        let text_width = font.width_of_text("Item 0", span.font.size);
        let text_center = span.coords.0 + text_width / 2.0;
        let image_center = image.position.x1 + image.position.width() / 2.0;
        assert!((text_center - image_center).0.abs() < 1e-2);
    }

    #[test]
    fn writes_atomically_to_the_destination() {
        let dir = tempfile::tempdir().unwrap();
        let (doc, _) = render_sheet(&options(Placement::Left), Font::default(), &labels(2)).unwrap();

        let written = write_sheet(doc, dir.path().join("sheet")).unwrap();
        assert_eq!(written, dir.path().join("sheet.pdf"));
        let bytes = std::fs::read(&written).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        // nothing but the finished file is left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
