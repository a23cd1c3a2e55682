use pretty_assertions::assert_eq;
use qrlabel::layout::Placement;
use qrlabel::{
    parse_labels, render_sheet, write_sheet, Font, PageLayout, PageSizeSpec, SheetOptions,
    StandardFont, Unit,
};

fn options(placement: Placement, rows: usize, cols: usize) -> SheetOptions {
    let layout = PageLayout::new(
        38.0,
        21.2,
        rows,
        cols,
        Unit::Mm,
        PageSizeSpec::Named("A4".into()),
        placement,
        10.0,
    )
    .expect("valid layout");
    SheetOptions::new(layout)
}

fn input(count: usize) -> String {
    (0..count)
        .map(|i| format!("https://example.org/items/{i};Item number {i} on the shelf\n"))
        .collect()
}

fn pdf_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[test]
fn sheets_grow_one_page_per_full_grid() {
    for (count, pages) in [(50, 1), (51, 2)] {
        let labels = parse_labels(&input(count), ";");
        let (document, report) =
            render_sheet(&options(Placement::Right, 10, 5), Font::default(), &labels).unwrap();
        assert_eq!(report.pages, pages);

        let mut out = Vec::new();
        document.write(&mut out).unwrap();
        assert!(pdf_text(&out).contains(&format!("/Count {pages}")));
    }
}

#[test]
fn every_placement_renders_every_label() {
    let labels = parse_labels(&input(7), ";");
    for placement in [
        Placement::Top,
        Placement::Bottom,
        Placement::Left,
        Placement::Right,
    ] {
        let (document, report) =
            render_sheet(&options(placement, 2, 3), Font::default(), &labels).unwrap();
        assert_eq!(report.rendered, 7, "{placement}");
        assert_eq!(report.pages, 2, "{placement}");
        assert!(report.skipped.is_empty());

        let mut out = Vec::new();
        document.write(&mut out).unwrap();
        let text = pdf_text(&out);
        // one image per label, no interpolation
        assert_eq!(text.matches("/Subtype /Image").count(), 7);
        assert!(text.contains("/Interpolate false"));
    }
}

#[test]
fn long_captions_are_shrunk_and_reported() {
    let labels = parse_labels(
        "x;A caption that is much too long to ever fit a label of this size at ten points\n",
        ";",
    );
    let (_, report) =
        render_sheet(&options(Placement::Bottom, 10, 5), Font::default(), &labels).unwrap();
    assert_eq!(report.shrunk, 1);
}

#[test]
fn writes_a_titled_pdf_with_the_chosen_font() {
    let dir = tempfile::tempdir().unwrap();
    let labels = parse_labels("a;Alpha\nb;Beta\n", ";");
    let mut options = options(Placement::Left, 10, 5);
    options.title = Some("Pantry".into());
    options.border = true;

    let (document, _) = render_sheet(
        &options,
        Font::standard(StandardFont::HelveticaBold),
        &labels,
    )
    .unwrap();
    let path = write_sheet(document, dir.path().join("pantry.pdf")).unwrap();
    assert_eq!(path, dir.path().join("pantry.pdf"));

    let text = pdf_text(&std::fs::read(&path).unwrap());
    assert!(text.starts_with("%PDF-"));
    assert!(text.contains("/Title (Pantry)"));
    assert!(text.contains("/BaseFont /Helvetica-Bold"));
    assert!(text.contains("re S"));
}
