use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::{generate, Shell};

use qrlabel::layout::Placement;
use qrlabel::{
    pagesize, read_labels, render_sheet, write_sheet, EncodeFailurePolicy, Font, PageLayout,
    PageSizeSpec, RecoveryLevel, SheetOptions, StandardFont, Unit,
};

/// Generate a PDF sheet of QR code labels.
///
/// Each input line is one label. A line is split at the first separator into the
/// content of the QR code and the caption printed next to it; a line without the
/// separator is used for both.
#[derive(Debug, Parser)]
#[clap(
    author,
    version,
    // the completion subcommand does not need an output file
    subcommand_negates_reqs = true,
    bin_name = "qrlabel"
)]
pub struct Cli {
    /// Where to write the PDF. `.pdf` is appended when missing
    #[arg(value_name = "OUTPUT", required = true)]
    pub output: Option<PathBuf>,

    /// Width of a label in the chosen unit
    #[arg(short = 'w', long, default_value_t = 38.0)]
    pub width: f32,

    /// Height of a label in the chosen unit
    #[arg(short = 'H', long, default_value_t = 21.2)]
    pub height: f32,

    /// Number of rows per page
    #[arg(short = 'r', long, default_value_t = 10)]
    pub rows: usize,

    /// Number of columns per page
    #[arg(short = 'c', long, default_value_t = 5)]
    pub cols: usize,

    /// Unit of measurement for label and page dimensions
    #[arg(
        short = 'u',
        long,
        default_value = "mm",
        value_parser = PossibleValuesParser::new(["pt", "mm", "cm", "in", "inch"])
            .try_map(|s| s.parse::<Unit>()),
    )]
    pub unit: Unit,

    /// Named size of the page [default: A4]
    #[arg(
        short = 's',
        long,
        alias = "pageSize",
        ignore_case = true,
        value_parser = PossibleValuesParser::new(pagesize::NAMES.iter().copied()),
        conflicts_with_all = ["page_width", "page_height"],
    )]
    pub page_size: Option<String>,

    /// Page width in the chosen unit, instead of a named size
    #[arg(long, alias = "pageWidth", requires = "page_height")]
    pub page_width: Option<f32>,

    /// Page height in the chosen unit, instead of a named size
    #[arg(long, alias = "pageHeight", requires = "page_width")]
    pub page_height: Option<f32>,

    /// Where the caption goes relative to its QR code
    #[arg(
        short = 'p',
        long,
        default_value = "R",
        ignore_case = true,
        value_parser = PossibleValuesParser::new(["T", "B", "L", "R", "top", "bottom", "left", "right"])
            .try_map(|s| s.parse::<Placement>()),
    )]
    pub position: Placement,

    /// File with one label per line. Read from standard input when omitted
    #[arg(short = 'i', long, alias = "inputFile", value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Splits each input line into QR content and caption
    #[arg(short = 'S', long, default_value = ";")]
    pub separator: String,

    /// Error correction of the QR codes: 0 (low), 1 (medium), 2 (high), 3 (highest)
    #[arg(
        short = 'R',
        long,
        alias = "recoveryLevel",
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(0..=3),
    )]
    pub recovery_level: u8,

    /// Caption font size in points
    #[arg(long, alias = "fontSize", default_value_t = 10.0)]
    pub font_size: f32,

    /// The QR code never shrinks below this share of the cell, in percent
    #[arg(long, alias = "minQrSize", default_value_t = SheetOptions::DEFAULT_MIN_QR_SIZE_PERCENTAGE)]
    pub min_qr_size: f32,

    /// Draw an outline around every label
    #[arg(short = 'b', long)]
    pub border: bool,

    /// Set captions in bold
    #[arg(long, conflicts_with = "font")]
    pub bold: bool,

    /// TrueType / OpenType font to embed for the captions instead of Helvetica
    #[arg(long, value_name = "FONT_FILE")]
    pub font: Option<PathBuf>,

    /// Fail instead of skipping labels whose content cannot be encoded
    #[arg(long)]
    pub strict: bool,

    /// Document title [default: the output file name]
    #[arg(long)]
    pub title: Option<String>,

    /// Log more, repeat for even more
    #[arg(short = 'v', long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long)]
    pub quiet: bool,

    #[clap(subcommand)]
    pub subcommand: Option<Subcommand>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    /// Generate shell completion scripts
    Completion(CompletionCommand),
}

#[derive(Debug, Parser)]
pub struct CompletionCommand {
    /// Shell to generate completions for
    #[clap(value_enum, default_value_t = Shell::Bash)]
    pub shell: Shell,
}

impl Cli {
    /// The log filter used when `RUST_LOG` is not set
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    fn page_size_spec(&self) -> PageSizeSpec {
        match (self.page_width, self.page_height) {
            (Some(width), Some(height)) => PageSizeSpec::Custom { width, height },
            _ => self
                .page_size
                .clone()
                .map(PageSizeSpec::Named)
                .unwrap_or_default(),
        }
    }

    pub fn sheet_options(&self, output: &Path) -> anyhow::Result<SheetOptions> {
        let layout = PageLayout::new(
            self.width,
            self.height,
            self.rows,
            self.cols,
            self.unit,
            self.page_size_spec(),
            self.position,
            self.font_size,
        )
        .context("invalid page layout")?;

        let mut options = SheetOptions::new(layout);
        options.recovery_level = RecoveryLevel::try_from(self.recovery_level)?;
        options.min_qr_size_percentage = self.min_qr_size;
        options.border = self.border;
        if self.strict {
            options.on_encode_error = EncodeFailurePolicy::Abort;
        }
        options.title = self.title.clone().or_else(|| {
            output
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        });
        options.validate()?;
        Ok(options)
    }

    pub fn caption_font(&self) -> anyhow::Result<Font> {
        match &self.font {
            Some(path) => Font::load_from_disk(path)
                .with_context(|| format!("failed to load font {}", path.display())),
            None if self.bold => Ok(Font::standard(StandardFont::HelveticaBold)),
            None => Ok(Font::default()),
        }
    }
}

pub fn print_completion(cmd: CompletionCommand) {
    let mut app = Cli::command();
    let name = "qrlabel";
    generate(cmd.shell, &mut app, name, &mut std::io::stdout());
}

/// Reads the labels, renders the sheet and writes it, returning the path written
pub fn run(cli: &Cli, output: &Path) -> anyhow::Result<PathBuf> {
    let options = cli.sheet_options(output)?;
    let font = cli.caption_font()?;

    let labels = match &cli.input_file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open input file {}", path.display()))?;
            read_labels(BufReader::new(file), &cli.separator)?
        }
        None => read_labels(std::io::stdin().lock(), &cli.separator)
            .context("failed to read labels from standard input")?,
    };

    let (document, report) = render_sheet(&options, font, &labels)?;
    if report.shrunk > 0 {
        tracing::debug!(count = report.shrunk, "captions set in a smaller font to fit");
    }

    let path = write_sheet(document, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrlabel::Pt;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("qrlabel").chain(args.iter().copied()))
    }

    #[test]
    fn the_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_describe_an_a4_sheet_of_fifty_labels() {
        let cli = parse(&["out"]).unwrap();
        let options = cli.sheet_options(Path::new("out")).unwrap();

        assert_eq!(options.layout.labels_per_page(), 50);
        assert_eq!(options.layout.page, pagesize::A4);
        assert_eq!(options.layout.placement, Placement::Right);
        assert_eq!(options.layout.font_size, Pt(10.0));
        assert_eq!(options.recovery_level, RecoveryLevel::Medium);
        assert_eq!(options.on_encode_error, EncodeFailurePolicy::Skip);
        assert_eq!(options.title.as_deref(), Some("out"));
        assert_eq!(cli.separator, ";");
        assert_eq!(cli.default_log_level(), "info");
    }

    #[test]
    fn accepts_the_camel_case_spellings() {
        let cli = parse(&[
            "--pageSize",
            "letter",
            "--inputFile",
            "labels.txt",
            "--recoveryLevel",
            "3",
            "out.pdf",
        ])
        .unwrap();
        let options = cli.sheet_options(Path::new("out.pdf")).unwrap();

        assert_eq!(options.layout.page, pagesize::LETTER);
        assert_eq!(options.recovery_level, RecoveryLevel::Highest);
        assert_eq!(cli.input_file, Some(PathBuf::from("labels.txt")));
    }

    #[test]
    fn explicit_page_dimensions_go_together() {
        assert!(parse(&["--page-width", "100", "out"]).is_err());
        assert!(parse(&["--page-size", "A5", "--page-width", "100", "--page-height", "50", "out"])
            .is_err());

        let cli = parse(&["-u", "cm", "--page-width", "10", "--page-height", "20", "out"]).unwrap();
        let options = cli.sheet_options(Path::new("out")).unwrap();
        assert!((options.layout.page.0 .0 - 283.4646).abs() < 1e-2);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(parse(&["-R", "4", "out"]).is_err());
        assert!(parse(&["-p", "X", "out"]).is_err());
        assert!(parse(&["-u", "furlong", "out"]).is_err());

        let cli = parse(&["--rows", "0", "out"]).unwrap();
        assert!(cli.sheet_options(Path::new("out")).is_err());
        let cli = parse(&["--min-qr-size", "150", "out"]).unwrap();
        assert!(cli.sheet_options(Path::new("out")).is_err());
    }

    #[test]
    fn output_is_required_unless_generating_completions() {
        assert!(parse(&[]).is_err());
        let cli = parse(&["completion", "zsh"]).unwrap();
        assert!(matches!(
            cli.subcommand,
            Some(Subcommand::Completion(CompletionCommand { shell: Shell::Zsh }))
        ));
    }

    /// Collects everything a subscriber writes so a test can look at the logs
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn skipped_labels_are_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("labels.txt");
        std::fs::write(&input, "a;first\n\n;no content\nb;third\n").unwrap();
        let output = dir.path().join("sheet");
        let input_arg = input.to_string_lossy().into_owned();
        let output_arg = output.to_string_lossy().into_owned();
        let cli = parse(&["-i", &input_arg, &output_arg]).unwrap();

        let logs = Captured::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let written = tracing::subscriber::with_default(subscriber, || run(&cli, &output)).unwrap();
        assert_eq!(written, dir.path().join("sheet.pdf"));

        let logs = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let warnings: Vec<&str> = logs.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 1, "{logs}");
        // the second label, even though it is the third input line
        assert!(warnings[0].contains("label=2"), "{logs}");
    }

    #[test]
    fn picks_the_caption_font() {
        let bold = parse(&["--bold", "out"]).unwrap();
        assert_eq!(bold.caption_font().unwrap().name(), "Helvetica-Bold");
        assert!(parse(&["--bold", "--font", "x.ttf", "out"]).is_err());
        let missing = parse(&["--font", "/definitely/not/here.ttf", "out"]).unwrap();
        assert!(missing.caption_font().is_err());
    }
}
