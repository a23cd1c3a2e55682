use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, Local, Offset, TimeZone, Timelike};
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// Metadata written into the info dictionary of a sheet
#[derive(Default, Debug, Clone)]
pub struct Info {
    /// The title of the document.
    pub title: Option<String>,
    /// The subject of the document, such as how many labels it holds
    pub subject: Option<String>,
}

impl Info {
    /// Create a new info block, with all metadata set to [None]
    pub fn new() -> Info {
        Info::default()
    }

    /// Set the title of the info block, modifying `self`
    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the subject of the info block, modifying `self`
    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title.as_str()));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject.as_str()));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));
        info.creation_date(pdf_date(&Local::now()));
    }
}

fn pdf_date<Tz: TimeZone>(now: &DateTime<Tz>) -> PDate {
    let offset = now.offset().fix().local_minus_utc();
    let offset_hours = offset / (60 * 60);
    let offset_minutes = ((offset - (offset_hours * (60 * 60))) / 60).abs();
    PDate::new(now.year() as u16)
        .month(now.month() as u8)
        .day(now.day() as u8)
        .hour(now.hour() as u8)
        .minute(now.minute() as u8)
        .second(now.second() as u8)
        .utc_offset_hour(offset_hours as i8)
        .utc_offset_minute(offset_minutes as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn writes_title_subject_and_creator() {
        let mut info = Info::new();
        info.title("Shelf labels").subject("3 QR code labels");

        let mut refs = ObjectReferences::new();
        let mut pdf = Pdf::new();
        info.write(&mut refs, &mut pdf);
        let bytes = pdf.finish();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/Title (Shelf labels)"));
        assert!(text.contains("/Subject (3 QR code labels)"));
        assert!(text.contains("/Creator (qrlabel v"));
        assert!(text.contains("/CreationDate (D:"));
    }

    #[test]
    fn keeps_the_utc_offset() {
        let tz = FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap();
        let when = tz.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();

        let mut pdf = Pdf::new();
        pdf.document_info(pdf_writer::Ref::new(1))
            .creation_date(pdf_date(&when));
        let bytes = pdf.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("D:20240309140500-05"), "{text}");
    }
}
