//! CSV rendering of the visible catalog.

use crate::domain::MovieRecord;

/// Download name for exports.
pub const CSV_FILE_NAME: &str = "movies.csv";

/// MIME type for exports.
pub const CSV_MIME_TYPE: &str = "text/csv";

const HEADER: [&str; 10] = [
    "Title",
    "Year",
    "Genres",
    "Director",
    "Actors",
    "IMDB Rating",
    "Runtime",
    "Language",
    "Country",
    "Awards",
];

const LIST_SEPARATOR: &str = "; ";
const ROW_TERMINATOR: &str = "\r\n";

/// Renders records as CSV with a fixed header and CRLF row endings.
///
/// Returns `None` for an empty input: there is nothing to export, so no file
/// should be produced.
///
/// ```
/// use movieflix::export::to_csv;
/// use movieflix::MovieRecord;
///
/// let csv = to_csv(&[MovieRecord::new("1", "Hello, \"World\"")]).unwrap();
/// assert!(csv.contains("\"Hello, \"\"World\"\"\""));
/// assert!(to_csv(&[]).is_none());
/// ```
#[must_use]
pub fn to_csv(records: &[MovieRecord]) -> Option<String> {
    if records.is_empty() {
        return None;
    }

    let _span = tracing::debug_span!("to_csv", rows = records.len()).entered();

    let mut out = String::new();
    push_row(&mut out, HEADER.iter().map(|h| (*h).to_string()));
    for record in records {
        push_row(&mut out, fields(record).into_iter());
    }
    Some(out)
}

fn fields(record: &MovieRecord) -> [String; 10] {
    [
        record.title.clone(),
        record.year.map(|y| y.to_string()).unwrap_or_default(),
        record.genres.join(LIST_SEPARATOR),
        record.director.clone(),
        record.actors.join(LIST_SEPARATOR),
        record.imdb_rating.map(|r| r.to_string()).unwrap_or_default(),
        record.runtime.map(|r| r.to_string()).unwrap_or_default(),
        record.language.clone(),
        record.country.clone(),
        record.awards.clone(),
    ]
}

fn push_row(out: &mut String, values: impl Iterator<Item = String>) {
    for (i, value) in values.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape(&value));
    }
    out.push_str(ROW_TERMINATOR);
}

/// Quotes a field when it contains a comma, quote or line break.
fn escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
