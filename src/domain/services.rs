//! Parsing and serialization for comma-delimited table text.
//!
//! The codec deliberately implements the naive dialect: fields are split
//! on the raw delimiter and joined back verbatim. Quoting is not
//! interpreted, so a comma or newline inside a field shifts column
//! alignment. That keeps parse and serialize exact inverses for any
//! table whose cells contain neither.

use super::models::Document;

/// Field delimiter, fixed for both parsing and serialization.
pub const DELIMITER: &str = ",";

/// Converts between raw delimited text and [`Document`] values.
///
/// # Examples
///
/// ```
/// use csvman::domain::TableCodec;
///
/// let doc = TableCodec::parse("a,b\n1,2\n3,4");
/// assert_eq!(doc.headers, vec!["a", "b"]);
/// assert_eq!(doc.rows, vec![vec!["1", "2"], vec!["3", "4"]]);
/// assert_eq!(TableCodec::serialize(&doc), "a,b\n1,2\n3,4");
/// ```
pub struct TableCodec;

impl TableCodec {
    /// Parses delimited text into a fresh document.
    ///
    /// The first line supplies the column headers and every following
    /// line one row. Empty input produces the empty document rather than
    /// a single empty header, and fully empty trailing lines (a final
    /// newline, blank padding lines) are dropped rather than kept as
    /// one-cell rows. Interior blank lines and ragged rows are kept
    /// as-is: malformed input is tolerated, not repaired.
    pub fn parse(text: &str) -> Document {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        let mut lines = lines.into_iter();
        let headers = match lines.next() {
            Some(header_line) => Self::split_line(header_line),
            None => return Document::default(),
        };
        let rows = lines.map(Self::split_line).collect();

        Document::new(headers, rows)
    }

    /// Serializes a document back to delimited text.
    ///
    /// Headers first, then each row in order, lines joined by `\n` with
    /// no trailing newline. Cells are written verbatim, so for content
    /// without embedded delimiters this is the left inverse of
    /// [`TableCodec::parse`].
    pub fn serialize(document: &Document) -> String {
        let mut lines = Vec::with_capacity(document.rows.len() + 1);
        lines.push(document.headers.join(DELIMITER));
        for row in &document.rows {
            lines.push(row.join(DELIMITER));
        }
        lines.join("\n")
    }

    fn split_line(line: &str) -> Vec<String> {
        line.split(DELIMITER).map(str::to_string).collect()
    }
}
