use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::error::ConvertError;
use super::model::{COLUMNS, FIELD_COUNT, BX, BY, MX, MY, RawRecord, RawTable};

/// Metadata lines at the top of every OOMMF table (`# ODT 1.0`, `# Table Start`,
/// `# Title:`, `# Columns:`, `# Units:`).
pub const HEADER_LINES: usize = 5;
/// `# Table End`.
pub const FOOTER_LINES: usize = 1;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read and parse an `.odt` file from disk.
pub fn load_file(path: &Path) -> Result<RawTable, ConvertError> {
    let file = File::open(path).map_err(|e| ConvertError::io(path, e))?;
    parse(BufReader::new(file)).map_err(|e| match e {
        // attach the file name to bare read errors
        ConvertError::Io { source, .. } => ConvertError::io(path, source),
        other => other,
    })
}

/// Parse an OOMMF data table.
///
/// The first [`HEADER_LINES`] lines and the last line are dropped without
/// looking at them. Each remaining line must split on whitespace into exactly
/// [`FIELD_COUNT`] tokens.
pub fn parse<R: BufRead>(source: R) -> Result<RawTable, ConvertError> {
    let lines = source
        .lines()
        .collect::<Result<Vec<String>, _>>()
        .map_err(|e| ConvertError::io("<source>", e))?;

    let required = HEADER_LINES + FOOTER_LINES;
    if lines.len() < required {
        return Err(ConvertError::Truncated {
            lines: lines.len(),
            required,
        });
    }

    let body = &lines[HEADER_LINES..lines.len() - FOOTER_LINES];
    let records = body
        .iter()
        .enumerate()
        .map(|(i, line)| parse_record(line, HEADER_LINES + i + 1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawTable { records })
}

/// Convenience wrapper for in-memory sources.
#[cfg(test)]
pub fn parse_str(text: &str) -> Result<RawTable, ConvertError> {
    parse(text.as_bytes())
}

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

/// `line_no` is 1-based and only used for error messages.
fn parse_record(line: &str, line_no: usize) -> Result<RawRecord, ConvertError> {
    let fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if fields.len() != FIELD_COUNT {
        return Err(ConvertError::FieldCount {
            line: line_no,
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let number = |idx: usize| -> Result<f64, ConvertError> {
        let tok = &fields[idx];
        tok.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ConvertError::InvalidNumber {
                line: line_no,
                column: COLUMNS[idx],
                value: tok.clone(),
            })
    };

    let bx = number(BX)?;
    let by = number(BY)?;
    let mx = number(MX)?;
    let my = number(MY)?;

    Ok(RawRecord {
        fields,
        bx,
        by,
        mx,
        my,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const HEADER: &str = "# ODT 1.0\n# Table Start\n# Title: test\n# Columns: ...\n# Units: ...\n";
    pub(crate) const FOOTER: &str = "# Table End\n";

    /// A data line with the given field and magnetization values.
    pub(crate) fn data_line(i: usize, bx: f64, by: f64, mx: f64, my: f64) -> String {
        format!(
            "{i} {i} 1e-12 1e-13 0.1 {bx} {by} 0 {b} 1e-5 {mx} {my} 0.0 -1.5e-18 2e-19 0 3e-19 -4e-19 1.2",
            b = (bx * bx + by * by).sqrt()
        )
    }

    /// Replace one token of a data line.
    pub(crate) fn with_field(line: &str, idx: usize, value: &str) -> String {
        line.split_whitespace()
            .enumerate()
            .map(|(i, t)| if i == idx { value } else { t })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn odt(lines: &[String]) -> String {
        let mut s = HEADER.to_string();
        for l in lines {
            s.push_str(l);
            s.push('\n');
        }
        s.push_str(FOOTER);
        s
    }

    #[test]
    fn test_skips_header_and_footer() {
        let text = odt(&[data_line(0, 100.0, 0.0, 1.0, 0.0), data_line(1, 50.0, 0.0, 0.9, 0.1)]);
        let table = parse_str(&text).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].fields[0], "0");
        assert_eq!(table.records[1].fields[0], "1");
    }

    #[test]
    fn test_preserves_tokens_and_order() {
        let lines: Vec<String> = (0..5)
            .map(|i| data_line(i, 100.0 - 10.0 * i as f64, 0.0, 0.5, -0.25))
            .collect();
        let table = parse_str(&odt(&lines)).unwrap();
        for (rec, line) in table.records.iter().zip(&lines) {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            assert_eq!(rec.fields, tokens);
        }
        assert_eq!(table.bx(), vec![100.0, 90.0, 80.0, 70.0, 60.0]);
        assert_eq!(table.records[3].mx, 0.5);
        assert_eq!(table.records[3].my, -0.25);
    }

    #[test]
    fn test_numeric_precision() {
        let line = data_line(0, 12.345678901234567, -0.000123, 0.9999999999, -0.3);
        let table = parse_str(&odt(&[line])).unwrap();
        let rec = &table.records[0];
        assert_eq!(rec.bx, 12.345678901234567);
        assert_eq!(rec.by, -0.000123);
        assert_eq!(rec.mx, 0.9999999999);
        assert_eq!(rec.my, -0.3);
    }

    #[test]
    fn test_wrong_field_count_reports_line() {
        let text = odt(&[data_line(0, 1.0, 0.0, 1.0, 0.0), "1 2 3".to_string()]);
        match parse_str(&text) {
            Err(ConvertError::FieldCount {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 7);
                assert_eq!(expected, 19);
                assert_eq!(found, 3);
            }
            other => panic!("expected FieldCount, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_body_line_is_format_error() {
        let text = odt(&[String::new()]);
        assert!(matches!(
            parse_str(&text),
            Err(ConvertError::FieldCount { found: 0, .. })
        ));
    }

    #[test]
    fn test_non_numeric_magnetization() {
        let line = with_field(&data_line(0, 1.0, 0.0, 1.0, 0.0), MX, "abc");
        let err = parse_str(&odt(&[line])).unwrap_err();
        match err {
            ConvertError::InvalidNumber { column, value, .. } => {
                assert_eq!(column, "Mx/Ms");
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let line = with_field(&data_line(0, 1.0, 0.0, 1.0, 0.0), BY, "inf");
        let err = parse_str(&odt(&[line])).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidNumber { column: "By", .. }));
    }

    #[test]
    fn test_unused_columns_not_validated() {
        let line = with_field(&data_line(0, 1.0, 0.0, 1.0, 0.0), 18, "n/a");
        let table = parse_str(&odt(&[line])).unwrap();
        assert_eq!(table.records[0].get("Max Angle"), Some("n/a"));
    }

    #[test]
    fn test_header_and_footer_only() {
        let table = parse_str(&odt(&[])).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_truncated_source() {
        let err = parse_str("# ODT 1.0\n# Table Start\n").unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Truncated {
                lines: 2,
                required: 6
            }
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_file(Path::new("/definitely/not/here_45_deg.odt")).unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
    }
}
