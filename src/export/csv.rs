use std::io::Write;
use std::path::Path;

use crate::data::error::ConvertError;
use crate::data::model::{RawTable, COLUMNS};

use super::write_atomically;

/// Write the table as CSV: the 19 column names as header, then every row's
/// tokens exactly as they appeared in the `.odt` file.
pub fn write_csv<W: Write>(table: &RawTable, writer: W) -> Result<(), ConvertError> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for record in &table.records {
        wtr.write_record(&record.fields)?;
    }
    wtr.flush().map_err(|e| ConvertError::io("<csv>", e))?;
    Ok(())
}

/// Write `<dest>` atomically.
pub fn export_csv(table: &RawTable, dest: &Path) -> Result<(), ConvertError> {
    write_atomically(dest, |tmp| write_csv(table, tmp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_str;
    use crate::data::loader::tests::{data_line, odt};

    #[test]
    fn test_header_and_rows() {
        let table = parse_str(&odt(&[data_line(0, 100.0, 0.0, 1.0, 0.0)])).unwrap();
        let mut out = Vec::new();
        write_csv(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Iteration,Field Updates,Sim Time,Time Step,Step Size,Bx,By,Bz,B,|m x h|,\
             Mx/Ms,My/Ms,Mz/Ms,Total Energy,Exchange Energy,Anisotropy Energy,\
             Demag Energy,Zeeman Energy,Max Angle"
        );
        assert_eq!(
            lines.next().unwrap(),
            "0,0,1e-12,1e-13,0.1,100,0,0,100,1e-5,1,0,0.0,-1.5e-18,2e-19,0,3e-19,-4e-19,1.2"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_tokens_round_trip_byte_identical() {
        let lines: Vec<String> = (0..4)
            .map(|i| data_line(i, 12.5 - i as f64, -0.001, 0.7071067811865476, -0.25))
            .collect();
        let table = parse_str(&odt(&lines)).unwrap();

        let mut out = Vec::new();
        write_csv(&table, &mut out).unwrap();

        let mut reader = ::csv::Reader::from_reader(out.as_slice());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, COLUMNS);

        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        assert_eq!(rows.len(), table.len());
        for (row, rec) in rows.iter().zip(&table.records) {
            assert_eq!(row, &rec.fields);
        }
    }

    #[test]
    fn test_empty_table_writes_header_only() {
        let mut out = Vec::new();
        write_csv(&RawTable::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("run.odt.csv");
        let table = parse_str(&odt(&[data_line(0, 1.0, 2.0, 0.5, 0.5)])).unwrap();
        export_csv(&table, &dest).unwrap();
        let text = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
