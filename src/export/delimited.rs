use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};

use super::rows::Table;

/// Render a table as RFC 4180 CSV, header line first.
pub fn to_csv(table: &Table) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    write_table(&mut writer, table, |field| field.to_string())?;
    finish(writer)
}

/// Render a table as tab-separated values for scripting.
/// Tabs and line breaks inside fields become spaces, and nothing is quoted.
pub fn to_tsv(table: &Table) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());
    write_table(&mut writer, table, |field| {
        field.replace(['\t', '\r', '\n'], " ")
    })?;
    finish(writer)
}

fn write_table(
    writer: &mut csv::Writer<Vec<u8>>,
    table: &Table,
    clean: impl Fn(&str) -> String,
) -> Result<()> {
    for record in std::iter::once(&table.headers).chain(table.records.iter()) {
        writer
            .write_record(record.iter().map(|field| clean(field)))
            .context("Failed to write export record")?;
    }
    Ok(())
}

/// Flush the writer and drop the final record terminator; callers add their
/// own trailing newline.
fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush export: {}", e.error()))?;
    let text = String::from_utf8(bytes).context("Export is not valid UTF-8")?;
    Ok(text.strip_suffix('\n').unwrap_or(&text).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table {
            headers: vec!["Rank".to_string(), "Part Number".to_string(), "Rationale".to_string()],
            records: vec![
                vec!["1".to_string(), "A-100".to_string(), "22 dB, typical".to_string()],
                vec!["2".to_string(), "B-200".to_string(), "Says \"max\"\nsee p.4".to_string()],
            ],
        }
    }

    #[test]
    fn test_csv_header_first() {
        let csv = to_csv(&table()).unwrap();
        assert!(csv.starts_with("Rank,Part Number,Rationale\n"));
    }

    #[test]
    fn test_csv_quotes_special_fields() {
        let csv = to_csv(&table()).unwrap();
        assert!(csv.contains("1,A-100,\"22 dB, typical\""));
        assert!(csv.contains("2,B-200,\"Says \"\"max\"\"\nsee p.4\""));
    }

    #[test]
    fn test_csv_reads_back() {
        let csv = to_csv(&table()).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(1), Some("Part Number"));

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get(2), Some("22 dB, typical"));
        assert_eq!(records[1].get(2), Some("Says \"max\"\nsee p.4"));
    }

    #[test]
    fn test_tsv_flattens_fields() {
        let tsv = to_tsv(&table()).unwrap();
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "2\tB-200\tSays \"max\" see p.4");
        assert!(lines.iter().all(|l| l.split('\t').count() == 3));
    }

    #[test]
    fn test_no_trailing_newline() {
        assert!(!to_csv(&table()).unwrap().ends_with('\n'));
        assert!(!to_tsv(&table()).unwrap().ends_with('\n'));
    }

    #[test]
    fn test_empty_table() {
        let table = Table {
            headers: vec!["Criterion".to_string(), "Weight".to_string()],
            records: vec![],
        };
        assert_eq!(to_csv(&table).unwrap(), "Criterion,Weight");
    }
}
