use crate::error::IngestError;
use std::path::Path;

/// Suggested file name for the downloadable template.
pub const TEMPLATE_FILE_NAME: &str = "portfolio_data_template.csv";

pub const TEMPLATE_HEADER: &str =
    "Company Name,Quarter,ARR,Gross Margin,Monthly Cash Burn,Cash Runway,Headcount,Sector,Stage,Partner";

const TEMPLATE_ROWS: [&str; 2] = [
    "AlphaTech,Q2 2024,33136312,80.4,3253882,11,85,Healthcare,Series B,John Smith",
    "BrightLogix,Q2 2024,9606675,45.4,3095505,9,42,FinTech,Series A,Jane Doe",
];

/// The template text: the header line followed by two example rows, newline separated.
pub fn render_template() -> String {
    let mut lines = Vec::with_capacity(TEMPLATE_ROWS.len() + 1);
    lines.push(TEMPLATE_HEADER);
    lines.extend(TEMPLATE_ROWS);
    lines.join("\n")
}

/// Writes the template to `path`, creating or truncating the file.
pub async fn write_template(path: &Path) -> Result<(), IngestError> {
    tokio::fs::write(path, render_template())
        .await
        .map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path.display(), "Template written.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse_str;
    use rust_decimal_macros::dec;

    #[test]
    fn template_is_header_plus_two_rows() {
        let text = render_template();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], TEMPLATE_HEADER);
        assert!(lines[1].starts_with("AlphaTech,Q2 2024,33136312,80.4"));
        assert!(lines[2].starts_with("BrightLogix,Q2 2024,9606675,45.4"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn template_parses_back_into_records() {
        let records = parse_str(&render_template()).unwrap();
        assert_eq!(records.len(), 2);

        let alpha = &records[0];
        assert_eq!(alpha.id, "1");
        assert_eq!(alpha.name, "AlphaTech");
        assert_eq!(alpha.arr, dec!(33136312));
        assert_eq!(alpha.monthly_burn, Some(dec!(3253882)));
        assert_eq!(alpha.cash_runway, dec!(11));
        assert_eq!(alpha.partner, "John Smith");
        assert_eq!(records[1].headcount, 42);
    }

    #[tokio::test]
    async fn template_is_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TEMPLATE_FILE_NAME);

        write_template(&path).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, render_template());
    }
}
