use crate::error::IngestError;
use core_types::{CompanyRecord, RiskLevel};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::io;
use std::path::Path;
use std::str::FromStr;

/// A spreadsheet column: its display header plus accepted aliases.
///
/// Headers are matched after lowercasing and dropping spaces, underscores and
/// dashes, so `Cash Runway`, `cash_runway` and `cashRunway` are the same column.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    aliases: &'static [&'static str],
}

impl Column {
    const fn new(header: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { header, aliases }
    }

    fn matches(&self, raw_header: &str) -> bool {
        let key = normalize_header(raw_header);
        normalize_header(self.header) == key || self.aliases.iter().any(|a| normalize_header(a) == key)
    }
}

pub const NAME: Column = Column::new("Company Name", &["name", "company"]);
pub const QUARTER: Column = Column::new("Quarter", &[]);
pub const ARR: Column = Column::new("ARR", &[]);
pub const GROSS_MARGIN: Column = Column::new("Gross Margin", &[]);
pub const MONTHLY_BURN: Column = Column::new("Monthly Cash Burn", &["monthly burn"]);
pub const CASH_RUNWAY: Column = Column::new("Cash Runway", &["runway"]);
pub const HEADCOUNT: Column = Column::new("Headcount", &[]);
pub const SECTOR: Column = Column::new("Sector", &[]);
pub const STAGE: Column = Column::new("Stage", &[]);
pub const PARTNER: Column = Column::new("Partner", &[]);
pub const ID: Column = Column::new("ID", &[]);
pub const ARR_GROWTH: Column = Column::new("ARR Growth", &["growth"]);
pub const HEADCOUNT_CHANGE: Column = Column::new("Headcount Change", &[]);
pub const RISK_LEVEL: Column = Column::new("Risk Level", &["risk"]);
pub const AI_ALERT: Column = Column::new("AI Alert", &["alert"]);

/// Stored for a missing or blank sector, stage or partner.
pub const UNKNOWN: &str = "Unknown";

fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Risk level assigned to rows that do not carry one: three months of runway
/// or less is high, six months or less (or shrinking ARR) is medium.
pub fn derive_risk(cash_runway: Decimal, arr_growth: Decimal) -> RiskLevel {
    if cash_runway <= Decimal::from(3) {
        RiskLevel::High
    } else if cash_runway <= Decimal::from(6) || arr_growth < Decimal::ZERO {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Column positions resolved from the header row.
#[derive(Debug)]
struct ColumnMap {
    name: usize,
    quarter: usize,
    arr: usize,
    gross_margin: usize,
    cash_runway: usize,
    headcount: usize,
    monthly_burn: usize,
    sector: Option<usize>,
    stage: Option<usize>,
    partner: Option<usize>,
    id: Option<usize>,
    arr_growth: Option<usize>,
    headcount_change: Option<usize>,
    risk_level: Option<usize>,
    ai_alert: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, IngestError> {
        let find = |column: Column| headers.iter().position(|h| column.matches(h));
        let require = |column: Column| find(column).ok_or(IngestError::MissingColumn(column.header));

        Ok(Self {
            name: require(NAME)?,
            quarter: require(QUARTER)?,
            arr: require(ARR)?,
            gross_margin: require(GROSS_MARGIN)?,
            cash_runway: require(CASH_RUNWAY)?,
            headcount: require(HEADCOUNT)?,
            monthly_burn: require(MONTHLY_BURN)?,
            sector: find(SECTOR),
            stage: find(STAGE),
            partner: find(PARTNER),
            id: find(ID),
            arr_growth: find(ARR_GROWTH),
            headcount_change: find(HEADCOUNT_CHANGE),
            risk_level: find(RISK_LEVEL),
            ai_alert: find(AI_ALERT),
        })
    }

    /// Builds one record. `row_number` is the 1-based data row, used as the
    /// default id; `line` is the physical line for error messages.
    fn parse_row(&self, row: &StringRecord, row_number: usize, line: u64) -> Result<CompanyRecord, IngestError> {
        let field = Field { row, line };

        let name = field.text(self.name);
        if name.is_empty() {
            return Err(field.invalid(NAME, "company name cannot be empty".to_string()));
        }

        let arr = field.non_negative(self.arr, ARR)?;
        let cash_runway = field.non_negative(self.cash_runway, CASH_RUNWAY)?;
        let gross_margin = field.decimal(self.gross_margin, GROSS_MARGIN)?;
        if gross_margin < Decimal::ZERO || gross_margin > Decimal::ONE_HUNDRED {
            tracing::warn!(line, company = name, %gross_margin, "Gross margin outside 0-100%.");
        }

        // The burn column is required, but a blank cell means "not reported".
        let monthly_burn = match field.text(self.monthly_burn) {
            "" => None,
            _ => Some(field.non_negative(self.monthly_burn, MONTHLY_BURN)?),
        };
        let label = |column: Option<usize>| match column.map(|index| field.text(index)) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => UNKNOWN.to_string(),
        };
        let arr_growth = match self.arr_growth {
            Some(index) if !field.text(index).is_empty() => field.decimal(index, ARR_GROWTH)?,
            _ => Decimal::ZERO,
        };
        let headcount_change = match self.headcount_change {
            Some(index) if !field.text(index).is_empty() => field.integer::<i32>(index, HEADCOUNT_CHANGE)?,
            _ => 0,
        };
        let risk_level = match self.risk_level {
            Some(index) if !field.text(index).is_empty() => RiskLevel::from_str(field.text(index))
                .map_err(|e| field.invalid(RISK_LEVEL, e.to_string()))?,
            _ => derive_risk(cash_runway, arr_growth),
        };
        let id = match self.id {
            Some(index) if !field.text(index).is_empty() => field.text(index).to_string(),
            _ => row_number.to_string(),
        };
        let ai_alert = self
            .ai_alert
            .map(|index| field.text(index))
            .filter(|alert| !alert.is_empty())
            .map(str::to_string);

        Ok(CompanyRecord {
            id,
            name: name.to_string(),
            sector: label(self.sector),
            stage: label(self.stage),
            partner: label(self.partner),
            arr,
            arr_growth,
            gross_margin,
            headcount: field.integer::<u32>(self.headcount, HEADCOUNT)?,
            headcount_change,
            cash_runway,
            monthly_burn,
            risk_level,
            ai_alert,
            quarter: field.text(self.quarter).to_string(),
        })
    }
}

/// Typed access to the cells of one row.
struct Field<'a> {
    row: &'a StringRecord,
    line: u64,
}

impl Field<'_> {
    fn text(&self, index: usize) -> &str {
        self.row.get(index).unwrap_or_default().trim()
    }

    fn invalid(&self, column: Column, message: String) -> IngestError {
        IngestError::InvalidField {
            line: self.line,
            column: column.header,
            message,
        }
    }

    /// Parses a number, tolerating currency signs, thousands separators and a trailing `%`.
    fn decimal(&self, index: usize, column: Column) -> Result<Decimal, IngestError> {
        let raw = self.text(index);
        let cleaned: String = raw.chars().filter(|c| !matches!(c, '$' | ',' | '%')).collect();
        Decimal::from_str(cleaned.trim())
            .map_err(|_| self.invalid(column, format!("expected a number, found '{raw}'")))
    }

    fn non_negative(&self, index: usize, column: Column) -> Result<Decimal, IngestError> {
        let value = self.decimal(index, column)?;
        if value < Decimal::ZERO {
            return Err(self.invalid(column, format!("cannot be negative, found {value}")));
        }
        Ok(value)
    }

    fn integer<T: FromStr>(&self, index: usize, column: Column) -> Result<T, IngestError> {
        let raw = self.text(index);
        raw.replace(',', "")
            .parse::<T>()
            .map_err(|_| self.invalid(column, format!("expected a whole number, found '{raw}'")))
    }
}

/// Parses a portfolio spreadsheet into records.
///
/// The header row is required. Company Name, Quarter, ARR, Gross Margin,
/// Monthly Cash Burn, Cash Runway and Headcount must be present; Sector, Stage,
/// Partner and the remaining columns are optional.
pub fn parse_records<R: io::Read>(reader: R) -> Result<Vec<CompanyRecord>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let line = row.position().map_or(index as u64 + 2, |p| p.line());
        records.push(columns.parse_row(&row, index + 1, line)?);
    }

    tracing::debug!(records = records.len(), "Parsed portfolio CSV.");
    Ok(records)
}

pub fn parse_str(text: &str) -> Result<Vec<CompanyRecord>, IngestError> {
    parse_records(text.as_bytes())
}

/// Fails unless the path looks like a CSV file (guessed MIME type `text/csv`).
pub fn check_file_type(path: &Path) -> Result<(), IngestError> {
    let is_csv = mime_guess::from_path(path)
        .iter()
        .any(|mime| mime == mime_guess::mime::TEXT_CSV);
    if is_csv {
        Ok(())
    } else {
        Err(IngestError::InvalidFileType(path.to_path_buf()))
    }
}

/// Synchronously loads a CSV file into records, without touching any store.
pub fn load_file(path: &Path) -> Result<Vec<CompanyRecord>, IngestError> {
    check_file_type(path)?;
    let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(file)
}
