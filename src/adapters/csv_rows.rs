use crate::domain::model::{JoinRow, AS_NEEDED_DAY};
use crate::domain::ports::RowSource;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Join rows exported as CSV, one row per agency × hours × service × culture.
///
/// Header: `agency_id,name,type,address,phone,latitude,longitude,day_of_week,
/// start_time,end_time,frequency,distribution_model,food_format,
/// appointment_only,pantry_requirements,service,culture`.
#[derive(Debug, Clone)]
pub struct CsvRowSource {
    path: PathBuf,
}

impl CsvRowSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn parse(data: &[u8]) -> Result<Vec<JoinRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(data);

        let mut rows = Vec::new();
        for record in reader.deserialize() {
            let row: JoinRow = record?;
            rows.push(row);
        }
        Ok(rows)
    }
}

/// Day pre-filter: keeps rows for `day` and "As Needed" rows, which match any day.
pub fn matches_day(row: &JoinRow, day: &str) -> bool {
    row.day_of_week
        .as_deref()
        .is_some_and(|d| d.eq_ignore_ascii_case(day) || d.eq_ignore_ascii_case(AS_NEEDED_DAY))
}

impl RowSource for CsvRowSource {
    async fn load_rows(&self, day: Option<&str>) -> Result<Vec<JoinRow>> {
        tracing::debug!("Reading agency rows from {}", self.path.display());
        let data = tokio::fs::read(&self.path).await?;
        let mut rows = Self::parse(&data)?;

        if let Some(day) = day {
            rows.retain(|row| matches_day(row, day));
        }

        tracing::debug!("Loaded {} agency rows", rows.len());
        Ok(rows)
    }
}
