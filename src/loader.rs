use crate::errors::DataError;
use crate::models::{DailyRecord, Dataset, HourlyRecord};
use serde::de::DeserializeOwned;
use std::{
    env,
    io::Read,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct DataPaths {
    pub day: PathBuf,
    pub hour: PathBuf,
}

pub fn resolve_data_paths() -> DataPaths {
    DataPaths {
        day: env_path("APP_DAY_CSV", "data/day.csv"),
        hour: env_path("APP_HOUR_CSV", "data/hour.csv"),
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

pub async fn load_dataset(paths: &DataPaths) -> Result<Dataset, DataError> {
    let days = read_daily(read_file(&paths.day).await?.as_slice())?;
    let hours = read_hourly(read_file(&paths.hour).await?.as_slice())?;

    info!(
        "loaded {} daily rows from {} and {} hourly rows from {}",
        days.len(),
        paths.day.display(),
        hours.len(),
        paths.hour.display()
    );
    Ok(Dataset { days, hours })
}

async fn read_file(path: &Path) -> Result<Vec<u8>, DataError> {
    fs::read(path).await.map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_daily<R: Read>(reader: R) -> Result<Vec<DailyRecord>, DataError> {
    read_table(reader, "daily", &DailyRecord::COLUMNS, DailyRecord::validate)
}

pub fn read_hourly<R: Read>(reader: R) -> Result<Vec<HourlyRecord>, DataError> {
    read_table(reader, "hourly", &HourlyRecord::COLUMNS, HourlyRecord::validate)
}

fn read_table<R, T, F>(
    reader: R,
    table: &'static str,
    columns: &[&'static str],
    validate: F,
) -> Result<Vec<T>, DataError>
where
    R: Read,
    T: DeserializeOwned,
    F: Fn(&T, u64) -> Result<(), DataError>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for &column in columns {
        if !headers.iter().any(|header| header == column) {
            return Err(DataError::MissingColumn { table, column });
        }
    }

    let mut rows = Vec::new();
    let mut raw = csv::StringRecord::new();
    while reader.read_record(&mut raw)? {
        // line where the record starts; quoted fields may span several
        let line = raw.position().map_or(0, |pos| pos.line());
        let record: T = raw.deserialize(Some(&headers))?;
        validate(&record, line)?;
        rows.push(record);
    }

    debug!("parsed {} rows for {table} table", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const DAY_CSV: &str = "\
instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,casual,registered,cnt
1,2011-01-01,1,0,1,0,6,0,2,0.344167,331,654,985
2,2011-01-02,1,0,1,0,0,0,2,0.363478,131,670,801
3,2011-01-03,1,0,1,0,1,1,1,0.196364,120,1229,1349
";

    const HOUR_CSV: &str = "\
instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,casual,registered,cnt
1,2011-01-01,1,0,1,0,0,6,0,3,13,16
2,2011-01-01,1,0,1,1,0,6,0,8,32,40
";

    #[test]
    fn reads_daily_rows_and_ignores_extra_columns() {
        let days = read_daily(DAY_CSV.as_bytes()).unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].dteday, NaiveDate::from_ymd_opt(2011, 1, 1));
        assert_eq!(days[2].workingday, 1);
        assert_eq!(days[2].cnt, 1349);
    }

    #[test]
    fn reads_hourly_rows() {
        let hours = read_hourly(HOUR_CSV.as_bytes()).unwrap();
        assert_eq!(hours.len(), 2);
        assert_eq!(hours[1].hr, 1);
        assert_eq!(hours[1].registered, 32);
    }

    #[test]
    fn date_column_is_optional() {
        let csv = "season,workingday,casual,registered,cnt\n2,1,5,5,10\n";
        let days = read_daily(csv.as_bytes()).unwrap();
        assert_eq!(days[0].dteday, None);
    }

    #[test]
    fn header_only_file_is_empty_not_an_error() {
        let csv = "season,workingday,hr,casual,registered,cnt\n";
        assert!(read_hourly(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "season,workingday,casual,cnt\n1,1,5,10\n";
        let err = read_daily(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataError::MissingColumn { table: "daily", column: "registered" }
        ));
    }

    #[test]
    fn hourly_requires_hour_column() {
        let err = read_hourly(DAY_CSV.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataError::MissingColumn { table: "hourly", column: "hr" }
        ));
    }

    #[test]
    fn unknown_season_code_fails_fast() {
        let csv = "season,workingday,casual,registered,cnt\n1,1,5,5,10\n7,1,5,5,10\n";
        let err = read_daily(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataError::UnknownCategoryCode { field: "season", code: 7, .. }
        ));
        assert!(err.to_string().ends_with("(daily table line 3)"));
    }

    #[test]
    fn codes_outside_u8_are_unknown_categories() {
        let csv = "season,workingday,casual,registered,cnt\n256,1,5,5,10\n";
        assert!(matches!(
            read_daily(csv.as_bytes()),
            Err(DataError::UnknownCategoryCode { field: "season", code: 256, .. })
        ));

        let csv = "season,workingday,casual,registered,cnt\n1,-1,5,5,10\n";
        assert!(matches!(
            read_daily(csv.as_bytes()),
            Err(DataError::UnknownCategoryCode { field: "workingday", code: -1, .. })
        ));
    }

    #[test]
    fn large_hour_is_out_of_range() {
        let csv = "season,workingday,hr,casual,registered,cnt\n1,1,300,1,1,2\n";
        let err = read_hourly(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::HourOutOfRange { hour: 300, .. }));
        assert_eq!(err.to_string(), "hour 300 is outside 0-23 (hourly table line 2)");
    }

    #[test]
    fn line_numbers_follow_multi_line_fields() {
        let csv = "note,season,workingday,casual,registered,cnt\n\"first\nsecond\",1,1,5,5,10\nok,1,1,5,5,11\n";
        let err = read_daily(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::CountMismatch { line: 4, .. }));
    }

    #[test]
    fn count_mismatch_reports_line() {
        let csv = "season,workingday,casual,registered,cnt\n1,1,5,5,10\n1,1,5,5,11\n";
        let err = read_daily(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::CountMismatch { line: 3, cnt: 11, .. }));
    }

    #[test]
    fn non_numeric_value_is_a_csv_error() {
        let csv = "season,workingday,casual,registered,cnt\nspring,1,5,5,10\n";
        assert!(matches!(read_daily(csv.as_bytes()), Err(DataError::Csv(_))));
    }

    #[tokio::test]
    async fn load_dataset_reports_missing_file() {
        let paths = DataPaths {
            day: PathBuf::from("/nonexistent/day.csv"),
            hour: PathBuf::from("/nonexistent/hour.csv"),
        };
        let err = load_dataset(&paths).await.unwrap_err();
        assert!(matches!(err, DataError::Read { .. }));
        assert!(err.to_string().contains("day.csv"));
    }
}
