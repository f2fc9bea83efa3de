use crate::errors::{DataError, RowRef};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Season as encoded in the `season` column (1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    pub fn from_code(code: i64) -> Result<Self, DataError> {
        match code {
            1 => Ok(Season::Spring),
            2 => Ok(Season::Summer),
            3 => Ok(Season::Autumn),
            4 => Ok(Season::Winter),
            _ => Err(DataError::UnknownCategoryCode {
                field: "season",
                code,
                row: RowRef::default(),
            }),
        }
    }

    pub fn code(self) -> u8 {
        self as u8 + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }
}

/// Day category as encoded in the `workingday` column (0 = weekend or holiday, 1 = working day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DayKind {
    Weekend,
    Weekday,
}

impl DayKind {
    pub fn from_code(code: i64) -> Result<Self, DataError> {
        match code {
            0 => Ok(DayKind::Weekend),
            1 => Ok(DayKind::Weekday),
            _ => Err(DataError::UnknownCategoryCode {
                field: "workingday",
                code,
                row: RowRef::default(),
            }),
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            DayKind::Weekend => "Weekend",
            DayKind::Weekday => "Weekday",
        }
    }
}

pub fn check_hour(hour: i64) -> Result<u8, DataError> {
    match u8::try_from(hour) {
        Ok(hr) if hr < 24 => Ok(hr),
        _ => Err(DataError::HourOutOfRange {
            hour,
            row: RowRef::default(),
        }),
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DailyRecord {
    #[serde(default)]
    pub dteday: Option<NaiveDate>,
    pub season: i64,
    pub workingday: i64,
    pub casual: u64,
    pub registered: u64,
    pub cnt: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct HourlyRecord {
    #[serde(default)]
    pub dteday: Option<NaiveDate>,
    pub season: i64,
    pub workingday: i64,
    pub hr: i64,
    pub casual: u64,
    pub registered: u64,
    pub cnt: u64,
}

impl DailyRecord {
    pub const COLUMNS: [&'static str; 5] = ["season", "workingday", "casual", "registered", "cnt"];

    pub fn validate(&self, line: u64) -> Result<(), DataError> {
        Season::from_code(self.season).map_err(|err| err.at("daily", line))?;
        DayKind::from_code(self.workingday).map_err(|err| err.at("daily", line))?;
        check_counts("daily", line, self.casual, self.registered, self.cnt)
    }
}

impl HourlyRecord {
    pub const COLUMNS: [&'static str; 6] = ["season", "workingday", "hr", "casual", "registered", "cnt"];

    pub fn validate(&self, line: u64) -> Result<(), DataError> {
        Season::from_code(self.season).map_err(|err| err.at("hourly", line))?;
        DayKind::from_code(self.workingday).map_err(|err| err.at("hourly", line))?;
        check_hour(self.hr).map_err(|err| err.at("hourly", line))?;
        check_counts("hourly", line, self.casual, self.registered, self.cnt)
    }
}

fn check_counts(
    table: &'static str,
    line: u64,
    casual: u64,
    registered: u64,
    cnt: u64,
) -> Result<(), DataError> {
    if casual.checked_add(registered) == Some(cnt) {
        Ok(())
    } else {
        Err(DataError::CountMismatch {
            table,
            line,
            casual,
            registered,
            cnt,
        })
    }
}

/// Both input tables, loaded once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub days: Vec<DailyRecord>,
    pub hours: Vec<HourlyRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonDailySummary {
    pub season: Season,
    pub casual: u64,
    pub registered: u64,
    pub cnt: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonHourlySummary {
    pub season: Season,
    pub hr: u8,
    pub casual: f64,
    pub registered: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkdayDailySummary {
    pub workingday: DayKind,
    pub casual: f64,
    pub registered: f64,
    pub cnt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkdayHourlySummary {
    pub workingday: DayKind,
    pub hr: u8,
    pub casual: f64,
    pub registered: f64,
    pub cnt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coverage {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Highlights {
    pub peak_season: Option<SeasonDailySummary>,
    pub weekday_peak_hours: Vec<u8>,
    pub weekend_peak_hours: Vec<u8>,
    pub weekday_average: Option<f64>,
    pub weekend_average: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub coverage: Option<Coverage>,
    pub highlights: Highlights,
    pub season_daily: Vec<SeasonDailySummary>,
    pub season_hourly: Vec<SeasonHourlySummary>,
    pub workday_daily: Vec<WorkdayDailySummary>,
    pub workday_hourly: Vec<WorkdayHourlySummary>,
}
