use crate::errors::DataError;
use crate::models::{
    check_hour, DailyRecord, DayKind, HourlyRecord, Season, SeasonDailySummary,
    SeasonHourlySummary, WorkdayDailySummary, WorkdayHourlySummary,
};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    rows: u64,
    casual: u64,
    registered: u64,
    cnt: u64,
}

impl Totals {
    fn add(&mut self, casual: u64, registered: u64, cnt: u64) {
        self.rows += 1;
        self.casual = self.casual.saturating_add(casual);
        self.registered = self.registered.saturating_add(registered);
        self.cnt = self.cnt.saturating_add(cnt);
    }

    // Groups only exist once a row was added, so rows is never zero here.
    fn mean(&self, sum: u64) -> f64 {
        sum as f64 / self.rows as f64
    }
}

/// Sums casual, registered and total rentals per season, Winter first.
pub fn summarize_season_daily(days: &[DailyRecord]) -> Result<Vec<SeasonDailySummary>, DataError> {
    let mut groups: BTreeMap<Season, Totals> = BTreeMap::new();
    for day in days {
        let season = Season::from_code(day.season)?;
        groups
            .entry(season)
            .or_default()
            .add(day.casual, day.registered, day.cnt);
    }

    debug!("season daily summary: {} groups from {} rows", groups.len(), days.len());
    Ok(groups
        .into_iter()
        .rev()
        .map(|(season, totals)| SeasonDailySummary {
            season,
            casual: totals.casual,
            registered: totals.registered,
            cnt: totals.cnt,
        })
        .collect())
}

/// Mean casual and registered rentals per (season, hour).
pub fn summarize_season_hourly(hours: &[HourlyRecord]) -> Result<Vec<SeasonHourlySummary>, DataError> {
    let mut groups: BTreeMap<(Season, u8), Totals> = BTreeMap::new();
    for hour in hours {
        let key = (Season::from_code(hour.season)?, check_hour(hour.hr)?);
        groups
            .entry(key)
            .or_default()
            .add(hour.casual, hour.registered, hour.cnt);
    }

    debug!("season hourly summary: {} groups from {} rows", groups.len(), hours.len());
    Ok(groups
        .into_iter()
        .map(|((season, hr), totals)| SeasonHourlySummary {
            season,
            hr,
            casual: totals.mean(totals.casual),
            registered: totals.mean(totals.registered),
        })
        .collect())
}

/// Mean rentals per day for weekends and working days.
pub fn summarize_workday_daily(days: &[DailyRecord]) -> Result<Vec<WorkdayDailySummary>, DataError> {
    let mut groups: BTreeMap<DayKind, Totals> = BTreeMap::new();
    for day in days {
        let kind = DayKind::from_code(day.workingday)?;
        groups
            .entry(kind)
            .or_default()
            .add(day.casual, day.registered, day.cnt);
    }

    debug!("workday daily summary: {} groups from {} rows", groups.len(), days.len());
    Ok(groups
        .into_iter()
        .map(|(workingday, totals)| WorkdayDailySummary {
            workingday,
            casual: totals.mean(totals.casual),
            registered: totals.mean(totals.registered),
            cnt: totals.mean(totals.cnt),
        })
        .collect())
}

/// Mean rentals per (day kind, hour).
pub fn summarize_workday_hourly(hours: &[HourlyRecord]) -> Result<Vec<WorkdayHourlySummary>, DataError> {
    let mut groups: BTreeMap<(DayKind, u8), Totals> = BTreeMap::new();
    for hour in hours {
        let key = (DayKind::from_code(hour.workingday)?, check_hour(hour.hr)?);
        groups
            .entry(key)
            .or_default()
            .add(hour.casual, hour.registered, hour.cnt);
    }

    debug!("workday hourly summary: {} groups from {} rows", groups.len(), hours.len());
    Ok(groups
        .into_iter()
        .map(|((workingday, hr), totals)| WorkdayHourlySummary {
            workingday,
            hr,
            casual: totals.mean(totals.casual),
            registered: totals.mean(totals.registered),
            cnt: totals.mean(totals.cnt),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(season: i64, workingday: i64, casual: u64, registered: u64) -> DailyRecord {
        DailyRecord {
            dteday: None,
            season,
            workingday,
            casual,
            registered,
            cnt: casual + registered,
        }
    }

    fn hour(season: i64, workingday: i64, hr: i64, casual: u64, registered: u64) -> HourlyRecord {
        HourlyRecord {
            dteday: None,
            season,
            workingday,
            hr,
            casual,
            registered,
            cnt: casual + registered,
        }
    }

    #[test]
    fn season_daily_sums_one_season() {
        let days = vec![day(1, 1, 100, 400), day(1, 0, 50, 450)];
        let summary = summarize_season_daily(&days).unwrap();
        assert_eq!(
            summary,
            vec![SeasonDailySummary {
                season: Season::Spring,
                casual: 150,
                registered: 850,
                cnt: 1000,
            }]
        );
    }

    #[test]
    fn season_daily_sorts_winter_first_and_keeps_sum_relation() {
        let days = vec![
            day(2, 1, 10, 20),
            day(4, 1, 1, 2),
            day(1, 0, 5, 5),
            day(3, 0, 7, 8),
            day(4, 0, 3, 4),
        ];
        let summary = summarize_season_daily(&days).unwrap();
        let labels: Vec<_> = summary.iter().map(|row| row.season.label()).collect();
        assert_eq!(labels, ["Winter", "Autumn", "Summer", "Spring"]);
        for row in &summary {
            assert_eq!(row.cnt, row.casual + row.registered);
        }
        assert_eq!(summary[0].cnt, 10);
    }

    #[test]
    fn season_daily_only_lists_present_seasons() {
        let days = vec![day(3, 1, 1, 1), day(1, 1, 1, 1), day(3, 0, 2, 2)];
        let summary = summarize_season_daily(&days).unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].season, Season::Autumn);
        assert_eq!(summary[1].season, Season::Spring);
    }

    #[test]
    fn season_daily_rejects_unknown_code() {
        let days = vec![day(1, 1, 1, 1), day(5, 1, 1, 1)];
        let err = summarize_season_daily(&days).unwrap_err();
        assert!(matches!(
            err,
            DataError::UnknownCategoryCode { field: "season", code: 5, .. }
        ));
    }

    #[test]
    fn season_hourly_means_sorted_by_season_then_hour() {
        let hours = vec![
            hour(2, 1, 8, 10, 100),
            hour(1, 1, 17, 4, 40),
            hour(1, 0, 17, 6, 60),
            hour(1, 1, 3, 1, 2),
        ];
        let summary = summarize_season_hourly(&hours).unwrap();
        let keys: Vec<_> = summary.iter().map(|row| (row.season, row.hr)).collect();
        assert_eq!(
            keys,
            [(Season::Spring, 3), (Season::Spring, 17), (Season::Summer, 8)]
        );
        assert_eq!(summary[1].casual, 5.0);
        assert_eq!(summary[1].registered, 50.0);
    }

    #[test]
    fn season_hourly_rejects_bad_hour() {
        let hours = vec![hour(1, 1, 30, 1, 1)];
        assert!(matches!(
            summarize_season_hourly(&hours),
            Err(DataError::HourOutOfRange { hour: 30, .. })
        ));
    }

    #[test]
    fn workday_daily_means_weekend_first() {
        let days = vec![
            day(1, 1, 100, 300),
            day(2, 1, 200, 500),
            day(3, 0, 900, 100),
        ];
        let summary = summarize_workday_daily(&days).unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].workingday, DayKind::Weekend);
        assert_eq!(summary[0].cnt, 1000.0);
        assert_eq!(summary[1].workingday, DayKind::Weekday);
        assert_eq!(summary[1].casual, 150.0);
        assert_eq!(summary[1].registered, 400.0);
        assert_eq!(summary[1].cnt, 550.0);
    }

    #[test]
    fn workday_daily_rejects_unknown_code() {
        let days = vec![day(1, 2, 1, 1)];
        assert!(matches!(
            summarize_workday_daily(&days),
            Err(DataError::UnknownCategoryCode { field: "workingday", code: 2, .. })
        ));
    }

    #[test]
    fn workday_hourly_means_all_counts() {
        let hours = vec![
            hour(1, 1, 8, 10, 90),
            hour(2, 1, 8, 20, 180),
            hour(1, 0, 13, 50, 50),
            hour(1, 1, 7, 1, 1),
        ];
        let summary = summarize_workday_hourly(&hours).unwrap();
        let keys: Vec<_> = summary.iter().map(|row| (row.workingday, row.hr)).collect();
        assert_eq!(
            keys,
            [(DayKind::Weekend, 13), (DayKind::Weekday, 7), (DayKind::Weekday, 8)]
        );
        let eight = &summary[2];
        assert_eq!(eight.casual, 15.0);
        assert_eq!(eight.registered, 135.0);
        assert_eq!(eight.cnt, 150.0);
    }

    #[test]
    fn empty_input_gives_empty_summaries() {
        assert!(summarize_season_daily(&[]).unwrap().is_empty());
        assert!(summarize_season_hourly(&[]).unwrap().is_empty());
        assert!(summarize_workday_daily(&[]).unwrap().is_empty());
        assert!(summarize_workday_hourly(&[]).unwrap().is_empty());
    }
}
