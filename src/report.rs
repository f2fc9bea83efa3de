use crate::aggregate::{
    summarize_season_daily, summarize_season_hourly, summarize_workday_daily,
    summarize_workday_hourly,
};
use crate::errors::DataError;
use crate::models::{
    Coverage, DailyRecord, Dashboard, Dataset, DayKind, Highlights, SeasonDailySummary,
    WorkdayDailySummary, WorkdayHourlySummary,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Hours below this share of the busiest hour are never reported as peaks.
const PEAK_RATIO: f64 = 0.8;

pub fn build_dashboard(data: &Dataset) -> Result<Dashboard, DataError> {
    let season_daily = summarize_season_daily(&data.days)?;
    let season_hourly = summarize_season_hourly(&data.hours)?;
    let workday_daily = summarize_workday_daily(&data.days)?;
    let workday_hourly = summarize_workday_hourly(&data.hours)?;

    let highlights = Highlights {
        peak_season: peak_season(&season_daily).cloned().map_err(log_missing).ok(),
        weekday_peak_hours: peak_hours(&workday_hourly, DayKind::Weekday),
        weekend_peak_hours: peak_hours(&workday_hourly, DayKind::Weekend),
        weekday_average: average_total(&workday_daily, DayKind::Weekday).map_err(log_missing).ok(),
        weekend_average: average_total(&workday_daily, DayKind::Weekend).map_err(log_missing).ok(),
    };

    Ok(Dashboard {
        coverage: coverage(&data.days),
        highlights,
        season_daily,
        season_hourly,
        workday_daily,
        workday_hourly,
    })
}

fn log_missing(err: DataError) -> DataError {
    debug!("{err}");
    err
}

/// Season with the most rentals. Ties go to the first row in summary order.
pub fn peak_season(summary: &[SeasonDailySummary]) -> Result<&SeasonDailySummary, DataError> {
    let mut best: Option<&SeasonDailySummary> = None;
    for row in summary {
        if best.is_none_or(|current| row.cnt > current.cnt) {
            best = Some(row);
        }
    }
    best.ok_or(DataError::EmptyInput("peak season"))
}

pub fn average_total(summary: &[WorkdayDailySummary], kind: DayKind) -> Result<f64, DataError> {
    summary
        .iter()
        .find(|row| row.workingday == kind)
        .map(|row| row.cnt)
        .ok_or(match kind {
            DayKind::Weekday => DataError::EmptyInput("weekday average"),
            DayKind::Weekend => DataError::EmptyInput("weekend average"),
        })
}

/// Hours where the mean total is a local maximum close to the busiest hour for `kind`.
///
/// Neighbours are the adjacent clock hours; an hour missing from the summary
/// places no constraint on its neighbours.
pub fn peak_hours(summary: &[WorkdayHourlySummary], kind: DayKind) -> Vec<u8> {
    let mut totals: BTreeMap<u8, f64> = BTreeMap::new();
    for row in summary.iter().filter(|row| row.workingday == kind) {
        totals.insert(row.hr, row.cnt);
    }
    let Some(max) = totals.values().copied().reduce(f64::max) else {
        return Vec::new();
    };

    let threshold = max * PEAK_RATIO;
    totals
        .iter()
        .filter(|&(&hr, &cnt)| {
            let rises = hr
                .checked_sub(1)
                .and_then(|prev| totals.get(&prev))
                .is_none_or(|&prev| cnt > prev);
            let holds = hr
                .checked_add(1)
                .and_then(|next| totals.get(&next))
                .is_none_or(|&next| cnt >= next);
            rises && holds && cnt >= threshold
        })
        .map(|(&hr, _)| hr)
        .collect()
}

pub fn coverage(days: &[DailyRecord]) -> Option<Coverage> {
    let mut dates = days.iter().filter_map(|day| day.dteday);
    let first = dates.next()?;
    let (first_day, last_day) = dates.fold((first, first), |(lo, hi), date| {
        (lo.min(date), hi.max(date))
    });
    Some(Coverage { first_day, last_day })
}
