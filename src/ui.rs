use crate::models::Dashboard;
use tracing::error;

const NO_DATA: &str = "No data";

pub fn render_index(dashboard: &Dashboard) -> String {
    let highlights = &dashboard.highlights;
    let peak = highlights.peak_season.as_ref();

    let caption = match &dashboard.coverage {
        Some(span) => format!("Data covers {} to {}.", span.first_day, span.last_day),
        None => "Data coverage unknown.".to_string(),
    };

    // `</` would close the script block early
    let payload = match serde_json::to_string(dashboard) {
        Ok(json) => json.replace("</", "<\\/"),
        Err(err) => {
            error!("failed to serialize dashboard for the page: {err}");
            "null".to_string()
        }
    };

    INDEX_HTML
        .replace("{{PEAK_SEASON}}", peak.map_or(NO_DATA, |row| row.season.label()))
        .replace("{{PEAK_TOTAL}}", &metric(peak.map(|row| format_count(row.cnt))))
        .replace("{{PEAK_CASUAL}}", &metric(peak.map(|row| format_count(row.casual))))
        .replace("{{PEAK_REGISTERED}}", &metric(peak.map(|row| format_count(row.registered))))
        .replace("{{WEEKDAY_PEAK}}", &format_hours(&highlights.weekday_peak_hours))
        .replace("{{WEEKEND_PEAK}}", &format_hours(&highlights.weekend_peak_hours))
        .replace("{{WEEKDAY_AVG}}", &metric(highlights.weekday_average.map(format_average)))
        .replace("{{WEEKEND_AVG}}", &metric(highlights.weekend_average.map(format_average)))
        .replace("{{CAPTION}}", &caption)
        .replace("{{DATA}}", &payload)
}

fn metric(value: Option<String>) -> String {
    value.unwrap_or_else(|| NO_DATA.to_string())
}

/// Formats a count with comma thousands separators.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rounds half to even, then formats like a count.
pub fn format_average(value: f64) -> String {
    format_count(value.round_ties_even().max(0.0) as u64)
}

pub fn format_hour(hour: u8) -> String {
    match hour {
        0 => "12AM".to_string(),
        1..=11 => format!("{hour}AM"),
        12 => "12PM".to_string(),
        _ => format!("{}PM", hour - 12),
    }
}

pub fn format_hours(hours: &[u8]) -> String {
    if hours.is_empty() {
        return NO_DATA.to_string();
    }
    hours
        .iter()
        .map(|hour| format_hour(*hour))
        .collect::<Vec<_>>()
        .join(", ")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Bike Sharing Report Analysis</title>
  <style>
    :root {
      --bg-1: #eef3f6;
      --bg-2: #cfe3ee;
      --ink: #1f2a30;
      --casual: #2f6fdb;
      --registered: #f08a24;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(31, 42, 48, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f7fafc 70%);
      color: var(--ink);
      font-family: "Trebuchet MS", "Helvetica Neue", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1100px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 36px;
    }

    h1 {
      font-family: "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 16px;
      font-size: 1.4rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(2, minmax(0, 1fr));
      gap: 16px;
      margin-bottom: 20px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(31, 42, 48, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #6f7c84;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
      gap: 16px;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(31, 42, 48, 0.08);
    }

    .chart-card h3 {
      margin: 0 0 8px;
      font-size: 1rem;
    }

    svg {
      width: 100%;
      height: 280px;
      display: block;
    }

    .chart-grid {
      stroke: rgba(31, 42, 48, 0.1);
    }

    .chart-label {
      fill: #6f7c84;
      font-size: 11px;
    }

    .chart-line {
      fill: none;
      stroke-width: 2.5;
    }

    .legend {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      font-size: 0.85rem;
      color: #4b5860;
    }

    .legend span::before {
      content: "";
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 3px;
      margin-right: 6px;
      background: var(--swatch);
    }

    .caption {
      margin: 0;
      color: #6f7c84;
      font-size: 0.9rem;
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 20px;
      }
      .panel {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Bike Sharing Report Analysis</h1>
    </header>

    <section>
      <h2>Seasonal Daily Bike Sharing Report</h2>
      <div class="panel">
        <div class="stat"><span class="label">Peak Season</span><span class="value">{{PEAK_SEASON}}</span></div>
        <div class="stat"><span class="label">Total</span><span class="value">{{PEAK_TOTAL}}</span></div>
        <div class="stat"><span class="label">Highest Casuals</span><span class="value">{{PEAK_CASUAL}}</span></div>
        <div class="stat"><span class="label">Highest Registered</span><span class="value">{{PEAK_REGISTERED}}</span></div>
      </div>
      <div class="chart-card">
        <svg id="season-daily" viewBox="0 0 900 280" role="img" aria-label="Rentals per season"></svg>
        <div class="legend" id="season-daily-legend"></div>
      </div>
    </section>

    <section>
      <h2>Seasonal Hourly Bike Sharing Report</h2>
      <div class="charts">
        <div class="chart-card">
          <h3>Average Casual Hourly Bike Rental Frequency</h3>
          <svg id="season-hourly-casual" viewBox="0 0 600 280" role="img"></svg>
          <div class="legend" id="season-hourly-legend"></div>
        </div>
        <div class="chart-card">
          <h3>Average Registered Hourly Bike Rental Frequency</h3>
          <svg id="season-hourly-registered" viewBox="0 0 600 280" role="img"></svg>
        </div>
      </div>
    </section>

    <section>
      <h2>Working Day Daily Bike Sharing Report</h2>
      <div class="panel">
        <div class="stat"><span class="label">Weekday Peak Time</span><span class="value">{{WEEKDAY_PEAK}}</span></div>
        <div class="stat"><span class="label">Weekend Peak Time</span><span class="value">{{WEEKEND_PEAK}}</span></div>
        <div class="stat"><span class="label">Highest Average Weekday</span><span class="value">{{WEEKDAY_AVG}}</span></div>
        <div class="stat"><span class="label">Highest Average Weekend</span><span class="value">{{WEEKEND_AVG}}</span></div>
      </div>
      <div class="chart-card">
        <svg id="workday-daily" viewBox="0 0 900 200" role="img" aria-label="Average rentals per day kind"></svg>
        <div class="legend" id="workday-daily-legend"></div>
      </div>
    </section>

    <section>
      <h2>Working Day Hourly Bike Sharing Report</h2>
      <div class="charts">
        <div class="chart-card">
          <h3>Average Casual Hourly Bike Rental Frequency</h3>
          <svg id="workday-hourly-casual" viewBox="0 0 600 280" role="img"></svg>
          <div class="legend" id="workday-hourly-legend"></div>
        </div>
        <div class="chart-card">
          <h3>Average Registered Hourly Bike Rental Frequency</h3>
          <svg id="workday-hourly-registered" viewBox="0 0 600 280" role="img"></svg>
        </div>
        <div class="chart-card">
          <h3>Average Total Hourly Bike Rental Frequency</h3>
          <svg id="workday-hourly-cnt" viewBox="0 0 600 280" role="img"></svg>
        </div>
      </div>
    </section>

    <p class="caption">{{CAPTION}}</p>
  </main>

  <script>
    const DASHBOARD = {{DATA}};
    const STACK_COLORS = { casual: 'var(--casual)', registered: 'var(--registered)' };
    const SERIES_COLORS = ['#2f6fdb', '#f08a24', '#2d9a5b', '#c63b6b'];

    const formatAxisValue = (value) => {
      if (value >= 1e6) {
        return `${(value / 1e6).toFixed(1)}M`;
      }
      if (value >= 1e3) {
        return `${(value / 1e3).toFixed(1)}k`;
      }
      return Math.round(value).toString();
    };

    const noData = (svg) => {
      svg.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data</text>';
    };

    const renderLegend = (el, entries) => {
      if (!el) {
        return;
      }
      el.innerHTML = entries
        .map(([label, color]) => `<span style="--swatch: ${color}">${label}</span>`)
        .join('');
    };

    const renderStackedBars = (svg, rows, labelKey) => {
      if (!rows.length) {
        noData(svg);
        return;
      }
      const [, , width, height] = svg.getAttribute('viewBox').split(' ').map(Number);
      const left = 90;
      const right = 30;
      const top = 10;
      const bottom = 28;
      const max = Math.max(...rows.map((row) => row.casual + row.registered)) * 1.1 || 1;
      const band = (height - top - bottom) / rows.length;
      const scale = (value) => (value / max) * (width - left - right);

      let out = '';
      const ticks = 5;
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        const x = left + scale(value);
        out += `<line class="chart-grid" x1="${x}" y1="${top}" x2="${x}" y2="${height - bottom}" />`;
        out += `<text class="chart-label" x="${x}" y="${height - 8}" text-anchor="middle">${formatAxisValue(value)}</text>`;
      }

      rows.forEach((row, index) => {
        const y = top + index * band + band * 0.15;
        const barHeight = band * 0.7;
        const casualWidth = scale(row.casual);
        out += `<rect x="${left}" y="${y}" width="${casualWidth}" height="${barHeight}" fill="${STACK_COLORS.casual}" />`;
        out += `<rect x="${left + casualWidth}" y="${y}" width="${scale(row.registered)}" height="${barHeight}" fill="${STACK_COLORS.registered}" />`;
        out += `<text class="chart-label" x="${left - 10}" y="${y + barHeight / 2 + 4}" text-anchor="end">${row[labelKey]}</text>`;
      });

      svg.innerHTML = out;
    };

    const renderHourlyLines = (svg, rows, groupKey, valueKey) => {
      if (!rows.length) {
        noData(svg);
        return [];
      }
      const [, , width, height] = svg.getAttribute('viewBox').split(' ').map(Number);
      const left = 48;
      const right = 16;
      const top = 12;
      const bottom = 30;
      const max = Math.max(...rows.map((row) => row[valueKey])) * 1.05 || 1;
      const x = (hour) => left + (hour / 23) * (width - left - right);
      const y = (value) => height - bottom - (value / max) * (height - top - bottom);

      let out = '';
      const ticks = 4;
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        out += `<line class="chart-grid" x1="${left}" y1="${y(value)}" x2="${width - right}" y2="${y(value)}" />`;
        out += `<text class="chart-label" x="${left - 8}" y="${y(value) + 4}" text-anchor="end">${formatAxisValue(value)}</text>`;
      }
      for (let hour = 0; hour < 24; hour += 2) {
        out += `<text class="chart-label" x="${x(hour)}" y="${height - 10}" text-anchor="middle">${hour}</text>`;
      }

      const groups = [];
      rows.forEach((row) => {
        let group = groups.find((entry) => entry.label === row[groupKey]);
        if (!group) {
          group = { label: row[groupKey], points: [] };
          groups.push(group);
        }
        group.points.push(row);
      });

      const legend = groups.map((group, index) => {
        const color = SERIES_COLORS[index % SERIES_COLORS.length];
        const path = group.points
          .map((row, i) => `${i === 0 ? 'M' : 'L'} ${x(row.hr).toFixed(2)} ${y(row[valueKey]).toFixed(2)}`)
          .join(' ');
        out += `<path class="chart-line" d="${path}" stroke="${color}" />`;
        return [group.label, color];
      });

      svg.innerHTML = out;
      return legend;
    };

    const byId = (id) => document.getElementById(id);
    const stackLegend = [['casual', STACK_COLORS.casual], ['registered', STACK_COLORS.registered]];

    if (DASHBOARD) {
      renderStackedBars(byId('season-daily'), DASHBOARD.season_daily, 'season');
      renderLegend(byId('season-daily-legend'), stackLegend);

      const seasonLegend = renderHourlyLines(byId('season-hourly-casual'), DASHBOARD.season_hourly, 'season', 'casual');
      renderHourlyLines(byId('season-hourly-registered'), DASHBOARD.season_hourly, 'season', 'registered');
      renderLegend(byId('season-hourly-legend'), seasonLegend);

      renderStackedBars(byId('workday-daily'), DASHBOARD.workday_daily, 'workingday');
      renderLegend(byId('workday-daily-legend'), stackLegend);

      const workLegend = renderHourlyLines(byId('workday-hourly-casual'), DASHBOARD.workday_hourly, 'workingday', 'casual');
      renderHourlyLines(byId('workday-hourly-registered'), DASHBOARD.workday_hourly, 'workingday', 'registered');
      renderHourlyLines(byId('workday-hourly-cnt'), DASHBOARD.workday_hourly, 'workingday', 'cnt');
      renderLegend(byId('workday-hourly-legend'), workLegend);
    }
  </script>
</body>
</html>
"#;
