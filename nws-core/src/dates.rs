//! Forecast period selection by calendar day.
//!
//! Accepted expressions (case-insensitive): `today`, `tomorrow`, a full
//! English weekday name, or an ISO `YYYY-MM-DD` date.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use crate::error::DateError;
use crate::model::ForecastPeriod;

/// Resolve a date expression to the calendar date it designates relative to `now`.
///
/// Returns `Ok(None)` when no expression (or an empty one) was supplied.
pub fn resolve_target(
    expr: Option<&str>,
    now: NaiveDateTime,
) -> Result<Option<NaiveDate>, DateError> {
    let Some(expr) = expr.map(str::trim).filter(|e| !e.is_empty()) else {
        return Ok(None);
    };

    let today = now.date();
    let lower = expr.to_lowercase();

    let target = match lower.as_str() {
        "today" => today,
        "tomorrow" => today + Duration::days(1),
        other => match parse_weekday(other) {
            Some(weekday) => today + Duration::days(days_until(today.weekday(), weekday)),
            None => parse_iso(expr)?,
        },
    };

    Ok(Some(target))
}

/// Keep the periods starting on the day designated by `expr`.
///
/// Without an expression the periods are returned unchanged. A valid
/// expression that matches nothing is an error, so "no data for that day"
/// is never mistaken for "no filter requested"; its message quotes the
/// expression exactly as the caller sent it.
pub fn select_periods(
    periods: Vec<ForecastPeriod>,
    expr: Option<&str>,
    now: NaiveDateTime,
) -> Result<Vec<ForecastPeriod>, DateError> {
    let Some(target) = resolve_target(expr, now)? else {
        return Ok(periods);
    };

    let selected: Vec<ForecastPeriod> = periods
        .into_iter()
        .filter(|p| period_date(p) == Some(target))
        .collect();

    if selected.is_empty() {
        let original = expr.unwrap_or_default().to_string();
        return Err(DateError::NoForecast(original));
    }

    Ok(selected)
}

/// Calendar date of a period's start, in the offset the timestamp carries.
pub fn period_date(period: &ForecastPeriod) -> Option<NaiveDate> {
    match DateTime::parse_from_rfc3339(&period.start_time) {
        Ok(ts) => Some(ts.date_naive()),
        Err(_) => {
            tracing::debug!(start_time = %period.start_time, "Unparseable forecast startTime");
            None
        }
    }
}

fn parse_iso(expr: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(expr, "%Y-%m-%d")
        .map_err(|_| DateError::Invalid)
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Days from `from` to the next `to`, counting `from` itself as 0.
fn days_until(from: Weekday, to: Weekday) -> i64 {
    let diff = to.num_days_from_monday() as i64 - from.num_days_from_monday() as i64;
    diff.rem_euclid(7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    // Monday 2026-10-19, mid-afternoon.
    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap()
    }

    // Friday 2026-10-23, evening.
    fn friday() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 23)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn target(expr: &str, now: NaiveDateTime) -> Option<NaiveDate> {
        resolve_target(Some(expr), now).unwrap()
    }

    fn period(start: &str, name: &str) -> ForecastPeriod {
        let mut fields = Map::new();
        fields.insert("name".into(), name.into());
        ForecastPeriod {
            start_time: start.to_string(),
            fields,
        }
    }

    fn week() -> Vec<ForecastPeriod> {
        vec![
            period("2026-10-19T14:00:00-04:00", "This Afternoon"),
            period("2026-10-19T18:00:00-04:00", "Tonight"),
            period("2026-10-20T06:00:00-04:00", "Tuesday"),
            period("2026-10-20T18:00:00-04:00", "Tuesday Night"),
            period("2026-10-23T06:00:00-04:00", "Friday"),
        ]
    }

    fn names(periods: &[ForecastPeriod]) -> Vec<&str> {
        periods
            .iter()
            .map(|p| p.fields["name"].as_str().unwrap())
            .collect()
    }

    fn picked(periods: &[ForecastPeriod], expr: &str, now: NaiveDateTime) -> Vec<String> {
        let selected = select_periods(periods.to_vec(), Some(expr), now).unwrap();
        names(&selected).into_iter().map(String::from).collect()
    }

    fn rejected(periods: Vec<ForecastPeriod>, expr: &str, now: NaiveDateTime) -> DateError {
        select_periods(periods, Some(expr), now).unwrap_err()
    }

    #[test]
    fn no_expression_means_no_target() {
        assert_eq!(resolve_target(None, now()), Ok(None));
        assert_eq!(resolve_target(Some(""), now()), Ok(None));
        assert_eq!(resolve_target(Some("   "), now()), Ok(None));
    }

    #[test]
    fn relative_days() {
        assert_eq!(target("today", now()), Some(date(2026, 10, 19)));
        assert_eq!(target("TOMORROW", now()), Some(date(2026, 10, 20)));
        assert_eq!(target(" today ", now()), Some(date(2026, 10, 19)));
    }

    #[test]
    fn weekday_counts_today_as_zero_days_ahead() {
        assert_eq!(target("Monday", now()), Some(date(2026, 10, 19)));
        assert_eq!(target("tuesday", now()), Some(date(2026, 10, 20)));
        assert_eq!(target("Sunday", now()), Some(date(2026, 10, 25)));
    }

    #[test]
    fn weekday_wraps_into_next_week() {
        assert_eq!(target("monday", friday()), Some(date(2026, 10, 26)));
        assert_eq!(target("thursday", friday()), Some(date(2026, 10, 29)));
        assert_eq!(target("friday", friday()), Some(date(2026, 10, 23)));
        assert_eq!(target("Saturday", friday()), Some(date(2026, 10, 24)));
    }

    #[test]
    fn weekday_always_lands_within_a_week() {
        let weekdays = [
            "monday",
            "tuesday",
            "wednesday",
            "thursday",
            "friday",
            "saturday",
            "sunday",
        ];
        for clock in [now(), friday()] {
            for name in weekdays {
                let day = target(name, clock).unwrap();
                let ahead = (day - clock.date()).num_days();
                assert!((0..7).contains(&ahead), "{name}: {ahead}");
                assert_eq!(day.weekday(), parse_weekday(name).unwrap());
            }
        }
    }

    #[test]
    fn invalid_expressions() {
        for expr in ["mon", "notaday", "2026-13-01", "10/23/2026"] {
            assert_eq!(resolve_target(Some(expr), now()), Err(DateError::Invalid));
        }
    }

    #[test]
    fn iso_date() {
        assert_eq!(target("2026-10-23", now()), Some(date(2026, 10, 23)));
        assert_eq!(target("2025-01-01", now()), Some(date(2025, 1, 1)));
    }

    #[test]
    fn select_without_expression_returns_everything() {
        let all = select_periods(week(), None, now()).unwrap();
        assert_eq!(all, week());
    }

    #[test]
    fn select_today_returns_only_today() {
        let today = select_periods(week(), Some("today"), now()).unwrap();
        assert_eq!(names(&today), vec!["This Afternoon", "Tonight"]);
        assert!(today.iter().all(|p| period_date(p) == Some(now().date())));
    }

    #[test]
    fn select_weekday_and_iso() {
        assert_eq!(picked(&week(), "Friday", now()), vec!["Friday"]);
        assert_eq!(
            picked(&week(), "2026-10-20", now()),
            vec!["Tuesday", "Tuesday Night"]
        );
    }

    #[test]
    fn select_weekday_across_week_boundary() {
        let periods = vec![
            period("2026-10-23T18:00:00-04:00", "Tonight"),
            period("2026-10-24T06:00:00-04:00", "Saturday"),
            period("2026-10-26T06:00:00-04:00", "Monday"),
            period("2026-10-26T18:00:00-04:00", "Monday Night"),
            period("2026-10-29T06:00:00-04:00", "Thursday"),
        ];

        let monday = picked(&periods, "Monday", friday());
        assert_eq!(monday, vec!["Monday", "Monday Night"]);
        assert_eq!(picked(&periods, "thursday", friday()), vec!["Thursday"]);
        assert_eq!(picked(&periods, "Friday", friday()), vec!["Tonight"]);

        let err = rejected(periods, "Wednesday", friday());
        assert_eq!(err, DateError::NoForecast("Wednesday".into()));
    }

    #[test]
    fn select_with_no_match_is_an_error() {
        let err = rejected(week(), "Wednesday", now());
        assert_eq!(err, DateError::NoForecast("Wednesday".into()));
        assert!(err.to_string().contains("No forecast available"));

        let err = rejected(Vec::new(), "today", now());
        assert_eq!(err.to_string(), "No forecast available for date: today");
    }

    #[test]
    fn no_match_message_quotes_expression_as_sent() {
        let err = rejected(week(), " Wednesday ", now());
        assert_eq!(err, DateError::NoForecast(" Wednesday ".into()));
        assert_eq!(
            err.to_string(),
            "No forecast available for date:  Wednesday "
        );
    }

    #[test]
    fn select_invalid_expression_ignores_periods() {
        let result = select_periods(week(), Some("bad-date"), now());
        assert_eq!(result, Err(DateError::Invalid));
    }

    #[test]
    fn start_time_keeps_its_own_offset() {
        // 23:00 on the 19th in Hawaii is already the 20th in UTC.
        let late = period("2026-10-19T23:00:00-10:00", "Late");
        assert_eq!(period_date(&late), Some(date(2026, 10, 19)));
        assert_eq!(period_date(&period("yesterday-ish", "Bad")), None);
    }
}
