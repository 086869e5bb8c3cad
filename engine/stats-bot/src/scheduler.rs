use crate::error::{BotError, BotResult};
use crate::pipeline::ReportPipeline;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use cron::Schedule;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{error, info, warn};

const WEEKDAY_NAMES: [&str; 8] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

/// A cron schedule evaluated in a local timezone
#[derive(Debug, Clone)]
pub struct ReportSchedule {
    expression: String,
    schedule: Schedule,
    timezone: Tz,
}

impl ReportSchedule {
    /// Parse a cron expression
    ///
    /// Accepts the usual five fields, an optional leading seconds field and the `@`
    /// shorthands. Numeric days of week use crontab numbering, where 0 and 7 are Sunday.
    pub fn from_cron(expr: &str, timezone: Tz) -> BotResult<Self> {
        let normalized = normalize_expression(expr)?;
        let schedule = Schedule::from_str(&normalized).map_err(|e| {
            BotError::config(format!("Invalid cron expression {}: {}", expr, e))
        })?;

        Ok(Self {
            expression: expr.trim().to_string(),
            schedule,
            timezone,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// First fire instant strictly after `now`
    pub fn next_after(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule
            .after(&now.with_timezone(&self.timezone))
            .next()
            .map(|fire| fire.with_timezone(&Utc))
    }
}

impl fmt::Display for ReportSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.expression, self.timezone.name())
    }
}

/// Add the seconds field and rewrite the day-of-week field with names
fn normalize_expression(expr: &str) -> BotResult<String> {
    let mut fields: Vec<String> = expr.split_whitespace().map(str::to_string).collect();
    match fields.len() {
        5 => fields.insert(0, "0".to_string()),
        6 | 7 => {}
        _ => return Ok(expr.trim().to_string()),
    }

    fields[5] = weekday_field(&fields[5])?;
    Ok(fields.join(" "))
}

fn weekday_field(field: &str) -> BotResult<String> {
    let items = field
        .split(',')
        .map(|item| {
            let (range, step) = match item.split_once('/') {
                Some((range, step)) => (range, Some(step)),
                None => (item, None),
            };
            let range = range
                .split('-')
                .map(weekday_name)
                .collect::<BotResult<Vec<_>>>()?
                .join("-");
            Ok(match step {
                Some(step) => format!("{}/{}", range, step),
                None => range,
            })
        })
        .collect::<BotResult<Vec<_>>>()?;

    Ok(items.join(","))
}

fn weekday_name(token: &str) -> BotResult<String> {
    match token.parse::<usize>() {
        Ok(day) => WEEKDAY_NAMES
            .get(day)
            .map(|name| name.to_string())
            .ok_or_else(|| BotError::config(format!("Invalid cron day of week: {}", token))),
        Err(_) => Ok(token.to_ascii_uppercase()),
    }
}

/// Fires the report pipeline on its schedule
pub struct ReportScheduler {
    schedule: ReportSchedule,
    pipeline: Arc<ReportPipeline>,
}

impl ReportScheduler {
    pub fn new(schedule: ReportSchedule, pipeline: Arc<ReportPipeline>) -> Self {
        Self { schedule, pipeline }
    }

    /// Start the scheduler (runs until the schedule is exhausted)
    pub async fn start(&self) {
        info!("Starting report scheduler: {}", self.schedule);

        loop {
            let now = Utc::now();
            let Some(next_fire) = self.schedule.next_after(now) else {
                warn!("Schedule {} has no upcoming fire times, stopping", self.schedule);
                return;
            };
            let sleep_duration = (next_fire - now).to_std().unwrap_or_else(|_| {
                warn!("Next fire time {} is not in the future", next_fire);
                std::time::Duration::from_secs(60)
            });

            info!("Next report scheduled for: {}", next_fire);
            sleep(sleep_duration).await;

            match self.pipeline.run().await {
                Ok(summary) => info!("Scheduled report posted: {:?}", summary),
                Err(e) => error!("Scheduled report failed: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike, Weekday};
    use chrono_tz::America::New_York;

    fn wednesday_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 3, 12, 0, 0).unwrap()
    }

    fn next_local(expr: &str) -> DateTime<Tz> {
        let schedule = ReportSchedule::from_cron(expr, New_York).unwrap();
        schedule
            .next_after(wednesday_noon())
            .unwrap()
            .with_timezone(&New_York)
    }

    #[test]
    fn test_default_expression() {
        let schedule = ReportSchedule::from_cron("0 9 * * 0", New_York).unwrap();

        assert_eq!(schedule.expression(), "0 9 * * 0");
        // Wednesday 2025-09-03 -> Sunday 2025-09-07 09:00 EDT (13:00 UTC)
        assert_eq!(
            schedule.next_after(wednesday_noon()),
            Some(Utc.with_ymd_and_hms(2025, 9, 7, 13, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_crontab_day_numbering() {
        let fire = next_local("15 20 * * 7");
        assert_eq!(fire.weekday(), Weekday::Sun);
        assert_eq!((fire.hour(), fire.minute()), (20, 15));

        assert_eq!(next_local("0 12 * * 6").weekday(), Weekday::Sat);
        assert_eq!(next_local("0 12 * * 4").weekday(), Weekday::Thu);
        assert_eq!(next_local("0 12 * * mon").weekday(), Weekday::Mon);
        assert_eq!(next_local("0 9 * * SUN").weekday(), Weekday::Sun);
    }

    #[test]
    fn test_common_cron_forms() {
        // Saturday comes before Sunday from a Wednesday
        let fire = next_local("0 9 * * 0,6");
        assert_eq!(fire.weekday(), Weekday::Sat);
        assert_eq!(fire.day(), 6);

        assert_eq!(next_local("0 9 ? * 0").weekday(), Weekday::Sun);
        assert_eq!(next_local("0 9 * * 4-5").weekday(), Weekday::Thu);

        let fire = next_local("30 0 9 * * 0");
        assert_eq!((fire.hour(), fire.minute(), fire.second()), (9, 0, 30));

        let fire = next_local("@weekly");
        assert_eq!(fire.weekday(), Weekday::Sun);
        assert_eq!(fire.hour(), 0);
    }

    #[test]
    fn test_rejects_invalid_expressions() {
        for expr in ["0 9 * *", "every sunday", "0 24 * * 0", "60 9 * * 0", "0 9 * * 8"] {
            assert!(ReportSchedule::from_cron(expr, New_York).is_err(), "{}", expr);
        }
    }

    #[test]
    fn test_next_after_skips_past_fire_time() {
        let schedule = ReportSchedule::from_cron("0 9 * * 0", New_York).unwrap();
        let fire = Utc.with_ymd_and_hms(2025, 9, 7, 13, 0, 0).unwrap();

        assert_eq!(
            schedule.next_after(fire),
            Some(Utc.with_ymd_and_hms(2025, 9, 14, 13, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_next_after_tracks_dst() {
        let schedule = ReportSchedule::from_cron("0 9 * * 0", New_York).unwrap();
        // DST ends 2025-11-02; 09:00 EST is 14:00 UTC
        let now = Utc.with_ymd_and_hms(2025, 10, 29, 0, 0, 0).unwrap();

        assert_eq!(
            schedule.next_after(now),
            Some(Utc.with_ymd_and_hms(2025, 11, 2, 14, 0, 0).unwrap())
        );
    }
}
