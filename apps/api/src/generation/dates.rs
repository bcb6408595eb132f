//! Date/time strings for the "날짜/시간" line of the prompt.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Relative weekday presets the form offers as-is.
const WEEKDAY_PRESETS: [&str; 2] = ["이번 주 금요일", "다음 주 월요일"];
pub const MINUTE_STEP: u8 = 10;

/// Optional time of day appended to the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.hour >= 24 {
            return Err(AppError::Validation(format!(
                "hour must be between 0 and 23, got {}",
                self.hour
            )));
        }
        if self.minute >= 60 || self.minute % MINUTE_STEP != 0 {
            return Err(AppError::Validation(format!(
                "minute must be one of 0, 10, 20, 30, 40, 50, got {}",
                self.minute
            )));
        }
        Ok(())
    }
}

/// `MM월 DD일`, zero-padded.
pub fn format_month_day(date: NaiveDate) -> String {
    date.format("%m월 %d일").to_string()
}

/// Date choices for the form: today, tomorrow, the day after, then the weekday presets.
pub fn date_presets(today: NaiveDate) -> Vec<String> {
    (0..3)
        .map(|offset| format_month_day(today + Duration::days(offset)))
        .chain(WEEKDAY_PRESETS.iter().map(|p| p.to_string()))
        .collect()
}

/// Resolves the date line: an explicit non-blank date wins, otherwise today.
/// A time, when given, is appended as ` HH:MM`.
pub fn compose_date(
    date: Option<&str>,
    time: Option<TimeOfDay>,
    today: NaiveDate,
) -> Result<String, AppError> {
    let mut composed = match date.map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => format_month_day(today),
    };

    if let Some(time) = time {
        time.validate()?;
        composed.push_str(&format!(" {:02}:{:02}", time.hour, time.minute));
    }

    Ok(composed)
}
