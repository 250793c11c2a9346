//! User settings carried in the persisted state.
//!
//! Input is never rejected for being out of range: every setter clamps to a
//! safe value instead.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const MAX_HOUR: u32 = 23;

fn default_notification_lead_minutes() -> u32 {
    10
}
fn default_day_start_hour() -> u32 {
    7
}
fn default_day_end_hour() -> u32 {
    22
}
fn default_buffer_minutes() -> u32 {
    5
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_notification_lead_minutes")]
    pub notification_lead_minutes: u32,
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u32,
    #[serde(default = "default_day_end_hour")]
    pub day_end_hour: u32,
    /// Minimum gap kept between consecutive events.
    #[serde(default = "default_buffer_minutes")]
    pub buffer_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notification_lead_minutes: default_notification_lead_minutes(),
            day_start_hour: default_day_start_hour(),
            day_end_hour: default_day_end_hour(),
            buffer_minutes: default_buffer_minutes(),
        }
    }
}

/// Keys accepted by [`Settings::get`] and [`Settings::set`].
pub const SETTING_KEYS: [&str; 4] = [
    "notificationLeadMinutes",
    "dayStartHour",
    "dayEndHour",
    "bufferMinutes",
];

fn canonical_key(key: &str) -> Option<&'static str> {
    match key {
        "notificationLeadMinutes" | "notification_lead_minutes" => Some(SETTING_KEYS[0]),
        "dayStartHour" | "day_start_hour" => Some(SETTING_KEYS[1]),
        "dayEndHour" | "day_end_hour" => Some(SETTING_KEYS[2]),
        "bufferMinutes" | "buffer_minutes" => Some(SETTING_KEYS[3]),
        _ => None,
    }
}

fn parse_number(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

fn clamp_non_negative(value: Option<i64>) -> u32 {
    value.unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32
}

fn clamp_hour(value: Option<i64>, fallback: u32) -> u32 {
    value.map_or(fallback, |v| v.clamp(0, i64::from(MAX_HOUR)) as u32)
}

impl Settings {
    pub fn get(&self, key: &str) -> Option<u32> {
        match canonical_key(key)? {
            "notificationLeadMinutes" => Some(self.notification_lead_minutes),
            "dayStartHour" => Some(self.day_start_hour),
            "dayEndHour" => Some(self.day_end_hour),
            "bufferMinutes" => Some(self.buffer_minutes),
            _ => None,
        }
    }

    /// Set a value from raw user input, clamping it into range.
    ///
    /// Non-numeric input falls back to 0 for minute settings and to the
    /// default hour for day bounds.
    ///
    /// # Errors
    /// Returns an error only for an unknown key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<u32, ConfigError> {
        let key = canonical_key(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let parsed = parse_number(value);
        let stored = match key {
            "notificationLeadMinutes" => {
                self.notification_lead_minutes = clamp_non_negative(parsed);
                self.notification_lead_minutes
            }
            "dayStartHour" => {
                self.day_start_hour = clamp_hour(parsed, default_day_start_hour());
                self.day_start_hour
            }
            "dayEndHour" => {
                self.day_end_hour = clamp_hour(parsed, default_day_end_hour());
                self.day_end_hour
            }
            _ => {
                self.buffer_minutes = clamp_non_negative(parsed);
                self.buffer_minutes
            }
        };
        if parsed.is_none() {
            tracing::warn!(key, value, stored, "non-numeric setting replaced with fallback");
        }
        Ok(stored)
    }

    /// Bring values read from an external document into range.
    pub fn clamped(self) -> Self {
        Self {
            day_start_hour: self.day_start_hour.min(MAX_HOUR),
            day_end_hour: self.day_end_hour.min(MAX_HOUR),
            ..self
        }
    }

    pub fn buffer(&self) -> i64 {
        i64::from(self.buffer_minutes)
    }
}
