//! Serializer settings
//!
//! Settings only affect how date formats are rendered. They can be built in
//! code or loaded from a TOML document:
//!
//! ```toml
//! time_zone = "utc"
//! ```
//!
//! ```toml
//! [time_zone]
//! fixed_offset_seconds = 32400
//! ```

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Errors raised while loading settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// The document is not valid TOML or does not match the settings shape
	#[error("failed to parse serializer settings: {0}")]
	Parse(#[from] toml::de::Error),

	/// A fixed offset outside of +/- 24h
	#[error("invalid fixed UTC offset: {0} seconds")]
	InvalidOffset(i32),
}

/// The time zone date formats render in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeZoneSetting {
	/// The process's local time zone
	#[default]
	Local,
	/// UTC
	Utc,
	/// A fixed offset east of UTC
	FixedOffsetSeconds(i32),
}

impl TimeZoneSetting {
	/// Formats `instant` with a `chrono` pattern in this time zone
	pub(crate) fn format(&self, instant: &DateTime<Utc>, pattern: &str) -> String {
		match *self {
			TimeZoneSetting::Local => instant.with_timezone(&Local).format(pattern).to_string(),
			TimeZoneSetting::Utc => instant.format(pattern).to_string(),
			TimeZoneSetting::FixedOffsetSeconds(seconds) => match FixedOffset::east_opt(seconds) {
				Some(offset) => instant.with_timezone(&offset).format(pattern).to_string(),
				// Offsets are checked when settings are built; fall back to UTC.
				None => instant.format(pattern).to_string(),
			},
		}
	}

	/// Reads a wall-clock date-time as an instant in this time zone
	///
	/// Ambiguous times take the earlier instant. Times skipped by a DST gap
	/// move forward to the first wall-clock minute after the gap.
	pub(crate) fn resolve(&self, naive: &NaiveDateTime) -> DateTime<Utc> {
		match *self {
			TimeZoneSetting::Local => resolve_in(&Local, naive),
			TimeZoneSetting::Utc => naive.and_utc(),
			TimeZoneSetting::FixedOffsetSeconds(seconds) => match FixedOffset::east_opt(seconds) {
				Some(offset) => resolve_in(&offset, naive),
				None => naive.and_utc(),
			},
		}
	}

	fn validate(&self) -> Result<(), SettingsError> {
		match *self {
			TimeZoneSetting::FixedOffsetSeconds(seconds) if FixedOffset::east_opt(seconds).is_none() => {
				Err(SettingsError::InvalidOffset(seconds))
			}
			_ => Ok(()),
		}
	}
}

/// Gaps are at most a few hours long; anything longer falls back to UTC.
const MAX_GAP_MINUTES: i64 = 24 * 60;

fn resolve_in<Tz: TimeZone>(zone: &Tz, naive: &NaiveDateTime) -> DateTime<Utc> {
	(0..=MAX_GAP_MINUTES)
		.filter_map(|minutes| naive.checked_add_signed(TimeDelta::minutes(minutes)))
		.find_map(|candidate| zone.from_local_datetime(&candidate).earliest())
		.map_or_else(|| naive.and_utc(), |resolved| resolved.with_timezone(&Utc))
}

/// Settings for [`RecordSerializer`](crate::RecordSerializer)
///
/// # Examples
///
/// ```
/// use recordjson_core::{SerializerSettings, TimeZoneSetting};
///
/// let settings = SerializerSettings::from_toml_str("time_zone = \"utc\"").unwrap();
/// assert_eq!(settings.time_zone(), TimeZoneSetting::Utc);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerSettings {
	time_zone: TimeZoneSetting,
}

impl SerializerSettings {
	/// Settings with the local time zone
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the time zone date formats render in
	///
	/// # Errors
	///
	/// Returns [`SettingsError::InvalidOffset`] for fixed offsets of 24 hours or more.
	pub fn with_time_zone(mut self, time_zone: TimeZoneSetting) -> Result<Self, SettingsError> {
		time_zone.validate()?;
		self.time_zone = time_zone;
		Ok(self)
	}

	/// Parses settings from a TOML document; missing keys keep their defaults
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: SerializerSettings = toml::from_str(source)?;
		settings.time_zone.validate()?;
		Ok(settings)
	}

	/// The configured time zone
	pub fn time_zone(&self) -> TimeZoneSetting {
		self.time_zone
	}
}
