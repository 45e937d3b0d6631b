//! Numeric and date-time fields, including the calendar date formats

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use recordjson::prelude::*;
use recordjson::TimeZoneSetting;
use recordjson_integration_tests::{utc_serializer, utc_settings};
use rstest::rstest;
use serde_json::{Value, json};

const NOW_MILLIS: i64 = 1_718_454_245_123;

fn to_hex(value: &FieldValue<'_>) -> Value {
	match value {
		FieldValue::Int(n) => json!(format!("{n:x}")),
		FieldValue::UInt(n) => json!(format!("{n:x}")),
		_ => Value::Null,
	}
}

fn year(value: &FieldValue<'_>) -> Value {
	value
		.as_datetime()
		.map_or(Value::Null, |instant| json!(instant.year()))
}

#[derive(Record)]
struct NumberRecord {
	#[json]
	p1: i64,
	#[json(rename = "property2")]
	p2: i64,
	#[json(format = "raw")]
	p3: i64,
	#[json(format = "dt_ymd")]
	p4: i64,
	#[json(format = "dt_ymd_hm")]
	p5: i64,
	#[json(format = "dt_ymd_hms")]
	p6: i64,
	#[json(with = "to_hex")]
	p7: i64,
}

#[derive(Record)]
struct DateRecord {
	#[json]
	p1: DateTime<Utc>,
	#[json(rename = "property2")]
	p2: DateTime<Utc>,
	#[json(format = "dt_ymd")]
	p4: DateTime<Utc>,
	#[json(format = "dt_ymd_hm")]
	p5: DateTime<Utc>,
	#[json(format = "dt_ymd_hms")]
	p6: DateTime<Utc>,
	#[json(with = "year")]
	p7: DateTime<Utc>,
	#[json(format = "dt_ymd")]
	due: Option<DateTime<Utc>>,
}

#[rstest]
fn test_number_fields() {
	// Arrange
	let registry = FieldRegistry::new();
	registry.register::<NumberRecord>().unwrap();
	let record = NumberRecord {
		p1: 1,
		p2: 2,
		p3: NOW_MILLIS,
		p4: NOW_MILLIS,
		p5: NOW_MILLIS,
		p6: NOW_MILLIS,
		p7: 999_999,
	};

	// Act
	let json = utc_serializer(&registry).serialize_record(&record).unwrap();

	// Assert
	assert_eq!(
		json,
		json!({
			"p1": 1,
			"property2": 2,
			"p3": NOW_MILLIS,
			"p4": "2024-06-15",
			"p5": "2024-06-15 12:24",
			"p6": "2024-06-15 12:24:05",
			"p7": "f423f",
		})
	);
}

#[rstest]
fn test_date_fields() {
	// Arrange
	let registry = FieldRegistry::new();
	registry.register::<DateRecord>().unwrap();
	let now = Utc.timestamp_millis_opt(NOW_MILLIS).unwrap();
	let record = DateRecord {
		p1: Utc.timestamp_millis_opt(0).unwrap(),
		p2: now,
		p4: now,
		p5: now,
		p6: now,
		p7: now,
		due: None,
	};

	// Act
	let json = utc_serializer(&registry).serialize_record(&record).unwrap();

	// Assert
	assert_eq!(
		json,
		json!({
			"p1": "1970-01-01T00:00:00.000Z",
			"property2": "2024-06-15T12:24:05.123Z",
			"p4": "2024-06-15",
			"p5": "2024-06-15 12:24",
			"p6": "2024-06-15 12:24:05",
			"p7": 2024,
			"due": null,
		})
	);
}

#[rstest]
#[case(TimeZoneSetting::Utc, "2024-06-15 12:24")]
#[case(TimeZoneSetting::FixedOffsetSeconds(9 * 3600), "2024-06-15 21:24")]
#[case(TimeZoneSetting::FixedOffsetSeconds(-13 * 3600), "2024-06-14 23:24")]
fn test_time_zone_setting(#[case] time_zone: TimeZoneSetting, #[case] expected: &str) {
	let registry = FieldRegistry::new();
	registry.register::<NumberRecord>().unwrap();
	let settings = SerializerSettings::new().with_time_zone(time_zone).unwrap();
	let record = NumberRecord {
		p1: 0,
		p2: 0,
		p3: 0,
		p4: NOW_MILLIS,
		p5: NOW_MILLIS,
		p6: NOW_MILLIS,
		p7: 0,
	};

	let json = RecordSerializer::with_settings(&registry, settings)
		.serialize_record(&record)
		.unwrap();

	assert_eq!(json["p5"], expected);
}

#[derive(Record)]
struct Holiday {
	#[json(format = "dt_ymd")]
	on: NaiveDate,
	#[json(rename = "on_raw")]
	raw: NaiveDate,
}

#[rstest]
#[case(TimeZoneSetting::Local, None)]
#[case(TimeZoneSetting::Utc, Some("2024-02-29T00:00:00.000Z"))]
#[case(TimeZoneSetting::FixedOffsetSeconds(9 * 3600), Some("2024-02-28T15:00:00.000Z"))]
#[case(TimeZoneSetting::FixedOffsetSeconds(-13 * 3600), Some("2024-02-29T13:00:00.000Z"))]
fn test_naive_date_keeps_its_calendar_day(
	#[case] time_zone: TimeZoneSetting,
	#[case] raw_instant: Option<&str>,
) {
	// Arrange
	let registry = FieldRegistry::new();
	registry.register::<Holiday>().unwrap();
	let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
	let holiday = Holiday { on: day, raw: day };
	let settings = SerializerSettings::new().with_time_zone(time_zone).unwrap();

	// Act
	let json = RecordSerializer::with_settings(&registry, settings)
		.serialize_record(&holiday)
		.unwrap();

	// Assert
	assert_eq!(json["on"], "2024-02-29");
	// The raw form is an instant, so it depends on the zone the day is read in.
	if let Some(expected) = raw_instant {
		assert_eq!(json["on_raw"], expected);
	}
}

#[rstest]
fn test_settings_from_toml() {
	let settings = SerializerSettings::from_toml_str("[time_zone]\nfixed_offset_seconds = 3600\n")
		.unwrap();

	assert_eq!(
		settings.time_zone(),
		TimeZoneSetting::FixedOffsetSeconds(3600)
	);
	assert_eq!(utc_settings().time_zone(), TimeZoneSetting::Utc);
}
