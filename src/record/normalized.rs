//! Normalised typhoon records ready for insertion.

use super::RawTyphoon;

/// One row of the `typhoon_records` table.
#[derive(Debug, Clone, PartialEq)]
pub struct TyphoonRecord {
    pub id: i64,
    pub cht_name: Option<String>,
    pub eng_name: Option<String>,
    pub genesis_datetime: Option<String>,
    pub dead_datetime: Option<String>,
    pub max_wind_speed: Option<i64>,
    pub max_gust_speed: Option<i64>,
    pub min_pressure: Option<i64>,
    pub max_class7_radius: Option<i64>,
    pub max_class10_radius: Option<i64>,
    pub warning_count: Option<i64>,
}

impl TyphoonRecord {
    /// Normalises a raw record. Returns `None` when the record has no id.
    pub fn from_raw(raw: &RawTyphoon) -> Option<Self> {
        let id = raw.id?;

        Some(TyphoonRecord {
            id,
            cht_name: raw.cht_name.clone(),
            eng_name: raw.eng_name.clone(),
            genesis_datetime: raw.genesis_datetime.clone(),
            dead_datetime: raw.dead_datetime.clone(),
            max_wind_speed: parse_count(raw.max_intensity.as_deref()),
            max_gust_speed: parse_count(raw.max_gust_speed.as_deref()),
            min_pressure: parse_count(raw.min_pressure.as_deref()),
            max_class7_radius: parse_count(raw.max_class7_radius.as_deref()),
            max_class10_radius: parse_count(raw.max_class10_radius.as_deref()),
            warning_count: parse_count(raw.warning_count.as_deref()),
        })
    }
}

/// Converts a numeric-looking field to an integer. Missing, empty or
/// non-numeric values become `None`; a bad field never fails the record.
pub fn parse_count(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

// -- Tests -------------------------------------------------------------------
