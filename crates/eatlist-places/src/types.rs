//! Place Details response types.
//!
//! Every field is optional: the API omits whatever the place does not have,
//! and the `fields` mask limits the rest. Below the envelope's `status`,
//! a value of the wrong JSON type decodes as absent instead of failing the
//! whole response, and one malformed opening period is dropped on its own.

use serde::Deserialize;

/// Top-level envelope. `status` is `"OK"` on success; anything else
/// (`"NOT_FOUND"`, `"INVALID_REQUEST"`, `"REQUEST_DENIED"`, ...) comes with an
/// optional `error_message` and no `result`.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub error_message: Option<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub result: Option<PlaceDetails>,
}

impl DetailsResponse {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub formatted_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub geometry: Option<Geometry>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub opening_hours: Option<OpeningHours>,
    /// Minutes east of UTC, as requested through the `utc_offset` field.
    #[serde(default, deserialize_with = "lenient::number")]
    pub utc_offset: Option<f64>,
    /// Same offset under the newer name; some responses carry both.
    #[serde(default, deserialize_with = "lenient::number")]
    pub utc_offset_minutes: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub formatted_phone_number: Option<String>,
    /// Canonical Google Maps URL for the place.
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: Option<String>,
    /// `"OPERATIONAL"`, `"CLOSED_TEMPORARILY"` or `"CLOSED_PERMANENTLY"`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub business_status: Option<String>,
}

impl PlaceDetails {
    /// The place's UTC offset in minutes, preferring `utc_offset_minutes`.
    #[must_use]
    pub fn offset_minutes(&self) -> Option<f64> {
        self.utc_offset_minutes
            .filter(|m| m.is_finite())
            .or(self.utc_offset.filter(|m| m.is_finite()))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Geometry {
    #[serde(default, deserialize_with = "lenient::object")]
    pub location: Option<LatLng>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LatLng {
    #[serde(default, deserialize_with = "lenient::number")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub lng: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OpeningHours {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub open_now: Option<bool>,
    /// `None` when the response carries no `periods` list at all. Entries
    /// that are not period objects are left out.
    #[serde(default, deserialize_with = "lenient::list")]
    pub periods: Option<Vec<OpeningPeriod>>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub weekday_text: Option<Vec<String>>,
}

/// One open/close pair. Places open around the clock have no `close`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OpeningPeriod {
    #[serde(default, deserialize_with = "lenient::object")]
    pub open: Option<PeriodEvent>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub close: Option<PeriodEvent>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PeriodEvent {
    /// `0` = Sunday through `6` = Saturday, in the place's local time.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub day: Option<i64>,
    /// Local 24-hour time as `"HHMM"`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub time: Option<String>,
}

impl PeriodEvent {
    #[must_use]
    pub fn new(day: i64, time: &str) -> Self {
        Self {
            day: Some(day),
            time: Some(time.to_string()),
        }
    }
}

/// `deserialize_with` helpers that read a field as a raw JSON value and keep
/// it only when it has the expected shape.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
        Option::<Value>::deserialize(deserializer)
    }

    pub(super) fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(raw(d)?.as_ref().and_then(Value::as_f64))
    }

    pub(super) fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(raw(d)?.as_ref().and_then(Value::as_i64))
    }

    pub(super) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(raw(d)?.as_ref().and_then(Value::as_bool))
    }

    pub(super) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(raw(d)?.as_ref().and_then(Value::as_str).map(str::to_owned))
    }

    pub(super) fn object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(raw(d)?.and_then(|v| serde_json::from_value(v).ok()))
    }

    /// Non-array values read as absent; array items that fail to decode are
    /// skipped.
    pub(super) fn list<'de, D, T>(d: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(raw(d)?.and_then(|v| match v {
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .filter_map(|item| serde_json::from_value(item).ok())
                    .collect(),
            ),
            _ => None,
        }))
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
