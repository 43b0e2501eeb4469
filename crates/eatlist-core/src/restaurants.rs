use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sheet columns every run requires, matched case-insensitively.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "name",
    "category",
    "google_maps_url",
    "place_id",
    "notes",
    "speed",
    "price",
];

/// One non-blank sheet row, trimmed. `category` and `speed` are lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseRecord {
    pub name: String,
    pub category: String,
    pub google_maps_url: String,
    pub place_id: String,
    pub notes: String,
    pub speed: String,
    pub price: String,
}

impl BaseRecord {
    /// Returns `true` when every column is empty; such rows are dropped.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        [
            &self.name,
            &self.category,
            &self.google_maps_url,
            &self.place_id,
            &self.notes,
            &self.speed,
            &self.price,
        ]
        .iter()
        .all(|v| v.is_empty())
    }

    #[must_use]
    pub fn has_place_id(&self) -> bool {
        !self.place_id.is_empty()
    }
}

/// Marker attached to a record whose place lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentError {
    /// Places API status (e.g. `"NOT_FOUND"`), or `"REQUEST_FAILED"` when the
    /// request itself could not complete.
    pub status: String,
    pub message: String,
}

/// A restaurant as it appears in the published snapshot.
///
/// Base columns are flattened to the top level; Places-derived fields are
/// always present in the JSON and serialize as `null` when unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(flatten)]
    pub base: BaseRecord,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_text: Vec<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    /// Canonical Maps URL: the Places `url` when known, else the sheet's link.
    pub url: String,
    #[serde(with = "iso_millis_opt", default)]
    pub next_close_utc: Option<DateTime<Utc>>,
    pub business_status: Option<String>,
    pub utc_offset_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<EnrichmentError>,
}

impl Restaurant {
    /// Record for a row with nothing to look up.
    #[must_use]
    pub fn pass_through(base: BaseRecord) -> Self {
        let url = base.google_maps_url.clone();
        Self {
            base,
            address: None,
            lat: None,
            lng: None,
            open_now: None,
            weekday_text: Vec::new(),
            website: None,
            phone: None,
            url,
            next_close_utc: None,
            business_status: None,
            utc_offset_minutes: None,
            error: None,
        }
    }

    /// Record for a row whose lookup failed; keeps the row in the output.
    #[must_use]
    pub fn failed(base: BaseRecord, status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(EnrichmentError {
                status: status.into(),
                message: message.into(),
            }),
            ..Self::pass_through(base)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounts {
    pub total_rows: usize,
    pub places_ok: usize,
    pub places_failed: usize,
}

/// The complete output of one run. Always written whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(with = "iso_millis")]
    pub generated_at: DateTime<Utc>,
    pub source_csv: String,
    pub counts: RunCounts,
    pub restaurants: Vec<Restaurant>,
}

/// `2025-01-07T03:00:00.000Z`, the format the static site parses.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

mod iso_millis_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => super::iso_millis::serialize(dt, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|raw| {
                DateTime::parse_from_rfc3339(&raw)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn base() -> BaseRecord {
        BaseRecord {
            name: "Tom's Diner".to_string(),
            category: "diner".to_string(),
            google_maps_url: "https://maps.google.com/?cid=1".to_string(),
            place_id: String::new(),
            notes: String::new(),
            speed: "fast".to_string(),
            price: "$".to_string(),
        }
    }

    #[test]
    fn default_base_record_is_blank() {
        assert!(BaseRecord::default().is_blank());
    }

    #[test]
    fn any_single_field_makes_record_non_blank() {
        let record = BaseRecord {
            price: "$$".to_string(),
            ..BaseRecord::default()
        };
        assert!(!record.is_blank());
    }

    #[test]
    fn pass_through_serializes_nulls_and_sheet_url() {
        let value = serde_json::to_value(Restaurant::pass_through(base())).unwrap();
        assert_eq!(value["name"], "Tom's Diner");
        assert!(value["address"].is_null());
        assert!(value["lat"].is_null());
        assert!(value["lng"].is_null());
        assert!(value["open_now"].is_null());
        assert!(value["next_close_utc"].is_null());
        assert_eq!(value["weekday_text"], serde_json::json!([]));
        assert_eq!(value["url"], "https://maps.google.com/?cid=1");
        assert!(value.get("error").is_none(), "error omitted when absent");
    }

    #[test]
    fn failed_record_carries_error_marker() {
        let record = Restaurant::failed(base(), "NOT_FOUND", "no such place");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["error"]["status"], "NOT_FOUND");
        assert_eq!(value["error"]["message"], "no such place");
        assert_eq!(value["url"], "https://maps.google.com/?cid=1");
    }

    #[test]
    fn timestamps_use_millisecond_zulu_format() {
        let mut record = Restaurant::pass_through(base());
        record.next_close_utc = Some(Utc.with_ymd_and_hms(2025, 1, 8, 3, 0, 0).unwrap());
        let snapshot = Snapshot {
            generated_at: Utc.with_ymd_and_hms(2025, 1, 8, 1, 0, 0).unwrap(),
            source_csv: "https://example.com/sheet.csv".to_string(),
            counts: RunCounts::default(),
            restaurants: vec![record],
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["generated_at"], "2025-01-08T01:00:00.000Z");
        assert_eq!(
            value["restaurants"][0]["next_close_utc"],
            "2025-01-08T03:00:00.000Z"
        );

        let back: Snapshot = serde_json::from_value(value).unwrap();
        assert_eq!(back, snapshot);
    }
}
