//! Merges sheet rows with Place Details.

use chrono::{DateTime, Utc};
use eatlist_core::{BaseRecord, Restaurant};

use crate::client::PlacesClient;
use crate::hours::next_close;
use crate::types::{DetailsResponse, PlaceDetails};

/// Status recorded when the request itself failed (network, HTTP status,
/// undecodable body) rather than the API answering with a non-`OK` status.
pub const REQUEST_FAILED: &str = "REQUEST_FAILED";

/// Outcome of enriching one row. Both variants carry a record for the
/// snapshot; `Failed` records have their `error` marker set.
#[derive(Debug)]
pub enum Enrichment {
    Ok(Restaurant),
    Failed(Restaurant),
}

impl Enrichment {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    #[must_use]
    pub fn into_record(self) -> Restaurant {
        match self {
            Self::Ok(record) | Self::Failed(record) => record,
        }
    }
}

/// Looks up `base.place_id` and merges the result.
///
/// Never returns an error: every failure becomes [`Enrichment::Failed`] so
/// the row still appears in the snapshot.
pub async fn enrich(client: &PlacesClient, base: BaseRecord, now: DateTime<Utc>) -> Enrichment {
    let result = client.place_details(&base.place_id).await;
    match result {
        Ok(response) => from_response(base, response, now),
        Err(e) => {
            tracing::warn!(place_id = %base.place_id, error = %e, "place details request failed");
            Enrichment::Failed(Restaurant::failed(base, REQUEST_FAILED, e.to_string()))
        }
    }
}

/// Turns a decoded details envelope into an [`Enrichment`].
#[must_use]
pub fn from_response(base: BaseRecord, response: DetailsResponse, now: DateTime<Utc>) -> Enrichment {
    if !response.is_ok() {
        let message = response
            .error_message
            .unwrap_or_else(|| "unknown error".to_string());
        tracing::warn!(
            place_id = %base.place_id,
            status = %response.status,
            message = %message,
            "places API returned non-OK status"
        );
        return Enrichment::Failed(Restaurant::failed(base, response.status, message));
    }

    let details = response.result.unwrap_or_default();
    Enrichment::Ok(merge_details(base, details, now))
}

/// Combines a sheet row with fetched details.
///
/// The sheet's name wins over the fetched one; the fetched canonical URL wins
/// over the sheet's link.
#[must_use]
pub fn merge_details(mut base: BaseRecord, details: PlaceDetails, now: DateTime<Utc>) -> Restaurant {
    let offset_minutes = details.offset_minutes();
    let next_close_utc = next_close(details.opening_hours.as_ref(), offset_minutes, now);

    let location = details.geometry.and_then(|g| g.location);
    let lat = location.as_ref().and_then(|l| l.lat).filter(|v| v.is_finite());
    let lng = location.as_ref().and_then(|l| l.lng).filter(|v| v.is_finite());

    let open_now = details
        .opening_hours
        .as_ref()
        .map(|h| h.open_now.unwrap_or(false));
    let weekday_text = details
        .opening_hours
        .and_then(|h| h.weekday_text)
        .unwrap_or_default();

    #[allow(clippy::cast_possible_truncation)]
    let utc_offset_minutes = offset_minutes.map(|m| m.round() as i64);

    let url = details
        .url
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| base.google_maps_url.clone());

    if base.name.is_empty() {
        base.name = details.name.unwrap_or_default();
    }

    Restaurant {
        base,
        address: details.formatted_address,
        lat,
        lng,
        open_now,
        weekday_text,
        website: details.website,
        phone: details.formatted_phone_number,
        url,
        next_close_utc,
        business_status: details.business_status,
        utc_offset_minutes,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::types::{Geometry, LatLng, OpeningHours, OpeningPeriod, PeriodEvent};

    fn base(name: &str) -> BaseRecord {
        BaseRecord {
            name: name.to_string(),
            category: "diner".to_string(),
            google_maps_url: "https://maps.google.com/?cid=1".to_string(),
            place_id: "ChIJabc".to_string(),
            notes: String::new(),
            speed: "fast".to_string(),
            price: "$".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 1, 0, 0).unwrap()
    }

    fn full_details() -> PlaceDetails {
        PlaceDetails {
            name: Some("Tom's Restaurant".to_string()),
            formatted_address: Some("2880 Broadway, New York, NY 10025, USA".to_string()),
            geometry: Some(Geometry {
                location: Some(LatLng {
                    lat: Some(40.805_4),
                    lng: Some(-73.965_5),
                }),
            }),
            opening_hours: Some(OpeningHours {
                open_now: Some(true),
                periods: Some(vec![OpeningPeriod {
                    open: Some(PeriodEvent::new(2, "0700")),
                    close: Some(PeriodEvent::new(2, "2200")),
                }]),
                weekday_text: Some(vec!["Tuesday: 7:00 AM – 10:00 PM".to_string()]),
            }),
            utc_offset: Some(-300.0),
            utc_offset_minutes: None,
            website: Some("https://tomsrestaurant.net".to_string()),
            formatted_phone_number: Some("(212) 864-6137".to_string()),
            url: Some("https://maps.google.com/?cid=999".to_string()),
            business_status: Some("OPERATIONAL".to_string()),
        }
    }

    #[test]
    fn merge_populates_every_places_field() {
        let record = merge_details(base("Tom's"), full_details(), now());
        assert_eq!(record.base.name, "Tom's");
        assert_eq!(
            record.address.as_deref(),
            Some("2880 Broadway, New York, NY 10025, USA")
        );
        assert_eq!(record.lat, Some(40.805_4));
        assert_eq!(record.lng, Some(-73.965_5));
        assert_eq!(record.open_now, Some(true));
        assert_eq!(record.weekday_text.len(), 1);
        assert_eq!(record.website.as_deref(), Some("https://tomsrestaurant.net"));
        assert_eq!(record.phone.as_deref(), Some("(212) 864-6137"));
        assert_eq!(record.url, "https://maps.google.com/?cid=999");
        assert_eq!(
            record.next_close_utc,
            Some(Utc.with_ymd_and_hms(2025, 1, 8, 3, 0, 0).unwrap())
        );
        assert_eq!(record.business_status.as_deref(), Some("OPERATIONAL"));
        assert_eq!(record.utc_offset_minutes, Some(-300));
        assert!(record.error.is_none());
    }

    #[test]
    fn blank_sheet_name_falls_back_to_fetched_name() {
        let record = merge_details(base(""), full_details(), now());
        assert_eq!(record.base.name, "Tom's Restaurant");
    }

    #[test]
    fn sparse_details_fall_back_to_defaults() {
        let record = merge_details(base("Tom's"), PlaceDetails::default(), now());
        assert!(record.address.is_none());
        assert!(record.lat.is_none());
        assert!(record.lng.is_none());
        assert!(record.open_now.is_none(), "no hours means unknown, not closed");
        assert!(record.weekday_text.is_empty());
        assert_eq!(record.url, "https://maps.google.com/?cid=1");
        assert!(record.next_close_utc.is_none());
        assert!(record.utc_offset_minutes.is_none());
    }

    #[test]
    fn hours_without_open_now_read_as_closed() {
        let details = PlaceDetails {
            opening_hours: Some(OpeningHours::default()),
            ..PlaceDetails::default()
        };
        let record = merge_details(base("Tom's"), details, now());
        assert_eq!(record.open_now, Some(false));
    }

    #[test]
    fn non_finite_coordinates_are_dropped() {
        let details = PlaceDetails {
            geometry: Some(Geometry {
                location: Some(LatLng {
                    lat: Some(f64::NAN),
                    lng: Some(12.5),
                }),
            }),
            ..PlaceDetails::default()
        };
        let record = merge_details(base("Tom's"), details, now());
        assert!(record.lat.is_none());
        assert_eq!(record.lng, Some(12.5));
    }

    #[test]
    fn non_ok_status_becomes_failed_record() {
        let response = DetailsResponse {
            status: "NOT_FOUND".to_string(),
            error_message: None,
            result: None,
        };
        let outcome = from_response(base("Tom's"), response, now());
        assert!(!outcome.is_ok());
        let record = outcome.into_record();
        let error = record.error.expect("error marker");
        assert_eq!(error.status, "NOT_FOUND");
        assert_eq!(error.message, "unknown error");
        assert!(record.address.is_none());
        assert!(record.open_now.is_none());
        assert_eq!(record.url, "https://maps.google.com/?cid=1");
    }

    #[test]
    fn ok_status_without_result_is_still_ok() {
        let response = DetailsResponse {
            status: "OK".to_string(),
            error_message: None,
            result: None,
        };
        let outcome = from_response(base("Tom's"), response, now());
        assert!(outcome.is_ok());
        assert_eq!(outcome.into_record().url, "https://maps.google.com/?cid=1");
    }
}
