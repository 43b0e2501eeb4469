use super::*;

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", base_url, 30, "eatlist-test/0.1")
        .expect("client construction should not fail")
}

#[test]
fn build_url_targets_details_endpoint_under_base_path() {
    let client = test_client("https://maps.googleapis.com/maps/api/place");
    let url = client.build_url("ChIJabc");
    assert_eq!(url.path(), "/maps/api/place/details/json");
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("place_id".to_string(), "ChIJabc".to_string()),
            ("fields".to_string(), DETAILS_FIELDS.to_string()),
            ("key".to_string(), "test-key".to_string()),
        ]
    );
}

#[test]
fn build_url_strips_trailing_slash() {
    let client = test_client("https://maps.googleapis.com/maps/api/place/");
    assert_eq!(
        client.build_url("x").path(),
        "/maps/api/place/details/json"
    );
}

#[test]
fn build_url_works_for_bare_host() {
    let client = test_client("http://127.0.0.1:8080");
    assert_eq!(client.build_url("x").path(), "/details/json");
}

#[test]
fn build_url_encodes_special_characters() {
    let client = test_client("https://maps.googleapis.com/maps/api/place");
    let url = client.build_url("id with spaces&more");
    assert!(
        url.as_str().contains("place_id=id+with+spaces%26more"),
        "place_id should be percent-encoded: {url}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = PlacesClient::with_base_url("k", "not a url", 30, "ua");
    assert!(
        matches!(result, Err(PlacesError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}
