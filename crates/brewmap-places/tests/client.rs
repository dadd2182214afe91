//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use brewmap_core::{FailureKind, ResolvedIdentifier, UnresolvedReason};
use brewmap_places::{fetch_photos, LookupFailure, PhotoSize, PlacesClient, PlacesError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 30, "brewmap-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn details_body(place_id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "OK",
        "result": {
            "place_id": place_id,
            "name": name,
            "formatted_address": "270 7th St, San Francisco, CA 94103, USA",
            "rating": 4.6,
            "user_ratings_total": 2310,
            "geometry": { "location": { "lat": 37.7766, "lng": -122.4084 } },
            "types": ["cafe", "food", "point_of_interest"],
            "photos": [
                { "photo_reference": "photo-a", "width": 4032, "height": 3024 },
                { "photo_reference": "photo-b", "width": 4032, "height": 3024 },
                { "photo_reference": "photo-c", "width": 4032, "height": 3024 }
            ],
            "reviews": [
                { "rating": 5, "text": "Plenty of outlets and the wifi is fast." }
            ]
        }
    })
}

#[tokio::test]
async fn lookup_by_place_id_calls_details_only() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "ChIJsightglass123"))
        .and(query_param("key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(details_body("ChIJsightglass123", "Sightglass Coffee")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/findplacefromtext/json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let place = client
        .lookup(&ResolvedIdentifier::PlaceId("ChIJsightglass123".to_owned()))
        .await
        .expect("lookup should succeed");

    assert_eq!(place.place_id, "ChIJsightglass123");
    assert_eq!(place.name.as_deref(), Some("Sightglass Coffee"));
    assert_eq!(place.rating, Some(4.6));
    assert_eq!(place.user_ratings_total, Some(2310));
    assert_eq!(place.coordinates(), Some((37.7766, -122.4084)));
    assert_eq!(place.photo_references.len(), 3);
    assert_eq!(place.recent_reviews.len(), 1);
}

#[tokio::test]
async fn lookup_by_query_searches_then_fetches_details() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/findplacefromtext/json"))
        .and(query_param("input", "Sightglass Coffee"))
        .and(query_param("inputtype", "textquery"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "candidates": [
                { "place_id": "ChIJfirst", "name": "Sightglass Coffee" },
                { "place_id": "ChIJsecond", "name": "Sightglass Coffee Bar" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "ChIJfirst"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(details_body("ChIJfirst", "Sightglass Coffee")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let place = client
        .lookup(&ResolvedIdentifier::SearchQuery("Sightglass Coffee".to_owned()))
        .await
        .expect("lookup should succeed");

    assert_eq!(place.place_id, "ChIJfirst");
}

#[tokio::test]
async fn lookup_with_zero_candidates_is_no_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/findplacefromtext/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ZERO_RESULTS",
            "candidates": []
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .lookup(&ResolvedIdentifier::SearchQuery("Nowhere Beans".to_owned()))
        .await
        .expect_err("lookup should fail");

    assert!(matches!(err, LookupFailure::NoMatch { ref query } if query == "Nowhere Beans"));
    assert_eq!(err.failure_kind(), FailureKind::NoMatch);
}

#[tokio::test]
async fn details_not_found_is_no_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "NOT_FOUND" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .lookup(&ResolvedIdentifier::PlaceId("ChIJgone".to_owned()))
        .await
        .expect_err("lookup should fail");

    assert_eq!(err.failure_kind(), FailureKind::NoMatch);
}

#[tokio::test]
async fn unresolved_identifier_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .lookup(&ResolvedIdentifier::Unresolved(UnresolvedReason::Malformed))
        .await
        .expect_err("lookup should fail");

    assert_eq!(err.failure_kind(), FailureKind::MalformedUrl);
}

#[tokio::test]
async fn over_query_limit_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "You have exceeded your daily request quota for this API."
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .lookup(&ResolvedIdentifier::PlaceId("ChIJbusy".to_owned()))
        .await
        .expect_err("lookup should fail");

    assert_eq!(err.failure_kind(), FailureKind::ApiError);
    let msg = err.to_string();
    assert!(msg.contains("OVER_QUERY_LIMIT"), "unexpected message: {msg}");
    assert!(!msg.contains("test-key"), "key leaked into message: {msg}");
}

#[tokio::test]
async fn http_500_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .place_details("ChIJany")
        .await
        .expect_err("should fail on 500");

    assert!(matches!(
        err,
        PlacesError::UnexpectedStatus { status: 500, .. }
    ));
}

#[tokio::test]
async fn malformed_json_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/findplacefromtext/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.find_place("coffee").await.expect_err("should fail");
    assert!(matches!(err, PlacesError::Deserialize { .. }));
}

#[tokio::test]
async fn verify_credentials_rejects_denied_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/findplacefromtext/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .verify_credentials()
        .await
        .expect_err("denied key should fail");
    assert!(err.is_credential_error());
}

#[tokio::test]
async fn verify_credentials_tolerates_quota_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/findplacefromtext/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OVER_QUERY_LIMIT"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .verify_credentials()
        .await
        .expect("quota errors are not credential errors");
}

#[tokio::test]
async fn fetch_photos_respects_limit_and_order() {
    let server = MockServer::start().await;

    for (reference, bytes) in [("photo-a", b"AAAA"), ("photo-b", b"BBBB"), ("photo-c", b"CCCC")] {
        Mock::given(method("GET"))
            .and(path("/photo"))
            .and(query_param("photo_reference", reference))
            .and(query_param("maxwidth", "400"))
            .and(query_param("maxheight", "300"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/jpeg")
                    .set_body_bytes(bytes.to_vec()),
            )
            .mount(&server)
            .await;
    }

    let client = test_client(&server.uri());
    let refs = vec![
        "photo-a".to_owned(),
        "photo-b".to_owned(),
        "photo-c".to_owned(),
    ];
    let size = PhotoSize {
        width: 400,
        height: 300,
    };
    let photos = fetch_photos(&client, &refs, 2, size).await;

    assert_eq!(photos.len(), 2);
    assert_eq!(photos[0].reference, "photo-a");
    assert_eq!(photos[0].bytes, b"AAAA".to_vec());
    assert_eq!(photos[1].reference, "photo-b");
    assert_eq!(photos[1].width, 400);
    assert_eq!(photos[1].height, 300);
}

#[tokio::test]
async fn fetch_photos_skips_failed_downloads() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photo"))
        .and(query_param("photo_reference", "good"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"JPEG".to_vec()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/photo"))
        .and(query_param("photo_reference", "broken"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/photo"))
        .and(query_param("photo_reference", "empty"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let refs = vec!["broken".to_owned(), "good".to_owned(), "empty".to_owned()];
    let photos = fetch_photos(&client, &refs, 10, PhotoSize::default()).await;

    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].reference, "good");
}

#[tokio::test]
async fn rejected_feature_id_falls_back_to_name_search() {
    let server = MockServer::start().await;
    let feature_id = "0x808580af3cd399d1:0xffceeb92a11a5a6d";

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", feature_id))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "INVALID_REQUEST"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/findplacefromtext/json"))
        .and(query_param("input", "Sightglass Coffee"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "candidates": [{ "place_id": "ChIJsightglass123", "name": "Sightglass Coffee" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "ChIJsightglass123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(details_body("ChIJsightglass123", "Sightglass Coffee")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let place = client
        .lookup_with_fallback(
            &ResolvedIdentifier::PlaceId(feature_id.to_owned()),
            Some("Sightglass Coffee"),
        )
        .await
        .expect("fallback search should find the place");

    assert_eq!(place.place_id, "ChIJsightglass123");
    assert_eq!(place.name.as_deref(), Some("Sightglass Coffee"));
}

#[tokio::test]
async fn rejected_places_id_does_not_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "INVALID_REQUEST"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/findplacefromtext/json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .lookup_with_fallback(
            &ResolvedIdentifier::PlaceId("ChIJbroken".to_owned()),
            Some("Sightglass Coffee"),
        )
        .await
        .expect_err("lookup should fail");

    assert_eq!(err.failure_kind(), FailureKind::ApiError);
}
