use super::*;

fn place_id(v: &str) -> ResolvedIdentifier {
    ResolvedIdentifier::PlaceId(v.to_owned())
}

fn query(v: &str) -> ResolvedIdentifier {
    ResolvedIdentifier::SearchQuery(v.to_owned())
}

// ---------------------------------------------------------------------------
// query parameters
// ---------------------------------------------------------------------------

#[test]
fn place_id_query_param_wins() {
    let url = "https://www.google.com/maps/place/Sightglass+Coffee/?place_id=ChIJa147K9HX3IAR5sqXKl9ss8E";
    assert_eq!(resolve(url), place_id("ChIJa147K9HX3IAR5sqXKl9ss8E"));
}

#[test]
fn query_place_id_param_is_recognised() {
    let url = "https://www.google.com/maps/search/?api=1&query=Blue+Bottle&query_place_id=ChIJ_abcdefghijk";
    assert_eq!(resolve(url), place_id("ChIJ_abcdefghijk"));
}

#[test]
fn q_place_id_prefix_is_recognised() {
    let url = "https://maps.google.com/?q=place_id:ChIJN1t_tDeuEmsRUsoyG83frY4";
    assert_eq!(resolve(url), place_id("ChIJN1t_tDeuEmsRUsoyG83frY4"));
}

#[test]
fn empty_place_id_param_is_ignored() {
    let url = "https://www.google.com/maps/place/Ritual+Coffee?place_id=";
    assert_eq!(resolve(url), query("Ritual Coffee"));
}

#[test]
fn place_id_param_beats_data_segment() {
    let url = "https://www.google.com/maps/place/X/data=!4m2!3m1!1s0x1:0x2?place_id=ChIJexplicit_id";
    assert_eq!(resolve(url), place_id("ChIJexplicit_id"));
}

// ---------------------------------------------------------------------------
// data= segment
// ---------------------------------------------------------------------------

#[test]
fn sightglass_feature_id_found_in_data_segment() {
    let url = "https://www.google.com/maps/place/Sightglass+Coffee/data=!4m2!3m1!1s0x808580af3cd399d1:0xffceeb92a11a5a6d";
    assert_eq!(
        resolve(url),
        place_id("0x808580af3cd399d1:0xffceeb92a11a5a6d")
    );
}

#[test]
fn data_segment_after_coordinates_is_scanned() {
    let url = "https://www.google.com/maps/place/Four+Barrel+Coffee/@37.7670,-122.4220,17z/data=!3m1!4b1!4m6!3m5!1s0x808f7e2300a6b0c7:0x37c2ec6bcb8f8e2b!8m2!3d37.767!4d-122.422";
    assert_eq!(
        resolve(url),
        place_id("0x808f7e2300a6b0c7:0x37c2ec6bcb8f8e2b")
    );
}

#[test]
fn places_id_token_beats_feature_id_token() {
    let url = "https://www.google.com/maps/place/X/data=!4m7!3m6!1s0xabc:0xdef!8m2!3d1!4d2!19sChIJa147K9HX3IAR5sqXKl9ss8E";
    assert_eq!(resolve(url), place_id("ChIJa147K9HX3IAR5sqXKl9ss8E"));
}

#[test]
fn data_without_id_falls_back_to_name() {
    let url = "https://www.google.com/maps/place/Linea+Caffe/data=!3m1!4b1";
    assert_eq!(resolve(url), query("Linea Caffe"));
}

#[test]
fn scan_data_tokens_ignores_non_string_tokens() {
    assert_eq!(scan_data_tokens("!3d37.7!4d-122.4!8m2"), None);
    assert_eq!(
        scan_data_tokens("!1s0x1a:0x2b"),
        Some("0x1a:0x2b".to_owned())
    );
}

// ---------------------------------------------------------------------------
// /place/<name> segment
// ---------------------------------------------------------------------------

#[test]
fn name_with_pluses_becomes_spaces() {
    let url = "https://www.google.com/maps/place/Name+With+Pluses/@1,2,3z";
    assert_eq!(resolve(url), query("Name With Pluses"));
}

#[test]
fn name_is_percent_decoded() {
    let url = "https://www.google.com/maps/place/Caf%C3%A9+de+Flore/";
    assert_eq!(resolve(url), query("Café de Flore"));
}

#[test]
fn dashes_become_spaces() {
    let url = "https://www.google.com/maps/place/Blue-Bottle-Coffee";
    assert_eq!(resolve(url), query("Blue Bottle Coffee"));
}

#[test]
fn encoded_plus_survives_as_literal() {
    let url = "https://www.google.com/maps/place/Harris+%2B+Hoole";
    assert_eq!(resolve(url), query("Harris + Hoole"));
}

#[test]
fn double_encoded_name_is_decoded_twice() {
    let url = "https://www.google.com/maps/place/Redemption%2520Roasters";
    assert_eq!(resolve(url), query("Redemption Roasters"));
}

#[test]
fn invalid_utf8_name_is_malformed() {
    let url = "https://www.google.com/maps/place/%FF%FE";
    assert_eq!(
        resolve(url),
        ResolvedIdentifier::Unresolved(UnresolvedReason::Malformed)
    );
}

#[test]
fn coordinate_only_segment_is_empty_name() {
    let url = "https://www.google.com/maps/place/@37.7,-122.4,17z";
    assert_eq!(
        resolve(url),
        ResolvedIdentifier::Unresolved(UnresolvedReason::EmptyName)
    );
}

#[test]
fn place_name_helper_matches_resolver_fallback() {
    let url = "https://www.google.com/maps/place/Sightglass+Coffee/data=!4m2!3m1!1s0x1:0x2";
    assert_eq!(place_name(url).as_deref(), Some("Sightglass Coffee"));
}

#[test]
fn feature_id_shape_is_distinguished_from_places_id() {
    assert!(is_feature_id("0x808580af3cd399d1:0xffceeb92a11a5a6d"));
    assert!(!is_feature_id("ChIJa147K9HX3IAR5sqXKl9ss8E"));
    assert!(!is_feature_id("0x808580af3cd399d1"));
}

// ---------------------------------------------------------------------------
// unresolved
// ---------------------------------------------------------------------------

#[test]
fn url_without_place_segment_is_unresolved() {
    let url = "https://www.google.com/maps/@37.7749,-122.4194,14z";
    assert_eq!(
        resolve(url),
        ResolvedIdentifier::Unresolved(UnresolvedReason::NoPlaceSegment)
    );
}

#[test]
fn short_link_is_unresolved() {
    assert!(resolve("https://maps.app.goo.gl/AbCdEf123").is_unresolved());
}

#[test]
fn missing_scheme_is_malformed() {
    assert_eq!(
        resolve("www.google.com/maps/place/Sightglass+Coffee"),
        ResolvedIdentifier::Unresolved(UnresolvedReason::Malformed)
    );
}

#[test]
fn truncated_url_is_unresolved_not_panic() {
    assert!(resolve("https://").is_unresolved());
    assert!(resolve("https://www.google.com/maps/pla").is_unresolved());
    assert!(resolve("").is_unresolved());
}

#[test]
fn non_http_scheme_is_malformed() {
    assert_eq!(
        resolve("ftp://www.google.com/maps/place/X"),
        ResolvedIdentifier::Unresolved(UnresolvedReason::Malformed)
    );
}

#[test]
fn decode_name_collapses_whitespace() {
    assert_eq!(decode_name("++Ritual++Roasters+").unwrap(), "Ritual Roasters");
}
