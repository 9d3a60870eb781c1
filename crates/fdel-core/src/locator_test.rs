use super::*;

fn sample_route() -> Route {
    Route {
        route_name: "Saturday run #3".to_string(),
        pickup_location_key: "depot".to_string(),
        date: "2026-10-17".to_string(),
        time: "13:15".to_string(),
        stops: vec![
            Stop::new("55 Rue Laurier E, apt 4", 2, "ring \"twice\" & wait"),
            Stop::blank(),
            Stop::new("1200 St. Laurent Blvd", 0, "éèà / 100%"),
        ],
    }
}

#[test]
fn round_trip_reproduces_route() {
    let route = sample_route();
    let locator = encode(&route).unwrap();
    assert_eq!(decode(&locator).unwrap(), route);
}

#[test]
fn round_trip_default_route() {
    let route = Route::default();
    assert_eq!(decode(&encode(&route).unwrap()).unwrap(), route);
}

#[test]
fn encoded_locator_is_fragment_safe() {
    let locator = encode(&sample_route()).unwrap();
    for forbidden in ['#', ' ', '"', '{', '}', '&', '/'] {
        assert!(
            !locator.contains(forbidden),
            "locator should not contain {forbidden:?}: {locator}"
        );
    }
}

#[test]
fn encode_rejects_empty_stop_list() {
    let route = Route {
        stops: Vec::new(),
        ..Route::default()
    };
    assert!(matches!(encode(&route), Err(LocatorError::EmptyRoute)));
}

#[test]
fn decode_accepts_leading_hash() {
    let route = sample_route();
    let locator = format!("#{}", encode(&route).unwrap());
    assert_eq!(decode(&locator).unwrap(), route);
}

#[test]
fn decode_fills_missing_time_from_defaults() {
    let json = r#"{"routeName":"North","pickupLocationKey":"depot","date":"2026-11-02","stops":[{"address":"9 Oak Ave","quantity":4,"notes":"porch"}]}"#;
    let route = decode(json).unwrap();
    assert_eq!(route.time, crate::route::DEFAULT_TIME);
    assert_eq!(route.route_name, "North");
    assert_eq!(route.pickup_location_key, "depot");
    assert_eq!(route.date, "2026-11-02");
    assert_eq!(route.stops, vec![Stop::new("9 Oak Ave", 4, "porch")]);
}

#[test]
fn decode_treats_empty_strings_as_missing() {
    let json = r#"{"pickupLocationKey":"","time":"","stops":[{"address":"9 Oak Ave","quantity":1,"notes":""}]}"#;
    let route = decode(json).unwrap();
    assert_eq!(
        route.pickup_location_key,
        crate::route::DEFAULT_PICKUP_LOCATION_KEY
    );
    assert_eq!(route.time, crate::route::DEFAULT_TIME);
}

#[test]
fn decode_empty_stop_list_falls_back_to_placeholder() {
    let route = decode(r#"{"routeName":"x","stops":[]}"#).unwrap();
    assert_eq!(route.stops, vec![Stop::blank()]);
}

#[test]
fn decode_reads_legacy_entries_with_text_quantities() {
    let legacy = r#"{"entries":[{"address":"300 Bank St","quantity":"3","notes":"buzz 12"},{"address":"","quantity":"","notes":""}]}"#;
    let encoded = utf8_percent_encode(legacy, LOCATOR_ENCODE_SET).to_string();
    let route = decode(&encoded).unwrap();
    assert_eq!(
        route.stops,
        vec![Stop::new("300 Bank St", 3, "buzz 12"), Stop::blank()]
    );
    assert_eq!(route.time, crate::route::DEFAULT_TIME);
}

#[test]
fn decode_fills_missing_stop_fields() {
    let route = decode(r#"{"stops":[{"address":"9 Oak Ave"}]}"#).unwrap();
    assert_eq!(route.stops, vec![Stop::new("9 Oak Ave", 1, "")]);
}

#[test]
fn decode_rejects_malformed_json() {
    assert!(matches!(
        decode("%7B%22routeName%22%3A"),
        Err(LocatorError::Malformed(_))
    ));
}

#[test]
fn decode_rejects_invalid_utf8() {
    assert!(matches!(decode("%FF%FE"), Err(LocatorError::Encoding(_))));
}

#[test]
fn decode_or_default_falls_back_on_garbage() {
    assert_eq!(decode_or_default("not json at all"), Route::default());
    assert_eq!(decode_or_default(""), Route::default());
    assert_eq!(decode_or_default("#"), Route::default());
}

#[test]
fn share_link_embeds_locator_as_fragment() {
    assert_eq!(share_link("route.html", "abc"), "route.html#abc");
}
