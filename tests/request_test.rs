//! App link round trips and request handling

use stylist::profile::{BodyShape, HeightBand, Mood, Occasion, SkinTone, StyleProfile};
use stylist::request::{bookmarklet, StyleRequest};

const APP_URL: &str = "https://stylist.example/";

#[test]
fn app_link_round_trip_default_profile() {
    let mut request = StyleRequest::new(
        "https://example.com/women/jackets/black-puffer-jacket-98213?size=M&color=black",
        StyleProfile::default(),
    );
    request.auto = true;

    let link = request.to_app_link(APP_URL).unwrap();
    assert!(link.starts_with("https://stylist.example/?u="));
    assert!(link.ends_with("&auto=1"));

    let parsed = StyleRequest::from_app_link(&link, StyleProfile::default()).unwrap();
    assert_eq!(parsed, request);
}

#[test]
fn app_link_round_trip_custom_profile() {
    let profile = StyleProfile {
        body_shape: BodyShape::Pear,
        skin_tone: SkinTone::Dark,
        height: HeightBand::Tall,
        occasion: Occasion::Date,
        mood: Mood::Playful,
    };
    let mut request = StyleRequest::new("https://shop.example/a/b/c", profile);
    request.short = false;

    let link = request.to_app_link(APP_URL).unwrap();
    assert!(link.contains("body=pear"));
    assert!(link.contains("short=0"));
    assert!(!link.contains("auto="));

    let parsed = StyleRequest::from_app_link(&link, StyleProfile::default()).unwrap();
    assert_eq!(parsed, request);
}

#[test]
fn app_link_replaces_existing_query() {
    let request = StyleRequest::new("https://shop.example/a", StyleProfile::default());
    let link = request.to_app_link("https://stylist.example/?u=old&auto=1").unwrap();
    let parsed = StyleRequest::from_app_link(&link, StyleProfile::default()).unwrap();
    assert_eq!(parsed.link, "https://shop.example/a");
    assert!(!parsed.auto);
}

#[test]
fn bookmarklet_link_is_understood() {
    // What encodeURIComponent produces for the product page
    let app_link = "https://stylist.example?u=https%3A%2F%2Fshop.example%2Fwomen%2Fcoats%2Fwool-coat%3Fv%3D2&auto=1";
    let request = StyleRequest::from_app_link(app_link, StyleProfile::default()).unwrap();
    assert_eq!(request.link, "https://shop.example/women/coats/wool-coat?v=2");
    assert!(request.auto);
    assert!(request.validate().is_ok());

    assert!(bookmarklet("https://stylist.example").contains("encodeURIComponent(location.href)"));
}

#[test]
fn missing_link_fails_validation() {
    let request = StyleRequest::from_app_link("https://stylist.example/?auto=1", StyleProfile::default()).unwrap();
    assert!(request.link.is_empty());
    assert!(request.validate().is_err());
}

#[test]
fn saved_profile_is_base_for_query() {
    let saved = StyleProfile {
        skin_tone: SkinTone::Light,
        mood: Mood::Confident,
        ..StyleProfile::default()
    };
    let request = StyleRequest::from_query("u=https://shop.example/x&mood=trendy", saved);
    assert_eq!(request.profile.skin_tone, SkinTone::Light);
    assert_eq!(request.profile.mood, Mood::Trendy);
}
