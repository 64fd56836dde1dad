//! Live test against the configured chat-completion API
//! Requires network access and OPENAI_API_KEY; run with `--ignored`

use stylist::advice::AdviceClient;
use stylist::config::Config;
use stylist::profile::{Occasion, StyleProfile};
use stylist::request::StyleRequest;

#[test]
#[ignore]
fn live_short_advice() {
    let config = Config::default();
    let client = match AdviceClient::new(&config) {
        Ok(c) => c,
        Err(e) => {
            println!("  SKIPPED: {}", e);
            return;
        }
    };

    let profile = StyleProfile {
        occasion: Occasion::Work,
        ..StyleProfile::default()
    };
    let request = StyleRequest::new("https://example.com/women/jackets/black-puffer-jacket-98213", profile);

    let advice = client.ask(&request).expect("advice request failed");
    println!("{:#?}", advice);
    assert!(!advice.is_empty());
    assert!(advice.assessment.len() <= 5);
}
