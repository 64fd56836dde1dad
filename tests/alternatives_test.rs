//! Property-style tests for the shop alternative link builder

use std::collections::HashSet;

use stylist::alternatives::{
    build_alternatives, build_alternatives_with, build_search_links, category_candidates,
    extract_keywords, extract_keywords_with, fallback_search, LinkOptions, FALLBACK_KEYWORDS,
    LABEL_BROADER_CATEGORY, LABEL_CATEGORY, MAX_ALTERNATIVES,
};

// ============================================================================
// Sample inputs
// ============================================================================

const PRODUCT_URLS: &[&str] = &[
    "https://example.com/women/jackets/black-puffer-jacket-98213",
    "https://www.zalando.nl/dames/jurken/vero-moda-zomerjurk-black-ve121c2xb-q11.html",
    "https://shop.example/nl-nl/heren/broeken/slim-fit-chino_beige_4411/",
    "https://shop.example/p/4411",
    "https://shop.example/linen-shirt",
    "https://shop.example/",
    "http://localhost:3000/a/b/c/d/e/wool-scarf?color=red#reviews",
    "https://shop.example/c/%E2%9C%93-tee",
];

const GARBAGE: &[&str] = &[
    "",
    " ",
    "not a url",
    "://missing-scheme",
    "mailto:someone@example.com",
    "javascript:alert(1)",
    "https://",
    "%%%",
    "🧥🧥🧥",
    "-_-_-_-",
];

// ============================================================================
// extract_keywords
// ============================================================================

#[test]
fn keywords_never_empty() {
    for input in PRODUCT_URLS.iter().chain(GARBAGE) {
        let kw = extract_keywords(input);
        assert!(!kw.is_empty(), "empty keywords for {:?}", input);
        assert!(!kw.contains("  "), "double space in {:?} for {:?}", kw, input);
        assert_eq!(kw, kw.trim());
    }
}

#[test]
fn keywords_garbage_falls_back() {
    for input in GARBAGE {
        assert_eq!(extract_keywords(input), FALLBACK_KEYWORDS, "input {:?}", input);
    }
}

#[test]
fn keywords_drop_digits() {
    let kw = extract_keywords("https://shop.example/cat/blue-wool-coat-12345");
    let tokens: Vec<_> = kw.split(' ').collect();
    assert_eq!(tokens, vec!["blue", "wool", "coat"]);
    assert!(!kw.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn keywords_respect_token_cap() {
    let url = "https://shop.example/p/one-two-three-four-five-six-seven-eight-nine";
    for cap in 3..=8 {
        let kw = extract_keywords_with(url, cap);
        assert_eq!(kw.split(' ').count(), cap);
    }
}

#[test]
fn keywords_ignore_query_and_fragment() {
    assert_eq!(
        extract_keywords("http://localhost:3000/a/b/c/d/e/wool-scarf?color=red#reviews"),
        "wool scarf"
    );
}

// ============================================================================
// category_candidates
// ============================================================================

#[test]
fn categories_two_for_deep_paths() {
    let deep = [
        "https://example.com/a/b/c",
        "https://example.com/women/jackets/black-puffer-jacket-98213",
        "http://localhost:3000/a/b/c/d/e/wool-scarf",
    ];
    for url in deep {
        let cats = category_candidates(url);
        assert_eq!(cats.len(), 2, "for {}", url);
        assert!(cats[0].starts_with(&cats[1]));
        assert!(cats[0].len() > cats[1].len());

        // second is the first with exactly one segment removed
        let extra = &cats[0][cats[1].len()..];
        assert_eq!(extra.matches('/').count(), 1, "extra part {:?}", extra);
        assert!(cats.iter().all(|c| c.ends_with('/')));
    }
}

#[test]
fn categories_none_for_shallow_paths() {
    for url in ["https://example.com/", "https://example.com", "https://example.com/coat", "https://example.com//coat//"] {
        assert!(category_candidates(url).is_empty(), "for {}", url);
    }
}

#[test]
fn categories_skip_empty_segments() {
    assert_eq!(
        category_candidates("https://example.com//women///coats/long-coat"),
        vec!["https://example.com/women/coats/".to_string(), "https://example.com/women/".to_string()]
    );
}

#[test]
fn categories_garbage_is_empty() {
    for input in GARBAGE {
        assert!(category_candidates(input).is_empty(), "for {:?}", input);
    }
}

// ============================================================================
// build_search_links / fallback_search
// ============================================================================

#[test]
fn search_link_query_decodes_to_input() {
    let queries = ["black puffer jacket", "robe été", "t-shirt & jeans", "50/50 blend"];
    for q in queries {
        let links = build_search_links("https://example.com/a/b", q, 1);
        assert_eq!(links.len(), 1);
        let (_, encoded) = links[0].split_once('=').unwrap();
        assert_eq!(urlencoding::decode(encoded).unwrap(), q);
    }
}

#[test]
fn search_links_unique_and_limited() {
    for limit in 0..8 {
        let links = build_search_links("https://shop.example/en-gb/men/coat", "coat", limit);
        assert!(links.len() <= limit);
        let unique: HashSet<_> = links.iter().collect();
        assert_eq!(unique.len(), links.len());
        assert!(links.iter().all(|l| l.starts_with("https://shop.example/")));
    }
}

#[test]
fn search_links_garbage_is_empty() {
    for input in GARBAGE {
        assert!(build_search_links(input, "coat", 5).is_empty());
    }
}

#[test]
fn fallback_search_is_site_scoped() {
    let url = fallback_search("https://www.zalando.nl/dames/jurk", "zomer jurk");
    assert!(url.starts_with("https://www.google.com/search?q="));
    let (_, q) = url.split_once("?q=").unwrap();
    assert_eq!(urlencoding::decode(q).unwrap(), "site:www.zalando.nl zomer jurk");
}

// ============================================================================
// build_alternatives
// ============================================================================

#[test]
fn alternatives_bounded_and_unique() {
    let options = [
        LinkOptions::default(),
        LinkOptions { include_web_search: true, ..LinkOptions::default() },
        LinkOptions { search_links: 0, ..LinkOptions::default() },
        LinkOptions { search_links: 10, keyword_tokens: 8, include_web_search: true },
    ];
    for input in PRODUCT_URLS.iter().chain(GARBAGE) {
        for opts in &options {
            let alts = build_alternatives_with(input, opts);
            assert!(alts.len() <= MAX_ALTERNATIVES);
            let urls: HashSet<_> = alts.iter().map(|a| a.url.as_str()).collect();
            assert_eq!(urls.len(), alts.len(), "duplicate URL for {:?}", input);
        }
    }
}

#[test]
fn alternatives_empty_input() {
    assert!(build_alternatives("").is_empty());
}

#[test]
fn alternatives_idempotent() {
    for input in PRODUCT_URLS {
        assert_eq!(build_alternatives(input), build_alternatives(input));
    }
}

#[test]
fn alternatives_end_to_end() {
    let u = "https://example.com/women/jackets/black-puffer-jacket-98213";
    assert_eq!(extract_keywords(u), "black puffer jacket");
    assert_eq!(
        category_candidates(u),
        vec!["https://example.com/women/jackets/", "https://example.com/women/"]
    );

    let alts = build_alternatives(u);
    let pairs: Vec<(&str, &str)> = alts.iter().map(|a| (a.label.as_str(), a.url.as_str())).collect();
    assert_eq!(
        pairs,
        vec![
            (LABEL_CATEGORY, "https://example.com/women/jackets/"),
            (LABEL_BROADER_CATEGORY, "https://example.com/women/"),
            ("Search: black puffer jacket", "https://example.com/search?q=black%20puffer%20jacket"),
        ]
    );
}

#[test]
fn alternatives_categories_come_first() {
    let alts = build_alternatives("https://shop.example/heren/broeken/chino");
    assert_eq!(alts[0].label, LABEL_CATEGORY);
    assert_eq!(alts[1].label, LABEL_BROADER_CATEGORY);
    assert!(alts[2].label.starts_with("Search: "));
}

#[test]
fn alternatives_web_search_appended_when_room() {
    let options = LinkOptions { include_web_search: true, ..LinkOptions::default() };
    let alts = build_alternatives_with("https://shop.example/chino-beige", &options);
    assert_eq!(alts.len(), 3);
    assert_eq!(alts[2].label, "Web search: chino beige");
}
