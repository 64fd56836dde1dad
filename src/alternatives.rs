//! Shop alternatives - guess "similar items" links on the same storefront
//!
//! Everything here is derived from the product URL alone: parent category
//! pages come from the path, search pages from common storefront query
//! conventions. Nothing is fetched, so every search link is a best-effort
//! guess and callers should present it as such.
//!
//! None of the functions in this module return errors. Malformed input
//! produces the fallback keyword phrase or an empty candidate list.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Keyword phrase used when nothing usable can be read from the URL
pub const FALLBACK_KEYWORDS: &str = "fashion";

/// Upper bound on the number of candidates returned by [`build_alternatives`]
pub const MAX_ALTERNATIVES: usize = 3;

/// Default number of slug tokens kept in a keyword phrase
pub const DEFAULT_KEYWORD_TOKENS: usize = 3;

/// Default number of storefront search guesses kept
pub const DEFAULT_SEARCH_LINKS: usize = 2;

pub const LABEL_CATEGORY: &str = "Category (same shop)";
pub const LABEL_BROADER_CATEGORY: &str = "Broader category";

const WEB_SEARCH_BASE: &str = "https://www.google.com/search?q=";

/// Storefront search paths in priority order; the encoded query is appended.
pub const SEARCH_PATTERNS: &[&str] = &[
    "/search?q=",
    "/zoeken?query=",
    "/s?searchTerm=",
    "/search?text=",
    "/catalogsearch/result/?q=",
];

const PAGE_EXTENSIONS: &[&str] = &[".html", ".htm", ".php", ".aspx", ".jsp"];

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+").expect("Invalid digit regex")
});

static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[-_]+").expect("Invalid separator regex")
});

/// Escapes left behind when a slug is not valid UTF-8 once decoded
static PERCENT_ESCAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%[0-9A-Fa-f]{2}").expect("Invalid percent escape regex")
});

/// "nl", "en-gb", "de_DE"
static LOCALE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]{2}(?:[-_][A-Za-z]{2})?$").expect("Invalid locale regex")
});

/// A labelled link to somewhere the user might find similar items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateLink {
    /// Short human-readable description (e.g., "Broader category")
    pub label: String,
    /// Absolute URL
    pub url: String,
}

impl CandidateLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Tuning knobs for [`build_alternatives_with`]. Also the `[links]` table of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkOptions {
    /// Maximum slug tokens in the keyword phrase (3..=8)
    #[serde(default = "default_keyword_tokens")]
    pub keyword_tokens: usize,

    /// How many storefront search guesses to offer
    #[serde(default = "default_search_links")]
    pub search_links: usize,

    /// Always append a site-scoped web search after the shop searches
    #[serde(default)]
    pub include_web_search: bool,
}

fn default_keyword_tokens() -> usize {
    DEFAULT_KEYWORD_TOKENS
}

fn default_search_links() -> usize {
    DEFAULT_SEARCH_LINKS
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            keyword_tokens: default_keyword_tokens(),
            search_links: default_search_links(),
            include_web_search: false,
        }
    }
}

/// Parse an absolute http(s) URL that has a host
fn parse_product_url(input: &str) -> Option<Url> {
    let url = Url::parse(input.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Some(url),
        _ => None,
    }
}

/// Whether the input looks like a product page link we can work with
pub fn is_product_url(input: &str) -> bool {
    parse_product_url(input).is_some()
}

/// scheme://host[:port]
fn origin(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    }
}

fn path_segments(url: &Url) -> Vec<&str> {
    url.path().split('/').filter(|s| !s.is_empty()).collect()
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}

fn strip_page_extension(slug: &str) -> &str {
    let lower = slug.to_ascii_lowercase();
    for ext in PAGE_EXTENSIONS {
        if lower.ends_with(ext) {
            return &slug[..slug.len() - ext.len()];
        }
    }
    slug
}

/// Guess a search phrase from the product slug (last path segment)
///
/// `https://example.com/women/jackets/black-puffer-jacket-98213` gives
/// `"black puffer jacket"`. Never returns an empty string.
pub fn extract_keywords(url: &str) -> String {
    extract_keywords_with(url, DEFAULT_KEYWORD_TOKENS)
}

/// [`extract_keywords`] with an explicit token cap
pub fn extract_keywords_with(url: &str, max_tokens: usize) -> String {
    let Some(parsed) = parse_product_url(url) else {
        return FALLBACK_KEYWORDS.to_string();
    };

    let raw_slug = parsed
        .path()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    let decoded = match urlencoding::decode(raw_slug) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => PERCENT_ESCAPE_RE.replace_all(raw_slug, " ").into_owned(),
    };
    let slug = strip_page_extension(&decoded);

    // SKUs and IDs are usually digit runs glued onto the slug
    let without_digits = DIGITS_RE.replace_all(slug, " ");

    let tokens: Vec<String> = SEPARATOR_RE
        .split(&without_digits)
        .map(|token| token.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
        .filter(|token| token.chars().count() > 1)
        .take(max_tokens)
        .collect();

    if tokens.is_empty() {
        FALLBACK_KEYWORDS.to_string()
    } else {
        tokens.join(" ")
    }
}

/// Parent category pages of the product: the immediate parent, then one level up
pub fn category_candidates(url: &str) -> Vec<String> {
    let Some(parsed) = parse_product_url(url) else {
        return Vec::new();
    };

    let segments = path_segments(&parsed);
    let origin = origin(&parsed);
    let mut candidates = Vec::new();

    if segments.len() >= 2 {
        candidates.push(format!("{}/{}/", origin, segments[..segments.len() - 1].join("/")));
    }
    if segments.len() >= 3 {
        candidates.push(format!("{}/{}/", origin, segments[..segments.len() - 2].join("/")));
    }

    dedup_preserving_order(candidates)
}

/// First path segment when it looks like a locale prefix ("/nl-nl/dames/...")
fn locale_prefix(url: &Url) -> Option<String> {
    let segments = path_segments(url);
    if segments.len() < 2 {
        return None;
    }
    let first = segments[0];
    LOCALE_RE.is_match(first).then(|| first.to_string())
}

/// Guess up to `limit` storefront search URLs for `query`, in fixed priority order
pub fn build_search_links(url: &str, query: &str, limit: usize) -> Vec<String> {
    let Some(parsed) = parse_product_url(url) else {
        return Vec::new();
    };

    let origin = origin(&parsed);
    let encoded = urlencoding::encode(query);

    let mut paths: Vec<String> = SEARCH_PATTERNS
        .iter()
        .map(|pattern| format!("{}{}", pattern, encoded))
        .collect();
    if let Some(locale) = locale_prefix(&parsed) {
        paths.push(format!("/{}/search?q={}", locale, encoded));
    }

    let mut links = dedup_preserving_order(
        paths.into_iter().map(|path| format!("{}{}", origin, path)).collect(),
    );
    links.truncate(limit);
    links
}

/// General web search scoped to the product's storefront (`site:<host> <query>`)
pub fn fallback_search(url: &str, query: &str) -> String {
    let host = parse_product_url(url).and_then(|u| u.host_str().map(str::to_string));
    let scoped = match host {
        Some(host) => format!("site:{} {}", host, query),
        None => query.to_string(),
    };
    format!("{}{}", WEB_SEARCH_BASE, urlencoding::encode(&scoped))
}

/// Build at most [`MAX_ALTERNATIVES`] same-shop links for a product URL
pub fn build_alternatives(url: &str) -> Vec<CandidateLink> {
    build_alternatives_with(url, &LinkOptions::default())
}

/// [`build_alternatives`] with explicit options
pub fn build_alternatives_with(url: &str, options: &LinkOptions) -> Vec<CandidateLink> {
    let url = url.trim();
    if url.is_empty() {
        return Vec::new();
    }
    if !is_product_url(url) {
        debug!(%url, "not a product URL, no alternatives");
        return Vec::new();
    }

    let keywords = extract_keywords_with(url, options.keyword_tokens);
    let mut items = Vec::new();

    let mut categories = category_candidates(url).into_iter();
    if let Some(parent) = categories.next() {
        items.push(CandidateLink::new(LABEL_CATEGORY, parent));
    }
    if let Some(broader) = categories.next() {
        items.push(CandidateLink::new(LABEL_BROADER_CATEGORY, broader));
    }

    let searches = build_search_links(url, &keywords, options.search_links);
    let no_shop_search = searches.is_empty();
    let search_label = format!("Search: {}", keywords);
    for search in searches {
        items.push(CandidateLink::new(search_label.as_str(), search));
    }
    if no_shop_search {
        items.push(CandidateLink::new(search_label.as_str(), fallback_search(url, &keywords)));
    } else if options.include_web_search {
        items.push(CandidateLink::new(
            format!("Web search: {}", keywords),
            fallback_search(url, &keywords),
        ));
    }

    let mut seen = HashSet::new();
    let alternatives: Vec<CandidateLink> = items
        .into_iter()
        .filter(|item| seen.insert(item.url.clone()))
        .take(MAX_ALTERNATIVES)
        .collect();

    debug!(%url, %keywords, count = alternatives.len(), "built shop alternatives");
    alternatives
}
