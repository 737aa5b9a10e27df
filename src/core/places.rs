//! Offline place catalog, fuzzy suggestions and suggestion merging
//!
//! The catalog answers instantly and keeps search usable when the geocoding
//! service is unreachable. Remote results are merged behind it.

use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};

use crate::core::geo::Coordinate;

/// Maximum number of suggestions shown for a query
pub const MAX_SUGGESTIONS: usize = 5;

/// A place suggestion from the catalog or the geocoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Short name used for deduplication (e.g. "Mumbai")
    pub name: String,
    /// Full label shown to the user
    pub display: String,
    pub coordinate: Option<Coordinate>,
    /// `city` for catalog entries; geocoder category or place type otherwise
    pub kind: String,
    /// Located in the country the search is biased toward
    pub in_home_country: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
}

impl Place {
    /// Lower-cased, trimmed name used to detect duplicates
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

struct CatalogEntry {
    key: &'static str,
    name: &'static str,
    display: &'static str,
    lat: f64,
    lng: f64,
}

impl CatalogEntry {
    fn to_place(&self) -> Place {
        Place {
            name: self.name.to_string(),
            display: self.display.to_string(),
            coordinate: Some(Coordinate::new(self.lat, self.lng)),
            kind: "city".to_string(),
            in_home_country: true,
            bbox: None,
        }
    }
}

const fn city(
    key: &'static str,
    name: &'static str,
    display: &'static str,
    lat: f64,
    lng: f64,
) -> CatalogEntry {
    CatalogEntry {
        key,
        name,
        display,
        lat,
        lng,
    }
}

static CATALOG: &[CatalogEntry] = &[
    city("delhi", "Delhi", "Delhi, India", 28.6139, 77.2090),
    city("mumbai", "Mumbai", "Mumbai, Maharashtra, India", 19.0760, 72.8777),
    city("bangalore", "Bangalore", "Bangalore, Karnataka, India", 12.9716, 77.5946),
    city("bengaluru", "Bengaluru", "Bengaluru, Karnataka, India", 12.9716, 77.5946),
    city("chennai", "Chennai", "Chennai, Tamil Nadu, India", 13.0827, 80.2707),
    city("kolkata", "Kolkata", "Kolkata, West Bengal, India", 22.5726, 88.3639),
    city("hyderabad", "Hyderabad", "Hyderabad, Telangana, India", 17.3850, 78.4867),
    city("pune", "Pune", "Pune, Maharashtra, India", 18.5204, 73.8567),
    city("ahmedabad", "Ahmedabad", "Ahmedabad, Gujarat, India", 23.0225, 72.5714),
    city("jaipur", "Jaipur", "Jaipur, Rajasthan, India", 26.9124, 75.7873),
    city("lucknow", "Lucknow", "Lucknow, Uttar Pradesh, India", 26.8467, 80.9462),
    city("kanpur", "Kanpur", "Kanpur, Uttar Pradesh, India", 26.4499, 80.3319),
    city("nagpur", "Nagpur", "Nagpur, Maharashtra, India", 21.1458, 79.0882),
    city("indore", "Indore", "Indore, Madhya Pradesh, India", 22.7196, 75.8577),
    city("thane", "Thane", "Thane, Maharashtra, India", 19.2183, 72.9781),
    city("bhopal", "Bhopal", "Bhopal, Madhya Pradesh, India", 23.2599, 77.4126),
    city(
        "visakhapatnam",
        "Visakhapatnam",
        "Visakhapatnam, Andhra Pradesh, India",
        17.6868,
        83.2185,
    ),
    city(
        "pimpri",
        "Pimpri-Chinchwad",
        "Pimpri-Chinchwad, Maharashtra, India",
        18.6298,
        73.7997,
    ),
    city("patna", "Patna", "Patna, Bihar, India", 25.5941, 85.1376),
    city("vadodara", "Vadodara", "Vadodara, Gujarat, India", 22.3072, 73.1812),
];

/// Catalog entries whose key or name contains the query, in catalog order
pub fn search_fallback(query: &str) -> Vec<Place> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    CATALOG
        .iter()
        .filter(|entry| entry.key.contains(&term) || entry.name.to_lowercase().contains(&term))
        .take(MAX_SUGGESTIONS)
        .map(CatalogEntry::to_place)
        .collect()
}

/// Best catalog match for a query: an exact key/name hit, else the first substring hit
pub fn lookup(query: &str) -> Option<Place> {
    let term = query.trim().to_lowercase();
    CATALOG
        .iter()
        .find(|entry| entry.key == term || entry.name.to_lowercase() == term)
        .map(CatalogEntry::to_place)
        .or_else(|| search_fallback(query).into_iter().next())
}

/// Score how well `input` matches `candidate`, both lower-case
///
/// Jaro-Winkler 70% + normalized Levenshtein 30%, plus up to 20% for a
/// shared prefix of at least four characters.
fn similarity(input: &str, candidate: &str) -> f64 {
    let combined = jaro_winkler(input, candidate) * 0.7 + normalized_levenshtein(input, candidate) * 0.3;

    let prefix_len = input.chars().count().min(7);
    let mut bonus = 0.0;
    if prefix_len >= 4 {
        let input_prefix: String = input.chars().take(prefix_len).collect();
        let candidate_prefix: String = candidate.chars().take(prefix_len).collect();
        let prefix_similarity = normalized_levenshtein(&input_prefix, &candidate_prefix);
        if prefix_similarity > 0.7 {
            bonus += 0.2 * prefix_similarity;
        }
    }

    combined + bonus
}

/// Find the best fuzzy match above the 0.65 threshold
fn find_best_fuzzy_match<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let min_threshold = 0.65;
    let input_lower = input.trim().to_lowercase();

    let mut best: Option<(&str, f64)> = None;
    for &candidate in candidates {
        let score = similarity(&input_lower, &candidate.to_lowercase());
        if score >= min_threshold && best.map_or(true, |(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }

    best.map(|(candidate, _)| candidate)
}

/// Suggest a catalog city for a possibly misspelled place name
///
/// Returns `None` when the query already names a catalog city exactly.
pub fn suggest_correction(query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let exact = CATALOG
        .iter()
        .any(|entry| entry.name.eq_ignore_ascii_case(query) || entry.key.eq_ignore_ascii_case(query));
    if exact {
        return None;
    }

    let names: Vec<&str> = CATALOG.iter().map(|entry| entry.name).collect();
    find_best_fuzzy_match(query, &names).map(str::to_string)
}

/// Merge catalog results with remote ones
///
/// Catalog entries come first. Remote entries whose normalized name matches
/// a catalog entry are dropped, and home-country remote entries rank ahead of
/// the rest (stable). The result is capped at [`MAX_SUGGESTIONS`].
pub fn merge_suggestions(fallback: Vec<Place>, mut remote: Vec<Place>) -> Vec<Place> {
    remote.sort_by_key(|place| !place.in_home_country);

    let known: Vec<String> = fallback.iter().map(Place::normalized_name).collect();
    let mut merged = fallback;
    merged.extend(
        remote
            .into_iter()
            .filter(|place| !known.contains(&place.normalized_name())),
    );
    merged.truncate(MAX_SUGGESTIONS);
    merged
}
