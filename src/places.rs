use std::collections::BTreeMap;
use std::fmt;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;
use crate::error::{AppError, Result};
use crate::fetch::{Gateway, HttpGet};
use crate::site::NationalSite;

pub const RADIUS_MILES: &str = "10";
pub const MAX_MATCHES: &str = "10";

#[derive(Deserialize)]
struct RadiusResponse {
    #[serde(rename = "searchResults", default)]
    search_results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    name: String,
    fields: PlaceFields,
}

#[derive(Deserialize)]
struct PlaceFields {
    #[serde(default)]
    group_sic_code_name_ext: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    city: String,
}

/// Parameters sent with a radius search.
#[derive(Clone, PartialEq, Eq)]
pub struct RadiusQuery {
    pub key: String,
    pub origin: String,
    pub radius: String,
    pub max_matches: String,
    pub ambiguities: String,
    pub outformat: String,
}

impl RadiusQuery {
    pub fn for_site(api_key: &str, site: &NationalSite) -> Self {
        RadiusQuery {
            key: api_key.to_string(),
            origin: site.zipcode.clone(),
            radius: RADIUS_MILES.to_string(),
            max_matches: MAX_MATCHES.to_string(),
            ambiguities: "ignore".to_string(),
            outformat: "json".to_string(),
        }
    }

    /// Query pairs in the order they are encoded.
    pub fn pairs(&self) -> [(&'static str, &str); 6] {
        [
            ("key", self.key.as_str()),
            ("origin", self.origin.as_str()),
            ("radius", self.radius.as_str()),
            ("maxMatches", self.max_matches.as_str()),
            ("ambiguities", self.ambiguities.as_str()),
            ("outformat", self.outformat.as_str()),
        ]
    }

    /// The full request URL. Also the cache key, so the encoding must stay stable.
    pub fn url(&self, endpoint: &str) -> Result<String> {
        let url = Url::parse_with_params(endpoint, self.pairs())
            .map_err(|e| AppError::ConfigError(format!("Invalid places endpoint '{}': {}", endpoint, e)))?;
        Ok(url.to_string())
    }
}

impl fmt::Debug for RadiusQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadiusQuery")
            .field("key", &"<redacted>")
            .field("origin", &self.origin)
            .field("radius", &self.radius)
            .field("max_matches", &self.max_matches)
            .field("ambiguities", &self.ambiguities)
            .field("outformat", &self.outformat)
            .finish()
    }
}

/// The query that was sent and the places found, ranked from 1.
#[derive(Debug, Clone)]
pub struct NearbyPlaces {
    pub query: RadiusQuery,
    pub results: BTreeMap<usize, String>,
}

impl NearbyPlaces {
    /// Display lines in rank order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.results.values().map(String::as_str)
    }
}

pub fn get_nearby_places<C: HttpGet>(
    gateway: &mut Gateway<C>,
    endpoint: &str,
    api_key: &str,
    site: &NationalSite,
) -> Result<NearbyPlaces> {
    let query = RadiusQuery::for_site(api_key, site);
    let url = query.url(endpoint)?;
    let body = gateway.fetch(&url)?;
    let results = parse_places(&body)?;
    debug!("{} places near {}", results.len(), site.name);
    Ok(NearbyPlaces { query, results })
}

/// A body without `searchResults` gives no places rather than an error.
pub fn parse_places(body: &str) -> Result<BTreeMap<usize, String>> {
    let response: RadiusResponse = serde_json::from_str(body)?;

    Ok(response
        .search_results
        .iter()
        .enumerate()
        .map(|(i, place)| (i + 1, place_line(place)))
        .collect())
}

fn place_line(place: &SearchResult) -> String {
    let or = |value: &str, fallback: &'static str| {
        if value.is_empty() { fallback.to_string() } else { value.to_string() }
    };
    format!(
        "- {} ({}): {}, {}",
        place.name,
        or(&place.fields.group_sic_code_name_ext, "no category"),
        or(&place.fields.address, "no address"),
        or(&place.fields.city, "no city"),
    )
}
