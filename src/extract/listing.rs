use once_cell::sync::Lazy;
use scraper::Html;
use tracing::debug;
use crate::error::{AppError, Result};
use crate::fetch::{Gateway, HttpGet};
use crate::html::{Find, Query};
use crate::site::NationalSite;
use super::detail::get_site_instance;

static RESULTS_AREA: Lazy<Query> = Lazy::new(|| Query::tag("div").id("parkListResultsArea"));
static HEADING: Lazy<Query> = Lazy::new(|| Query::tag("h3"));
static LINK: Lazy<Query> = Lazy::new(|| Query::tag("a"));

/// Fetches a state's listing page and extracts every site on it, in page order.
pub fn get_sites_for_state<C: HttpGet>(
    gateway: &mut Gateway<C>,
    base_url: &str,
    state_url: &str,
) -> Result<Vec<NationalSite>> {
    let html = gateway.fetch(state_url)?;
    let site_urls = parse_site_urls(&html, base_url, state_url)?;
    debug!("Found {} sites on {}", site_urls.len(), state_url);

    site_urls
        .iter()
        .map(|url| get_site_instance(gateway, url))
        .collect()
}

/// Detail-page URLs from the headings of the results area.
///
/// Hrefs are appended to `base_url + "/"` as-is, so a root-relative href
/// yields a double slash. Cached URLs depend on that exact form.
pub fn parse_site_urls(html: &str, base_url: &str, state_url: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);

    let area = document
        .find_first(&RESULTS_AREA)
        .ok_or_else(|| AppError::missing("results area", state_url))?;

    area.find_all(&HEADING)
        .iter()
        .map(|heading| {
            heading
                .find_first(&LINK)
                .and_then(|link| link.value().attr("href"))
                .map(|href| format!("{}/{}", base_url, href))
                .ok_or_else(|| AppError::missing("site link", state_url))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResponseCache;
    use crate::fetch::stub::StubClient;

    const BASE: &str = "https://www.nps.gov";
    const STATE_URL: &str = "https://www.nps.gov/state/xx/index.htm";

    fn detail(name: &str, zip: &str) -> String {
        format!(
            r#"<a class="Hero-title">{name}</a><span class="Hero-designation">National Monument</span>
               <span itemprop="addressLocality">Town</span><span itemprop="addressRegion">XX</span>
               <span itemprop="postalCode">{zip}</span><span itemprop="telephone">555-0100</span>"#
        )
    }

    const LISTING: &str = r#"
        <div id="parkListResultsArea">
          <ul>
            <li><h4>National Monument</h4><h3><a href="/first/index.htm">First</a></h3></li>
            <li><h4>National Park</h4><h3><a href="/second/index.htm">Second</a></h3></li>
            <li><h4>Historic Site</h4><h3><a href="/third/index.htm">Third</a></h3></li>
          </ul>
        </div>
        <h3><a href="/outside/index.htm">Outside</a></h3>
    "#;

    #[test]
    fn urls_follow_document_order() {
        let urls = parse_site_urls(LISTING, BASE, STATE_URL).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://www.nps.gov//first/index.htm",
                "https://www.nps.gov//second/index.htm",
                "https://www.nps.gov//third/index.htm",
            ]
        );
    }

    #[test]
    fn sites_follow_document_order() {
        let dir = tempfile::tempdir().unwrap();
        let client = StubClient::default()
            .page(STATE_URL, LISTING)
            .page("https://www.nps.gov//first/index.htm", &detail("First", "00001"))
            .page("https://www.nps.gov//second/index.htm", &detail("Second", "00002"))
            .page("https://www.nps.gov//third/index.htm", &detail("Third", "00003"));
        let mut gw = Gateway::with_client(ResponseCache::open(dir.path().join("c.json")), client);

        let sites = get_sites_for_state(&mut gw, BASE, STATE_URL).unwrap();

        let names: Vec<&str> = sites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
        assert_eq!(sites[2].zipcode, "00003");
        assert_eq!(gw.client().call_count(), 4);
    }

    #[test]
    fn missing_results_area_fails() {
        let err = parse_site_urls("<div id=\"other\"></div>", BASE, STATE_URL).unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn empty_results_area_is_empty_list() {
        let urls = parse_site_urls("<div id=\"parkListResultsArea\"></div>", BASE, STATE_URL).unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn one_bad_detail_page_fails_the_state() {
        let dir = tempfile::tempdir().unwrap();
        let client = StubClient::default()
            .page(STATE_URL, LISTING)
            .page("https://www.nps.gov//first/index.htm", &detail("First", "00001"))
            .page("https://www.nps.gov//second/index.htm", "<p>moved</p>");
        let mut gw = Gateway::with_client(ResponseCache::open(dir.path().join("c.json")), client);

        assert!(get_sites_for_state(&mut gw, BASE, STATE_URL).is_err());
    }
}
