use std::collections::BTreeMap;
use once_cell::sync::Lazy;
use scraper::Html;
use tracing::debug;
use crate::error::{AppError, Result};
use crate::fetch::{Gateway, HttpGet};
use crate::html::{text_of, Find, Query};

/// Lowercase state name to absolute listing-page URL.
pub type StateUrlMap = BTreeMap<String, String>;

static STATE_MENU: Lazy<Query> = Lazy::new(|| {
    Query::tag("ul").class("dropdown-menu").class("SearchBar-keywordSearch")
});
static LINK: Lazy<Query> = Lazy::new(|| Query::tag("a"));

fn index_url(base_url: &str) -> String {
    format!("{}/index.htm", base_url)
}

/// Fetches the site's home page and maps each state in the search menu to
/// its listing page.
pub fn build_state_url_dict<C: HttpGet>(gateway: &mut Gateway<C>, base_url: &str) -> Result<StateUrlMap> {
    let url = index_url(base_url);
    let html = gateway.fetch(&url)?;
    let states = parse_state_urls(&html, base_url, &url)?;
    debug!("Found {} states", states.len());
    Ok(states)
}

pub fn parse_state_urls(html: &str, base_url: &str, page_url: &str) -> Result<StateUrlMap> {
    let document = Html::parse_document(html);

    let menu = document
        .find_first(&STATE_MENU)
        .ok_or_else(|| AppError::missing("state menu", page_url))?;

    let mut states = StateUrlMap::new();
    for link in menu.find_all(&LINK) {
        let Some(href) = link.value().attr("href") else {
            return Err(AppError::missing("state link href", page_url));
        };
        states.insert(text_of(&link).to_lowercase(), format!("{}{}", base_url, href));
    }

    Ok(states)
}
