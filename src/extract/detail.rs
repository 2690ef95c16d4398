use once_cell::sync::Lazy;
use scraper::Html;
use tracing::debug;
use crate::error::{AppError, Result};
use crate::fetch::{Gateway, HttpGet};
use crate::html::{text_of, Find, Query};
use crate::site::NationalSite;

pub const MISSING_ADDRESS: &str = "Missing address";

static DESIGNATION: Lazy<Query> = Lazy::new(|| Query::tag("span").class("Hero-designation"));
static TITLE: Lazy<Query> = Lazy::new(|| Query::tag("a").class("Hero-title"));
static LOCALITY: Lazy<Query> = Lazy::new(|| Query::tag("span").attr("itemprop", "addressLocality"));
static REGION: Lazy<Query> = Lazy::new(|| Query::tag("span").attr("itemprop", "addressRegion"));
static POSTAL_CODE: Lazy<Query> = Lazy::new(|| Query::tag("span").attr("itemprop", "postalCode"));
static TELEPHONE: Lazy<Query> = Lazy::new(|| Query::tag("span").attr("itemprop", "telephone"));

/// Fetches a site's detail page and extracts it.
pub fn get_site_instance<C: HttpGet>(gateway: &mut Gateway<C>, site_url: &str) -> Result<NationalSite> {
    let html = gateway.fetch(site_url)?;
    parse_site(&html, site_url)
}

/// Category, name and phone are required. A missing locality or region
/// turns the whole address into [`MISSING_ADDRESS`]; a missing postal code
/// leaves the zipcode empty.
pub fn parse_site(html: &str, site_url: &str) -> Result<NationalSite> {
    let doc = Html::parse_document(html);

    let required = |query: &Query, what: &str| -> Result<String> {
        doc.find_first(query)
            .map(|el| text_of(&el).trim().to_string())
            .ok_or_else(|| AppError::missing(what, site_url))
    };

    let category = required(&*DESIGNATION, "designation")?;
    let name = required(&*TITLE, "title")?;

    let address = match (doc.find_first(&LOCALITY), doc.find_first(&REGION)) {
        (Some(locality), Some(region)) => {
            format!("{}, {}", text_of(&locality), text_of(&region).trim())
        }
        _ => MISSING_ADDRESS.to_string(),
    };

    let zipcode = doc
        .find_first(&POSTAL_CODE)
        .map(|el| text_of(&el).trim().to_string())
        .unwrap_or_default();

    let phone = required(&*TELEPHONE, "telephone")?;

    debug!("Extracted site {} from {}", name, site_url);
    Ok(NationalSite::new(category, name, address, zipcode, phone))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(address: &str, zip: &str) -> String {
        format!(
            r#"<html><body>
                <div class="Hero-titleContainer">
                  <a href="/isro/" class="Hero-title">Isle Royale</a>
                  <span class="Hero-designation">
                      National Park
                  </span>
                </div>
                <div class="vcard">
                  <p class="adr">{address}{zip}</p>
                  <span itemprop="telephone" class="tel">
                    (906) 482-0984
                  </span>
                </div>
            </body></html>"#
        )
    }

    const FULL_ADDRESS: &str = r#"<span itemprop="addressLocality">Houghton</span>, <span itemprop="addressRegion" class="region"> MI </span>"#;
    const ZIP: &str = r#"<span itemprop="postalCode" class="postal-code">49931 </span>"#;

    #[test]
    fn all_fields_present() {
        let site = parse_site(&page(FULL_ADDRESS, ZIP), "https://www.nps.gov/isro/").unwrap();
        assert_eq!(
            site,
            NationalSite::new("National Park", "Isle Royale", "Houghton, MI", "49931", "(906) 482-0984")
        );
    }

    #[test]
    fn missing_postal_code_gives_empty_zipcode() {
        let site = parse_site(&page(FULL_ADDRESS, ""), "u").unwrap();
        assert_eq!(site.zipcode, "");
        assert_eq!(site.address, "Houghton, MI");
    }

    #[test]
    fn missing_locality_and_region_gives_placeholder() {
        let site = parse_site(&page("", ZIP), "u").unwrap();
        assert_eq!(site.address, MISSING_ADDRESS);
        assert_eq!(site.zipcode, "49931");
    }

    #[test]
    fn missing_region_alone_replaces_whole_address() {
        let only_locality = r#"<span itemprop="addressLocality">Houghton</span>"#;
        let site = parse_site(&page(only_locality, ZIP), "u").unwrap();
        assert_eq!(site.address, MISSING_ADDRESS);
    }

    #[test]
    fn missing_telephone_fails() {
        let html = page(FULL_ADDRESS, ZIP).replace(r#"itemprop="telephone""#, "");
        let err = parse_site(&html, "https://www.nps.gov/isro/").unwrap_err();
        assert!(matches!(err, AppError::ParseError(msg) if msg.contains("telephone")));
    }

    #[test]
    fn missing_title_fails() {
        let html = page(FULL_ADDRESS, ZIP).replace("Hero-title\"", "Hero-heading\"");
        assert!(matches!(parse_site(&html, "u"), Err(AppError::ParseError(_))));
    }
}
