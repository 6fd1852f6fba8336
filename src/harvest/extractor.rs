//! Item extraction from listing-page markup
//!
//! A listing page carries a sequence of product cards
//! (`article.product_pod`), each exposing a linked title and a
//! currency-prefixed price. Extraction is a pure function of the fetched
//! content; document order is preserved.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

/// A single extracted catalogue item
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Display name, taken from the title attribute of the card link
    pub name: String,

    /// Price in catalogue currency units, non-negative
    pub price: f64,

    /// Absolute URL of the item detail page
    pub detail_url: String,
}

/// Failure to extract items from a page that was fetched successfully
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("product card {index} is missing its title link")]
    MissingTitleLink { index: usize },

    #[error("product card {index} has no title attribute")]
    MissingTitle { index: usize },

    #[error("product card {index} has no detail link")]
    MissingHref { index: usize },

    #[error("product card {index} has no price element")]
    MissingPrice { index: usize },

    #[error("unresolvable detail link '{href}': {source}")]
    BadHref {
        href: String,
        source: url::ParseError,
    },

    #[error("unparsable price text '{0}'")]
    BadPrice(String),
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector(e.to_string()))
}

/// Extracts all items from a listing page
///
/// Cards are visited in document order. A malformed card fails the whole
/// page: per-page failure is the unit of degradation, matching the fetch
/// layer.
///
/// # Arguments
///
/// * `html` - The fetched page body
/// * `base_url` - Catalogue base the relative detail links are joined against
///
/// # Returns
///
/// * `Ok(Vec<Item>)` - Items in document order (possibly empty)
/// * `Err(ExtractError)` - The page does not match the expected card structure
pub fn extract_items(html: &str, base_url: &Url) -> Result<Vec<Item>, ExtractError> {
    let document = Html::parse_document(html);

    let card_selector = selector("article.product_pod")?;
    let link_selector = selector("h3 a")?;
    let price_selector = selector("p.price_color")?;

    let mut items = Vec::new();

    for (index, card) in document.select(&card_selector).enumerate() {
        let link = card
            .select(&link_selector)
            .next()
            .ok_or(ExtractError::MissingTitleLink { index })?;

        let name = link
            .value()
            .attr("title")
            .ok_or(ExtractError::MissingTitle { index })?
            .to_string();

        let href = link
            .value()
            .attr("href")
            .ok_or(ExtractError::MissingHref { index })?;

        let detail_url = base_url
            .join(href)
            .map_err(|source| ExtractError::BadHref {
                href: href.to_string(),
                source,
            })?
            .to_string();

        let price = extract_price(&card, &price_selector, index)?;

        items.push(Item {
            name,
            price,
            detail_url,
        });
    }

    Ok(items)
}

fn extract_price(
    card: &ElementRef,
    price_selector: &Selector,
    index: usize,
) -> Result<f64, ExtractError> {
    let text = card
        .select(price_selector)
        .next()
        .ok_or(ExtractError::MissingPrice { index })?
        .text()
        .collect::<String>();

    parse_price(text.trim())
}

/// Parses a currency-prefixed price string into a number
///
/// The leading currency symbol (any non-digit prefix) is stripped and the
/// remainder parsed as a float. Negative or non-finite values are rejected:
/// a catalogue price is a non-negative amount.
pub fn parse_price(text: &str) -> Result<f64, ExtractError> {
    let numeric = text.trim_start_matches(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'));

    let price: f64 = numeric
        .parse()
        .map_err(|_| ExtractError::BadPrice(text.to_string()))?;

    if !price.is_finite() || price < 0.0 {
        return Err(ExtractError::BadPrice(text.to_string()));
    }

    Ok(price)
}
