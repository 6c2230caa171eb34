use std::sync::LazyLock;

use regex::Regex;

/// Regular price value the catalog uses when a product has no list price.
pub const NO_REGULAR_PRICE: &str = "No disponible";

/// Pharmacy chains the remote catalog aggregates.
pub const KNOWN_PHARMACIES: &[&str] = &["Inkafarma", "Mifarma", "Boticas y Salud", "Farmacia Universal"];

static PRICE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("price token pattern is valid"));

/// A product as returned by one search. Never modified after it is received.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Product {
    pub name: String,
    pub offer_price: String,
    pub regular_price: String,
    pub image_url: String,
    /// Identity of the product within a single result set.
    pub link: String,
    pub pharmacy: String,
}

impl Product {
    /// Comparable price derived from `offer_price`.
    pub fn price(&self) -> f64 {
        extract_price(&self.offer_price)
    }

    pub fn has_offer(&self) -> bool {
        has_offer(&self.regular_price)
    }
}

/// Returns the first integer or decimal number embedded in `text`, or 0 when there is none.
///
/// `"S/ 12.50"` yields 12.5 and `"Consultar"` yields 0. A literal zero price is
/// indistinguishable from a missing one.
pub fn extract_price(text: &str) -> f64 {
    PRICE_TOKEN
        .find(text)
        .and_then(|token| token.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// A product has an offer unless its regular price is exactly [`NO_REGULAR_PRICE`].
pub fn has_offer(regular_price: &str) -> bool {
    regular_price != NO_REGULAR_PRICE
}

/// Looks up `name` among [`KNOWN_PHARMACIES`] ignoring case and surrounding whitespace.
pub fn canonical_pharmacy(name: &str) -> Option<&'static str> {
    let needle = name.trim();
    KNOWN_PHARMACIES
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(needle))
}
