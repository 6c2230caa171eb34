use crate::{PharmacyFilter, Product, RequestId, SearchError};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the keyword input.
    KeywordChanged(String),
    /// User submitted the current keyword.
    SearchSubmitted,
    /// User edited the name filter.
    NameFilterChanged(String),
    /// User picked a pharmacy, or "any".
    PharmacyFilterChanged(PharmacyFilter),
    /// User moved the maximum price; `None` removes the bound.
    MaxPriceChanged(Option<f64>),
    /// User toggled the offers-only switch.
    OffersOnlyChanged(bool),
    /// User reset every local filter.
    FiltersCleared,
    /// Engine finished a search, successfully or not.
    SearchCompleted {
        request_id: RequestId,
        result: Result<Vec<Product>, SearchError>,
    },
}
