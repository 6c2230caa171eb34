use crate::{Product, SearchCriteria, SearchErrorKind};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchStatus {
    /// Nothing searched yet.
    #[default]
    Idle,
    Loading,
    /// The search succeeded but the catalog returned nothing.
    NoResults,
    /// Results exist but the current filters hide all of them.
    NoMatches,
    Results,
    Failed { kind: SearchErrorKind, message: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub keyword: String,
    pub criteria: SearchCriteria,
    pub status: SearchStatus,
    pub raw_count: usize,
    pub cards: Vec<ProductCard>,
    /// Why the last submission was refused, if it was.
    pub rejection: Option<String>,
}

/// One comparison card. `link` doubles as the stable key for list reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub link: String,
    pub name: String,
    pub pharmacy: String,
    pub offer_price: String,
    /// `None` when the catalog reports no regular price.
    pub regular_price: Option<String>,
    pub price: f64,
    pub image_url: String,
}

impl ProductCard {
    pub(crate) fn from_product(product: &Product) -> Self {
        Self {
            link: product.link.clone(),
            name: product.name.clone(),
            pharmacy: product.pharmacy.clone(),
            offer_price: product.offer_price.clone(),
            regular_price: product
                .has_offer()
                .then(|| product.regular_price.clone()),
            price: product.price(),
            image_url: product.image_url.clone(),
        }
    }
}
