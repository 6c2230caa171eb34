//! Pharma core: pure search state machine, filter/sort projection and view-model helpers.
mod criteria;
mod effect;
mod error;
mod msg;
mod product;
mod project;
mod state;
mod update;
mod view_model;

pub use criteria::{validate_keyword, PharmacyFilter, SearchCriteria};
pub use effect::Effect;
pub use error::{KeywordError, SearchError, SearchErrorKind};
pub use msg::Msg;
pub use product::{
    canonical_pharmacy, extract_price, has_offer, Product, KNOWN_PHARMACIES, NO_REGULAR_PRICE,
};
pub use project::project;
pub use state::{AppState, RequestId, SearchState};
pub use update::update;
pub use view_model::{AppViewModel, ProductCard, SearchStatus};
