use crate::view_model::{AppViewModel, ProductCard, SearchStatus};
use crate::{project, KeywordError, Product, SearchCriteria, SearchError};

pub type RequestId = u64;

/// Outcome of the most recent search submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    /// No search submitted yet.
    #[default]
    Idle,
    Loading { request_id: RequestId },
    /// Raw results of the last completed search, in response order.
    Succeeded(Vec<Product>),
    Failed(SearchError),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    keyword_input: String,
    criteria: SearchCriteria,
    search: SearchState,
    last_request_id: RequestId,
    rejection: Option<KeywordError>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn keyword_input(&self) -> &str {
        &self.keyword_input
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.search, SearchState::Loading { .. })
    }

    /// Raw products of the last successful search; empty in every other state.
    pub fn raw_products(&self) -> &[Product] {
        match &self.search {
            SearchState::Succeeded(products) => products,
            _ => &[],
        }
    }

    pub fn view(&self) -> AppViewModel {
        let raw = self.raw_products();
        let visible = project(raw, &self.criteria);

        let status = match &self.search {
            SearchState::Idle => SearchStatus::Idle,
            SearchState::Loading { .. } => SearchStatus::Loading,
            SearchState::Failed(error) => SearchStatus::Failed {
                kind: error.kind,
                message: error.message.clone(),
            },
            SearchState::Succeeded(products) if products.is_empty() => SearchStatus::NoResults,
            SearchState::Succeeded(_) if visible.is_empty() => SearchStatus::NoMatches,
            SearchState::Succeeded(_) => SearchStatus::Results,
        };

        AppViewModel {
            keyword: self.keyword_input.clone(),
            criteria: self.criteria.clone(),
            status,
            raw_count: raw.len(),
            cards: visible.iter().map(ProductCard::from_product).collect(),
            rejection: self.rejection.as_ref().map(ToString::to_string),
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_keyword_input(&mut self, keyword: String) {
        self.keyword_input = keyword;
        self.rejection = None;
        self.mark_dirty();
    }

    /// Editing filters also dismisses a previous rejection notice.
    pub(crate) fn criteria_mut(&mut self) -> &mut SearchCriteria {
        self.rejection = None;
        self.mark_dirty();
        &mut self.criteria
    }

    pub(crate) fn reject_submission(&mut self, error: KeywordError) {
        self.rejection = Some(error);
        self.mark_dirty();
    }

    /// Drops any previous results and enters `Loading` under a fresh request id.
    ///
    /// Returns the new id and the id of the search it supersedes, if one was in flight.
    pub(crate) fn begin_search(&mut self) -> (RequestId, Option<RequestId>) {
        let superseded = match self.search {
            SearchState::Loading { request_id } => Some(request_id),
            _ => None,
        };
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.search = SearchState::Loading { request_id };
        self.rejection = None;
        self.mark_dirty();
        (request_id, superseded)
    }

    /// Applies a completion if it belongs to the search in flight; stale ones are ignored.
    pub(crate) fn complete_search(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<Product>, SearchError>,
    ) -> bool {
        match self.search {
            SearchState::Loading { request_id: current } if current == request_id => {}
            _ => return false,
        }
        self.search = match result {
            Ok(products) => SearchState::Succeeded(products),
            Err(error) => SearchState::Failed(error),
        };
        self.mark_dirty();
        true
    }
}
