use engine_logging::{engine_debug, engine_info};

use crate::{validate_keyword, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::KeywordChanged(keyword) => {
            state.set_keyword_input(keyword);
            Vec::new()
        }
        Msg::SearchSubmitted => match validate_keyword(state.keyword_input()) {
            Ok(keyword) => {
                let (request_id, superseded) = state.begin_search();
                engine_info!("Search submitted request_id={} keyword={:?}", request_id, keyword);
                let mut effects = Vec::with_capacity(2);
                if let Some(old) = superseded {
                    effects.push(Effect::CancelSearch { request_id: old });
                }
                effects.push(Effect::StartSearch {
                    request_id,
                    keyword,
                });
                effects
            }
            Err(err) => {
                engine_debug!("Search submission rejected: {}", err);
                state.reject_submission(err);
                Vec::new()
            }
        },
        Msg::NameFilterChanged(name) => {
            state.criteria_mut().name_filter = name;
            Vec::new()
        }
        Msg::PharmacyFilterChanged(pharmacy) => {
            state.criteria_mut().pharmacy_filter = pharmacy;
            Vec::new()
        }
        Msg::MaxPriceChanged(max_price) => {
            state.criteria_mut().max_price = max_price;
            Vec::new()
        }
        Msg::OffersOnlyChanged(offers_only) => {
            state.criteria_mut().offers_only = offers_only;
            Vec::new()
        }
        Msg::FiltersCleared => {
            *state.criteria_mut() = Default::default();
            Vec::new()
        }
        Msg::SearchCompleted { request_id, result } => {
            if !state.complete_search(request_id, result) {
                engine_debug!("Ignoring completion of superseded request_id={}", request_id);
            }
            Vec::new()
        }
    };

    (state, effects)
}
