use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use pharma_core::{Effect, Msg, Product, SearchError};
use pharma_engine::{EngineEvent, EngineHandle, FailureKind, FetchError, ProductRecord};

use super::app::Inbox;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, inbox_tx: mpsc::Sender<Inbox>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(inbox_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartSearch {
                    request_id,
                    keyword,
                } => {
                    engine_info!("StartSearch request_id={} keyword={:?}", request_id, keyword);
                    self.engine.search(request_id, keyword);
                }
                Effect::CancelSearch { request_id } => {
                    engine_info!("CancelSearch request_id={}", request_id);
                    self.engine.cancel(request_id);
                }
            }
        }
    }

    fn spawn_event_loop(&self, inbox_tx: mpsc::Sender<Inbox>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(100)) else {
                continue;
            };
            let msg = match event {
                EngineEvent::SearchCompleted { request_id, result } => Msg::SearchCompleted {
                    request_id,
                    result: match result {
                        Ok(records) => Ok(records.into_iter().map(map_record).collect()),
                        Err(err) => {
                            engine_warn!("Search {} failed: {}", request_id, err);
                            Err(map_error(&err))
                        }
                    },
                },
            };
            if inbox_tx.send(Inbox::Msg(msg)).is_err() {
                break;
            }
        });
    }
}

pub(crate) fn map_record(record: ProductRecord) -> Product {
    Product {
        name: record.name,
        offer_price: record.offer_price,
        regular_price: record.regular_price,
        image_url: record.image_url,
        link: record.link,
        pharmacy: record.pharmacy,
    }
}

pub(crate) fn map_error(err: &FetchError) -> SearchError {
    match err.kind {
        FailureKind::Timeout => SearchError::timeout(),
        FailureKind::HttpStatus(status) => SearchError::server(status),
        FailureKind::EmptyKeyword
        | FailureKind::InvalidUrl
        | FailureKind::TooLarge { .. }
        | FailureKind::Network => SearchError::connectivity(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharma_core::SearchErrorKind;
    use pretty_assertions::assert_eq;

    fn fetch_error(kind: FailureKind) -> FetchError {
        FetchError {
            kind,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn failure_kinds_map_to_user_errors() {
        assert_eq!(
            map_error(&fetch_error(FailureKind::Timeout)).kind,
            SearchErrorKind::Timeout
        );
        assert_eq!(
            map_error(&fetch_error(FailureKind::HttpStatus(404))).kind,
            SearchErrorKind::Server(404)
        );
        assert_eq!(
            map_error(&fetch_error(FailureKind::Network)).kind,
            SearchErrorKind::Connectivity
        );
    }

    #[test]
    fn record_fields_carry_over() {
        let product = map_record(ProductRecord {
            name: "Gasa".into(),
            offer_price: "S/ 2".into(),
            regular_price: "No disponible".into(),
            image_url: "img".into(),
            link: "https://shop/gasa".into(),
            pharmacy: "Mifarma".into(),
        });
        assert_eq!(product.link, "https://shop/gasa");
        assert!(!product.has_offer());
        assert_eq!(product.price(), 2.0);
    }
}
