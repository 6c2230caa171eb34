use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error};
use tokio_util::sync::CancellationToken;

use crate::search::{ReqwestSearchClient, SearchClient, SearchSettings};
use crate::{EngineEvent, FetchError, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(FetchError),
}

enum EngineCommand {
    Search { request_id: RequestId, keyword: String },
    Cancel { request_id: RequestId },
}

type InFlight = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Handle to the background search worker. Cheap to clone; all clones share one worker.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: SearchSettings) -> Result<Self, EngineError> {
        let client = ReqwestSearchClient::new(settings).map_err(EngineError::Client)?;
        Self::with_client(Arc::new(client))
    }

    /// Runs searches through `client` instead of the default HTTP client.
    pub fn with_client(client: Arc<dyn SearchClient>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let in_flight: InFlight = Arc::default();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Search {
                        request_id,
                        keyword,
                    } => {
                        let token = CancellationToken::new();
                        lock(&in_flight).insert(request_id, token.clone());
                        runtime.spawn(run_search(
                            client.clone(),
                            request_id,
                            keyword,
                            token,
                            in_flight.clone(),
                            event_tx.clone(),
                        ));
                    }
                    EngineCommand::Cancel { request_id } => {
                        if let Some(token) = lock(&in_flight).remove(&request_id) {
                            engine_debug!("Cancelling search request_id={}", request_id);
                            token.cancel();
                        }
                    }
                }
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn search(&self, request_id: RequestId, keyword: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Search {
            request_id,
            keyword: keyword.into(),
        });
    }

    /// Abandons a pending search. Its completion event is never delivered.
    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn run_search(
    client: Arc<dyn SearchClient>,
    request_id: RequestId,
    keyword: String,
    token: CancellationToken,
    in_flight: InFlight,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let outcome = tokio::select! {
        _ = token.cancelled() => None,
        result = client.search(&keyword) => Some(result),
    };
    lock(&in_flight).remove(&request_id);

    match outcome {
        Some(result) => {
            let _ = event_tx.send(EngineEvent::SearchCompleted { request_id, result });
        }
        None => engine_debug!("Search request_id={} cancelled", request_id),
    }
}

fn lock(in_flight: &InFlight) -> std::sync::MutexGuard<'_, HashMap<RequestId, CancellationToken>> {
    match in_flight.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            engine_error!("In-flight search table was poisoned; continuing");
            poisoned.into_inner()
        }
    }
}
