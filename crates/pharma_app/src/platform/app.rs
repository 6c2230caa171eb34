use std::io::{BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context};
use engine_logging::{engine_debug, engine_info};
use pharma_core::{update, AppState, AppViewModel, Msg};
use pharma_engine::EngineHandle;

use super::effects::EffectRunner;
use super::input::{self, Command, HELP};
use super::ui::render::render_plain;

/// Everything the main loop reacts to, from the user or from the engine.
#[derive(Debug)]
pub enum Inbox {
    Msg(Msg),
    Command(Command),
    /// The input stream ended.
    Closed,
}

pub struct App {
    state: AppState,
    effects: EffectRunner,
    inbox_rx: mpsc::Receiver<Inbox>,
    inbox_tx: mpsc::Sender<Inbox>,
}

impl App {
    pub fn new(engine: EngineHandle) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::channel();
        let effects = EffectRunner::new(engine, inbox_tx.clone());
        Self {
            state: AppState::new(),
            effects,
            inbox_rx,
            inbox_tx,
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Applies `msg`, hands resulting effects to the engine and reports whether the view changed.
    fn dispatch_msg(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.effects.enqueue(effects);
        let was_dirty = state.consume_dirty();
        self.state = state;
        was_dirty
    }

    /// Applies `msgs` and blocks until the submitted search settles.
    pub fn run_once(mut self, msgs: Vec<Msg>) -> anyhow::Result<AppViewModel> {
        for msg in msgs {
            self.dispatch_msg(msg);
        }
        if let Some(reason) = self.view().rejection {
            bail!(reason);
        }

        while self.state.is_loading() {
            match self.inbox_rx.recv().context("engine stopped unexpectedly")? {
                Inbox::Msg(msg) => {
                    self.dispatch_msg(msg);
                }
                other => engine_debug!("Ignoring {:?} in one-shot mode", other),
            }
        }
        Ok(self.view())
    }

    /// Reads commands from `input` until `quit` or end of input, rendering to `out`.
    ///
    /// At end of input a pending search is still awaited so piped sessions print results.
    pub fn run_interactive(
        mut self,
        input: Box<dyn BufRead + Send>,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        spawn_reader(input, self.inbox_tx.clone());
        writeln!(out, "{}", render_plain(&self.view()))?;

        let mut input_closed = false;
        loop {
            if input_closed && !self.state.is_loading() {
                break;
            }
            let Ok(item) = self.inbox_rx.recv() else {
                break;
            };
            let dirty = match item {
                Inbox::Msg(msg) => self.dispatch_msg(msg),
                Inbox::Command(Command::Msgs(msgs)) => msgs
                    .into_iter()
                    .fold(false, |dirty, msg| self.dispatch_msg(msg) || dirty),
                Inbox::Command(Command::Help) => {
                    writeln!(out, "{HELP}")?;
                    false
                }
                Inbox::Command(Command::Invalid(reason)) => {
                    writeln!(out, "! {reason}")?;
                    false
                }
                Inbox::Command(Command::Quit) => break,
                Inbox::Closed => {
                    input_closed = true;
                    false
                }
            };
            if dirty {
                writeln!(out, "{}", render_plain(&self.view()))?;
                out.flush()?;
            }
        }
        engine_info!("Interactive session finished");
        Ok(())
    }
}

fn spawn_reader(input: Box<dyn BufRead + Send>, inbox_tx: mpsc::Sender<Inbox>) {
    thread::spawn(move || {
        for line in input.lines() {
            let Ok(line) = line else {
                break;
            };
            if inbox_tx
                .send(Inbox::Command(input::parse_line(&line)))
                .is_err()
            {
                return;
            }
        }
        let _ = inbox_tx.send(Inbox::Closed);
    });
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;
    use std::time::Duration;

    use pharma_core::SearchStatus;
    use pharma_engine::{FailureKind, FetchError, ProductRecord, SearchClient};
    use pretty_assertions::assert_eq;

    use super::*;

    struct CatalogClient;

    #[async_trait::async_trait]
    impl SearchClient for CatalogClient {
        async fn search(&self, keyword: &str) -> Result<Vec<ProductRecord>, FetchError> {
            tokio::time::sleep(Duration::from_millis(20)).await;
            match keyword {
                "jabon" => Ok(vec![
                    ProductRecord {
                        name: "Jabon Dove".into(),
                        offer_price: "S/ 15".into(),
                        regular_price: "S/ 20".into(),
                        link: "https://inka/dove".into(),
                        pharmacy: "Inkafarma".into(),
                        ..ProductRecord::default()
                    },
                    ProductRecord {
                        name: "Jabon Nivea".into(),
                        offer_price: "S/ 8".into(),
                        regular_price: "No disponible".into(),
                        link: "https://mifa/nivea".into(),
                        pharmacy: "Mifarma".into(),
                        ..ProductRecord::default()
                    },
                ]),
                "lento" => Err(FetchError {
                    kind: FailureKind::Timeout,
                    message: "operation timed out".into(),
                }),
                _ => Ok(Vec::new()),
            }
        }
    }

    fn app() -> App {
        engine_logging::initialize_for_tests();
        App::new(EngineHandle::with_client(Arc::new(CatalogClient)).unwrap())
    }

    fn search_msgs(keyword: &str) -> Vec<Msg> {
        vec![Msg::KeywordChanged(keyword.into()), Msg::SearchSubmitted]
    }

    #[test]
    fn one_shot_search_projects_results() {
        let mut msgs = vec![Msg::OffersOnlyChanged(true)];
        msgs.extend(search_msgs("jabon"));

        let view = app().run_once(msgs).unwrap();

        assert_eq!(view.status, SearchStatus::Results);
        assert_eq!(view.raw_count, 2);
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].name, "Jabon Dove");
    }

    #[test]
    fn one_shot_rejects_blank_keyword() {
        let err = app().run_once(search_msgs("   ")).unwrap_err();
        assert_eq!(err.to_string(), "enter a keyword to search");
    }

    #[test]
    fn one_shot_reports_timeout_status() {
        let view = app().run_once(search_msgs("lento")).unwrap();
        assert!(matches!(
            view.status,
            SearchStatus::Failed {
                kind: pharma_core::SearchErrorKind::Timeout,
                ..
            }
        ));
    }

    #[test]
    fn interactive_session_waits_for_pending_search_at_end_of_input() {
        let input = Cursor::new(b"help\nmax 10\nsearch jabon\n".to_vec());
        let mut out = Vec::new();

        app().run_interactive(Box::new(input), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Commands:"));
        assert!(text.contains("Searching for \"jabon\"..."));
        assert!(text.contains("Showing 1 of 2 products for \"jabon\"."));
        assert!(text.contains("Jabon Nivea"));
    }

    #[test]
    fn interactive_quit_stops_immediately() {
        let input = Cursor::new(b"quit\nsearch jabon\n".to_vec());
        let mut out = Vec::new();

        app().run_interactive(Box::new(input), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Searching"));
    }
}
