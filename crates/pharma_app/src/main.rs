mod cli;
mod platform;
mod settings;

use std::io::{self, BufReader, Write};

use anyhow::{bail, Result};
use clap::Parser;
use engine_logging::engine_info;
use pharma_core::{Msg, SearchStatus, KNOWN_PHARMACIES};
use pharma_engine::EngineHandle;

use cli::{Cli, Command, OutputFormat, SearchArgs};
use platform::input::pharmacy_filter;
use platform::ui::render::{render_json, render_plain};
use platform::App;

fn main() -> Result<()> {
    let cli = Cli::parse();
    engine_logging::initialize(cli.log.into(), cli.log_level());

    if let Command::Pharmacies = cli.command {
        for name in KNOWN_PHARMACIES {
            println!("{name}");
        }
        return Ok(());
    }

    let search_settings = settings::load(&settings::Overrides::from(&cli))?;
    engine_info!(
        "Using search service {} (timeout {:?})",
        search_settings.base_url,
        search_settings.request_timeout
    );
    let app = App::new(EngineHandle::new(search_settings)?);

    match cli.command {
        Command::Search(args) => run_search(app, args),
        Command::Interactive => {
            let stdin = Box::new(BufReader::new(io::stdin()));
            app.run_interactive(stdin, &mut io::stdout().lock())
        }
        Command::Pharmacies => Ok(()),
    }
}

/// Execute one search and print the projected cards in the chosen format.
fn run_search(app: App, args: SearchArgs) -> Result<()> {
    let mut msgs = vec![Msg::NameFilterChanged(args.name.unwrap_or_default())];
    if let Some(pharmacy) = args.pharmacy.as_deref() {
        msgs.push(Msg::PharmacyFilterChanged(pharmacy_filter(pharmacy)));
    }
    msgs.extend([
        Msg::MaxPriceChanged(args.max_price),
        Msg::OffersOnlyChanged(args.offers_only),
        Msg::KeywordChanged(args.keyword),
        Msg::SearchSubmitted,
    ]);

    let view = app.run_once(msgs)?;
    if let SearchStatus::Failed { message, .. } = &view.status {
        bail!("{message}");
    }

    let mut stdout = io::stdout().lock();
    match args.format {
        OutputFormat::Plain => write!(stdout, "{}", render_plain(&view))?,
        OutputFormat::Json => writeln!(stdout, "{}", render_json(&view)?)?,
    }
    Ok(())
}
