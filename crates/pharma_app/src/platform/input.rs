//! Line commands for the interactive session.

use engine_logging::engine_warn;
use pharma_core::{canonical_pharmacy, Msg, PharmacyFilter};

pub const HELP: &str = "\
Commands:
  search <keyword>      search the catalog (alias: s)
  name <text>           filter by name, empty to clear
  pharmacy <name|any>   filter by pharmacy
  max <amount|none>     maximum price
  offers <on|off>       only products with a regular price
  clear                 reset all filters
  help                  show this help
  quit                  leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Msgs(Vec<Msg>),
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" => Command::Msgs(Vec::new()),
        "search" | "s" => Command::Msgs(vec![
            Msg::KeywordChanged(rest.to_string()),
            Msg::SearchSubmitted,
        ]),
        "name" => Command::Msgs(vec![Msg::NameFilterChanged(rest.to_string())]),
        "pharmacy" => Command::Msgs(vec![Msg::PharmacyFilterChanged(pharmacy_filter(rest))]),
        "max" => match parse_max_price(rest) {
            Ok(max) => Command::Msgs(vec![Msg::MaxPriceChanged(max)]),
            Err(reason) => Command::Invalid(reason),
        },
        "offers" => match rest.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" => Command::Msgs(vec![Msg::OffersOnlyChanged(true)]),
            "off" | "no" | "false" => Command::Msgs(vec![Msg::OffersOnlyChanged(false)]),
            _ => Command::Invalid("offers expects on or off".to_string()),
        },
        "clear" => Command::Msgs(vec![Msg::FiltersCleared]),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Invalid(format!("unknown command `{other}`, type `help`")),
    }
}

/// `any` (or nothing) removes the filter; known names are matched ignoring case.
pub fn pharmacy_filter(raw: &str) -> PharmacyFilter {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("any") {
        return PharmacyFilter::Any;
    }
    match canonical_pharmacy(raw) {
        Some(known) => PharmacyFilter::Only(known.to_string()),
        None => {
            engine_warn!("Unknown pharmacy {:?}; filtering on it verbatim", raw);
            PharmacyFilter::Only(raw.to_string())
        }
    }
}

fn parse_max_price(raw: &str) -> Result<Option<f64>, String> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    parse_price_bound(raw).map(Some)
}

/// A finite, non-negative amount, optionally prefixed with `S/`.
pub fn parse_price_bound(raw: &str) -> Result<f64, String> {
    let amount = raw
        .trim()
        .trim_start_matches("S/")
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("`{raw}` is not a price"))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("`{raw}` is not a price"));
    }
    Ok(amount)
}
