use std::fmt::Write as _;

use pharma_core::{AppViewModel, PharmacyFilter, ProductCard, SearchCriteria, SearchStatus};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CardJson<'a> {
    name: &'a str,
    pharmacy: &'a str,
    offer_price: &'a str,
    regular_price: Option<&'a str>,
    price: f64,
    image_url: &'a str,
    link: &'a str,
}

#[derive(Debug, Serialize)]
struct ResultsJson<'a> {
    keyword: &'a str,
    total: usize,
    shown: usize,
    products: Vec<CardJson<'a>>,
}

/// Status line, active filters and one card per visible product.
pub fn render_plain(view: &AppViewModel) -> String {
    let mut out = String::new();

    if let Some(reason) = &view.rejection {
        let _ = writeln!(out, "! {reason}");
    }

    let status = match &view.status {
        SearchStatus::Idle => "Type `search <keyword>` to look for products.".to_string(),
        SearchStatus::Loading => format!("Searching for \"{}\"...", view.keyword.trim()),
        SearchStatus::NoResults => format!("No products found for \"{}\".", view.keyword.trim()),
        SearchStatus::NoMatches => format!(
            "None of the {} products match the current filters.",
            view.raw_count
        ),
        SearchStatus::Results => format!(
            "Showing {} of {} products for \"{}\".",
            view.cards.len(),
            view.raw_count,
            view.keyword.trim()
        ),
        SearchStatus::Failed { message, .. } => format!("Error: {message}"),
    };
    let _ = writeln!(out, "{status}");

    if let Some(filters) = describe_filters(&view.criteria) {
        let _ = writeln!(out, "Filters: {filters}");
    }

    for (index, card) in view.cards.iter().enumerate() {
        render_card(&mut out, index + 1, card);
    }
    out
}

pub fn render_json(view: &AppViewModel) -> serde_json::Result<String> {
    let results = ResultsJson {
        keyword: view.keyword.trim(),
        total: view.raw_count,
        shown: view.cards.len(),
        products: view
            .cards
            .iter()
            .map(|card| CardJson {
                name: &card.name,
                pharmacy: &card.pharmacy,
                offer_price: &card.offer_price,
                regular_price: card.regular_price.as_deref(),
                price: card.price,
                image_url: &card.image_url,
                link: &card.link,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&results)
}

fn render_card(out: &mut String, position: usize, card: &ProductCard) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{position:>3}. {}", card.name);
    let _ = writeln!(out, "     {:<20} {}", card.pharmacy, card.offer_price);
    match &card.regular_price {
        Some(regular) => {
            let _ = writeln!(out, "     regular price {regular}");
        }
        None => {
            let _ = writeln!(out, "     no regular price");
        }
    }
    let _ = writeln!(out, "     {}", card.link);
}

fn describe_filters(criteria: &SearchCriteria) -> Option<String> {
    let mut parts = Vec::new();
    if !criteria.name_filter.is_empty() {
        parts.push(format!("name contains \"{}\"", criteria.name_filter));
    }
    if let PharmacyFilter::Only(pharmacy) = &criteria.pharmacy_filter {
        parts.push(format!("pharmacy {pharmacy}"));
    }
    if let Some(max) = criteria.max_price {
        parts.push(format!("max S/ {max:.2}"));
    }
    if criteria.offers_only {
        parts.push("offers only".to_string());
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharma_core::{update, AppState, Msg, Product};
    use pretty_assertions::assert_eq;

    fn settled_view() -> AppViewModel {
        let (state, _) = update(AppState::new(), Msg::KeywordChanged("jabon".into()));
        let (state, _) = update(state, Msg::SearchSubmitted);
        let (state, _) = update(
            state,
            Msg::SearchCompleted {
                request_id: 1,
                result: Ok(vec![
                    Product {
                        name: "Jabon Dove".into(),
                        offer_price: "S/ 15".into(),
                        regular_price: "S/ 20".into(),
                        link: "https://inka/dove".into(),
                        pharmacy: "Inkafarma".into(),
                        ..Product::default()
                    },
                    Product {
                        name: "Jabon Nivea".into(),
                        offer_price: "S/ 8".into(),
                        regular_price: "No disponible".into(),
                        link: "https://mifa/nivea".into(),
                        pharmacy: "Mifarma".into(),
                        ..Product::default()
                    },
                ]),
            },
        );
        let (state, _) = update(state, Msg::MaxPriceChanged(Some(10.0)));
        state.view()
    }

    #[test]
    fn plain_output_lists_visible_cards() {
        let text = render_plain(&settled_view());

        assert!(text.contains("Showing 1 of 2 products for \"jabon\"."));
        assert!(text.contains("Filters: max S/ 10.00"));
        assert!(text.contains("Jabon Nivea"));
        assert!(text.contains("no regular price"));
        assert!(!text.contains("Jabon Dove"));
    }

    #[test]
    fn json_output_uses_null_for_missing_regular_price() {
        let json = render_json(&settled_view()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total"], 2);
        assert_eq!(value["shown"], 1);
        assert_eq!(value["products"][0]["link"], "https://mifa/nivea");
        assert!(value["products"][0]["regular_price"].is_null());
    }

    #[test]
    fn idle_view_prompts_for_search() {
        let text = render_plain(&AppState::new().view());
        assert!(text.starts_with("Type `search <keyword>`"));
    }
}
