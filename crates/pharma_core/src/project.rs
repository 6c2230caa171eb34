use crate::{Product, SearchCriteria};

/// Derives the visible result list: keeps products passing every active filter,
/// ordered by ascending extracted price. Ties keep their original order.
///
/// Pure: the same inputs always produce the same output.
pub fn project(raw: &[Product], criteria: &SearchCriteria) -> Vec<Product> {
    let name_needle = criteria.name_filter.to_lowercase();

    let mut priced: Vec<(f64, &Product)> = raw
        .iter()
        .map(|product| (product.price(), product))
        .filter(|(price, product)| {
            (name_needle.is_empty() || product.name.to_lowercase().contains(&name_needle))
                && criteria.pharmacy_filter.matches(&product.pharmacy)
                && criteria.max_price.is_none_or(|max| *price <= max)
                && (!criteria.offers_only || product.has_offer())
        })
        .collect();

    // `sort_by` is stable.
    priced.sort_by(|(a, _), (b, _)| a.total_cmp(b));

    priced
        .into_iter()
        .map(|(_, product)| product.clone())
        .collect()
}
