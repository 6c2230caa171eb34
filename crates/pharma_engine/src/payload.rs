use engine_logging::{engine_debug, engine_warn};
use serde_json::{Map, Value};

use crate::ProductRecord;

const ARRAY_FIELDS: &[&str] = &["productos", "products"];
const NAME_FIELDS: &[&str] = &["name", "nombre"];
const OFFER_PRICE_FIELDS: &[&str] = &["offerprice", "preciooferta"];
const REGULAR_PRICE_FIELDS: &[&str] = &["regularprice", "precioregular"];
const IMAGE_FIELDS: &[&str] = &["imageurl", "image", "imagen"];
const LINK_FIELDS: &[&str] = &["link", "url", "enlace"];
const PHARMACY_FIELDS: &[&str] = &["pharmacy", "farmacia"];

/// Extract the product array from a search response body.
///
/// Field names are matched ignoring case, `_` and `-`, so `offerPrice`,
/// `offer_price` and `OFFER-PRICE` are equivalent. A body without a product
/// array yields an empty list rather than an error.
pub fn parse_products(body: &[u8]) -> Vec<ProductRecord> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            engine_warn!("Search response is not JSON ({} bytes): {}", body.len(), err);
            return Vec::new();
        }
    };

    let Some(items) = value
        .as_object()
        .and_then(|object| lookup(object, ARRAY_FIELDS))
        .and_then(Value::as_array)
    else {
        engine_debug!("Search response has no product array; treating as empty");
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item.as_object() {
            Some(object) => Some(record_from(object)),
            None => {
                engine_warn!("Skipping non-object product entry at index {}", index);
                None
            }
        })
        .collect()
}

fn record_from(object: &Map<String, Value>) -> ProductRecord {
    ProductRecord {
        name: text_field(object, NAME_FIELDS),
        offer_price: text_field(object, OFFER_PRICE_FIELDS),
        regular_price: text_field(object, REGULAR_PRICE_FIELDS),
        image_url: text_field(object, IMAGE_FIELDS),
        link: text_field(object, LINK_FIELDS),
        pharmacy: text_field(object, PHARMACY_FIELDS),
    }
}

fn text_field(object: &Map<String, Value>, names: &[&str]) -> String {
    match lookup(object, names) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn lookup<'a>(object: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    object
        .iter()
        .find(|(key, _)| names.contains(&normalize_key(key).as_str()))
        .map(|(_, value)| value)
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}
