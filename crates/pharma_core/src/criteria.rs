use crate::KeywordError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PharmacyFilter {
    #[default]
    Any,
    /// Exact, case-sensitive pharmacy name.
    Only(String),
}

impl PharmacyFilter {
    pub fn matches(&self, pharmacy: &str) -> bool {
        match self {
            PharmacyFilter::Any => true,
            PharmacyFilter::Only(name) => name == pharmacy,
        }
    }
}

/// Local filters applied to the raw result set. Changing them never triggers a fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchCriteria {
    /// Case-insensitive substring of the product name; empty disables the filter.
    pub name_filter: String,
    pub pharmacy_filter: PharmacyFilter,
    /// Inclusive upper bound on the extracted price; `None` means unbounded.
    pub max_price: Option<f64>,
    pub offers_only: bool,
}

/// Trims `raw` and rejects it when nothing is left.
pub fn validate_keyword(raw: &str) -> Result<String, KeywordError> {
    let keyword = raw.trim();
    if keyword.is_empty() {
        return Err(KeywordError::Empty);
    }
    Ok(keyword.to_string())
}
