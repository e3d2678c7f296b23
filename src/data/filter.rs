use std::collections::BTreeSet;

use super::model::Country;

// ---------------------------------------------------------------------------
// Filter predicate: which regions are selected
// ---------------------------------------------------------------------------

/// Label standing in for records without a `region` field.
pub const NO_REGION: &str = "(no region)";

/// The set of selected region labels. An empty set hides everything.
pub type FilterState = BTreeSet<String>;

/// Region label of a record, [`NO_REGION`] when absent.
pub fn region_label(country: &Country) -> &str {
    country.region().unwrap_or(NO_REGION)
}

/// All region labels present in `countries`, sorted.
pub fn region_labels(countries: &[Country]) -> BTreeSet<String> {
    countries
        .iter()
        .map(|c| region_label(c).to_string())
        .collect()
}

/// Initialise a [`FilterState`] with every region selected (show everything).
pub fn init_filter_state(countries: &[Country]) -> FilterState {
    region_labels(countries)
}

/// Return indices of countries whose region is selected.
pub fn filtered_indices(countries: &[Country], filters: &FilterState) -> Vec<usize> {
    countries
        .iter()
        .enumerate()
        .filter(|(_, c)| filters.contains(region_label(c)))
        .map(|(i, _)| i)
        .collect()
}
