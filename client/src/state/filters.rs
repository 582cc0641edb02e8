//! Reconciliation list filters.

#[cfg(test)]
#[path = "filters_test.rs"]
mod filters_test;

/// Filter inputs shared by the summary, detail, and history pages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconFilters {
    pub collector: String,
    pub date_from: String,
    pub date_to: String,
    pub status: String,
}

impl ReconFilters {
    /// Query pairs for the non-empty fields, values trimmed.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        [
            ("collector", &self.collector),
            ("date_from", &self.date_from),
            ("date_to", &self.date_to),
            ("status", &self.status),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            let value = value.trim();
            (!value.is_empty()).then(|| (key.to_owned(), value.to_owned()))
        })
        .collect()
    }

    /// `true` when `date_from` is after `date_to`. ISO dates compare lexically.
    #[must_use]
    pub fn has_inverted_range(&self) -> bool {
        let from = self.date_from.trim();
        let to = self.date_to.trim();
        !from.is_empty() && !to.is_empty() && from > to
    }
}
