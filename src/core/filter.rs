//! Dashboard filters.
//!
//! A [`FilterConfig`] is the current selection of the filter controls. Every criterion
//! is optional; `None` (or an empty search) means "all". Active criteria are ANDed.

use crate::core::{dates, sale::DeliveryStatus, sale::Sale};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The active filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Event date label, exact match
    pub event_date: Option<String>,
    /// Sector name, exact match
    pub sector: Option<String>,
    /// Delivery status
    pub status: Option<DeliveryStatus>,
    /// Payment method name, exact match
    pub payment_method: Option<String>,
    /// Free-text search over buyer, account, contact and sector
    pub search: String,
}

impl FilterConfig {
    /// Selection that accepts every sale
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to one event date, or clears the restriction with `None`
    #[must_use]
    pub fn with_event_date(mut self, label: Option<&str>) -> Self {
        self.event_date = label.map(str::to_string);
        self
    }

    /// Restricts to one sector, or clears the restriction with `None`
    #[must_use]
    pub fn with_sector(mut self, sector: Option<&str>) -> Self {
        self.sector = sector.map(str::to_string);
        self
    }

    /// Restricts to one delivery status, or clears the restriction with `None`
    #[must_use]
    pub fn with_status(mut self, status: Option<DeliveryStatus>) -> Self {
        self.status = status;
        self
    }

    /// Restricts to one payment method, or clears the restriction with `None`
    #[must_use]
    pub fn with_payment_method(mut self, method: Option<&str>) -> Self {
        self.payment_method = method.map(str::to_string);
        self
    }

    /// Sets the free-text search term
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Whether no criterion is active
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.event_date.is_none()
            && self.sector.is_none()
            && self.status.is_none()
            && self.payment_method.is_none()
            && self.search_term().is_none()
    }

    /// Lowercased search term, `None` when empty or only whitespace.
    ///
    /// Surrounding spaces are part of the term.
    fn search_term(&self) -> Option<String> {
        (!self.search.trim().is_empty()).then(|| self.search.to_lowercase())
    }

    /// True iff the sale passes every active criterion.
    #[must_use]
    pub fn matches(&self, sale: &Sale) -> bool {
        self.matcher().matches(sale)
    }

    /// Keeps the sales that pass, in their original order.
    #[must_use]
    pub fn apply(&self, sales: &[Sale]) -> Vec<Sale> {
        let matcher = self.matcher();
        sales
            .iter()
            .filter(|sale| matcher.matches(sale))
            .cloned()
            .collect()
    }

    fn matcher(&self) -> Matcher<'_> {
        Matcher {
            config: self,
            term: self.search_term(),
        }
    }
}

/// A filter with its search term normalized once for a pass over many sales.
struct Matcher<'a> {
    config: &'a FilterConfig,
    term: Option<String>,
}

impl Matcher<'_> {
    fn matches(&self, sale: &Sale) -> bool {
        let config = self.config;

        if config
            .event_date
            .as_ref()
            .is_some_and(|date| *date != sale.event_date)
        {
            return false;
        }
        if config
            .sector
            .as_ref()
            .is_some_and(|sector| *sector != sale.sector)
        {
            return false;
        }
        if config.status.is_some_and(|status| status != sale.status) {
            return false;
        }
        if config
            .payment_method
            .as_ref()
            .is_some_and(|method| *method != sale.payment_method)
        {
            return false;
        }

        self.term.as_deref().is_none_or(|term| {
            [
                &sale.buyer_name,
                &sale.account,
                &sale.contact,
                &sale.sector,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(term))
        })
    }
}

/// Distinct event-date labels for the date filter, oldest first.
///
/// Labels that are not `DD/MM/YY` dates go last, in first-seen order.
#[must_use]
pub fn available_dates(sales: &[Sale]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut labels: Vec<&str> = sales
        .iter()
        .map(|sale| sale.event_date.as_str())
        .filter(|label| seen.insert(*label))
        .collect();

    labels.sort_by_key(|label| dates::parse_label(label).map_or((1, None), |d| (0, Some(d))));
    labels.into_iter().map(ToString::to_string).collect()
}
