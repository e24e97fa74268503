//! Sale records - one ticket bought for a sector and resold to a buyer.
//!
//! A [`Sale`] owns its identifier and its amounts. Profit is derived from the amounts
//! every time they change and cannot be set on its own; the only way to change the
//! amounts of an existing sale is [`Sale::apply`], which recomputes it.

use crate::{
    config::catalog::Catalog,
    core::dates,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Delivery state of the ticket ("facial" in the sales sheet).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryStatus {
    /// Ticket transferred to the buyer
    #[serde(rename = "ENVIADO")]
    Sent,
    /// Ticket not transferred yet
    #[default]
    #[serde(rename = "PENDENTE")]
    Pending,
}

impl DeliveryStatus {
    /// Value stored in the `status` column
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "ENVIADO",
            Self::Pending => "PENDENTE",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ENVIADO" | "SENT" => Ok(Self::Sent),
            "PENDENTE" | "PENDING" => Ok(Self::Pending),
            _ => Err(Error::Config {
                message: format!("Unknown delivery status: {s}"),
            }),
        }
    }
}

/// Form input for creating or editing a sale. Everything but the profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDraft {
    /// Account reference the ticket was bought with
    pub account: String,
    /// Sector name
    pub sector: String,
    /// Cost of the sector ticket
    pub sector_cost: f64,
    /// Cost of the membership plan
    pub plan_cost: f64,
    /// Resale price
    pub sale_price: f64,
    /// Buyer name (PIX)
    pub buyer_name: String,
    /// Delivery status
    pub status: DeliveryStatus,
    /// Buyer contact
    pub contact: String,
    /// Payment method name
    pub payment_method: String,
    /// Event date label, `DD/MM/YY`
    pub event_date: String,
}

impl SaleDraft {
    /// A blank form: first catalog sector and payment method, pending, dated today.
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            account: String::new(),
            sector: catalog.default_sector().to_string(),
            sector_cost: 0.0,
            plan_cost: 0.0,
            sale_price: 0.0,
            buyer_name: String::new(),
            status: DeliveryStatus::Pending,
            contact: String::new(),
            payment_method: catalog.default_payment_method().to_string(),
            event_date: dates::today_label(),
        }
    }

    /// Profit the draft would produce
    #[must_use]
    pub fn profit(&self) -> f64 {
        compute_profit(self.sale_price, self.sector_cost, self.plan_cost)
    }

    /// Checks the rules the sale form enforces: buyer, sector and event date are
    /// required, and every amount is a finite non-negative number.
    ///
    /// # Errors
    /// [`Error::MissingField`] for a blank required field, [`Error::InvalidAmount`]
    /// for a bad amount.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("buyer_name", &self.buyer_name),
            ("sector", &self.sector),
            ("event_date", &self.event_date),
        ] {
            if value.trim().is_empty() {
                return Err(Error::MissingField { field });
            }
        }
        for amount in [self.sector_cost, self.plan_cost, self.sale_price] {
            if !amount.is_finite() || amount < 0.0 {
                return Err(Error::InvalidAmount { amount });
            }
        }
        Ok(())
    }
}

/// `sale_price - sector_cost - plan_cost`
#[must_use]
pub fn compute_profit(sale_price: f64, sector_cost: f64, plan_cost: f64) -> f64 {
    sale_price - sector_cost - plan_cost
}

/// One ticket transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sale {
    id: String,
    /// Account reference the ticket was bought with
    pub account: String,
    /// Sector name
    pub sector: String,
    sector_cost: f64,
    plan_cost: f64,
    sale_price: f64,
    profit: f64,
    /// Buyer name (PIX)
    pub buyer_name: String,
    /// Delivery status
    pub status: DeliveryStatus,
    /// Buyer contact
    pub contact: String,
    /// Payment method name
    pub payment_method: String,
    /// Event date label, `DD/MM/YY`
    pub event_date: String,
}

impl Sale {
    /// Builds a new sale from a draft with a freshly generated identifier.
    ///
    /// # Errors
    /// Returns the [`SaleDraft::validate`] error for a rejected draft.
    pub fn create(draft: SaleDraft) -> Result<Self> {
        Self::with_id(uuid::Uuid::new_v4().to_string(), draft)
    }

    /// Builds a sale with a known identifier, e.g. an edited record or a stored row.
    ///
    /// An empty identifier is replaced with a generated one.
    ///
    /// # Errors
    /// Returns the [`SaleDraft::validate`] error for a rejected draft.
    pub fn with_id(id: impl Into<String>, draft: SaleDraft) -> Result<Self> {
        draft.validate()?;
        Ok(Self::from_stored(id, draft))
    }

    /// Builds a sale from persisted values without checking the form rules.
    ///
    /// Stored rows are taken as they are so that the ledger matches the store.
    pub(crate) fn from_stored(id: impl Into<String>, draft: SaleDraft) -> Self {
        let id = id.into();
        let id = if id.trim().is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            id
        };
        let profit = draft.profit();

        Self {
            id,
            account: draft.account,
            sector: draft.sector,
            sector_cost: draft.sector_cost,
            plan_cost: draft.plan_cost,
            sale_price: draft.sale_price,
            profit,
            buyer_name: draft.buyer_name,
            status: draft.status,
            contact: draft.contact,
            payment_method: draft.payment_method,
            event_date: draft.event_date,
        }
    }

    /// Replaces every editable field with the draft's values, keeping the identifier.
    ///
    /// The sale is left untouched when the draft is rejected.
    pub fn apply(&mut self, draft: SaleDraft) -> Result<()> {
        *self = Self::with_id(self.id.clone(), draft)?;
        Ok(())
    }

    /// The current values as an editable draft
    #[must_use]
    pub fn to_draft(&self) -> SaleDraft {
        SaleDraft {
            account: self.account.clone(),
            sector: self.sector.clone(),
            sector_cost: self.sector_cost,
            plan_cost: self.plan_cost,
            sale_price: self.sale_price,
            buyer_name: self.buyer_name.clone(),
            status: self.status,
            contact: self.contact.clone(),
            payment_method: self.payment_method.clone(),
            event_date: self.event_date.clone(),
        }
    }

    /// Unique identifier
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Cost of the sector ticket
    #[must_use]
    pub const fn sector_cost(&self) -> f64 {
        self.sector_cost
    }

    /// Cost of the membership plan
    #[must_use]
    pub const fn plan_cost(&self) -> f64 {
        self.plan_cost
    }

    /// Both costs together
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.sector_cost + self.plan_cost
    }

    /// Resale price
    #[must_use]
    pub const fn sale_price(&self) -> f64 {
        self.sale_price
    }

    /// `sale_price - sector_cost - plan_cost`
    #[must_use]
    pub const fn profit(&self) -> f64 {
        self.profit
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::sample_draft;

    #[test]
    fn test_create_computes_profit() {
        let sale = Sale::create(sample_draft("A", "X", 100.0, 10.0, 10.0)).unwrap();
        assert_eq!(sale.profit(), 80.0);
        assert_eq!(sale.total_cost(), 20.0);
        assert!(!sale.id().is_empty());
    }

    #[test]
    fn test_create_generates_unique_ids() {
        let a = Sale::create(sample_draft("A", "X", 1.0, 0.0, 0.0)).unwrap();
        let b = Sale::create(sample_draft("A", "X", 1.0, 0.0, 0.0)).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_with_empty_id_generates_one() {
        let sale = Sale::with_id("  ", sample_draft("A", "X", 1.0, 0.0, 0.0)).unwrap();
        assert!(!sale.id().trim().is_empty());
    }

    #[test]
    fn test_profit_can_be_negative() {
        let sale = Sale::create(sample_draft("A", "X", 50.0, 40.0, 20.0)).unwrap();
        assert_eq!(sale.profit(), -10.0);
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let result = Sale::create(sample_draft("A", "X", bad, 0.0, 0.0));
            assert!(matches!(result, Err(Error::InvalidAmount { .. })));
        }
        let result = Sale::create(sample_draft("A", "X", 10.0, -5.0, 0.0));
        assert!(matches!(result, Err(Error::InvalidAmount { amount }) if amount == -5.0));
    }

    #[test]
    fn test_blank_required_fields_rejected() {
        let result = Sale::create(sample_draft("A", "", 10.0, 0.0, 0.0));
        assert!(matches!(result, Err(Error::MissingField { field: "buyer_name" })));

        let result = Sale::create(sample_draft("  ", "X", 10.0, 0.0, 0.0));
        assert!(matches!(result, Err(Error::MissingField { field: "sector" })));

        let mut draft = sample_draft("A", "X", 10.0, 0.0, 0.0);
        draft.event_date = String::new();
        assert!(matches!(
            Sale::create(draft),
            Err(Error::MissingField { field: "event_date" })
        ));
    }

    #[test]
    fn test_optional_fields_may_be_blank() {
        let mut draft = sample_draft("A", "X", 10.0, 0.0, 0.0);
        draft.account = String::new();
        draft.contact = String::new();
        draft.payment_method = String::new();
        assert!(Sale::create(draft).is_ok());
    }

    #[test]
    fn test_from_stored_keeps_values_the_form_would_reject() {
        let mut draft = sample_draft("A", "", 10.0, -2.0, 0.0);
        draft.event_date = String::new();

        let sale = Sale::from_stored("row-9", draft);
        assert_eq!(sale.id(), "row-9");
        assert_eq!(sale.sector_cost(), -2.0);
        assert_eq!(sale.profit(), 12.0);
        assert!(sale.buyer_name.is_empty());
    }

    #[test]
    fn test_apply_recomputes_profit_and_keeps_id() {
        let mut sale = Sale::create(sample_draft("A", "X", 100.0, 10.0, 10.0)).unwrap();
        let id = sale.id().to_string();

        let mut draft = sale.to_draft();
        draft.sale_price = 300.0;
        draft.plan_cost = 50.0;
        sale.apply(draft).unwrap();

        assert_eq!(sale.id(), id);
        assert_eq!(sale.profit(), 240.0);
    }

    #[test]
    fn test_apply_rejected_draft_leaves_sale_untouched() {
        let mut sale = Sale::create(sample_draft("A", "X", 100.0, 10.0, 10.0)).unwrap();
        let before = sale.clone();

        let mut draft = sale.to_draft();
        draft.sector_cost = f64::NAN;
        assert!(sale.apply(draft).is_err());
        assert_eq!(sale, before);
    }

    #[test]
    fn test_new_draft_uses_catalog_defaults() {
        let draft = SaleDraft::new(&Catalog::default());
        assert_eq!(draft.sector, "SETOR PRETO");
        assert_eq!(draft.payment_method, "Nubank");
        assert_eq!(draft.status, DeliveryStatus::Pending);
        assert_eq!(draft.profit(), 0.0);
        assert_eq!(draft.event_date, dates::today_label());
    }

    #[test]
    fn test_delivery_status_parsing() {
        assert_eq!("ENVIADO".parse::<DeliveryStatus>().unwrap(), DeliveryStatus::Sent);
        assert_eq!("pendente".parse::<DeliveryStatus>().unwrap(), DeliveryStatus::Pending);
        assert_eq!("sent".parse::<DeliveryStatus>().unwrap(), DeliveryStatus::Sent);
        assert!("LOST".parse::<DeliveryStatus>().is_err());
        assert_eq!(DeliveryStatus::Sent.to_string(), "ENVIADO");
    }
}
