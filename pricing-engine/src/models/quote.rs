//! Quote aggregate: draft estimates that finalize into invoices.

use chrono::{DateTime, Utc};
use pricing_core::PricingError;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::models::{DiscountRule, FeeSet, LineItem, TaxPolicy, Totals};
use crate::services::{Estimate, TotalsCalculator};

/// Quote status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Draft,
    Finalized,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "draft",
            QuoteStatus::Finalized => "finalized",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "finalized" => QuoteStatus::Finalized,
            _ => QuoteStatus::Draft,
        }
    }
}

/// Aggregate of line items, pricing rules, and computed totals.
///
/// Created in draft. Every pricing edit revalidates the candidate inputs
/// and recomputes totals before committing, so a failed edit leaves the
/// quote unchanged. `finalize` is one-way and exactly once: afterwards the
/// quote is an invoice, its inputs and totals are frozen, and corrections
/// go through [`Quote::amend`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    quote_id: Uuid,
    line_items: Vec<LineItem>,
    discount: DiscountRule,
    tax: TaxPolicy,
    fees: FeeSet,
    totals: Totals,
    status: QuoteStatus,
    notes: Option<String>,
    metadata: Option<serde_json::Value>,
    reference_quote_id: Option<Uuid>,
    created_utc: DateTime<Utc>,
    finalized_utc: Option<DateTime<Utc>>,
}

impl Quote {
    /// New draft quote from manually entered pricing inputs.
    pub fn new(
        line_items: Vec<LineItem>,
        discount: DiscountRule,
        tax: TaxPolicy,
        fees: FeeSet,
    ) -> Result<Self, PricingError> {
        let totals = TotalsCalculator::compute(&line_items, &discount, &tax, &fees)?;
        Ok(Self {
            quote_id: Uuid::new_v4(),
            line_items,
            discount,
            tax,
            fees,
            totals,
            status: QuoteStatus::Draft,
            notes: None,
            metadata: None,
            reference_quote_id: None,
            created_utc: Utc::now(),
            finalized_utc: None,
        })
    }

    /// New draft quote from estimator output.
    pub fn from_estimate(
        estimate: Estimate,
        discount: DiscountRule,
        tax: TaxPolicy,
    ) -> Result<Self, PricingError> {
        Self::new(estimate.line_items, discount, tax, estimate.fees)
    }

    pub fn quote_id(&self) -> Uuid {
        self.quote_id
    }

    pub fn status(&self) -> QuoteStatus {
        self.status
    }

    pub fn is_draft(&self) -> bool {
        self.status == QuoteStatus::Draft
    }

    pub fn is_finalized(&self) -> bool {
        self.status == QuoteStatus::Finalized
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn discount(&self) -> &DiscountRule {
        &self.discount
    }

    pub fn tax_policy(&self) -> &TaxPolicy {
        &self.tax
    }

    pub fn fees(&self) -> &FeeSet {
        &self.fees
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }

    /// The finalized quote this one corrects, if any.
    pub fn reference_quote_id(&self) -> Option<Uuid> {
        self.reference_quote_id
    }

    pub fn created_utc(&self) -> DateTime<Utc> {
        self.created_utc
    }

    pub fn finalized_utc(&self) -> Option<DateTime<Utc>> {
        self.finalized_utc
    }

    fn ensure_draft(&self) -> Result<(), PricingError> {
        if self.status == QuoteStatus::Finalized {
            return Err(PricingError::QuoteFinalized {
                quote_id: self.quote_id,
            });
        }
        Ok(())
    }

    /// Validate a candidate input set and commit it with fresh totals.
    fn commit(
        &mut self,
        line_items: Vec<LineItem>,
        discount: DiscountRule,
        tax: TaxPolicy,
        fees: FeeSet,
    ) -> Result<(), PricingError> {
        let totals = TotalsCalculator::compute(&line_items, &discount, &tax, &fees)?;
        self.line_items = line_items;
        self.discount = discount;
        self.tax = tax;
        self.fees = fees;
        self.totals = totals;
        Ok(())
    }

    pub fn set_line_items(&mut self, line_items: Vec<LineItem>) -> Result<(), PricingError> {
        self.ensure_draft()?;
        self.commit(line_items, self.discount, self.tax, self.fees.clone())
    }

    pub fn add_line_item(&mut self, item: LineItem) -> Result<(), PricingError> {
        self.ensure_draft()?;
        let mut items = self.line_items.clone();
        items.push(item);
        self.commit(items, self.discount, self.tax, self.fees.clone())
    }

    pub fn remove_line_item(&mut self, line_item_id: Uuid) -> Result<(), PricingError> {
        self.ensure_draft()?;
        let mut items = self.line_items.clone();
        let before = items.len();
        items.retain(|item| item.line_item_id != line_item_id);
        if items.len() == before {
            return Err(PricingError::invalid_input(
                "line_item.line_item_id",
                format!("no line item {} on this quote", line_item_id),
            ));
        }
        self.commit(items, self.discount, self.tax, self.fees.clone())
    }

    pub fn set_discount(&mut self, discount: DiscountRule) -> Result<(), PricingError> {
        self.ensure_draft()?;
        self.commit(self.line_items.clone(), discount, self.tax, self.fees.clone())
    }

    pub fn set_tax_policy(&mut self, tax: TaxPolicy) -> Result<(), PricingError> {
        self.ensure_draft()?;
        self.commit(
            self.line_items.clone(),
            self.discount,
            tax,
            self.fees.clone(),
        )
    }

    pub fn set_fees(&mut self, fees: FeeSet) -> Result<(), PricingError> {
        self.ensure_draft()?;
        self.commit(self.line_items.clone(), self.discount, self.tax, fees)
    }

    pub fn set_notes(&mut self, notes: Option<String>) -> Result<(), PricingError> {
        self.ensure_draft()?;
        self.notes = notes;
        Ok(())
    }

    pub fn set_metadata(&mut self, metadata: Option<serde_json::Value>) -> Result<(), PricingError> {
        self.ensure_draft()?;
        self.metadata = metadata;
        Ok(())
    }

    /// Recompute totals from the current draft inputs.
    pub fn recompute_totals(&mut self) -> Result<&Totals, PricingError> {
        self.ensure_draft()?;
        self.totals =
            TotalsCalculator::compute(&self.line_items, &self.discount, &self.tax, &self.fees)?;
        Ok(&self.totals)
    }

    /// One-way draft to finalized transition.
    ///
    /// Totals are recomputed one last time from the inputs being captured,
    /// then everything freezes. A second call fails with `QuoteFinalized`.
    pub fn finalize(&mut self) -> Result<(), PricingError> {
        self.ensure_draft()?;
        self.totals =
            TotalsCalculator::compute(&self.line_items, &self.discount, &self.tax, &self.fees)?;
        self.status = QuoteStatus::Finalized;
        self.finalized_utc = Some(Utc::now());
        info!(
            quote_id = %self.quote_id,
            grand_total = %self.totals.grand_total,
            "Quote finalized"
        );
        Ok(())
    }

    /// New draft quote copying this finalized quote's pricing inputs and
    /// referencing it. How the reference is persisted is a storage concern.
    pub fn amend(&self) -> Result<Quote, PricingError> {
        if self.status != QuoteStatus::Finalized {
            return Err(PricingError::invalid_input(
                "quote.status",
                "only a finalized quote can be amended",
            ));
        }
        let mut amended = Quote::new(
            self.line_items.clone(),
            self.discount,
            self.tax,
            self.fees.clone(),
        )?;
        amended.reference_quote_id = Some(self.quote_id);
        amended.notes = self.notes.clone();
        amended.metadata = self.metadata.clone();
        info!(
            quote_id = %amended.quote_id,
            reference_quote_id = %self.quote_id,
            "Amendment quote created"
        );
        Ok(amended)
    }
}
