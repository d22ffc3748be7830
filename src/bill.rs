//! Bills
//!
//! Prices each requested line against a catalog snapshot and aggregates the
//! results. Lines for unknown items are left out of the bill and reported in
//! [`BillResponse::unrecognized`].

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    amounts::serialize_amount,
    catalog::{Catalog, CatalogError, CatalogSource},
    items::{ItemId, LineRequest},
    offers::OfferType,
    rules::{PricingRule, Quote, RuleError},
};

/// Errors that abort a bill computation.
#[derive(Debug, Error)]
pub enum BillError {
    /// A line could not be priced. One bad line fails the whole bill.
    #[error("invalid argument pricing {item_id}: {source}")]
    InvalidArgument {
        /// Item whose line failed
        item_id: ItemId,

        /// Rule rejection
        #[source]
        source: RuleError,
    },

    /// The catalog snapshot could not be produced.
    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(#[from] CatalogError),

    /// Summed quantity does not fit in an `i64`.
    #[error("total quantity overflowed")]
    QuantityOverflow,

    /// Summed charge does not fit in a decimal.
    #[error("total charge overflowed")]
    ChargeOverflow,
}

/// A priced bill line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLine {
    /// Item identifier
    #[serde(rename = "fruit")]
    pub item_id: ItemId,

    /// Offer applied to the line
    #[serde(rename = "offer")]
    pub offer_type: OfferType,

    /// Price of one unit
    #[serde(serialize_with = "serialize_amount")]
    pub unit_price: Decimal,

    /// Units requested
    pub quantity: i64,

    /// Amount charged for the line
    #[serde(serialize_with = "serialize_amount")]
    pub charged: Decimal,

    /// `charged / unit_price`, the number of units effectively paid for.
    /// Zero when the unit price is zero.
    #[serde(rename = "avgPrice", serialize_with = "serialize_amount")]
    pub average_unit_charge: Decimal,
}

/// Result of a bill computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillResponse {
    /// Priced lines in request order
    #[serde(rename = "fruits")]
    lines: Vec<PricedLine>,

    /// Sum of quantities over priced lines
    total_quantity: i64,

    /// Sum of charges over priced lines
    #[serde(rename = "totalPrice", serialize_with = "serialize_amount")]
    total_charge: Decimal,

    /// Requested items missing from the catalog
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unrecognized: Vec<ItemId>,
}

impl BillResponse {
    /// A bill with no lines and zero totals.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Priced lines in request order.
    pub fn lines(&self) -> &[PricedLine] {
        &self.lines
    }

    /// Sum of quantities over priced lines.
    pub fn total_quantity(&self) -> i64 {
        self.total_quantity
    }

    /// Sum of charges over priced lines.
    pub fn total_charge(&self) -> Decimal {
        self.total_charge
    }

    /// Requested items that were not in the catalog, in request order.
    pub fn unrecognized(&self) -> &[ItemId] {
        &self.unrecognized
    }

    /// Whether the bill has no priced lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn push_line(&mut self, line: PricedLine) -> Result<(), BillError> {
        self.total_quantity = self
            .total_quantity
            .checked_add(line.quantity)
            .ok_or(BillError::QuantityOverflow)?;

        self.total_charge = self
            .total_charge
            .checked_add(line.charged)
            .ok_or(BillError::ChargeOverflow)?;

        self.lines.push(line);

        Ok(())
    }
}

/// Price a single line against its catalog entry.
///
/// Returns `Ok(None)` when the item is not in the catalog.
///
/// # Errors
///
/// Returns [`BillError::InvalidArgument`] if the pricing rule rejects the line.
pub fn price_line(
    request: &LineRequest,
    catalog: &impl Catalog,
) -> Result<Option<PricedLine>, BillError> {
    let Some(entry) = catalog.lookup(&request.item_id) else {
        return Ok(None);
    };

    let Quote {
        unit_price,
        charged,
    } = PricingRule::for_offer(entry.offer_type)
        .quote(entry.unit_price, request.quantity)
        .map_err(|source| BillError::InvalidArgument {
            item_id: request.item_id.clone(),
            source,
        })?;

    // Division by a zero price would be undefined; report zero instead.
    let average_unit_charge = charged.checked_div(unit_price).unwrap_or(Decimal::ZERO);

    Ok(Some(PricedLine {
        item_id: entry.item_id.clone(),
        offer_type: entry.offer_type,
        unit_price,
        quantity: request.quantity,
        charged,
        average_unit_charge,
    }))
}

/// Compute the bill for `lines` against `catalog`.
///
/// Lines are priced in the order given; duplicate identifiers are not merged
/// (see [`crate::order::Order`]). A missing or empty request yields an empty
/// bill.
///
/// # Errors
///
/// Returns [`BillError::InvalidArgument`] if any line cannot be priced, or an
/// overflow error if the totals do not fit.
#[tracing::instrument(skip_all, fields(lines = lines.map_or(0, <[LineRequest]>::len)))]
pub fn compute_bill(
    lines: Option<&[LineRequest]>,
    catalog: &impl Catalog,
) -> Result<BillResponse, BillError> {
    let mut bill = BillResponse::empty();

    for request in lines.unwrap_or_default() {
        match price_line(request, catalog)? {
            Some(line) => {
                debug!(
                    item = %line.item_id,
                    offer = %line.offer_type,
                    quantity = line.quantity,
                    charged = %line.charged,
                    "priced line"
                );

                bill.push_line(line)?;
            }
            None => {
                warn!(item = %request.item_id, "item not in catalog, leaving it off the bill");

                bill.unrecognized.push(request.item_id.clone());
            }
        }
    }

    debug!(
        total_quantity = bill.total_quantity,
        total_charge = %bill.total_charge,
        "bill computed"
    );

    Ok(bill)
}

/// Compute the bill using a fresh snapshot from `source`.
///
/// The source is only consulted when there is at least one line.
///
/// # Errors
///
/// Returns [`BillError::CatalogUnavailable`] if the snapshot fails, or any
/// error from [`compute_bill`].
pub fn compute_bill_from_source(
    lines: Option<&[LineRequest]>,
    source: &impl CatalogSource,
) -> Result<BillResponse, BillError> {
    let Some(lines) = lines.filter(|lines| !lines.is_empty()) else {
        return Ok(BillResponse::empty());
    };

    let catalog = source.snapshot()?;

    compute_bill(Some(lines), &catalog)
}
