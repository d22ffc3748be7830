//! Fruit Bill prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    amounts::{format_amount, round_to_cents},
    bill::{BillError, BillResponse, PricedLine, compute_bill, compute_bill_from_source},
    catalog::{
        Catalog, CatalogEntry, CatalogError, CatalogSource, FileCatalog, PriceList,
        file::{CatalogDocument, CatalogFormat},
    },
    items::{ItemId, LineRequest},
    offers::{OfferDetails, OfferType},
    order::{Order, OrderError},
    receipt::{Receipt, ReceiptError},
    rules::{PricingRule, Quote, RuleError},
};
