//! Fruit Bill
//!
//! Shopping-cart bill calculator. Each requested item is looked up in a
//! read-only catalog, priced with the rule for its offer (no discount, buy one
//! get one free, or three for two) and aggregated into a [`bill::BillResponse`].

pub mod amounts;
pub mod bill;
pub mod catalog;
pub mod items;
pub mod offers;
pub mod order;
pub mod prelude;
pub mod receipt;
pub mod rules;
