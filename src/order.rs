//! Orders
//!
//! Collapses incoming requests into one [`LineRequest`] per item, keeping the
//! order in which items first appear.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::items::{ItemId, LineRequest};

/// Errors raised while building an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Summed quantity for an item does not fit in an `i64`
    #[error("total quantity for {0} overflowed")]
    QuantityOverflow(ItemId),

    /// A `NAME=QTY` argument had an unparsable quantity
    #[error("invalid quantity in {0:?}")]
    InvalidQuantity(String),

    /// An argument or request line had no item name
    #[error("missing item name in {0:?}")]
    MissingItem(String),

    /// JSON request parsing error
    #[error("failed to parse request: {0}")]
    Json(#[from] serde_json::Error),
}

/// A request with at most one line per item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Order {
    lines: Vec<LineRequest>,
    positions: FxHashMap<ItemId, usize>,
}

impl Order {
    /// Create an empty order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of `item_id`, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::QuantityOverflow`] if the merged quantity overflows.
    pub fn add(&mut self, item_id: ItemId, quantity: i64) -> Result<&mut Self, OrderError> {
        if let Some(line) = self
            .positions
            .get(&item_id)
            .and_then(|&idx| self.lines.get_mut(idx))
        {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or(OrderError::QuantityOverflow(item_id))?;

            return Ok(self);
        }

        self.positions.insert(item_id.clone(), self.lines.len());
        self.lines.push(LineRequest { item_id, quantity });

        Ok(self)
    }

    /// Build an order from a flat list of identifiers, one unit per occurrence.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if an identifier is blank or a count overflows.
    pub fn from_item_ids<I, S>(ids: I) -> Result<Self, OrderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut order = Self::new();

        for id in ids {
            let item_id = ItemId::new(id.as_ref());

            if item_id.is_empty() {
                return Err(OrderError::MissingItem(id.as_ref().to_string()));
            }

            order.add(item_id, 1)?;
        }

        Ok(order)
    }

    /// Build an order from line requests, summing repeated items.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if an identifier is blank or a sum overflows.
    pub fn from_lines(lines: impl IntoIterator<Item = LineRequest>) -> Result<Self, OrderError> {
        let mut order = Self::new();

        for line in lines {
            if line.item_id.is_empty() {
                return Err(OrderError::MissingItem(line.item_id.to_string()));
            }

            order.add(line.item_id, line.quantity)?;
        }

        Ok(order)
    }

    /// Parse a JSON request: an array of `{"name": ..., "quantity": ...}`.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the JSON is malformed or lines cannot merge.
    pub fn from_json_str(contents: &str) -> Result<Self, OrderError> {
        let lines: Vec<LineRequest> = serde_json::from_str(contents)?;

        Self::from_lines(lines)
    }

    /// Parse command-line tokens, each either `NAME` (one unit) or
    /// `NAME=QTY` / `NAME:QTY`.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if a token has no name or a bad quantity.
    pub fn parse_args<I, S>(args: I) -> Result<Self, OrderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut order = Self::new();

        for arg in args {
            let arg = arg.as_ref();

            let (name, quantity) = match arg.split_once(['=', ':']) {
                Some((name, quantity)) => {
                    let quantity = quantity
                        .trim()
                        .parse::<i64>()
                        .map_err(|_err| OrderError::InvalidQuantity(arg.to_string()))?;

                    (name, quantity)
                }
                None => (arg, 1),
            };

            let item_id = ItemId::new(name);

            if item_id.is_empty() {
                return Err(OrderError::MissingItem(arg.to_string()));
            }

            order.add(item_id, quantity)?;
        }

        Ok(order)
    }

    /// Lines in first-seen order.
    pub fn lines(&self) -> &[LineRequest] {
        &self.lines
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the order has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
