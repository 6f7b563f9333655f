//! FILENAME: core/invoice/src/line_item.rs
//! PURPOSE: Job/amount line items and the running total.

use crate::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Longest text a single field may hold. Matches the character limit of one
/// spreadsheet cell.
pub const MAX_TEXT_CHARS: usize = 32_767;

/// One job performed on the vehicle and what it costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    /// Serialized as a decimal string so the exact value survives JSON.
    pub amount: Decimal,
}

impl LineItem {
    /// Validates raw form input and builds an item.
    pub fn parse(description: &str, amount: &str) -> Result<Self, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if description.chars().count() > MAX_TEXT_CHARS {
            return Err(ValidationError::TextTooLong {
                field: "Job description",
                max: MAX_TEXT_CHARS,
            });
        }
        let amount = parse_amount(amount)?;
        Ok(LineItem {
            description: description.to_string(),
            amount,
        })
    }
}

/// Parses a non-negative decimal amount. Plain (`450.00`) and scientific
/// (`4.5e2`) notation are accepted.
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::EmptyAmount);
    }

    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;

    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount(raw.to_string()));
    }
    Ok(value)
}

/// Ordered list of line items. The total is always computed from the items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItems {
    items: Vec<LineItem>,
}

impl LineItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends an item, returning the new running total.
    /// On error the list is left unchanged.
    pub fn add(&mut self, description: &str, amount: &str) -> Result<Decimal, ValidationError> {
        let item = LineItem::parse(description, amount)?;
        let total = self
            .checked_total()
            .and_then(|total| total.checked_add(item.amount))
            .ok_or(ValidationError::AmountTooLarge)?;
        self.items.push(item);
        Ok(total)
    }

    /// Sum of all amounts, or None when it does not fit in a `Decimal`.
    pub fn checked_total(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.amount))
    }

    /// Sum of all amounts. Lists that cannot be summed (only reachable by
    /// building them outside `add`) saturate at `Decimal::MAX`.
    pub fn total(&self) -> Decimal {
        self.checked_total().unwrap_or(Decimal::MAX)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl From<Vec<LineItem>> for LineItems {
    fn from(items: Vec<LineItem>) -> Self {
        LineItems { items }
    }
}

impl FromIterator<LineItem> for LineItems {
    fn from_iter<T: IntoIterator<Item = LineItem>>(iter: T) -> Self {
        LineItems {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LineItems {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
