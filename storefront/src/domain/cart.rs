//! Cart line items and snapshots exchanged with the cart endpoints.
//!
//! The server owns the cart. These types only describe the payloads the
//! client round-trips: what it posts when adding or restoring items and what
//! it mirrors into the local cart cache.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a cart line item.
///
/// Serialised lower-case (`"produto"` / `"servico"`) to match the wire
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A physical product with stock.
    Produto,
    /// A bookable service.
    Servico,
}

impl ItemKind {
    /// Wire tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Produto => "produto",
            Self::Servico => "servico",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "produto" => Ok(Self::Produto),
            "servico" => Ok(Self::Servico),
            other => Err(format!("unknown item kind: {other}")),
        }
    }
}

/// One entry of the cart.
///
/// `(tipo, id)` is expected to be unique within a snapshot, but that is the
/// server's invariant; the client never deduplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Item category.
    pub tipo: ItemKind,
    /// Catalogue identifier within the category.
    pub id: u64,
    /// Quantity held in the cart.
    pub quantidade: u32,
}

impl CartLineItem {
    /// Build a line item.
    pub fn new(tipo: ItemKind, id: u64, quantidade: u32) -> Self {
        Self {
            tipo,
            id,
            quantidade,
        }
    }
}

/// Ordered cart contents as returned by the server.
///
/// Serialises as a bare JSON array, which is also the format stored in the
/// local cart cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartSnapshot(Vec<CartLineItem>);

impl CartSnapshot {
    /// Snapshot holding the given items in order.
    pub fn new(items: Vec<CartLineItem>) -> Self {
        Self(items)
    }

    /// Whether the snapshot holds no items.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Line items in server order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.0
    }
}

impl From<Vec<CartLineItem>> for CartSnapshot {
    fn from(items: Vec<CartLineItem>) -> Self {
        Self(items)
    }
}

impl IntoIterator for CartSnapshot {
    type Item = CartLineItem;
    type IntoIter = std::vec::IntoIter<CartLineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Item count reported by the server for the badge.
///
/// Whether this is the number of lines or the summed quantity is up to the
/// server; the client passes it through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartCount(u64);

impl CartCount {
    /// Empty cart.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw server count.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether badges should be visible for this count.
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for CartCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
