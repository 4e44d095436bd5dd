//! Transaction data model.
//!
//! A [`Transaction`] is one basket: an unordered set of distinct [`Item`]s
//! bought together. A [`TransactionSet`] is the immutable, ordered sequence
//! of baskets handed to the analysis engine.
//!
//! Items and transactions use ordered collections throughout so that every
//! downstream computation iterates in the same order for the same input.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// An opaque product identifier.
///
/// Cloning is cheap (shared `Arc<str>`); equality, ordering, and hashing are
/// by value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item(Arc<str>);

impl Item {
    /// Create an item from any string-like value.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The item identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Item {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Item {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Item {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// One basket: the distinct items purchased together.
///
/// Duplicate items collapse on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transaction {
    items: BTreeSet<Item>,
}

impl Transaction {
    /// Build a transaction from any iterable of item-like values.
    pub fn new<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of distinct items in the basket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the basket holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if `item` is in the basket.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.items.contains(item)
    }

    /// Iterate items in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Add an item. Returns `false` if it was already present.
    pub fn insert(&mut self, item: impl Into<Item>) -> bool {
        self.items.insert(item.into())
    }
}

impl<T: Into<Item>> FromIterator<T> for Transaction {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a Transaction {
    type Item = &'a Item;
    type IntoIter = std::collections::btree_set::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ---------------------------------------------------------------------------
// TransactionSet
// ---------------------------------------------------------------------------

/// The ordered, read-only sequence of baskets an analysis runs over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionSet {
    transactions: Vec<Transaction>,
}

impl TransactionSet {
    /// Wrap an already-built list of transactions.
    #[must_use]
    pub const fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Build from nested iterables, e.g. `[["milk", "bread"], ["bread"]]`.
    pub fn from_baskets<B, I, T>(baskets: B) -> Self
    where
        B: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        Self {
            transactions: baskets.into_iter().map(Transaction::new).collect(),
        }
    }

    /// Number of transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Returns `true` if there are no transactions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Iterate transactions in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    /// Borrow the underlying slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Every distinct item seen across all baskets, ascending.
    #[must_use]
    pub fn distinct_items(&self) -> BTreeSet<Item> {
        self.transactions
            .iter()
            .flat_map(|t| t.iter().cloned())
            .collect()
    }

    /// BLAKE3 fingerprint of the transaction sequence.
    ///
    /// Two sets hash equal iff they hold the same baskets in the same order.
    /// Callers that cache analysis results can key them by this value.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for transaction in &self.transactions {
            for item in transaction {
                hasher.update(item.as_bytes());
                hasher.update(b"\x00");
            }
            hasher.update(b"\x1e");
        }
        format!("blake3:{}", hasher.finalize())
    }
}

impl FromIterator<Transaction> for TransactionSet {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TransactionSet {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
