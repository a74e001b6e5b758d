//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Ledger rows have no identity of their own: two orders with the same
/// timestamp, payer, menu, quantity, price and status are the same row as far
/// as the ledger is concerned. Rows are replaced wholesale, never patched.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
