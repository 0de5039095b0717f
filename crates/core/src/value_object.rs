//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// create a new one with the new values.
///
/// - **Value Object**: no identity (`Money::from_minor(100)` equals any other
///   `Money::from_minor(100)`)
/// - **Entity**: has identity (two inventory items with the same `ItemId` are
///   the same item, whatever their fields say)
///
/// The trait requires:
/// - **Clone**: value objects are cheap to copy around
/// - **PartialEq**: compared by their attribute values
/// - **Debug**: debuggable (helpful for logging, testing)
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
