//! Domain records for the quote catalog.
//!
//! # Responsibility
//! - Define the canonical shapes shared by stores, the view model and FFI.
//!
//! # Invariants
//! - A `Quote` id is assigned once at import and never reused.
//! - `Category` values are projections and are never persisted.

pub mod category;
pub mod preference;
pub mod quote;
pub mod works;
