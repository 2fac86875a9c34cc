//! Data structures for probe data.
//!
//! Domain types built from validated API payloads.

pub mod cook;

pub use cook::Cook;
