//! # dimspec-core
//!
//! Core data structures for the dimspec formula engine.
//!
//! This crate provides the fundamental types used throughout dimspec:
//! - [`Dimension`] - A named, typed value attached to a specification,
//!   optionally computed from a formula
//! - [`Value`] - The scalar stored in dimension values and table-row cells
//! - [`Formula`] - An expression with its derived dependency list
//! - [`TableColumn`] and [`TableRow`] - Schema and per-entry data of a
//!   user-defined dynamic table
//!
//! All types serialize to the JSON shape the external persistence layer
//! expects (`dataType`, `isCalculated`, `isRequired`, ...), so callers can
//! round-trip them without translation.
//!
//! ## Example
//!
//! ```rust
//! use dimspec_core::{DataType, Dimension};
//!
//! let width = Dimension::number("width", 12.5).with_unit("mm");
//! let area = Dimension::new("area", DataType::Number).with_formula("width * height");
//!
//! assert!(!width.has_formula());
//! assert!(area.is_calculated);
//! ```

pub mod dimension;
pub mod formula;
pub mod table;
pub mod value;

// Re-exports for convenience
pub use dimension::{DataType, Dimension};
pub use formula::Formula;
pub use table::{ColumnType, TableColumn, TableRow};
pub use value::Value;
