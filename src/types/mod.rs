//! Strongly-typed domain types for safer APIs.
//!
//! This module provides newtypes and structured types to make APIs
//! self-documenting and prevent axis mix-ups.
//!
//! # Design Philosophy
//!
//! - **Newtypes prevent mix-ups**: `TimeIndex(3)` vs `LevelIndex(3)` are distinct types
//! - **Named fields over positional**: `SectionShape { n_times, n_positions, n_levels }`
//! - **Zero-cost abstractions**: index newtypes are `#[repr(transparent)]`
//!
//! # Example
//!
//! ```
//! use sfd_rs::types::{AxisLayout, FieldKind, PositionIndex, SectionShape};
//!
//! let shape = SectionShape::new(24, 5, 8);
//! assert_eq!(shape.n_positions(), 5);
//!
//! let x = PositionIndex::new(4);
//! assert!(x.get() < shape.n_positions());
//!
//! assert_eq!(FieldKind::Salinity.name(), "salinity");
//! assert!(AxisLayout::default().is_canonical());
//! ```

mod field;
mod indices;
mod layout;
mod shape;

pub use field::FieldKind;
pub use indices::{LevelIndex, PositionIndex, SampleIndex, TimeIndex};
pub use layout::AxisLayout;
pub use shape::SectionShape;
