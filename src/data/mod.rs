//! Data layer: line records, catalogue parsing and classification.
//!
//! Architecture:
//! ```text
//!  <source>.my-lines.list
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ catalogue │  fixed-width text → Vec<LineRecord>
//!   └───────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │  origin   │  rrline / molecular database / "U-" species
//!   └───────────┘
//!      │      │
//!      │      ▼
//!      │   ┌─────────┐   ┌───────┐
//!      │   │ species │ → │ greek │  element class, then series order
//!      │   └─────────┘   └───────┘
//!      ▼
//!   ┌───────────┐
//!   │   band    │  frequency → band label
//!   └───────────┘
//! ```

pub mod band;
pub mod catalogue;
pub mod filter;
pub mod greek;
pub mod model;
pub mod origin;
pub mod species;
pub mod synthetic;
pub mod telescope;
