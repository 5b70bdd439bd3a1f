//! Stat containers consumed by the resolution engine.
//!
//! ```text
//! [ Base × (1 + Multiplier) ]   (buff actions change the multiplier)
//!      ↓
//! [ Item transform chain ]      (equipped item, applied in order)
//!      ↓
//! current attack / defence / speed
//! ```

pub mod core;
pub mod transform;

pub use self::core::{Stat, StatBlock, StatKind};
pub use transform::{ValueTransform, apply_chain};
