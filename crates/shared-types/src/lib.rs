//! # Shared Types Crate
//!
//! Enumerations and constants of the building-automation object model,
//! shared by the wire codec and every object crate.
//!
//! ## Design Principles
//!
//! - **Closed enumerations**: every identifier the object crates dispatch on is
//!   a Rust enum, so property handling is an exhaustive `match`.
//! - **Wire values live here**: numeric encodings (`to_u32` / `from_u32`) are
//!   defined once, next to the enum they belong to.
//! - **Unknown stays representable**: identifiers outside the known set map to
//!   an `Other` / `Proprietary` variant instead of failing conversion.

pub mod errors;
pub mod object;
pub mod property;
pub mod values;

pub use errors::*;
pub use object::*;
pub use property::*;
pub use values::*;
