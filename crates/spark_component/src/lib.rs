//! # spark_component
//!
//! Identity primitives shared by every Spark crate.
//!
//! This crate provides:
//!
//! - [`ComponentKind`]: the stable tag attached to each component variant.
//! - [`ComponentRegistry`]: hands out kinds on first registration.
//! - [`EntityId`]: recyclable `u32` entity handles.
//! - [`IdAllocator`]: smallest-free-first id allocation.

pub mod component;
pub mod entity;

pub use component::{ComponentKind, ComponentRegistry};
pub use entity::{EntityId, IdAllocator};
