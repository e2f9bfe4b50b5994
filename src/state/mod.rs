//! State types for the floor plan editor.
//!
//! This module contains:
//! - The image transform value shared by the store and the viewer
//! - Floor plan records, their categorical fields and form validation
//! - The record store that owns records, selection and the live transform

mod record;
mod store;
mod transform;

pub use record::*;
pub use store::*;
pub use transform::*;
