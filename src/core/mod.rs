//! Core business logic layer
//!
//! Data structures, the seams to external collaborators, and the two
//! pieces of real logic: the bulk import parser and the project view
//! formatter.

pub mod data;
pub mod import;
pub mod traits;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;
