//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod autonomous_engine;
pub mod deliberate;
pub mod voter_adapter;
pub mod voter_panel;

#[cfg(test)]
pub(crate) mod test_support;
