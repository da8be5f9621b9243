//! Shared limits and small input helpers.

pub mod validation;
