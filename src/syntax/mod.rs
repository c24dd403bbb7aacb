//! Transform-path segment grammar: call syntax and unit-suffixed values.

pub mod call;
pub mod unit;
