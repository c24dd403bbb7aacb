//! Pipeline normalization and canonical serialization.

mod pipeline;
mod writer;

pub use pipeline::Pipeline;
