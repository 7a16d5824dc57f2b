// cartstore/src/pipeline/mod.rs

//! The step-pipeline engine the cart operations are expressed in.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::Pipeline;
