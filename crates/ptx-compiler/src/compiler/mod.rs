//! Marshalling layer over the nvPTXCompiler C API
//!
//! `nvptx_ffi` declares the raw vendor entry points; `program` wraps one
//! compiler handle in an RAII type that owns it for its whole lifetime.

pub mod nvptx_ffi;
pub mod program;

pub use program::{version, PtxProgram};

#[cfg(test)]
mod test;
