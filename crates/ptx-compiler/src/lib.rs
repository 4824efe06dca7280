pub mod api;
pub mod cli;
pub mod compiler;
pub mod error;
pub mod registry;

// Re-export commonly used items for convenience
pub use api::{compile_ptx, PtxCompileOutput};
pub use compiler::{version, PtxProgram};
pub use error::{PtxCompileError, Result};
pub use registry::{CompilerRegistry, CompilerToken};
