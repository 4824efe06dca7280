//! One-shot compile convenience over the handle lifecycle

use serde::{Deserialize, Serialize};

use crate::compiler::PtxProgram;
use crate::error::{PtxCompileError, Result};

/// Outcome of a successful one-shot compilation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PtxCompileOutput {
    /// Compiled binary image (cubin).
    pub compiled_program: Vec<u8>,
    /// Vendor info log for the compilation, often empty.
    pub info_log: String,
}

/// Compile PTX source to a binary image in one call.
///
/// Creates a compiler, compiles with the given options, and retrieves the
/// artifact and info log; the handle is released on every path. A failed
/// compile is reported as [`PtxCompileError::CompilationFailed`] carrying the
/// vendor's error log.
pub fn compile_ptx<S: AsRef<str>>(ptx: &str, options: &[S]) -> Result<PtxCompileOutput> {
    let mut program = PtxProgram::new(ptx)?;

    if let Err(err) = program.compile(options) {
        return match err {
            PtxCompileError::VendorCall { status, .. } => {
                // Best effort: if the log itself cannot be fetched, report
                // the compile failure with what we have.
                let log = program.error_log().unwrap_or_default();
                Err(PtxCompileError::CompilationFailed { status, log })
            }
            other => Err(other),
        };
    }

    let compiled_program = program.compiled_program()?;
    let info_log = program.info_log()?;

    Ok(PtxCompileOutput {
        compiled_program,
        info_log,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_output_serialization() {
        let output = PtxCompileOutput {
            compiled_program: vec![0x7f, b'E', b'L', b'F'],
            info_log: String::new(),
        };

        let json = serde_json::to_string(&output).unwrap();
        let deserialized: PtxCompileOutput = serde_json::from_str(&json).unwrap();

        assert_eq!(output.compiled_program, deserialized.compiled_program);
        assert_eq!(output.info_log, deserialized.info_log);
    }
}
