//! Error handling for the nvPTXCompiler binding
//!
//! Library errors are modeled with `thiserror`; the CLI wraps them in
//! `anyhow` for reporting. Every failed vendor call is surfaced exactly once,
//! naming the entry point that failed and the vendor's symbolic status code.

use thiserror::Error;

use crate::compiler::nvptx_ffi::nvPTXCompileResult;
use crate::registry::CompilerToken;

#[derive(Error, Debug)]
pub enum PtxCompileError {
    /// A vendor entry point reported a non-success status.
    #[error("{} error when calling {call}", .status.symbol())]
    VendorCall {
        call: &'static str,
        status: nvPTXCompileResult,
    },

    /// The vendor library could not allocate compiler state during creation.
    #[error("out of memory while creating a compiler handle")]
    OutOfMemory,

    /// Compilation failed; carries the vendor's error log verbatim.
    #[error("PTX compilation failed ({}): {log}", .status.symbol())]
    CompilationFailed {
        status: nvPTXCompileResult,
        log: String,
    },

    /// The registry has no live compiler for this token. Covers destroyed
    /// tokens as well, so use-after-destroy is a defined error.
    #[error("unknown compiler handle: {token}")]
    UnknownHandle { token: CompilerToken },

    /// Compile options cross the C boundary as NUL-terminated strings.
    #[error("compile option contains an interior NUL byte: {option:?}")]
    InvalidOption { option: String },
}

pub type Result<T> = std::result::Result<T, PtxCompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_call_display_embeds_status_symbol() {
        let err = PtxCompileError::VendorCall {
            call: "nvPTXCompilerCompile",
            status: nvPTXCompileResult::NVPTXCOMPILE_ERROR_INVALID_INPUT,
        };

        let display = format!("{err}");
        assert_eq!(
            display,
            "NVPTXCOMPILE_ERROR_INVALID_INPUT error when calling nvPTXCompilerCompile"
        );
    }

    #[test]
    fn test_compilation_failed_display_carries_log() {
        let err = PtxCompileError::CompilationFailed {
            status: nvPTXCompileResult::NVPTXCOMPILE_ERROR_COMPILATION_FAILURE,
            log: "ptxas fatal   : Unknown option '--bad-option'".to_string(),
        };

        let display = format!("{err}");
        assert!(display.contains("NVPTXCOMPILE_ERROR_COMPILATION_FAILURE"));
        assert!(display.contains("Unknown option"));
    }

    #[test]
    fn test_unknown_handle_display() {
        let err = PtxCompileError::UnknownHandle {
            token: CompilerToken::from_raw(42),
        };

        assert_eq!(format!("{err}"), "unknown compiler handle: 42");
    }

    #[test]
    fn test_errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<PtxCompileError>();
    }
}
