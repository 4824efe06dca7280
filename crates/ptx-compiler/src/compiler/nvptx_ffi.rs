//! nvPTXCompiler FFI bindings
//!
//! This module provides the low-level C API surface of NVIDIA's PTX-to-SASS
//! compiler library. Linking against `nvptxcompiler_static` is arranged by
//! the build script.

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(dead_code)]

use libc::{c_char, c_int, c_uint, c_void, size_t};

/// Opaque handle to one vendor-managed compilation context.
pub type nvPTXCompilerHandle = *mut c_void;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types, dead_code)]
pub enum nvPTXCompileResult {
    NVPTXCOMPILE_SUCCESS = 0,
    NVPTXCOMPILE_ERROR_INVALID_COMPILER_HANDLE = 1,
    NVPTXCOMPILE_ERROR_INVALID_INPUT = 2,
    NVPTXCOMPILE_ERROR_COMPILATION_FAILURE = 3,
    NVPTXCOMPILE_ERROR_INTERNAL = 4,
    NVPTXCOMPILE_ERROR_OUT_OF_MEMORY = 5,
    NVPTXCOMPILE_ERROR_COMPILER_INVOCATION_INCOMPLETE = 6,
    NVPTXCOMPILE_ERROR_UNSUPPORTED_PTX_VERSION = 7,
    NVPTXCOMPILE_ERROR_UNSUPPORTED_DEVSIDE_SYNC = 8,
}

impl nvPTXCompileResult {
    /// Symbolic name of the status code as spelled in `nvPTXCompiler.h`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::NVPTXCOMPILE_SUCCESS => "NVPTXCOMPILE_SUCCESS",
            Self::NVPTXCOMPILE_ERROR_INVALID_COMPILER_HANDLE => {
                "NVPTXCOMPILE_ERROR_INVALID_COMPILER_HANDLE"
            }
            Self::NVPTXCOMPILE_ERROR_INVALID_INPUT => "NVPTXCOMPILE_ERROR_INVALID_INPUT",
            Self::NVPTXCOMPILE_ERROR_COMPILATION_FAILURE => {
                "NVPTXCOMPILE_ERROR_COMPILATION_FAILURE"
            }
            Self::NVPTXCOMPILE_ERROR_INTERNAL => "NVPTXCOMPILE_ERROR_INTERNAL",
            Self::NVPTXCOMPILE_ERROR_OUT_OF_MEMORY => "NVPTXCOMPILE_ERROR_OUT_OF_MEMORY",
            Self::NVPTXCOMPILE_ERROR_COMPILER_INVOCATION_INCOMPLETE => {
                "NVPTXCOMPILE_ERROR_COMPILER_INVOCATION_INCOMPLETE"
            }
            Self::NVPTXCOMPILE_ERROR_UNSUPPORTED_PTX_VERSION => {
                "NVPTXCOMPILE_ERROR_UNSUPPORTED_PTX_VERSION"
            }
            Self::NVPTXCOMPILE_ERROR_UNSUPPORTED_DEVSIDE_SYNC => {
                "NVPTXCOMPILE_ERROR_UNSUPPORTED_DEVSIDE_SYNC"
            }
        }
    }
}

extern "C" {
    pub fn nvPTXCompilerGetVersion(major: *mut c_uint, minor: *mut c_uint) -> nvPTXCompileResult;

    pub fn nvPTXCompilerCreate(
        compiler: *mut nvPTXCompilerHandle,
        ptx_code_len: size_t,
        ptx_code: *const c_char,
    ) -> nvPTXCompileResult;

    pub fn nvPTXCompilerDestroy(compiler: *mut nvPTXCompilerHandle) -> nvPTXCompileResult;

    pub fn nvPTXCompilerCompile(
        compiler: nvPTXCompilerHandle,
        num_compile_options: c_int,
        compile_options: *const *const c_char,
    ) -> nvPTXCompileResult;

    pub fn nvPTXCompilerGetErrorLogSize(
        compiler: nvPTXCompilerHandle,
        error_log_size: *mut size_t,
    ) -> nvPTXCompileResult;

    pub fn nvPTXCompilerGetErrorLog(
        compiler: nvPTXCompilerHandle,
        error_log: *mut c_char,
    ) -> nvPTXCompileResult;

    pub fn nvPTXCompilerGetInfoLogSize(
        compiler: nvPTXCompilerHandle,
        info_log_size: *mut size_t,
    ) -> nvPTXCompileResult;

    pub fn nvPTXCompilerGetInfoLog(
        compiler: nvPTXCompilerHandle,
        info_log: *mut c_char,
    ) -> nvPTXCompileResult;

    pub fn nvPTXCompilerGetCompiledProgramSize(
        compiler: nvPTXCompilerHandle,
        binary_image_size: *mut size_t,
    ) -> nvPTXCompileResult;

    pub fn nvPTXCompilerGetCompiledProgram(
        compiler: nvPTXCompilerHandle,
        binary_image: *mut c_void,
    ) -> nvPTXCompileResult;
}
