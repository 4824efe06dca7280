//! Safe RAII wrapper around a vendor compiler handle

use std::ffi::CString;
use std::ptr;

use libc::{c_char, c_int, c_uint, c_void, size_t};

use super::nvptx_ffi::*;
use crate::error::{PtxCompileError, Result};

/// Map a vendor status to an error naming the failing entry point.
fn check(status: nvPTXCompileResult, call: &'static str) -> Result<()> {
    if status == nvPTXCompileResult::NVPTXCOMPILE_SUCCESS {
        Ok(())
    } else {
        Err(PtxCompileError::VendorCall { call, status })
    }
}

/// Version of the linked nvPTXCompiler library as a `(major, minor)` pair.
pub fn version() -> Result<(u32, u32)> {
    let mut major: c_uint = 0;
    let mut minor: c_uint = 0;

    let status = unsafe { nvPTXCompilerGetVersion(&mut major, &mut minor) };
    check(status, "nvPTXCompilerGetVersion")?;

    Ok((major, minor))
}

/// One vendor compilation context, created from a PTX source buffer.
///
/// The handle is owned exclusively by this value and released exactly once,
/// either through [`PtxProgram::destroy`] or on drop. Holding a raw vendor
/// pointer makes this type `!Send` and `!Sync`; callers that share a program
/// across threads must serialize access themselves.
pub struct PtxProgram {
    handle: nvPTXCompilerHandle,
}

impl PtxProgram {
    /// Initialize a compilation context from PTX source text.
    ///
    /// The vendor call takes an explicit byte length, so the source is passed
    /// as-is without NUL termination.
    pub fn new(ptx: &str) -> Result<Self> {
        let mut handle: nvPTXCompilerHandle = ptr::null_mut();

        let status = unsafe {
            nvPTXCompilerCreate(&mut handle, ptx.len() as size_t, ptx.as_ptr() as *const c_char)
        };

        match status {
            nvPTXCompileResult::NVPTXCOMPILE_SUCCESS => Ok(Self { handle }),
            nvPTXCompileResult::NVPTXCOMPILE_ERROR_OUT_OF_MEMORY => {
                Err(PtxCompileError::OutOfMemory)
            }
            status => {
                // Already in an error condition; release whatever was
                // partially created without inspecting the destroy status.
                if !handle.is_null() {
                    unsafe { nvPTXCompilerDestroy(&mut handle) };
                }
                Err(PtxCompileError::VendorCall {
                    call: "nvPTXCompilerCreate",
                    status,
                })
            }
        }
    }

    /// Compile the program's PTX with an ordered list of option strings,
    /// e.g. `["--gpu-name=sm_75"]`.
    ///
    /// Options are flattened into a contiguous pointer array scoped to this
    /// call. Compilation either fully succeeds or the error log explains why.
    pub fn compile<S: AsRef<str>>(&mut self, options: &[S]) -> Result<()> {
        let c_options = options
            .iter()
            .map(|opt| {
                CString::new(opt.as_ref()).map_err(|_| PtxCompileError::InvalidOption {
                    option: opt.as_ref().to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let option_ptrs: Vec<*const c_char> = c_options.iter().map(|opt| opt.as_ptr()).collect();

        let status = unsafe {
            nvPTXCompilerCompile(self.handle, option_ptrs.len() as c_int, option_ptrs.as_ptr())
        };
        check(status, "nvPTXCompilerCompile")
    }

    /// Error log of the most recent compile attempt. Empty before any
    /// compile, and after a successful one.
    pub fn error_log(&self) -> Result<String> {
        self.fetch_log(
            "nvPTXCompilerGetErrorLogSize",
            nvPTXCompilerGetErrorLogSize,
            "nvPTXCompilerGetErrorLog",
            nvPTXCompilerGetErrorLog,
        )
    }

    /// Info log of the most recent compile attempt.
    pub fn info_log(&self) -> Result<String> {
        self.fetch_log(
            "nvPTXCompilerGetInfoLogSize",
            nvPTXCompilerGetInfoLogSize,
            "nvPTXCompilerGetInfoLog",
            nvPTXCompilerGetInfoLog,
        )
    }

    /// Snapshot of the compiled binary image (cubin) after a successful
    /// compile.
    pub fn compiled_program(&self) -> Result<Vec<u8>> {
        let mut size: size_t = 0;
        let status = unsafe { nvPTXCompilerGetCompiledProgramSize(self.handle, &mut size) };
        check(status, "nvPTXCompilerGetCompiledProgramSize")?;

        let mut image = vec![0u8; size];
        let status =
            unsafe { nvPTXCompilerGetCompiledProgram(self.handle, image.as_mut_ptr() as *mut c_void) };
        check(status, "nvPTXCompilerGetCompiledProgram")?;

        Ok(image)
    }

    /// Release the vendor context, reporting the vendor's destroy status.
    ///
    /// On failure the handle is abandoned rather than destroyed again; the
    /// vendor API defines no recovery path for a failed release.
    pub fn destroy(mut self) -> Result<()> {
        let status = unsafe { nvPTXCompilerDestroy(&mut self.handle) };
        // Whatever the vendor reported, this handle must never be touched
        // again, including by Drop.
        self.handle = ptr::null_mut();
        check(status, "nvPTXCompilerDestroy")
    }

    /// Size-then-fetch protocol shared by both text logs. The reported size
    /// excludes the trailing NUL byte, so one extra byte is reserved for it.
    fn fetch_log(
        &self,
        size_call: &'static str,
        size_fn: unsafe extern "C" fn(nvPTXCompilerHandle, *mut size_t) -> nvPTXCompileResult,
        fill_call: &'static str,
        fill_fn: unsafe extern "C" fn(nvPTXCompilerHandle, *mut c_char) -> nvPTXCompileResult,
    ) -> Result<String> {
        let mut size: size_t = 0;
        let status = unsafe { size_fn(self.handle, &mut size) };
        check(status, size_call)?;

        let mut buf = vec![0u8; size + 1];
        let status = unsafe { fill_fn(self.handle, buf.as_mut_ptr() as *mut c_char) };
        check(status, fill_call)?;

        buf.truncate(size);
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Drop for PtxProgram {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            // No caller to report to on this path; the status is dropped.
            unsafe { nvPTXCompilerDestroy(&mut self.handle) };
        }
    }
}
