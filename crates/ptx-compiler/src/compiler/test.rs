//! Tests for the nvPTXCompiler marshalling layer
//!
//! Tests that invoke the vendor library are `#[ignore]`d so the suite passes
//! on machines without the CUDA toolkit installed.

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::super::nvptx_ffi::nvPTXCompileResult;
    use super::super::{version, PtxProgram};
    use crate::error::PtxCompileError;
    use crate::registry::CompilerRegistry;

    /// Minimal kernel storing 1.0f through its pointer parameter.
    const PTX_CODE: &str = r#".version 7.4
.target sm_52
.address_size 64

.visible .entry set_one(
        .param .u64 set_one_param_0
)
{
        .reg .b32       %r<2>;
        .reg .b64       %rd<3>;

        ld.param.u64    %rd1, [set_one_param_0];
        cvta.to.global.u64      %rd2, %rd1;
        mov.u32         %r1, 1065353216;
        st.global.u32   [%rd2], %r1;
        ret;
}
"#;

    const OPTIONS: &[&str] = &["--gpu-name=sm_75"];

    #[test]
    fn test_status_symbol_names() {
        assert_eq!(
            nvPTXCompileResult::NVPTXCOMPILE_SUCCESS.symbol(),
            "NVPTXCOMPILE_SUCCESS"
        );
        assert_eq!(
            nvPTXCompileResult::NVPTXCOMPILE_ERROR_COMPILATION_FAILURE.symbol(),
            "NVPTXCOMPILE_ERROR_COMPILATION_FAILURE"
        );
        assert_eq!(
            nvPTXCompileResult::NVPTXCOMPILE_ERROR_UNSUPPORTED_PTX_VERSION.symbol(),
            "NVPTXCOMPILE_ERROR_UNSUPPORTED_PTX_VERSION"
        );
    }

    #[test]
    #[ignore] // Requires the CUDA toolkit
    #[serial]
    fn test_interior_nul_option_rejected_before_vendor_call() {
        let mut program = PtxProgram::new(PTX_CODE).expect("create failed");
        let err = program.compile(&["bad\0option"]).unwrap_err();
        assert!(matches!(err, PtxCompileError::InvalidOption { .. }));
    }

    #[test]
    #[ignore] // Requires the CUDA toolkit
    #[serial]
    fn test_get_version() {
        let (major, minor) = version().expect("version query failed");
        // The library first shipped with CUDA 11.1
        assert!((major, minor) >= (11, 1));
    }

    #[test]
    #[ignore] // Requires the CUDA toolkit
    #[serial]
    fn test_create_then_destroy() {
        let program = PtxProgram::new(PTX_CODE).expect("create failed");
        program.destroy().expect("destroy failed");
    }

    #[test]
    #[ignore] // Requires the CUDA toolkit
    #[serial]
    fn test_logs_empty_before_compile() {
        let program = PtxProgram::new(PTX_CODE).expect("create failed");
        assert_eq!(program.error_log().expect("error log failed"), "");
        assert_eq!(program.info_log().expect("info log failed"), "");
    }

    #[test]
    #[ignore] // Requires the CUDA toolkit
    #[serial]
    fn test_compile_produces_elf_image() {
        let mut program = PtxProgram::new(PTX_CODE).expect("create failed");
        program.compile(OPTIONS).expect("compile failed");

        let image = program.compiled_program().expect("fetch failed");
        assert_eq!(&image[..4], b"\x7fELF");
    }

    #[test]
    #[ignore] // Requires the CUDA toolkit
    #[serial]
    fn test_bad_option_surfaces_compilation_failure() {
        let mut program = PtxProgram::new(PTX_CODE).expect("create failed");
        let err = program
            .compile(&["--gpu-name=sm_75", "--bad-option"])
            .unwrap_err();

        match err {
            PtxCompileError::VendorCall { call, status } => {
                assert_eq!(call, "nvPTXCompilerCompile");
                assert_eq!(
                    status,
                    nvPTXCompileResult::NVPTXCOMPILE_ERROR_COMPILATION_FAILURE
                );
            }
            other => panic!("expected VendorCall, got {other}"),
        }

        let log = program.error_log().expect("error log failed");
        assert!(log.contains("Unknown option"));
    }

    #[test]
    #[ignore] // Requires the CUDA toolkit
    #[serial]
    fn test_malformed_ptx_reports_missing_version() {
        let mut program = PtxProgram::new(".target sm_52").expect("create failed");
        assert!(program.compile(OPTIONS).is_err());

        let log = program.error_log().expect("error log failed");
        assert!(log.contains("Missing .version directive"));
    }

    #[test]
    #[ignore] // Requires the CUDA toolkit
    #[serial]
    fn test_registry_lifecycle() {
        let mut registry = CompilerRegistry::new();

        let token = registry.create(PTX_CODE).expect("create failed");
        assert_eq!(registry.len(), 1);

        registry.compile(token, OPTIONS).expect("compile failed");
        let image = registry.compiled_program(token).expect("fetch failed");
        assert!(!image.is_empty());

        registry.destroy(token).expect("destroy failed");
        assert!(registry.is_empty());

        // The token is dead from here on, not undefined behavior.
        assert!(matches!(
            registry.destroy(token),
            Err(PtxCompileError::UnknownHandle { .. })
        ));
        assert!(matches!(
            registry.compiled_program(token),
            Err(PtxCompileError::UnknownHandle { .. })
        ));
    }

    #[test]
    #[ignore] // Requires the CUDA toolkit
    #[serial]
    fn test_registry_tokens_are_unique() {
        let mut registry = CompilerRegistry::new();

        let first = registry.create(PTX_CODE).expect("create failed");
        let second = registry.create(PTX_CODE).expect("create failed");
        assert_ne!(first, second);

        registry.destroy(first).expect("destroy failed");
        let third = registry.create(PTX_CODE).expect("create failed");
        assert_ne!(first, third);
    }
}
