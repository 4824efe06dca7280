use anyhow::{Context, Result};
use std::time::Instant;
use tracing::info;

use ptx_compiler::{
    api::compile_ptx,
    cli::{parse_args, setup_logging},
    compiler,
};

fn main() -> Result<()> {
    let config = parse_args()?;
    setup_logging(&config.log_level)?;

    let (major, minor) = compiler::version().context("Failed to query nvPTXCompiler version")?;
    info!("nvPTXCompiler version {}.{}", major, minor);

    let ptx = std::fs::read_to_string(&config.input)
        .with_context(|| format!("Failed to read PTX source from {}", config.input.display()))?;

    let mut options = vec![format!("--gpu-name={}", config.gpu_name)];
    options.extend(config.compile_options.iter().cloned());
    info!("Compiling {} with options: {:?}", config.input.display(), options);

    let started = Instant::now();
    let output = compile_ptx(&ptx, &options)
        .with_context(|| format!("Failed to compile {}", config.input.display()))?;

    if !output.info_log.is_empty() {
        info!("Compiler info log:\n{}", output.info_log);
    }

    let out_path = config
        .output
        .clone()
        .unwrap_or_else(|| config.input.with_extension("cubin"));
    std::fs::write(&out_path, &output.compiled_program)
        .with_context(|| format!("Failed to write binary to {}", out_path.display()))?;

    info!(
        "Wrote {} bytes to {} in {:.2}s",
        output.compiled_program.len(),
        out_path.display(),
        started.elapsed().as_secs_f64()
    );

    Ok(())
}
