use std::env;
use std::path::PathBuf;

/// Locate the CUDA toolkit. `CUDA_HOME` takes precedence, then `CUDA_PATH`,
/// then the conventional `/usr/local/cuda` symlink.
fn cuda_home() -> Option<PathBuf> {
    for var in ["CUDA_HOME", "CUDA_PATH"] {
        if let Ok(path) = env::var(var) {
            return Some(PathBuf::from(path));
        }
    }

    let default = PathBuf::from("/usr/local/cuda");
    default.is_dir().then_some(default)
}

fn main() {
    println!("cargo:rerun-if-env-changed=CUDA_HOME");
    println!("cargo:rerun-if-env-changed=CUDA_PATH");

    if let Some(home) = cuda_home() {
        for lib_dir in ["lib64", "lib", "lib/x64"] {
            let dir = home.join(lib_dir);
            if dir.is_dir() {
                println!("cargo:rustc-link-search=native={}", dir.display());
            }
        }
    } else {
        println!(
            "cargo:warning=Could not locate CUDA. Set CUDA_HOME to the CUDA \
             installation path if linking fails."
        );
    }

    // The toolkit ships nvPTXCompiler as a static archive with C++ internals.
    println!("cargo:rustc-link-lib=static=nvptxcompiler_static");
    println!("cargo:rustc-link-lib=dylib=stdc++");
}
