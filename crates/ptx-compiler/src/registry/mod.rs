//! Token-indexed registry of live compiler handles
//!
//! Embedding runtimes historically passed the native handle address across
//! the boundary as a plain integer, which makes use-after-destroy and double
//! destroy undefined behavior. The registry replaces that idiom: it owns
//! every [`PtxProgram`], hands out opaque [`CompilerToken`]s, and turns any
//! operation on a dead or unknown token into the defined
//! [`PtxCompileError::UnknownHandle`] error.
//!
//! The registry is single-threaded by contract, matching the vendor API:
//! mutating operations take `&mut self` and the embedder serializes access.

use std::collections::HashMap;
use std::fmt;

use crate::compiler::PtxProgram;
use crate::error::{PtxCompileError, Result};

/// Opaque key identifying one live compiler in a [`CompilerRegistry`].
///
/// Tokens are never reused within a registry, so a stale token stays invalid
/// for the registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompilerToken(u64);

impl CompilerToken {
    /// Rebuild a token from its integer form, e.g. one round-tripped through
    /// an embedding runtime.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Integer form of the token for storage outside Rust.
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CompilerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner of all live compiler handles, exposing the full binding surface
/// keyed by token.
pub struct CompilerRegistry {
    programs: HashMap<CompilerToken, PtxProgram>,
    next_token: u64,
}

impl Default for CompilerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerRegistry {
    pub fn new() -> Self {
        Self {
            programs: HashMap::new(),
            // Token 0 is never issued, so a zero-initialized integer slot in
            // an embedder cannot alias a live compiler.
            next_token: 1,
        }
    }

    /// Create a compilation context from PTX source and register it.
    pub fn create(&mut self, ptx: &str) -> Result<CompilerToken> {
        let program = PtxProgram::new(ptx)?;

        let token = CompilerToken(self.next_token);
        self.next_token += 1;
        self.programs.insert(token, program);

        Ok(token)
    }

    /// Release the compiler behind `token`, reporting the vendor's destroy
    /// status.
    ///
    /// The entry is removed before the vendor release runs, so a failed
    /// release leaks the vendor-side state but can never double-free, and a
    /// repeated destroy of the same token is the defined `UnknownHandle`
    /// error.
    pub fn destroy(&mut self, token: CompilerToken) -> Result<()> {
        let program = self
            .programs
            .remove(&token)
            .ok_or(PtxCompileError::UnknownHandle { token })?;
        program.destroy()
    }

    /// Compile the program behind `token` with an ordered list of option
    /// strings.
    pub fn compile<S: AsRef<str>>(&mut self, token: CompilerToken, options: &[S]) -> Result<()> {
        self.get_mut(token)?.compile(options)
    }

    /// Error log of the most recent compile attempt on `token`.
    pub fn error_log(&self, token: CompilerToken) -> Result<String> {
        self.get(token)?.error_log()
    }

    /// Info log of the most recent compile attempt on `token`.
    pub fn info_log(&self, token: CompilerToken) -> Result<String> {
        self.get(token)?.info_log()
    }

    /// Compiled binary image behind `token` after a successful compile.
    pub fn compiled_program(&self, token: CompilerToken) -> Result<Vec<u8>> {
        self.get(token)?.compiled_program()
    }

    /// Number of live compilers.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    fn get(&self, token: CompilerToken) -> Result<&PtxProgram> {
        self.programs
            .get(&token)
            .ok_or(PtxCompileError::UnknownHandle { token })
    }

    fn get_mut(&mut self, token: CompilerToken) -> Result<&mut PtxProgram> {
        self.programs
            .get_mut(&token)
            .ok_or(PtxCompileError::UnknownHandle { token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unknown_token() -> CompilerToken {
        CompilerToken::from_raw(9999)
    }

    #[test]
    fn test_token_round_trips_through_raw_form() {
        let token = CompilerToken::from_raw(7);
        assert_eq!(token.as_raw(), 7);
        assert_eq!(CompilerToken::from_raw(token.as_raw()), token);
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = CompilerRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_operations_on_unknown_token_are_defined_errors() {
        let mut registry = CompilerRegistry::new();
        let token = unknown_token();

        assert!(matches!(
            registry.destroy(token),
            Err(PtxCompileError::UnknownHandle { .. })
        ));
        assert!(matches!(
            registry.compile(token, &["--gpu-name=sm_75"]),
            Err(PtxCompileError::UnknownHandle { .. })
        ));
        assert!(matches!(
            registry.error_log(token),
            Err(PtxCompileError::UnknownHandle { .. })
        ));
        assert!(matches!(
            registry.info_log(token),
            Err(PtxCompileError::UnknownHandle { .. })
        ));
        assert!(matches!(
            registry.compiled_program(token),
            Err(PtxCompileError::UnknownHandle { .. })
        ));
    }
}
