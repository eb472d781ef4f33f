//! Stack safety utilities for the Reel runtime.
//!
//! Tree-walking execution recurses once per language-level function call,
//! so deeply recursive programs would exhaust the host stack long before
//! the runtime's own activation-depth limit triggers. `ensure_sufficient_stack`
//! grows the host stack on demand via the `stacker` crate.
//!
//! On WASM targets stacker is unavailable; the closure runs directly and
//! the engine relies on its activation-depth limit alone.

/// Ensure sufficient stack space is available before executing `f`.
///
/// Wrap the recursive step of execution (one per language-level call) in
/// this function; the stack grows in segments as activations deepen.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (128KB red zone).
    const RED_ZONE: usize = 128 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countdown(n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        // Burn some stack per frame so the test exercises actual growth.
        let pad = [n; 64];
        ensure_sufficient_stack(|| countdown(pad[0].saturating_sub(1)))
    }

    #[test]
    fn survives_deep_recursion() {
        assert_eq!(countdown(50_000), 0);
    }

    #[test]
    fn returns_closure_result() {
        let out = ensure_sufficient_stack(|| 40 + 2);
        assert_eq!(out, 42);
    }
}
