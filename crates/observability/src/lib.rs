//! Tracing/logging (shared setup).

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Like [`init`], but with an explicit default filter directive used when
/// `RUST_LOG` is unset (e.g. a CLI `--verbose` flag raising it to `debug`).
pub fn init_with_default_filter(directive: &str) {
    tracing::init_with_default_filter(directive);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
