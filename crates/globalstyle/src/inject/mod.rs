//! Injection of the composed sheet into the document.
//!
//! - [`StyleTarget`]: the document's style subsystem
//! - [`MemoryDocument`]: headless target for server rendering and tests
//! - [`StyleRegistry`]: applies a sheet to a target exactly once
//! - [`inject`]: the process-wide registry used at application start
//!
//! On `wasm32` the process-wide registry targets the browser's
//! `document.head` by default. Elsewhere a target must be installed with
//! [`set_style_target`] before [`inject`] can succeed.

#[cfg(target_arch = "wasm32")]
mod browser;
mod registry;
mod target;

use once_cell::sync::Lazy;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserDocument;
pub use registry::{Registration, StyleRegistry};
pub use target::{InjectedStyle, MemoryDocument, StyleTarget};

use crate::error::InjectionEnvironmentError;
use crate::sheet::GlobalStyleSheet;

static GLOBAL_REGISTRY: Lazy<StyleRegistry> =
    Lazy::new(|| StyleRegistry::with_target(default_target()));

#[cfg(target_arch = "wasm32")]
fn default_target() -> Option<Box<dyn StyleTarget>> {
    Some(Box::new(BrowserDocument::new()))
}

#[cfg(not(target_arch = "wasm32"))]
fn default_target() -> Option<Box<dyn StyleTarget>> {
    None
}

/// Installs the target used by [`inject`].
///
/// Needed outside the browser, or to redirect injection in tests.
pub fn set_style_target(target: impl StyleTarget + 'static) {
    GLOBAL_REGISTRY.set_target(Box::new(target));
}

/// Injects the global sheet into the process-wide registry.
///
/// Call once at application start, before the first render. Later calls are
/// no-ops that report [`Registration::AlreadyInjected`].
///
/// # Errors
///
/// [`InjectionEnvironmentError`] when no document is available. This is a
/// fatal startup condition.
pub fn inject(sheet: GlobalStyleSheet) -> Result<Registration, InjectionEnvironmentError> {
    GLOBAL_REGISTRY.register(sheet)
}

/// The process-wide registry.
pub fn global_registry() -> &'static StyleRegistry {
    &GLOBAL_REGISTRY
}
