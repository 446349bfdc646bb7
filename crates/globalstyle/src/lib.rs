//! # globalstyle - document-wide stylesheet composition
//!
//! `globalstyle` assembles the application's global CSS from independent
//! fragments. It then registers the result with the document exactly once,
//! before the first render.
//!
//! ## Composition
//!
//! The sheet is always laid out in cascade order, so later fragments can
//! override earlier ones:
//!
//! 1. **Reset**: normalizes user-agent defaults ([`reset`])
//! 2. **Typography**: `@font-face` declarations and the default font ([`Typography`])
//! 3. **Colors**: token custom properties on `:root` ([`ColorTokenSet`])
//! 4. **Root rules**: application-supplied root-level CSS
//! 5. **Root layout**: full-size `html`/`body` and a positioned mount element
//!
//! Each fragment is syntax-checked with `cssparser` before it is accepted.
//!
//! ## Quick Start
//!
//! ```rust
//! use globalstyle::{GlobalStyle, MemoryDocument, StyleRegistry};
//!
//! let sheet = GlobalStyle::new().compose()?;
//!
//! // In the browser, `globalstyle::inject(sheet)` targets `document.head`.
//! let document = MemoryDocument::new();
//! let registry = StyleRegistry::new(document.clone());
//! registry.register(sheet)?;
//!
//! assert_eq!(document.len(), 1);
//! # Ok::<(), globalstyle::StyleError>(())
//! ```
//!
//! ## Color tokens
//!
//! Component-level styling reads colors from the same table that feeds the
//! sheet:
//!
//! ```rust
//! assert_eq!(globalstyle::colors::lookup("primary").unwrap(), "#1F6FEB");
//! assert_eq!(globalstyle::colors::palette().var("primary").unwrap(), "var(--primary)");
//! ```
//!
//! ## Logging
//!
//! Composition and injection emit `tracing` events. No subscriber is installed
//! by this crate.

pub mod colors;
mod config;
mod error;
mod fragment;
mod inject;
pub mod reset;
mod sheet;
mod typography;

pub use colors::{ColorToken, ColorTokenSet};
pub use config::StyleConfig;
pub use error::{
    CompositionError, CompositionFault, ConfigError, InjectionEnvironmentError, StyleError,
    UnknownTokenError,
};
pub use fragment::{FragmentKind, StyleFragment};
#[cfg(target_arch = "wasm32")]
pub use inject::BrowserDocument;
pub use inject::{
    global_registry, inject, set_style_target, InjectedStyle, MemoryDocument, Registration,
    StyleRegistry, StyleTarget,
};
pub use sheet::{compose, GlobalStyle, GlobalStyleSheet, RootLayout, SheetId, DEFAULT_MOUNT_ID};
pub use typography::{
    FontFace, FontFormat, FontSelection, FontSource, FontStyle, FontWeight, Typography,
    DEFAULT_FAMILY,
};

/// Composes the default global sheet and injects it into the process-wide
/// registry.
///
/// This is the single call an application makes at startup.
pub fn install() -> Result<Registration, StyleError> {
    let sheet = GlobalStyle::new().compose()?;
    Ok(inject(sheet)?)
}

/// Like [`install`], with tokens and fonts from a [`StyleConfig`].
pub fn install_with(config: &StyleConfig) -> Result<Registration, StyleError> {
    let sheet = config.global_style().compose()?;
    Ok(inject(sheet)?)
}
