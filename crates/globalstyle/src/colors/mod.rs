//! Color tokens.
//!
//! - [`ColorToken`]: a single named color
//! - [`ColorTokenSet`]: a read-only table of tokens with [`lookup`](ColorTokenSet::lookup)
//! - [`palette`]: the application's built-in token set
//!
//! A token set renders to a fragment of custom properties on `:root`, so
//! component styles can refer to `var(--name)`.

mod builtin;
mod literal;
mod token;

pub(crate) use literal::is_css_ident;
pub use builtin::{lookup, palette, PALETTE_TOKENS};
pub use token::{ColorToken, ColorTokenSet};
