//! The application's fixed color palette.

use once_cell::sync::Lazy;

use super::token::ColorTokenSet;
use crate::error::UnknownTokenError;

/// Token names and values of the built-in palette.
pub const PALETTE_TOKENS: &[(&str, &str)] = &[
    ("primary", "#1F6FEB"),
    ("primary-dark", "#1158C7"),
    ("secondary", "#6E7781"),
    ("background", "#FFFFFF"),
    ("surface", "#F6F8FA"),
    ("border", "#D0D7DE"),
    ("text", "#1F2328"),
    ("text-muted", "#656D76"),
    ("text-inverse", "#FFFFFF"),
    ("success", "#1A7F37"),
    ("warning", "#9A6700"),
    ("danger", "#CF222E"),
];

static PALETTE: Lazy<ColorTokenSet> = Lazy::new(|| {
    PALETTE_TOKENS
        .iter()
        .fold(ColorTokenSet::new(), |set, (name, value)| set.add(*name, *value))
});

/// The built-in palette, shared for the lifetime of the process.
pub fn palette() -> &'static ColorTokenSet {
    &PALETTE
}

/// Looks up a color in the built-in palette.
///
/// ```rust
/// assert_eq!(globalstyle::colors::lookup("danger").unwrap(), "#CF222E");
/// ```
pub fn lookup(name: &str) -> Result<&'static str, UnknownTokenError> {
    palette().lookup(name)
}
