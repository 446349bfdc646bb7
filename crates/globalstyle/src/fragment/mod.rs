//! Typed style fragments.
//!
//! A [`StyleFragment`] is a labelled chunk of CSS text. Fragments carry their
//! [`FragmentKind`] so a composed sheet can be checked for ordering directly
//! instead of by searching the concatenated text.

mod parse;

use std::fmt;

pub(crate) use parse::ends_with_closer;
#[cfg(test)]
pub(crate) use parse::top_level_rules;

use crate::error::CompositionError;

/// Which part of the global sheet a fragment belongs to.
///
/// The declaration order of the variants is the cascade order of the
/// composed sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FragmentKind {
    Reset,
    Typography,
    Colors,
    RootRules,
    RootLayout,
}

impl FragmentKind {
    /// All kinds in cascade order.
    pub const ORDER: [FragmentKind; 5] = [
        FragmentKind::Reset,
        FragmentKind::Typography,
        FragmentKind::Colors,
        FragmentKind::RootRules,
        FragmentKind::RootLayout,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FragmentKind::Reset => "reset",
            FragmentKind::Typography => "typography",
            FragmentKind::Colors => "colors",
            FragmentKind::RootRules => "root-rules",
            FragmentKind::RootLayout => "root-layout",
        }
    }

    /// The comment emitted ahead of this fragment in composed output.
    pub fn marker(self) -> String {
        format!("/* globalstyle:{} */", self.as_str())
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A self-contained chunk of CSS rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleFragment {
    kind: FragmentKind,
    css: String,
}

impl StyleFragment {
    pub fn new(kind: FragmentKind, css: impl Into<String>) -> Self {
        Self {
            kind,
            css: css.into(),
        }
    }

    pub fn kind(&self) -> FragmentKind {
        self.kind
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    /// Returns true if the fragment contains no rules, only whitespace.
    pub fn is_empty(&self) -> bool {
        self.css.trim().is_empty()
    }

    /// Checks that the CSS text is syntactically well formed.
    ///
    /// Rejects bad strings and URLs, closing brackets without an opener,
    /// blocks left open at the end of the fragment, and top-level text that
    /// is not a complete rule. A fragment that passes cannot absorb the
    /// fragment composed after it.
    pub fn validate(&self) -> Result<(), CompositionError> {
        parse::check_syntax(&self.css).map_err(|fault| CompositionError::new(self.kind, fault))
    }
}

impl fmt::Display for StyleFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css)
    }
}
