//! The composed global stylesheet.
//!
//! - [`compose`]: assembles fragments in cascade order
//! - [`GlobalStyle`]: builder preloaded with the application defaults
//! - [`GlobalStyleSheet`]: the immutable result
//! - [`RootLayout`]: the fixed `html`/`body`/mount element rules

mod composer;
mod root;

use std::fmt;

pub use composer::{compose, GlobalStyle};
pub use root::{RootLayout, DEFAULT_MOUNT_ID};

use crate::fragment::{FragmentKind, StyleFragment};

/// Content identity of a composed sheet.
///
/// Two sheets with byte-identical CSS share an id, which is what the
/// injector deduplicates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetId(u64);

impl SheetId {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    /// FNV-1a over the CSS bytes. Stable across runs and platforms.
    pub fn of(css: &str) -> Self {
        let hash = css.bytes().fold(Self::FNV_OFFSET, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(Self::FNV_PRIME)
        });
        Self(hash)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gs-{:016x}", self.0)
    }
}

/// An ordered, immutable concatenation of fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalStyleSheet {
    fragments: Vec<StyleFragment>,
    css: String,
    id: SheetId,
}

impl GlobalStyleSheet {
    fn from_fragments(fragments: Vec<StyleFragment>) -> Self {
        let mut css = String::new();
        for fragment in &fragments {
            css.push_str(&fragment.kind().marker());
            css.push('\n');
            css.push_str(fragment.css());
            if !fragment.css().ends_with('\n') {
                css.push('\n');
            }
            css.push('\n');
        }
        let id = SheetId::of(&css);
        Self { fragments, css, id }
    }

    pub fn fragments(&self) -> &[StyleFragment] {
        &self.fragments
    }

    pub fn fragment(&self, kind: FragmentKind) -> Option<&StyleFragment> {
        self.fragments.iter().find(|fragment| fragment.kind() == kind)
    }

    /// Fragment kinds in the order they appear in the sheet.
    pub fn kinds(&self) -> Vec<FragmentKind> {
        self.fragments.iter().map(StyleFragment::kind).collect()
    }

    /// The full CSS text, each fragment preceded by its marker comment.
    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn id(&self) -> SheetId {
        self.id
    }
}

impl fmt::Display for GlobalStyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css)
    }
}
