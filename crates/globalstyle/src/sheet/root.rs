//! Fixed layout rules for the document root and the mount element.

use crate::colors::is_css_ident;
use crate::error::{CompositionError, CompositionFault};
use crate::fragment::{FragmentKind, StyleFragment};

pub const DEFAULT_MOUNT_ID: &str = "root";

/// Full-size `html`/`body` and a positioned mount element.
///
/// The mount element gets `position: relative` so absolutely positioned
/// descendants resolve against it rather than the viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootLayout {
    mount_id: String,
}

impl RootLayout {
    pub fn new(mount_id: impl Into<String>) -> Self {
        Self {
            mount_id: mount_id.into(),
        }
    }

    pub fn mount_id(&self) -> &str {
        &self.mount_id
    }

    pub fn validate(&self) -> Result<(), CompositionError> {
        if is_css_ident(&self.mount_id) {
            Ok(())
        } else {
            Err(CompositionError::new(
                FragmentKind::RootLayout,
                CompositionFault::InvalidMountId {
                    id: self.mount_id.clone(),
                },
            ))
        }
    }

    pub fn render(&self) -> StyleFragment {
        let css = format!(
            "html,\nbody {{\n  height: 100%;\n  width: 100%;\n  margin: 0;\n}}\n\n#{} {{\n  height: 100%;\n  width: 100%;\n  position: relative;\n}}\n",
            self.mount_id
        );
        StyleFragment::new(FragmentKind::RootLayout, css)
    }
}

impl Default for RootLayout {
    fn default() -> Self {
        Self::new(DEFAULT_MOUNT_ID)
    }
}
