//! YAML configuration of tokens, fonts and the mount element.
//!
//! Every field is optional and falls back to the built-in defaults. A field
//! that is present replaces its default wholesale: a `colors` table is the
//! complete palette, not an overlay.
//!
//! ```yaml
//! mount_id: app
//! colors:
//!   primary: "#000000"
//!   background: "#FFFFFF"
//! fonts:
//!   - family: Inter
//!     weight: 400
//!     src:
//!       url: /fonts/Inter-Regular.woff2
//! default_font:
//!   family: Inter
//!   weight: 400
//! root_rules: |
//!   body { overflow: hidden; }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::colors::{palette, ColorTokenSet};
use crate::error::ConfigError;
use crate::sheet::{GlobalStyle, DEFAULT_MOUNT_ID};
use crate::typography::{FontFace, FontSelection, Typography};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub mount_id: String,
    pub colors: ColorTokenSet,
    pub fonts: Vec<FontFace>,
    pub default_font: FontSelection,
    pub root_rules: String,
}

impl StyleConfig {
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&source)
    }

    pub fn typography(&self) -> Typography {
        self.fonts
            .iter()
            .cloned()
            .fold(Typography::new(self.default_font.clone()), Typography::face)
    }

    /// A builder preloaded from this configuration, with the built-in reset.
    pub fn global_style(&self) -> GlobalStyle {
        GlobalStyle::new()
            .typography(self.typography())
            .colors(self.colors.clone())
            .root_rules(self.root_rules.as_str())
            .mount_id(self.mount_id.as_str())
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        let typography = Typography::default();
        Self {
            mount_id: DEFAULT_MOUNT_ID.to_string(),
            colors: palette().clone(),
            fonts: typography.faces().to_vec(),
            default_font: typography.default_font().clone(),
            root_rules: String::new(),
        }
    }
}
