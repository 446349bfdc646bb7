//! Font faces and the document's default font.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CompositionError, CompositionFault};
use crate::fragment::{FragmentKind, StyleFragment};

/// Numeric font weight, 100 through 900.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum FontWeight {
    Thin,
    ExtraLight,
    Light,
    Regular,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
    Black,
}

impl FontWeight {
    pub fn value(self) -> u16 {
        match self {
            FontWeight::Thin => 100,
            FontWeight::ExtraLight => 200,
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::SemiBold => 600,
            FontWeight::Bold => 700,
            FontWeight::ExtraBold => 800,
            FontWeight::Black => 900,
        }
    }
}

impl TryFrom<u16> for FontWeight {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Ok(match value {
            100 => FontWeight::Thin,
            200 => FontWeight::ExtraLight,
            300 => FontWeight::Light,
            400 => FontWeight::Regular,
            500 => FontWeight::Medium,
            600 => FontWeight::SemiBold,
            700 => FontWeight::Bold,
            800 => FontWeight::ExtraBold,
            900 => FontWeight::Black,
            other => return Err(format!("unsupported font weight {}", other)),
        })
    }
}

impl From<FontWeight> for u16 {
    fn from(weight: FontWeight) -> Self {
        weight.value()
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }
}

/// Container format hint emitted as `format(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFormat {
    Woff2,
    Woff,
    Truetype,
    Opentype,
}

impl FontFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            FontFormat::Woff2 => "woff2",
            FontFormat::Woff => "woff",
            FontFormat::Truetype => "truetype",
            FontFormat::Opentype => "opentype",
        }
    }

    /// Infers the format from a URL's file extension, ignoring any query or
    /// fragment.
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let (_, ext) = path.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "woff2" => Some(FontFormat::Woff2),
            "woff" => Some(FontFormat::Woff),
            "ttf" => Some(FontFormat::Truetype),
            "otf" => Some(FontFormat::Opentype),
            _ => None,
        }
    }
}

/// Where the browser loads a face from.
///
/// Resolution of the URL is left to the build pipeline and the browser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SourceRepr", into = "SourceRepr")]
pub enum FontSource {
    /// A bundled asset path, a remote URL, or a `data:` URI.
    Url(String),
    /// A font installed on the user's system, by full name.
    Local(String),
}

/// Config form of a source: `{ url: ... }` or `{ local: ... }`.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SourceRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    local: Option<String>,
}

impl TryFrom<SourceRepr> for FontSource {
    type Error = &'static str;

    fn try_from(repr: SourceRepr) -> Result<Self, Self::Error> {
        match (repr.url, repr.local) {
            (Some(url), None) => Ok(FontSource::Url(url)),
            (None, Some(name)) => Ok(FontSource::Local(name)),
            _ => Err("font src needs exactly one of `url` or `local`"),
        }
    }
}

impl From<FontSource> for SourceRepr {
    fn from(source: FontSource) -> Self {
        match source {
            FontSource::Url(url) => SourceRepr {
                url: Some(url),
                local: None,
            },
            FontSource::Local(name) => SourceRepr {
                url: None,
                local: Some(name),
            },
        }
    }
}

/// A single `@font-face` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontFace {
    pub family: String,
    pub weight: FontWeight,
    #[serde(default)]
    pub style: FontStyle,
    #[serde(rename = "src")]
    pub source: FontSource,
    /// Overrides the format inferred from the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FontFormat>,
}

impl FontFace {
    pub fn new(family: impl Into<String>, weight: FontWeight, source: FontSource) -> Self {
        Self {
            family: family.into(),
            weight,
            style: FontStyle::Normal,
            source,
            format: None,
        }
    }

    pub fn italic(mut self) -> Self {
        self.style = FontStyle::Italic;
        self
    }

    pub fn with_format(mut self, format: FontFormat) -> Self {
        self.format = Some(format);
        self
    }

    fn src(&self) -> String {
        match &self.source {
            FontSource::Local(name) => format!("local({})", quote(name)),
            FontSource::Url(url) => match self.format.or_else(|| FontFormat::from_url(url)) {
                Some(format) => format!("url({}) format(\"{}\")", quote(url), format.as_str()),
                None => format!("url({})", quote(url)),
            },
        }
    }

    fn render(&self) -> String {
        format!(
            "@font-face {{\n  font-family: {};\n  font-style: {};\n  font-weight: {};\n  font-display: swap;\n  src: {};\n}}\n",
            quote(&self.family),
            self.style.as_str(),
            self.weight,
            self.src()
        )
    }
}

/// The family and weight applied to the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSelection {
    pub family: String,
    pub weight: FontWeight,
}

impl FontSelection {
    pub fn new(family: impl Into<String>, weight: FontWeight) -> Self {
        Self {
            family: family.into(),
            weight,
        }
    }
}

impl Default for FontSelection {
    fn default() -> Self {
        Self::new(DEFAULT_FAMILY, FontWeight::Regular)
    }
}

pub const DEFAULT_FAMILY: &str = "Noto Sans KR";

/// Font faces plus the default document font.
///
/// # Example
///
/// ```rust
/// use globalstyle::{FontFace, FontSelection, FontSource, FontWeight, Typography};
///
/// let typography = Typography::new(FontSelection::new("Inter", FontWeight::Regular))
///     .face(FontFace::new("Inter", FontWeight::Regular, FontSource::Url("/fonts/Inter.woff2".into())));
///
/// let css = typography.render();
/// assert!(css.css().contains("@font-face"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typography {
    faces: Vec<FontFace>,
    default_font: FontSelection,
}

impl Typography {
    pub fn new(default_font: FontSelection) -> Self {
        Self {
            faces: Vec::new(),
            default_font,
        }
    }

    /// Adds a face, returning the updated typography for chaining.
    pub fn face(mut self, face: FontFace) -> Self {
        self.faces.push(face);
        self
    }

    pub fn faces(&self) -> &[FontFace] {
        &self.faces
    }

    pub fn default_font(&self) -> &FontSelection {
        &self.default_font
    }

    /// Checks that the default family is declared by at least one face.
    pub fn validate(&self) -> Result<(), CompositionError> {
        let declared = self
            .faces
            .iter()
            .any(|face| face.family == self.default_font.family);
        if declared {
            Ok(())
        } else {
            Err(CompositionError::new(
                FragmentKind::Typography,
                CompositionFault::MissingFontFace {
                    family: self.default_font.family.clone(),
                },
            ))
        }
    }

    /// Renders every face in declaration order, then the `:root` selection.
    pub fn render(&self) -> StyleFragment {
        let mut css = String::new();
        for face in &self.faces {
            css.push_str(&face.render());
        }
        css.push_str(&format!(
            ":root {{\n  font-family: {};\n  font-weight: {};\n}}\n",
            quote(&self.default_font.family),
            self.default_font.weight
        ));
        StyleFragment::new(FragmentKind::Typography, css)
    }
}

impl Default for Typography {
    /// Noto Sans KR at regular, medium and bold from bundled assets.
    fn default() -> Self {
        [
            (FontWeight::Regular, "/fonts/NotoSansKR-Regular.woff2"),
            (FontWeight::Medium, "/fonts/NotoSansKR-Medium.woff2"),
            (FontWeight::Bold, "/fonts/NotoSansKR-Bold.woff2"),
        ]
        .into_iter()
        .fold(Typography::new(FontSelection::default()), |typography, (weight, url)| {
            typography.face(FontFace::new(
                DEFAULT_FAMILY,
                weight,
                FontSource::Url(url.to_string()),
            ))
        })
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_renders_all_weights() {
        let css = Typography::default().render().css().to_string();
        assert_eq!(css.matches("@font-face").count(), 3);
        assert!(css.contains("font-weight: 400;"));
        assert!(css.contains("font-weight: 500;"));
        assert!(css.contains("font-weight: 700;"));
        assert!(css.contains(r#"src: url("/fonts/NotoSansKR-Bold.woff2") format("woff2");"#));
    }

    #[test]
    fn test_root_selection_comes_last() {
        let css = Typography::default().render().css().to_string();
        let root = css.find(":root").unwrap();
        let last_face = css.rfind("@font-face").unwrap();
        assert!(root > last_face);
        assert!(css.contains(":root {\n  font-family: \"Noto Sans KR\";\n  font-weight: 400;\n}"));
    }

    #[test]
    fn test_render_is_valid_css() {
        assert!(Typography::default().render().validate().is_ok());
    }

    #[test]
    fn test_render_is_deterministic() {
        let typography = Typography::default();
        assert_eq!(typography.render(), typography.render());
    }

    #[test]
    fn test_validate_missing_face() {
        let typography = Typography::new(FontSelection::new("Inter", FontWeight::Regular));
        let err = typography.validate().unwrap_err();
        assert_eq!(
            err.fault,
            CompositionFault::MissingFontFace {
                family: "Inter".to_string()
            }
        );
    }

    #[test]
    fn test_local_and_italic_face() {
        let face = FontFace::new("Fira", FontWeight::Light, FontSource::Local("Fira Sans Light".into())).italic();
        let css = face.render();
        assert!(css.contains("font-style: italic;"));
        assert!(css.contains(r#"src: local("Fira Sans Light");"#));
    }

    #[test]
    fn test_format_inference() {
        assert_eq!(FontFormat::from_url("/a/b.ttf"), Some(FontFormat::Truetype));
        assert_eq!(FontFormat::from_url("https://cdn/x.woff?v=2"), Some(FontFormat::Woff));
        assert_eq!(FontFormat::from_url("data:font/woff2;base64,AAAA"), None);
    }

    #[test]
    fn test_explicit_format_wins() {
        let face = FontFace::new("X", FontWeight::Regular, FontSource::Url("/x.bin".into()))
            .with_format(FontFormat::Opentype);
        assert!(face.render().contains(r#"format("opentype")"#));
    }

    #[test]
    fn test_family_quotes_are_escaped() {
        assert_eq!(quote(r#"My "Font""#), r#""My \"Font\"""#);
    }

    #[test]
    fn test_weight_conversion() {
        assert_eq!(FontWeight::try_from(700), Ok(FontWeight::Bold));
        assert!(FontWeight::try_from(450).is_err());
        assert_eq!(u16::from(FontWeight::Thin), 100);
    }
}
