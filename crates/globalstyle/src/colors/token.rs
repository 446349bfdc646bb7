//! Color tokens and the token set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::literal::{is_color_literal, is_css_ident};
use crate::error::{CompositionError, CompositionFault, UnknownTokenError};
use crate::fragment::{FragmentKind, StyleFragment};

/// A named color value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorToken {
    pub name: String,
    pub value: String,
}

impl ColorToken {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The custom property this token is exposed as, e.g. `--primary`.
    pub fn property(&self) -> String {
        format!("--{}", self.name)
    }
}

/// A read-only table of color tokens keyed by name.
///
/// Names are unique by construction. Iteration and rendering follow name
/// order, so the emitted CSS does not depend on insertion order.
///
/// # Example
///
/// ```rust
/// use globalstyle::ColorTokenSet;
///
/// let colors = ColorTokenSet::new()
///     .add("primary", "#000000")
///     .add("background", "#FFFFFF");
///
/// assert_eq!(colors.lookup("primary").unwrap(), "#000000");
/// assert!(colors.lookup("accent").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTokenSet {
    tokens: BTreeMap<String, String>,
}

impl ColorTokenSet {
    /// Creates an empty token set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from tokens. A later token replaces an earlier one with
    /// the same name.
    pub fn from_tokens<I: IntoIterator<Item = ColorToken>>(tokens: I) -> Self {
        tokens
            .into_iter()
            .fold(Self::new(), |set, token| set.add(token.name, token.value))
    }

    /// Adds a token, returning the updated set for chaining.
    pub fn add(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tokens.insert(name.into(), value.into());
        self
    }

    /// Returns the color value of `name`.
    pub fn lookup(&self, name: &str) -> Result<&str, UnknownTokenError> {
        self.tokens
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| UnknownTokenError {
                name: name.to_string(),
            })
    }

    /// Returns a `var()` reference to the token for component-level styling.
    ///
    /// Fails for unknown names so typos surface before they reach CSS.
    pub fn var(&self, name: &str) -> Result<String, UnknownTokenError> {
        let value = self.lookup(name)?;
        Ok(format!("var({})", ColorToken::new(name, value).property()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.tokens.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates tokens in name order.
    pub fn iter(&self) -> impl Iterator<Item = ColorToken> + '_ {
        self.tokens
            .iter()
            .map(|(name, value)| ColorToken::new(name.as_str(), value.as_str()))
    }

    /// Checks that the set is non-empty, every name is a CSS identifier and
    /// every value is a color literal.
    pub fn validate(&self) -> Result<(), CompositionError> {
        let fail = |fault| Err(CompositionError::new(FragmentKind::Colors, fault));

        if self.tokens.is_empty() {
            return fail(CompositionFault::EmptyColorSet);
        }
        for (name, value) in &self.tokens {
            if !is_css_ident(name) {
                return fail(CompositionFault::InvalidTokenName { name: name.clone() });
            }
            if !is_color_literal(value) {
                return fail(CompositionFault::InvalidColor {
                    name: name.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Renders the set as custom properties on `:root`.
    pub fn to_fragment(&self) -> StyleFragment {
        let mut css = String::from(":root {\n");
        for token in self.iter() {
            css.push_str(&format!("  {}: {};\n", token.property(), token.value.trim()));
        }
        css.push_str("}\n");
        StyleFragment::new(FragmentKind::Colors, css)
    }

    /// Exports the table as a JSON object of name to value.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.tokens).unwrap_or_default()
    }
}

impl FromIterator<ColorToken> for ColorTokenSet {
    fn from_iter<I: IntoIterator<Item = ColorToken>>(iter: I) -> Self {
        Self::from_tokens(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ColorTokenSet {
        ColorTokenSet::new()
            .add("primary", "#000000")
            .add("background", "#FFFFFF")
    }

    #[test]
    fn test_lookup_defined_tokens() {
        let colors = sample();
        assert_eq!(colors.lookup("primary").unwrap(), "#000000");
        assert_eq!(colors.lookup("background").unwrap(), "#FFFFFF");
    }

    #[test]
    fn test_lookup_unknown_token() {
        let err = sample().lookup("accent").unwrap_err();
        assert_eq!(err.name, "accent");
    }

    #[test]
    fn test_add_replaces_same_name() {
        let colors = sample().add("primary", "#111111");
        assert_eq!(colors.len(), 2);
        assert_eq!(colors.lookup("primary").unwrap(), "#111111");
    }

    #[test]
    fn test_var_reference() {
        let colors = sample();
        assert_eq!(colors.var("primary").unwrap(), "var(--primary)");
        assert!(colors.var("accent").is_err());
    }

    #[test]
    fn test_token_property() {
        assert_eq!(ColorToken::new("text-muted", "#57606A").property(), "--text-muted");
    }

    #[test]
    fn test_iter_is_name_ordered() {
        let names: Vec<String> = sample().iter().map(|token| token.name).collect();
        assert_eq!(names, vec!["background", "primary"]);
    }

    #[test]
    fn test_from_iterator() {
        let colors: ColorTokenSet = vec![
            ColorToken::new("a", "#000"),
            ColorToken::new("b", "#fff"),
        ]
        .into_iter()
        .collect();
        assert!(colors.has("a"));
        assert!(colors.has("b"));
    }

    #[test]
    fn test_fragment_is_name_ordered() {
        let css = sample().to_fragment().css().to_string();
        let background = css.find("--background: #FFFFFF;").unwrap();
        let primary = css.find("--primary: #000000;").unwrap();
        assert!(background < primary);
        assert!(css.starts_with(":root {"));
    }

    #[test]
    fn test_fragment_kind() {
        assert_eq!(sample().to_fragment().kind(), FragmentKind::Colors);
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_empty() {
        let err = ColorTokenSet::new().validate().unwrap_err();
        assert_eq!(err.fault, CompositionFault::EmptyColorSet);
    }

    #[test]
    fn test_validate_bad_value() {
        let err = sample().add("accent", "not-a-color").validate().unwrap_err();
        assert_eq!(
            err.fault,
            CompositionFault::InvalidColor {
                name: "accent".to_string(),
                value: "not-a-color".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_names_token_with_malformed_function() {
        let err = sample().add("accent", "rgb(0 }").validate().unwrap_err();
        assert_eq!(
            err.fault,
            CompositionFault::InvalidColor {
                name: "accent".to_string(),
                value: "rgb(0 }".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_bad_name() {
        let err = sample().add("9lives", "#000").validate().unwrap_err();
        assert!(matches!(err.fault, CompositionFault::InvalidTokenName { .. }));
    }

    #[test]
    fn test_to_json() {
        let json = sample().to_json();
        assert_eq!(json["primary"], "#000000");
        assert_eq!(json["background"], "#FFFFFF");
    }
}
