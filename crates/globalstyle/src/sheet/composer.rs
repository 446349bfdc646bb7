//! Ordered composition of fragments into a [`GlobalStyleSheet`].

use tracing::debug;

use super::root::{RootLayout, DEFAULT_MOUNT_ID};
use super::GlobalStyleSheet;
use crate::colors::{palette, ColorTokenSet};
use crate::error::CompositionError;
use crate::fragment::{FragmentKind, StyleFragment};
use crate::reset;
use crate::typography::Typography;

/// Composes the global sheet with the default `#root` mount element.
///
/// The output order is always reset, typography, color custom properties,
/// `root_rules`, then the fixed root layout. Fragments are labelled by their
/// position, whatever kind they were created with. Every fragment is checked
/// for well-formed syntax first.
///
/// # Example
///
/// ```rust
/// use globalstyle::{compose, ColorTokenSet, FragmentKind, StyleFragment};
///
/// let sheet = compose(
///     StyleFragment::new(FragmentKind::Reset, ".x{margin:0}"),
///     StyleFragment::new(FragmentKind::Typography, "@font-face{font-family:A;src:url(a.woff2)}"),
///     &ColorTokenSet::new().add("primary", "#000"),
///     StyleFragment::new(FragmentKind::RootRules, "html,body{height:100%}"),
/// ).unwrap();
///
/// assert!(sheet.css().contains("--primary: #000;"));
/// ```
pub fn compose(
    reset: StyleFragment,
    typography: StyleFragment,
    colors: &ColorTokenSet,
    root_rules: StyleFragment,
) -> Result<GlobalStyleSheet, CompositionError> {
    assemble(
        reset,
        typography,
        colors,
        root_rules,
        &RootLayout::new(DEFAULT_MOUNT_ID),
    )
}

fn assemble(
    reset: StyleFragment,
    typography: StyleFragment,
    colors: &ColorTokenSet,
    root_rules: StyleFragment,
    layout: &RootLayout,
) -> Result<GlobalStyleSheet, CompositionError> {
    colors.validate()?;
    layout.validate()?;

    let fragments = vec![
        relabel(reset, FragmentKind::Reset),
        relabel(typography, FragmentKind::Typography),
        colors.to_fragment(),
        relabel(root_rules, FragmentKind::RootRules),
        layout.render(),
    ];
    for fragment in &fragments {
        fragment.validate()?;
    }

    let sheet = GlobalStyleSheet::from_fragments(fragments);
    debug!(
        id = %sheet.id(),
        fragments = sheet.fragments().len(),
        bytes = sheet.css().len(),
        "composed global stylesheet"
    );
    Ok(sheet)
}

fn relabel(fragment: StyleFragment, kind: FragmentKind) -> StyleFragment {
    if fragment.kind() == kind {
        fragment
    } else {
        StyleFragment::new(kind, fragment.css())
    }
}

/// Builder for the application's global sheet.
///
/// Starts from the built-in reset, typography and palette with no extra root
/// rules and `#root` as the mount element.
///
/// # Example
///
/// ```rust
/// use globalstyle::GlobalStyle;
///
/// let sheet = GlobalStyle::new()
///     .root_rules("body { overflow: hidden; }")
///     .mount_id("app")
///     .compose()
///     .unwrap();
///
/// assert!(sheet.css().contains("#app {"));
/// ```
#[derive(Debug, Clone)]
pub struct GlobalStyle {
    reset: StyleFragment,
    typography: Typography,
    colors: ColorTokenSet,
    root_rules: StyleFragment,
    layout: RootLayout,
}

impl GlobalStyle {
    pub fn new() -> Self {
        Self {
            reset: reset::render(),
            typography: Typography::default(),
            colors: palette().clone(),
            root_rules: StyleFragment::new(FragmentKind::RootRules, ""),
            layout: RootLayout::default(),
        }
    }

    /// Replaces the reset with custom CSS.
    pub fn reset(mut self, css: impl Into<String>) -> Self {
        self.reset = StyleFragment::new(FragmentKind::Reset, css);
        self
    }

    pub fn typography(mut self, typography: Typography) -> Self {
        self.typography = typography;
        self
    }

    pub fn colors(mut self, colors: ColorTokenSet) -> Self {
        self.colors = colors;
        self
    }

    /// Extra root-level rules, placed after the color tokens.
    pub fn root_rules(mut self, css: impl Into<String>) -> Self {
        self.root_rules = StyleFragment::new(FragmentKind::RootRules, css);
        self
    }

    pub fn mount_id(mut self, id: impl Into<String>) -> Self {
        self.layout = RootLayout::new(id);
        self
    }

    /// Validates every input and composes the sheet.
    pub fn compose(&self) -> Result<GlobalStyleSheet, CompositionError> {
        self.typography.validate()?;
        assemble(
            self.reset.clone(),
            self.typography.render(),
            &self.colors,
            self.root_rules.clone(),
            &self.layout,
        )
    }
}

impl Default for GlobalStyle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompositionFault;
    use crate::typography::{FontSelection, FontWeight};
    use proptest::prelude::*;

    fn fragment(kind: FragmentKind, css: &str) -> StyleFragment {
        StyleFragment::new(kind, css)
    }

    fn sample() -> GlobalStyleSheet {
        compose(
            fragment(FragmentKind::Reset, ".x{margin:0}"),
            fragment(FragmentKind::Typography, "@font-face{font-family:A}"),
            &ColorTokenSet::new().add("primary", "#000"),
            fragment(FragmentKind::RootRules, "html,body{height:100%}"),
        )
        .unwrap()
    }

    #[test]
    fn test_compose_keeps_fixed_order() {
        assert_eq!(sample().kinds(), FragmentKind::ORDER.to_vec());
    }

    #[test]
    fn test_compose_includes_every_fragment_in_order() {
        let sheet = sample();
        let css = sheet.css();
        let positions: Vec<usize> = [
            ".x{margin:0}",
            "@font-face{font-family:A}",
            "--primary: #000;",
            "html,body{height:100%}",
            "position: relative;",
        ]
        .iter()
        .map(|needle| css.find(needle).unwrap())
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_compose_relabels_by_position() {
        let sheet = compose(
            fragment(FragmentKind::Colors, ".a{}"),
            fragment(FragmentKind::Colors, ".b{}"),
            &ColorTokenSet::new().add("primary", "#000"),
            fragment(FragmentKind::Reset, ".c{}"),
        )
        .unwrap();
        assert_eq!(sheet.fragment(FragmentKind::Reset).unwrap().css(), ".a{}");
        assert_eq!(sheet.fragment(FragmentKind::RootRules).unwrap().css(), ".c{}");
    }

    #[test]
    fn test_compose_rejects_malformed_fragment() {
        let err = compose(
            fragment(FragmentKind::Reset, ".x{margin:0}"),
            fragment(FragmentKind::Typography, "@font-face{font-family:A"),
            &ColorTokenSet::new().add("primary", "#000"),
            fragment(FragmentKind::RootRules, ""),
        )
        .unwrap_err();
        assert_eq!(err.kind, FragmentKind::Typography);
    }

    #[test]
    fn test_compose_rejects_reset_that_would_absorb_font_face() {
        let typography = "@font-face{font-family:A;src:url(/a.woff2)}";
        let colors = ColorTokenSet::new().add("primary", "#000");

        let err = compose(
            fragment(FragmentKind::Reset, ".x{margin:0} .y"),
            fragment(FragmentKind::Typography, typography),
            &colors,
            fragment(FragmentKind::RootRules, ""),
        )
        .unwrap_err();
        assert_eq!(err.kind, FragmentKind::Reset);

        let sheet = compose(
            fragment(FragmentKind::Reset, ".x{margin:0} .y{}"),
            fragment(FragmentKind::Typography, typography),
            &colors,
            fragment(FragmentKind::RootRules, ""),
        )
        .unwrap();
        let rules = crate::fragment::top_level_rules(sheet.css()).unwrap();
        assert_eq!(&rules[..3], [".x", ".y", "@font-face"]);
    }

    #[test]
    fn test_compose_rejects_empty_colors() {
        let err = compose(
            fragment(FragmentKind::Reset, ""),
            fragment(FragmentKind::Typography, ""),
            &ColorTokenSet::new(),
            fragment(FragmentKind::RootRules, ""),
        )
        .unwrap_err();
        assert_eq!(err.fault, CompositionFault::EmptyColorSet);
    }

    #[test]
    fn test_builder_defaults_compose() {
        let sheet = GlobalStyle::new().compose().unwrap();
        let css = sheet.css();
        assert!(css.contains("box-sizing: border-box;"));
        assert!(css.contains("font-family: \"Noto Sans KR\";"));
        assert!(css.contains("--primary: #1F6FEB;"));
        assert!(css.contains("#root {"));
    }

    #[test]
    fn test_builder_rejects_undeclared_font() {
        let typography = Typography::new(FontSelection::new("Inter", FontWeight::Regular));
        let err = GlobalStyle::new().typography(typography).compose().unwrap_err();
        assert!(matches!(err.fault, CompositionFault::MissingFontFace { .. }));
    }

    #[test]
    fn test_builder_rejects_bad_mount_id() {
        let err = GlobalStyle::new().mount_id("#root").compose().unwrap_err();
        assert_eq!(err.kind, FragmentKind::RootLayout);
    }

    #[test]
    fn test_root_layout_survives_overriding_rules() {
        let sheet = GlobalStyle::new()
            .root_rules("html, body { height: auto; margin: 8px; }")
            .compose()
            .unwrap();
        let layout = sheet.fragment(FragmentKind::RootLayout).unwrap().css();
        assert!(layout.contains("height: 100%;"));
        assert!(layout.contains("margin: 0;"));
        assert_eq!(sheet.kinds().last(), Some(&FragmentKind::RootLayout));
    }

    proptest! {
        #[test]
        fn compose_is_deterministic_and_ordered(
            reset_class in "[a-z]{1,8}",
            font in "[A-Z][a-z]{1,10}",
            token in "[a-z][a-z-]{0,8}",
            hex in "[0-9a-f]{6}",
            root_height in 1u32..200,
        ) {
            let build = || compose(
                fragment(FragmentKind::Reset, &format!(".{}{{margin:0}}", reset_class)),
                fragment(FragmentKind::Typography, &format!("@font-face{{font-family:{}}}", font)),
                &ColorTokenSet::new().add(token.as_str(), format!("#{}", hex)),
                fragment(FragmentKind::RootRules, &format!("html{{height:{}px}}", root_height)),
            ).unwrap();

            let first = build();
            let second = build();
            prop_assert_eq!(first.css(), second.css());
            prop_assert_eq!(first.id(), second.id());
            prop_assert_eq!(first.kinds(), FragmentKind::ORDER.to_vec());

            let css = first.css();
            let markers: Vec<usize> = FragmentKind::ORDER
                .iter()
                .map(|kind| css.find(&kind.marker()).unwrap())
                .collect();
            prop_assert!(markers.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}
