//! Destinations a sheet can be injected into.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::InjectionEnvironmentError;

/// A document's style subsystem.
///
/// Implementations must treat `id` as the identity of the style block so that
/// a second insert of the same id can be detected with [`contains`](Self::contains).
pub trait StyleTarget: Send {
    /// Returns true if a style block with this id is already present.
    fn contains(&self, id: &str) -> bool;

    /// Adds a style block to the document.
    fn insert(&mut self, id: &str, css: &str) -> Result<(), InjectionEnvironmentError>;
}

/// A style block held by a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedStyle {
    pub id: String,
    pub css: String,
}

/// A headless document that records inserted style blocks.
///
/// Clones share the same storage, so a handle kept by the caller observes
/// what the registry inserts. Used for server rendering and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    styles: Arc<Mutex<Vec<InjectedStyle>>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the inserted blocks in insertion order.
    pub fn styles(&self) -> Vec<InjectedStyle> {
        self.styles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.styles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All inserted CSS as `<style>` elements, ready for a server-rendered
    /// `<head>`.
    ///
    /// `<` in the CSS is written as the CSS escape `\3c ` so no rule text can
    /// close the element early.
    pub fn to_html(&self) -> String {
        self.styles()
            .iter()
            .map(|style| {
                format!(
                    "<style data-globalstyle=\"{}\">{}</style>",
                    style.id,
                    escape_style_text(&style.css)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn escape_style_text(css: &str) -> String {
    css.replace('<', "\\3c ")
}

impl StyleTarget for MemoryDocument {
    fn contains(&self, id: &str) -> bool {
        self.styles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|style| style.id == id)
    }

    fn insert(&mut self, id: &str, css: &str) -> Result<(), InjectionEnvironmentError> {
        self.styles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(InjectedStyle {
                id: id.to_string(),
                css: css.to_string(),
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_document_records_inserts() {
        let mut document = MemoryDocument::new();
        assert!(document.is_empty());

        document.insert("a", "x{}").unwrap();
        assert!(document.contains("a"));
        assert!(!document.contains("b"));
        assert_eq!(
            document.styles(),
            vec![InjectedStyle {
                id: "a".to_string(),
                css: "x{}".to_string()
            }]
        );
    }

    #[test]
    fn test_clones_share_storage() {
        let handle = MemoryDocument::new();
        let mut target = handle.clone();
        target.insert("a", "x{}").unwrap();
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn test_to_html() {
        let mut document = MemoryDocument::new();
        document.insert("gs-1", "x{}").unwrap();
        assert_eq!(
            document.to_html(),
            "<style data-globalstyle=\"gs-1\">x{}</style>"
        );
    }

    #[test]
    fn test_to_html_keeps_markup_inside_style_element() {
        let mut document = MemoryDocument::new();
        document
            .insert(
                "gs-1",
                ".x::after { content: \"</style><script>alert(1)</script>\"; }",
            )
            .unwrap();
        let html = document.to_html();
        assert!(!html.contains("</style><script>"));
        assert!(html.contains(r#"content: "\3c /style>\3c script>"#));
        assert!(html.ends_with("; }</style>"));
        assert_eq!(html.matches("</style>").count(), 1);
    }
}
