//! `<style>` element injection into the live browser document.

use std::fmt::Debug;

use super::target::StyleTarget;
use crate::error::InjectionEnvironmentError;

const ID_ATTRIBUTE: &str = "data-globalstyle";

/// The page's `document.head`, looked up on each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDocument;

impl BrowserDocument {
    pub fn new() -> Self {
        Self
    }

    fn document() -> Result<web_sys::Document, InjectionEnvironmentError> {
        web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| InjectionEnvironmentError::new("no browser window or document"))
    }
}

fn js_error<E: Debug>(err: E) -> InjectionEnvironmentError {
    InjectionEnvironmentError::new(format!("document rejected style element: {:?}", err))
}

impl StyleTarget for BrowserDocument {
    fn contains(&self, id: &str) -> bool {
        let Ok(document) = Self::document() else {
            return false;
        };
        let selector = format!("style[{}=\"{}\"]", ID_ATTRIBUTE, id);
        matches!(document.query_selector(&selector), Ok(Some(_)))
    }

    fn insert(&mut self, id: &str, css: &str) -> Result<(), InjectionEnvironmentError> {
        let document = Self::document()?;
        let head = document
            .head()
            .ok_or_else(|| InjectionEnvironmentError::new("document has no <head>"))?;

        let style = document.create_element("style").map_err(js_error)?;
        style.set_attribute(ID_ATTRIBUTE, id).map_err(js_error)?;
        style.set_text_content(Some(css));
        head.append_child(&style).map_err(js_error)?;
        Ok(())
    }
}
