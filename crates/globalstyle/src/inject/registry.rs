//! One-shot registration of the global sheet.

use std::sync::{Mutex, PoisonError};

use once_cell::sync::OnceCell;
use tracing::{debug, info, warn};

use super::target::StyleTarget;
use crate::error::InjectionEnvironmentError;
use crate::sheet::{GlobalStyleSheet, SheetId};

/// Outcome of [`StyleRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The sheet was inserted into the target.
    Injected(SheetId),
    /// A sheet was already registered, or the target already held this one.
    /// Carries the id of the sheet in effect.
    AlreadyInjected(SheetId),
}

impl Registration {
    pub fn id(self) -> SheetId {
        match self {
            Registration::Injected(id) | Registration::AlreadyInjected(id) => id,
        }
    }
}

/// Owns the single global sheet and applies it to a [`StyleTarget`] once.
///
/// The first successful [`register`](Self::register) inserts the sheet and
/// keeps it. Every later call leaves the target untouched. A registry per
/// application instance gives per-instance scoping, for example one per
/// server-rendered request.
///
/// # Example
///
/// ```rust
/// use globalstyle::{GlobalStyle, MemoryDocument, Registration, StyleRegistry};
///
/// let document = MemoryDocument::new();
/// let registry = StyleRegistry::new(document.clone());
/// let sheet = GlobalStyle::new().compose().unwrap();
///
/// assert!(matches!(registry.register(sheet.clone()).unwrap(), Registration::Injected(_)));
/// assert!(matches!(registry.register(sheet).unwrap(), Registration::AlreadyInjected(_)));
/// assert_eq!(document.len(), 1);
/// ```
pub struct StyleRegistry {
    target: Mutex<Option<Box<dyn StyleTarget>>>,
    sheet: OnceCell<GlobalStyleSheet>,
}

impl StyleRegistry {
    pub fn new(target: impl StyleTarget + 'static) -> Self {
        Self::with_target(Some(Box::new(target)))
    }

    /// A registry with no document; registration fails until a target is set.
    pub fn detached() -> Self {
        Self::with_target(None)
    }

    pub(crate) fn with_target(target: Option<Box<dyn StyleTarget>>) -> Self {
        Self {
            target: Mutex::new(target),
            sheet: OnceCell::new(),
        }
    }

    /// Replaces the target. Has no effect on a sheet already injected.
    pub fn set_target(&self, target: Box<dyn StyleTarget>) {
        let mut guard = self.target.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(target);
    }

    /// Injects `sheet` unless a sheet is already registered.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionEnvironmentError`] if there is no target or the
    /// target refuses the insert. A failed attempt leaves the registry empty.
    pub fn register(
        &self,
        sheet: GlobalStyleSheet,
    ) -> Result<Registration, InjectionEnvironmentError> {
        // Held for the whole call so concurrent registrations serialize.
        let mut guard = self.target.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = self.sheet.get() {
            if existing.id() == sheet.id() {
                debug!(id = %existing.id(), "global stylesheet already injected");
            } else {
                warn!(
                    injected = %existing.id(),
                    ignored = %sheet.id(),
                    "global stylesheet already injected; ignoring a different sheet"
                );
            }
            return Ok(Registration::AlreadyInjected(existing.id()));
        }

        let target = guard
            .as_mut()
            .ok_or_else(|| InjectionEnvironmentError::new("no document style target available"))?;

        let id = sheet.id();
        let key = id.to_string();
        let registration = if target.contains(&key) {
            debug!(%id, "document already holds global stylesheet");
            Registration::AlreadyInjected(id)
        } else {
            target.insert(&key, sheet.css())?;
            info!(%id, bytes = sheet.css().len(), "injected global stylesheet");
            Registration::Injected(id)
        };

        // Cannot already be set: checked above under the same lock.
        let _ = self.sheet.set(sheet);
        Ok(registration)
    }

    /// The registered sheet, if any.
    pub fn sheet(&self) -> Option<&GlobalStyleSheet> {
        self.sheet.get()
    }

    pub fn is_injected(&self) -> bool {
        self.sheet.get().is_some()
    }
}

impl std::fmt::Debug for StyleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleRegistry")
            .field("sheet", &self.sheet.get().map(GlobalStyleSheet::id))
            .finish_non_exhaustive()
    }
}
