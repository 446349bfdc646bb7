//! Error types for composition, lookup, injection and configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::fragment::FragmentKind;

/// A color token name that is not part of the token set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color token '{name}'")]
pub struct UnknownTokenError {
    pub name: String,
}

/// The reason a fragment could not be composed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionFault {
    /// The CSS text is not syntactically well formed.
    #[error("malformed css at {line}:{column}: {detail}")]
    Malformed {
        line: u32,
        column: u32,
        detail: String,
    },
    #[error("'{name}' is not a valid token name")]
    InvalidTokenName { name: String },
    #[error("token '{name}' has invalid color value '{value}'")]
    InvalidColor { name: String, value: String },
    #[error("color token set is empty")]
    EmptyColorSet,
    /// A font family is selected but never declared with `@font-face`.
    #[error("font family \"{family}\" has no font face")]
    MissingFontFace { family: String },
    #[error("'{id}' is not a valid mount element id")]
    InvalidMountId { id: String },
}

/// Error returned when a fragment is rejected during composition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot compose {kind} fragment: {fault}")]
pub struct CompositionError {
    pub kind: FragmentKind,
    pub fault: CompositionFault,
}

impl CompositionError {
    pub(crate) fn new(kind: FragmentKind, fault: CompositionFault) -> Self {
        Self { kind, fault }
    }
}

/// No document or style subsystem is available to receive the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("style injection unavailable: {reason}")]
pub struct InjectionEnvironmentError {
    pub reason: String,
}

impl InjectionEnvironmentError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Error loading a [`StyleConfig`](crate::StyleConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read style config \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid style config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Any failure surfaced to the application's startup sequence.
///
/// None of these are retried: composition and injection are deterministic.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error(transparent)]
    UnknownToken(#[from] UnknownTokenError),
    #[error(transparent)]
    Composition(#[from] CompositionError),
    #[error(transparent)]
    InjectionEnvironment(#[from] InjectionEnvironmentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
