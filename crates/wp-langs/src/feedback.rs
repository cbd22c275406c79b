use std::fmt;

use crate::component::LanguageCode;

/// User-facing notes produced during a sync run.
///
/// The engine never prints. Callers decide whether feedback goes to the
/// package manager's output, stderr, or nowhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Informational message, e.g. "no translations available".
    Info(String),
    /// Something failed but the run continued. Carries the language being
    /// processed when the failure was scoped to one.
    Warning {
        language: Option<LanguageCode>,
        message: String,
    },
}

impl Feedback {
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self::Warning {
            language: None,
            message: msg.into(),
        }
    }

    pub fn language_warning(language: &LanguageCode, msg: impl Into<String>) -> Self {
        Self::Warning {
            language: Some(language.clone()),
            message: msg.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning { .. })
    }

    pub fn language(&self) -> Option<&LanguageCode> {
        match self {
            Self::Warning { language, .. } => language.as_ref(),
            Self::Info(_) => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Info(msg) | Self::Warning { message: msg, .. } => msg,
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info(msg) => write!(f, "{msg}"),
            Self::Warning {
                language: Some(language),
                message,
            } => write!(f, "warning: [{language}] {message}"),
            Self::Warning {
                language: None,
                message,
            } => write!(f, "warning: {message}"),
        }
    }
}
