use std::fmt;

use serde::{Deserialize, Serialize};

/// Locale identifier as published upstream, e.g. `sv_SE`.
/// Compared by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// What kind of installation unit a component is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Plugin,
    Theme,
    Core,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plugin => write!(f, "plugin"),
            Self::Theme => write!(f, "theme"),
            Self::Core => write!(f, "core"),
        }
    }
}

impl ComponentKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plugin" | "plugins" => Some(Self::Plugin),
            "theme" | "themes" => Some(Self::Theme),
            "core" => Some(Self::Core),
            _ => None,
        }
    }

    /// Path segment used by the translation API: `plugins`, `themes` or `core`.
    pub fn api_segment(&self) -> &'static str {
        match self {
            Self::Plugin => "plugins",
            Self::Theme => "themes",
            Self::Core => "core",
        }
    }

    /// Subdirectory of `languages/` this kind installs into, if any.
    pub fn languages_subdir(&self) -> Option<&'static str> {
        match self {
            Self::Plugin => Some("plugins"),
            Self::Theme => Some("themes"),
            Self::Core => None,
        }
    }
}

/// Identifies a component to sync translations for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDescriptor {
    pub kind: ComponentKind,
    pub slug: String,
    pub version: String,
}

impl ComponentDescriptor {
    pub fn plugin(slug: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            kind: ComponentKind::Plugin,
            slug: slug.into(),
            version: version.into(),
        }
    }

    pub fn theme(slug: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            kind: ComponentKind::Theme,
            slug: slug.into(),
            version: version.into(),
        }
    }

    pub fn core(version: impl Into<String>) -> Self {
        Self {
            kind: ComponentKind::Core,
            slug: String::new(),
            version: version.into(),
        }
    }

    /// Name used in user-facing messages.
    pub fn display_name(&self) -> &str {
        if self.kind == ComponentKind::Core || self.slug.is_empty() {
            "wordpress-core"
        } else {
            &self.slug
        }
    }
}

impl fmt::Display for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.display_name())
    }
}
