//! Capability model
//!
//! The fixed set of questions htcap knows how to ask a server. This is the
//! allow-list used for dynamic dispatch: names are validated here, at the
//! boundary, before any fixture is written.

use serde::{Deserialize, Serialize};

use crate::error::ProbeError;

/// A built-in capability question
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Are `.htaccess` files processed at all?
    HtaccessEnabled,
    /// Is the named Apache module loaded (`<IfModule mod_NAME.c>`)?
    ModuleLoaded(String),
    /// Do `RewriteRule`s take effect?
    Rewrite,
    /// Does `AddType` take effect?
    AddType,
    /// Does `Header set` reach the response?
    SetResponseHeader,
    /// Does `RequestHeader set` reach the script?
    SetRequestHeader,
    /// Does `ContentDigest On` add a `Content-MD5` header?
    ContentDigest,
    /// Does `ServerSignature On` take effect?
    SetServerSignature,
    /// Does `DirectoryIndex` take effect?
    SetDirectoryIndex,
    /// Can an environment variable be passed to the script through `RequestHeader`?
    PassEnvThroughRequestHeader,
    /// Can an environment variable set by a `RewriteRule` reach the script?
    PassEnvThroughRewrite,
}

impl Capability {
    /// Every capability that takes no parameter, in report order
    #[must_use]
    pub fn fixed() -> Vec<Self> {
        vec![
            Self::HtaccessEnabled,
            Self::Rewrite,
            Self::AddType,
            Self::SetResponseHeader,
            Self::SetRequestHeader,
            Self::ContentDigest,
            Self::SetServerSignature,
            Self::SetDirectoryIndex,
            Self::PassEnvThroughRequestHeader,
            Self::PassEnvThroughRewrite,
        ]
    }

    /// Names accepted by [`FromStr`](std::str::FromStr), for help output
    #[must_use]
    pub fn allowed_names() -> Vec<String> {
        let mut names: Vec<String> = Self::fixed().iter().map(ToString::to_string).collect();
        names.insert(1, "moduleLoaded(<name>)".to_string());
        names
    }

    /// Build a `ModuleLoaded` capability, validating the module name
    pub fn module_loaded(name: &str) -> Result<Self, ProbeError> {
        validate_module_name(name)?;
        Ok(Self::ModuleLoaded(name.to_string()))
    }

    /// The method name this capability is dispatched by (without parameters)
    #[must_use]
    pub const fn method_name(&self) -> &'static str {
        match self {
            Self::HtaccessEnabled => "htaccessEnabled",
            Self::ModuleLoaded(_) => "moduleLoaded",
            Self::Rewrite => "canRewrite",
            Self::AddType => "canAddType",
            Self::SetResponseHeader => "canSetResponseHeader",
            Self::SetRequestHeader => "canSetRequestHeader",
            Self::ContentDigest => "canContentDigest",
            Self::SetServerSignature => "canSetServerSignature",
            Self::SetDirectoryIndex => "canSetDirectoryIndex",
            Self::PassEnvThroughRequestHeader => "canPassEnvThroughRequestHeader",
            Self::PassEnvThroughRewrite => "canPassEnvThroughRewrite",
        }
    }
}

/// Module names end up in a directory name and an `<IfModule>` argument
pub(crate) fn validate_module_name(name: &str) -> Result<(), ProbeError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ProbeError::InvalidModuleName(name.to_string()));
    }
    Ok(())
}

impl std::str::FromStr for Capability {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let call = s.trim();

        if let Some(arg) = call.strip_prefix("moduleLoaded(").and_then(|r| r.strip_suffix(')')) {
            let arg = arg.trim().trim_matches(|c| c == '"' || c == '\'');
            return Self::module_loaded(arg)
                .map_err(|_| ProbeError::UnsupportedMethod(s.to_string()));
        }

        let name = call.strip_suffix("()").unwrap_or(call);
        Self::fixed()
            .into_iter()
            .find(|c| c.method_name() == name)
            .ok_or_else(|| ProbeError::UnsupportedMethod(s.to_string()))
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModuleLoaded(name) => write!(f, "moduleLoaded({name})"),
            other => write!(f, "{}", other.method_name()),
        }
    }
}
