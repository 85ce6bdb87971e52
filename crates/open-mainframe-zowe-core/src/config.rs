//! z/OSMF connection profile — host, port, credentials and TLS policy.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZoweError};

/// Environment variable prefix used by Zowe for profile overrides.
pub const ENV_PREFIX: &str = "ZOWE_OPT_";

/// URL scheme used to reach z/OSMF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// HTTPS (the z/OSMF default).
    #[default]
    Https,
    /// Plain HTTP.
    Http,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Https => write!(f, "https"),
            Protocol::Http => write!(f, "http"),
        }
    }
}

impl FromStr for Protocol {
    type Err = ZoweError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "https" => Ok(Protocol::Https),
            "http" => Ok(Protocol::Http),
            other => Err(ZoweError::config(format!(
                "protocol must be `http` or `https`, got `{other}`"
            ))),
        }
    }
}

/// Connection settings for one z/OSMF system.
#[derive(Clone, Serialize, Deserialize)]
pub struct ZosmfProfile {
    /// z/OSMF host name or address.
    #[serde(default)]
    pub host: String,
    /// z/OSMF port; omitted from the URL when unset.
    #[serde(default)]
    pub port: Option<u16>,
    /// TSO user ID.
    #[serde(default)]
    pub user: String,
    /// Password or passphrase.
    #[serde(default)]
    pub password: String,
    /// URL scheme.
    #[serde(default)]
    pub protocol: Protocol,
    /// Reject self-signed or otherwise untrusted server certificates.
    #[serde(default = "default_reject_unauthorized")]
    pub reject_unauthorized: bool,
    /// Path prefix in front of `/zosmf` (e.g. when routed through a gateway).
    #[serde(default)]
    pub base_path: Option<String>,
}

impl fmt::Debug for ZosmfProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZosmfProfile")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("protocol", &self.protocol)
            .field("reject_unauthorized", &self.reject_unauthorized)
            .field("base_path", &self.base_path)
            .finish()
    }
}

impl Default for ZosmfProfile {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: None,
            user: String::new(),
            password: String::new(),
            protocol: Protocol::default(),
            reject_unauthorized: default_reject_unauthorized(),
            base_path: None,
        }
    }
}

fn default_reject_unauthorized() -> bool {
    true
}

impl ZosmfProfile {
    /// Create a profile for `host` with the given credentials.
    pub fn new(host: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Load a profile from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ZoweError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a profile from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ZoweError::config(e.to_string()))
    }

    /// Build a profile purely from `ZOWE_OPT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut profile = Self::default();
        profile.apply_env_overrides()?;
        Ok(profile)
    }

    /// Override fields with any `ZOWE_OPT_*` environment variables that are set.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    /// Override fields from a key lookup (`HOST`, `PORT`, `USER`, `PASSWORD`,
    /// `PROTOCOL`, `REJECT_UNAUTHORIZED`, `BASE_PATH`).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| ZoweError::config(format!("invalid port `{port}`")))?;
            self.port = Some(port);
        }
        if let Some(user) = lookup("USER") {
            self.user = user;
        }
        if let Some(password) = lookup("PASSWORD") {
            self.password = password;
        }
        if let Some(protocol) = lookup("PROTOCOL") {
            self.protocol = protocol.parse()?;
        }
        if let Some(flag) = lookup("REJECT_UNAUTHORIZED") {
            self.reject_unauthorized = parse_bool(&flag)?;
        }
        if let Some(base_path) = lookup("BASE_PATH") {
            self.base_path = Some(base_path);
        }
        Ok(())
    }

    /// Check that the profile can address a host.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ZoweError::config("host is required"));
        }
        Ok(())
    }

    /// `host[:port]` as used in request URLs.
    pub fn zosmf_host(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }

    /// `protocol://host[:port][base_path]` without a trailing slash.
    pub fn base_url(&self) -> String {
        let base_path = self
            .base_path
            .as_deref()
            .map(|p| p.trim_end_matches('/'))
            .filter(|p| !p.is_empty())
            .map(|p| {
                if p.starts_with('/') {
                    p.to_string()
                } else {
                    format!("/{p}")
                }
            })
            .unwrap_or_default();
        format!("{}://{}{}", self.protocol, self.zosmf_host(), base_path)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(ZoweError::config(format!("invalid boolean `{other}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_profile() {
        let profile = ZosmfProfile::default();
        assert_eq!(profile.protocol, Protocol::Https);
        assert!(profile.reject_unauthorized);
        assert!(profile.port.is_none());
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_profile_from_toml() {
        let toml_str = r#"
host = "mainframe.example.com"
port = 10443
user = "IBMUSER"
password = "SYS1"
protocol = "https"
reject_unauthorized = false
"#;
        let profile = ZosmfProfile::from_toml_str(toml_str).unwrap();
        assert_eq!(profile.host, "mainframe.example.com");
        assert_eq!(profile.port, Some(10443));
        assert_eq!(profile.user, "IBMUSER");
        assert!(!profile.reject_unauthorized);
        assert_eq!(profile.base_url(), "https://mainframe.example.com:10443");
        profile.validate().unwrap();
    }

    #[test]
    fn test_profile_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zosmf.toml");
        std::fs::write(&path, "host = \"lpar1\"\nprotocol = \"http\"\n").unwrap();

        let profile = ZosmfProfile::from_file(&path).unwrap();
        assert_eq!(profile.base_url(), "http://lpar1");
        assert!(profile.reject_unauthorized);

        let missing = ZosmfProfile::from_file(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ZoweError::Config { .. })));
    }

    #[test]
    fn test_invalid_toml() {
        let err = ZosmfProfile::from_toml_str("port = \"not a number\"").unwrap_err();
        assert!(matches!(err, ZoweError::Config { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("HOST", "sys2.example.com"),
            ("PORT", "443"),
            ("USER", "ZOWEUSR"),
            ("PROTOCOL", "HTTP"),
            ("REJECT_UNAUTHORIZED", "false"),
            ("BASE_PATH", "gateway/api/v1/"),
        ]
        .into_iter()
        .collect();

        let mut profile = ZosmfProfile::new("sys1", "IBMUSER", "SYS1");
        profile
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(profile.host, "sys2.example.com");
        assert_eq!(profile.user, "ZOWEUSR");
        assert_eq!(profile.password, "SYS1");
        assert_eq!(profile.protocol, Protocol::Http);
        assert!(!profile.reject_unauthorized);
        assert_eq!(profile.base_url(), "http://sys2.example.com:443/gateway/api/v1");
    }

    #[test]
    fn test_invalid_overrides() {
        let mut profile = ZosmfProfile::new("sys1", "IBMUSER", "SYS1");
        let err = profile
            .apply_overrides(|key| (key == "PORT").then(|| "99999".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("invalid port"));

        let err = profile
            .apply_overrides(|key| (key == "REJECT_UNAUTHORIZED").then(|| "maybe".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("invalid boolean"));

        let err = profile
            .apply_overrides(|key| (key == "PROTOCOL").then(|| "ftp".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let profile = ZosmfProfile::new("sys1", "IBMUSER", "TOPSECRET");
        let text = format!("{profile:?}");
        assert!(text.contains("IBMUSER"));
        assert!(!text.contains("TOPSECRET"));
    }
}
