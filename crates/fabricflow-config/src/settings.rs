//! コントローラ接続設定の合成
//!
//! 優先順位: CLIフラグ / 環境変数 > タスクファイルの controller ブロック > デフォルト

use fabricflow_aci::ControllerConfig;

/// Partially specified controller settings from one source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub protocol: Option<String>,
    pub validate_certs: Option<bool>,
    pub timeout_secs: Option<u64>,
}

impl ControllerSettings {
    /// Fill gaps in `self` from `fallback`
    pub fn or(self, fallback: ControllerSettings) -> Self {
        Self {
            host: self.host.or(fallback.host),
            port: self.port.or(fallback.port),
            username: self.username.or(fallback.username),
            password: self.password.or(fallback.password),
            protocol: self.protocol.or(fallback.protocol),
            validate_certs: self.validate_certs.or(fallback.validate_certs),
            timeout_secs: self.timeout_secs.or(fallback.timeout_secs),
        }
    }

    /// Apply defaults for everything still unset
    pub fn into_config(self) -> ControllerConfig {
        let defaults = ControllerConfig::default();
        ControllerConfig {
            host: self.host.unwrap_or(defaults.host),
            port: self.port.or(defaults.port),
            username: self.username.unwrap_or(defaults.username),
            password: self.password.or(defaults.password),
            protocol: self.protocol.unwrap_or(defaults.protocol),
            validate_certs: self.validate_certs.unwrap_or(defaults.validate_certs),
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file() {
        let flags = ControllerSettings {
            host: Some("apic-cli".to_string()),
            validate_certs: Some(false),
            ..Default::default()
        };
        let file = ControllerSettings {
            host: Some("apic-file".to_string()),
            username: Some("ops".to_string()),
            validate_certs: Some(true),
            ..Default::default()
        };

        let config = flags.or(file).into_config();
        assert_eq!(config.host, "apic-cli");
        assert_eq!(config.username, "ops");
        assert!(!config.validate_certs);
    }

    #[test]
    fn test_defaults() {
        let config = ControllerSettings::default().into_config();
        assert_eq!(config.username, "admin");
        assert_eq!(config.protocol, "https");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate_certs);
        assert!(config.password.is_none());
    }
}
