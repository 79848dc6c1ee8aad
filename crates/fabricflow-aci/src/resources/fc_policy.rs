//! Fibre Channel interface policies (`fcIfPol`)

use crate::error::Result;
use crate::mapping::{NativeEnum, PortMode};
use crate::resource::Resource;

/// Fibre Channel interface policy under `uni/infra`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FcPolicy {
    name: Option<String>,
    description: Option<String>,
    port_mode: Option<PortMode>,
}

impl FcPolicy {
    pub fn builder() -> FcPolicyBuilder {
        FcPolicyBuilder::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn port_mode(&self) -> Option<PortMode> {
        self.port_mode
    }
}

impl Resource for FcPolicy {
    fn kind(&self) -> &'static str {
        "fc-policy"
    }

    fn aci_class(&self) -> &'static str {
        "fcIfPol"
    }

    fn key(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![("fc_policy", self.name.as_deref())]
    }

    fn relative_name(&self, key: &[&str]) -> String {
        debug_assert_eq!(key.len(), 1, "one value per key component");
        format!("infra/fcIfPol-{}", key.first().copied().unwrap_or_default())
    }

    fn class_config(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("name", self.name.clone()),
            ("descr", self.description.clone()),
            ("portMode", self.port_mode.map(|m| m.native().to_string())),
        ]
    }

    fn naming_attributes(&self) -> &'static [&'static str] {
        &["name"]
    }
}

#[derive(Debug, Clone, Default)]
pub struct FcPolicyBuilder {
    name: Option<String>,
    description: Option<String>,
    port_mode: Option<String>,
}

impl FcPolicyBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn port_mode(mut self, port_mode: impl Into<String>) -> Self {
        self.port_mode = Some(port_mode.into());
        self
    }

    pub fn build(self) -> Result<FcPolicy> {
        Ok(FcPolicy {
            port_mode: self.port_mode.as_deref().map(PortMode::parse).transpose()?,
            name: self.name,
            description: self.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FabricError;

    #[test]
    fn test_class_config() {
        let policy = FcPolicy::builder()
            .name("fc-np")
            .description("np uplinks")
            .port_mode("np")
            .build()
            .unwrap();

        assert_eq!(
            policy.class_config(),
            vec![
                ("name", Some("fc-np".to_string())),
                ("descr", Some("np uplinks".to_string())),
                ("portMode", Some("np".to_string())),
            ]
        );
        assert_eq!(policy.relative_name(&["fc-np"]), "infra/fcIfPol-fc-np");
    }

    #[test]
    fn test_unset_attributes_stay_unset() {
        let policy = FcPolicy::builder().name("fc1").build().unwrap();
        let config = policy.class_config();
        assert_eq!(config[1], ("descr", None));
        assert_eq!(config[2], ("portMode", None));
    }

    #[test]
    fn test_invalid_port_mode() {
        let err = FcPolicy::builder().port_mode("e").build().unwrap_err();
        assert!(matches!(err, FabricError::InvalidParameter { field: "port_mode", .. }));
    }
}
