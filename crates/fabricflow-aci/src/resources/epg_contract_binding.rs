//! EPG to contract bindings (`fvRsProv` / `fvRsCons`)

use crate::error::{FabricError, Result};
use crate::mapping::{ContractRole, NativeEnum, Priority, ProviderMatch};
use crate::resource::Resource;

/// Binds an endpoint group to a contract as provider or consumer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpgContractBinding {
    tenant: Option<String>,
    app_profile: Option<String>,
    epg: Option<String>,
    contract: Option<String>,
    role: ContractRole,
    priority: Option<Priority>,
    provider_match: Option<ProviderMatch>,
}

impl EpgContractBinding {
    pub fn builder(contract_type: impl Into<String>) -> EpgContractBindingBuilder {
        EpgContractBindingBuilder {
            contract_type: contract_type.into(),
            ..Default::default()
        }
    }

    pub fn role(&self) -> ContractRole {
        self.role
    }

    pub fn contract(&self) -> Option<&str> {
        self.contract.as_deref()
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn provider_match(&self) -> Option<ProviderMatch> {
        self.provider_match
    }
}

impl Resource for EpgContractBinding {
    fn kind(&self) -> &'static str {
        "epg-contract-binding"
    }

    fn aci_class(&self) -> &'static str {
        self.role.aci_class()
    }

    fn key(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("tenant", self.tenant.as_deref()),
            ("app_profile", self.app_profile.as_deref()),
            ("epg", self.epg.as_deref()),
            ("contract", self.contract.as_deref()),
        ]
    }

    fn relative_name(&self, key: &[&str]) -> String {
        debug_assert_eq!(key.len(), 4, "one value per key component");
        let [tenant, app_profile, epg, contract] = key else {
            return String::new();
        };
        format!(
            "tn-{}/ap-{}/epg-{}/{}-{}",
            tenant,
            app_profile,
            epg,
            self.role.rn_tag(),
            contract
        )
    }

    fn class_config(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            (
                "matchT",
                self.provider_match.map(|m| m.native().to_string()),
            ),
            ("prio", self.priority.map(|p| p.native().to_string())),
            ("tnVzBrCPName", self.contract.clone()),
        ]
    }

    fn naming_attributes(&self) -> &'static [&'static str] {
        &["tnVzBrCPName"]
    }

    fn validate(&self) -> Result<()> {
        if self.role == ContractRole::Consumer && self.provider_match.is_some() {
            return Err(FabricError::ConstraintViolation(
                "the 'provider_match' is only configurable for Provided Contracts".to_string(),
            ));
        }
        Ok(())
    }
}

/// Collects raw string parameters and resolves them into a binding
#[derive(Debug, Clone, Default)]
pub struct EpgContractBindingBuilder {
    contract_type: String,
    tenant: Option<String>,
    app_profile: Option<String>,
    epg: Option<String>,
    contract: Option<String>,
    priority: Option<String>,
    provider_match: Option<String>,
}

impl EpgContractBindingBuilder {
    pub fn tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    pub fn app_profile(mut self, app_profile: impl Into<String>) -> Self {
        self.app_profile = Some(app_profile.into());
        self
    }

    pub fn epg(mut self, epg: impl Into<String>) -> Self {
        self.epg = Some(epg.into());
        self
    }

    pub fn contract(mut self, contract: impl Into<String>) -> Self {
        self.contract = Some(contract.into());
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn provider_match(mut self, provider_match: impl Into<String>) -> Self {
        self.provider_match = Some(provider_match.into());
        self
    }

    /// Translate enum parameters and run cross-field validation
    pub fn build(self) -> Result<EpgContractBinding> {
        let binding = EpgContractBinding {
            role: ContractRole::parse(&self.contract_type)?,
            priority: self.priority.as_deref().map(Priority::parse).transpose()?,
            provider_match: self
                .provider_match
                .as_deref()
                .map(ProviderMatch::parse)
                .transpose()?,
            tenant: self.tenant,
            app_profile: self.app_profile,
            epg: self.epg,
            contract: self.contract,
        };
        binding.validate()?;
        Ok(binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_config_translates_enums() {
        let binding = EpgContractBinding::builder("provider")
            .contract("web")
            .priority("level2")
            .provider_match("at_most_one")
            .build()
            .unwrap();

        assert_eq!(binding.aci_class(), "fvRsProv");
        assert_eq!(
            binding.class_config(),
            vec![
                ("matchT", Some("AtmostOne".to_string())),
                ("prio", Some("level2".to_string())),
                ("tnVzBrCPName", Some("web".to_string())),
            ]
        );
    }

    #[test]
    fn test_consumer_rejects_provider_match() {
        let err = EpgContractBinding::builder("consumer")
            .tenant("T1")
            .provider_match("all")
            .build()
            .unwrap_err();

        match err {
            FabricError::ConstraintViolation(msg) => assert!(msg.contains("provider_match")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_consumer_without_provider_match() {
        let binding = EpgContractBinding::builder("consumer")
            .tenant("T1")
            .app_profile("P1")
            .epg("G1")
            .contract("C1")
            .priority("level1")
            .build()
            .unwrap();

        assert_eq!(binding.aci_class(), "fvRsCons");
        assert_eq!(
            binding.relative_name(&["T1", "P1", "G1", "C1"]),
            "tn-T1/ap-P1/epg-G1/rscons-C1"
        );
    }

    #[test]
    fn test_invalid_priority_rejected() {
        let err = EpgContractBinding::builder("provider")
            .priority("gold")
            .build()
            .unwrap_err();
        assert!(matches!(err, FabricError::InvalidParameter { field: "priority", .. }));
    }

    #[test]
    fn test_relative_name() {
        let binding = EpgContractBinding::builder("consumer").build().unwrap();
        assert_eq!(
            binding.relative_name(&["T1", "P1", "G1", "C1"]),
            "tn-T1/ap-P1/epg-G1/rscons-C1"
        );
    }

    /// 不完全なキーで DN を組み立てることはない
    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "one value per key component")]
    fn test_relative_name_requires_full_key() {
        let binding = EpgContractBinding::builder("provider").build().unwrap();
        binding.relative_name(&["T1", "P1"]);
    }
}
