//! Friendly-name to controller-native value tables
//!
//! Each enum carries a static table; lookups in both directions go through
//! it so a value can never be translated two different ways.

use crate::error::{FabricError, Result};

/// An enumerated parameter with a fixed translation to a native APIC value
pub trait NativeEnum: Sized + Copy + PartialEq + 'static {
    /// Parameter name used in error messages
    const FIELD: &'static str;

    /// `(variant, friendly name, native value)`
    const TABLE: &'static [(Self, &'static str, &'static str)];

    fn as_str(&self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(variant, _, _)| variant == self)
            .map(|(_, friendly, _)| *friendly)
            .unwrap_or_default()
    }

    fn native(&self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(variant, _, _)| variant == self)
            .map(|(_, _, native)| *native)
            .unwrap_or_default()
    }

    fn parse(value: &str) -> Result<Self> {
        Self::TABLE
            .iter()
            .find(|(_, friendly, _)| *friendly == value)
            .map(|(variant, _, _)| *variant)
            .ok_or_else(|| FabricError::InvalidParameter {
                field: Self::FIELD,
                value: value.to_string(),
                allowed: Self::choices().join(", "),
            })
    }

    fn choices() -> Vec<&'static str> {
        Self::TABLE.iter().map(|(_, friendly, _)| *friendly).collect()
    }
}

/// Whether an EPG provides or consumes a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractRole {
    Consumer,
    Provider,
}

impl NativeEnum for ContractRole {
    const FIELD: &'static str = "contract_type";
    const TABLE: &'static [(Self, &'static str, &'static str)] = &[
        (ContractRole::Consumer, "consumer", "rscons"),
        (ContractRole::Provider, "provider", "rsprov"),
    ];
}

impl ContractRole {
    /// Native class of the relation object
    pub fn aci_class(&self) -> &'static str {
        match self {
            ContractRole::Consumer => "fvRsCons",
            ContractRole::Provider => "fvRsProv",
        }
    }

    /// Relative-name tag used in the object's DN
    pub fn rn_tag(&self) -> &'static str {
        self.native()
    }
}

/// Matching algorithm for provided contracts (`matchT`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderMatch {
    All,
    AtLeastOne,
    AtMostOne,
    None,
}

impl NativeEnum for ProviderMatch {
    const FIELD: &'static str = "provider_match";
    const TABLE: &'static [(Self, &'static str, &'static str)] = &[
        (ProviderMatch::All, "all", "All"),
        (ProviderMatch::AtLeastOne, "at_least_one", "AtleastOne"),
        (ProviderMatch::AtMostOne, "at_most_one", "AtmostOne"),
        (ProviderMatch::None, "none", "None"),
    ];
}

/// QoS class of a binding (`prio`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Level1,
    Level2,
    Level3,
    Unspecified,
}

impl NativeEnum for Priority {
    const FIELD: &'static str = "priority";
    const TABLE: &'static [(Self, &'static str, &'static str)] = &[
        (Priority::Level1, "level1", "level1"),
        (Priority::Level2, "level2", "level2"),
        (Priority::Level3, "level3", "level3"),
        (Priority::Unspecified, "unspecified", "unspecified"),
    ];
}

/// Fibre Channel port mode (`portMode`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortMode {
    F,
    Np,
}

impl NativeEnum for PortMode {
    const FIELD: &'static str = "port_mode";
    const TABLE: &'static [(Self, &'static str, &'static str)] =
        &[(PortMode::F, "f", "f"), (PortMode::Np, "np", "np")];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_bijective<T: NativeEnum + std::fmt::Debug>() {
        let friendly: HashSet<_> = T::TABLE.iter().map(|(_, f, _)| *f).collect();
        let native: HashSet<_> = T::TABLE.iter().map(|(_, _, n)| *n).collect();
        assert_eq!(friendly.len(), T::TABLE.len(), "{} friendly names collide", T::FIELD);
        assert_eq!(native.len(), T::TABLE.len(), "{} native codes collide", T::FIELD);

        for (variant, name, code) in T::TABLE {
            assert_eq!(T::parse(name).unwrap(), *variant);
            assert_eq!(variant.as_str(), *name);
            assert_eq!(variant.native(), *code);
        }
    }

    #[test]
    fn test_tables_are_bijective() {
        assert_bijective::<ContractRole>();
        assert_bijective::<ProviderMatch>();
        assert_bijective::<Priority>();
        assert_bijective::<PortMode>();
    }

    #[test]
    fn test_provider_match_native_codes() {
        assert_eq!(ProviderMatch::AtLeastOne.native(), "AtleastOne");
        assert_eq!(ProviderMatch::AtMostOne.native(), "AtmostOne");
        assert_eq!(ProviderMatch::None.native(), "None");
    }

    #[test]
    fn test_contract_role_class_and_tag() {
        assert_eq!(ContractRole::Provider.aci_class(), "fvRsProv");
        assert_eq!(ContractRole::Provider.rn_tag(), "rsprov");
        assert_eq!(ContractRole::Consumer.aci_class(), "fvRsCons");
        assert_eq!(ContractRole::Consumer.rn_tag(), "rscons");
    }

    #[test]
    fn test_misspelled_role_rejected() {
        let err = ContractRole::parse("proivder").unwrap_err();
        match err {
            FabricError::InvalidParameter { field, allowed, .. } => {
                assert_eq!(field, "contract_type");
                assert_eq!(allowed, "consumer, provider");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
