//! Resource descriptor abstraction
//!
//! Every reconcilable object type (contract bindings, interface policies, ...)
//! implements [`Resource`] to describe its native class, hierarchical key
//! and attribute schema. The reconciler never needs to know more than this.

use crate::error::Result;

/// Response filter restricting single-object reads to configuration properties
pub const CONFIG_ONLY_FILTER: &str = "rsp-prop-include=config-only";

/// Descriptor of a reconcilable fabric object
pub trait Resource: Send + Sync {
    /// Short type tag (e.g. "epg-contract-binding", "fc-policy")
    fn kind(&self) -> &'static str;

    /// Native APIC class name, also the top-level key of POST bodies
    fn aci_class(&self) -> &'static str;

    /// Hierarchical key components in addressing order
    fn key(&self) -> Vec<(&'static str, Option<&str>)>;

    /// Distinguished name relative to `uni/`, built from the resolved key
    ///
    /// `key` holds exactly one non-empty value per [`Resource::key`] entry, in
    /// the same order; [`Target::resolve`](crate::path::Target::resolve) only
    /// calls this once every component is present.
    fn relative_name(&self, key: &[&str]) -> String;

    /// Declared native attributes; `None` means "not specified"
    fn class_config(&self) -> Vec<(&'static str, Option<String>)>;

    /// Native attributes that name the object and are always sent on POST
    fn naming_attributes(&self) -> &'static [&'static str];

    /// Cross-field validation, run before any path is built
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Filter attached to single-object reads
    fn object_filter(&self) -> Option<&'static str> {
        Some(CONFIG_ONLY_FILTER)
    }
}
