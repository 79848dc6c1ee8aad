//! FabricFlow ACI
//!
//! Declarative, idempotent management of Cisco ACI fabric objects over the
//! APIC REST API.
//!
//! # Supported resources
//!
//! - **EPG to contract bindings**: `fvRsProv` / `fvRsCons`
//! - **Fibre Channel interface policies**: `fcIfPol`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  fabric CLI                      │
//! │          (fabric apply / fc-policy / ...)        │
//! └─────────────────┬───────────────────────────────┘
//!                   │ Task { resource, state }
//! ┌─────────────────▼───────────────────────────────┐
//! │               fabricflow-aci                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  trait Resource  (descriptor per type)    │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌────────┐  ┌────────┐  ┌──────────────────┐  │
//! │  │  path  │→ │  diff  │→ │    Reconciler    │  │
//! │  └────────┘  └────────┘  └────────┬─────────┘  │
//! └───────────────────────────────────┼─────────────┘
//!                                     │ trait FabricTransport
//!                             ┌───────▼───────┐
//!                             │   ApicClient   │
//!                             └───────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use fabricflow_aci::{ApicClient, ControllerConfig, DesiredState, FcPolicy, Reconciler};
//!
//! let mut config = ControllerConfig::new("apic1.example.com");
//! config.password = Some(password);
//! let client = ApicClient::connect(&config).await?;
//! let policy = FcPolicy::builder().name("fc-np").port_mode("np").build()?;
//!
//! let report = Reconciler::new(&client)
//!     .reconcile(&policy, DesiredState::Present)
//!     .await?;
//! println!("changed: {}", report.changed);
//! ```

pub mod action;
pub mod client;
pub mod diff;
pub mod error;
pub mod mapping;
pub mod path;
pub mod reconcile;
pub mod resource;
pub mod resources;
pub mod state;
pub mod transport;

// Re-exports
pub use action::{ActionType, ApplySummary, BatchReport, InvocationResult};
pub use client::{ApicClient, ControllerConfig};
pub use diff::{Attributes, ChangePayload};
pub use error::{FabricError, Result};
pub use mapping::{ContractRole, NativeEnum, PortMode, Priority, ProviderMatch};
pub use path::{Scope, Target};
pub use reconcile::Reconciler;
pub use resource::{CONFIG_ONLY_FILTER, Resource};
pub use resources::{EpgContractBinding, FcPolicy, ResourceRequest, Task};
pub use state::{DesiredState, ExistingState};
pub use transport::FabricTransport;
