//! Core services - the application's business logic layer.
//!
//! Services here are pure orchestrators: they sequence calls to the ports
//! and never know which concrete adapters sit behind them.

mod app_core;
mod publish;
mod pull;
mod registration;
mod registry_service;
mod switch;

pub use app_core::AppCore;
pub use publish::PublishService;
pub use pull::{PullOutcome, PullService};
pub use registration::{RegistrationOutcome, RegistrationService, RegistryCommit};
pub use registry_service::RegistryService;
pub use switch::{SwitchOutcome, SwitchRequest, SwitchService, SwitchState, WorkingTreeState};
