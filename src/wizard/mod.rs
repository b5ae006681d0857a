// ABOUTME: Resource-creation wizard: step derivation, navigation and creation hand-off
// The controller is the only owner of wizard state; renderers read snapshots from it

pub mod controller;
pub mod creation;
pub mod entry;
pub mod error;
pub mod slug;
pub mod state;
pub mod steps;

pub use controller::{BillingSetupIntent, FlowContext, FlowController, FlowSnapshot, PendingCreation};
pub use creation::{CreateResourceRequest, CreatedResource, ResourceCreator};
pub use entry::EntryParams;
pub use error::{CreationError, WizardError, WizardResult};
pub use slug::slugify;
pub use state::{StateChange, WizardState};
pub use steps::{
    can_advance, derive_steps, BillingSignal, BillingStatus, SettingsCapabilities,
    SignalSnapshot, StepDefinition, StepId,
};
