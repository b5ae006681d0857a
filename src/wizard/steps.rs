// ABOUTME: Step derivation for the resource-creation wizard
// The visible step list is a pure projection of wizard state and external signals

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::state::WizardState;

/// Steps the wizard can show, in their fixed relative order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepId {
    Project,
    ResourceType,
    Tier,
    Billing,
    Settings,
    Access,
}

impl StepId {
    pub fn all() -> &'static [StepId] {
        &[
            Self::Project,
            Self::ResourceType,
            Self::Tier,
            Self::Billing,
            Self::Settings,
            Self::Access,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::ResourceType => "resourceType",
            Self::Tier => "tier",
            Self::Billing => "billing",
            Self::Settings => "settings",
            Self::Access => "access",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepId {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|step| step.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| format!("unknown step `{raw}`"))
    }
}

/// One entry of the derived step list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepDefinition {
    pub id: StepId,
    pub label: &'static str,
    pub required: bool,
    pub visible: bool,
}

impl StepDefinition {
    fn new(id: StepId, label: &'static str, required: bool) -> Self {
        Self {
            id,
            label,
            required,
            visible: true,
        }
    }
}

/// Payment-method status for the active project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingStatus {
    pub has_payment_method: bool,
}

/// Billing signal as delivered by the billing collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingSignal {
    pub status: Option<BillingStatus>,
    pub loading: bool,
}

impl BillingSignal {
    pub fn loading() -> Self {
        Self {
            status: None,
            loading: true,
        }
    }

    pub fn loaded(has_payment_method: bool) -> Self {
        Self {
            status: Some(BillingStatus { has_payment_method }),
            loading: false,
        }
    }

    pub fn has_payment_method(&self) -> bool {
        self.status.is_some_and(|status| status.has_payment_method)
    }

    /// Loaded and no payment method on file; a missing status counts as none
    pub fn lacks_payment_method(&self) -> bool {
        !self.loading && !self.has_payment_method()
    }
}

/// Settings capabilities of the selected resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsCapabilities {
    /// The type has a settings form and it is ready for use
    pub offered: bool,
    /// Settings must be captured before creation
    pub required: bool,
}

/// Plain-data view of every external input the derivation depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSnapshot {
    /// The route already fixes the project
    pub project_fixed: bool,
    pub has_existing_projects: bool,
    /// The entry URL named a valid resource type
    pub resource_type_preselected: bool,
    pub billing: BillingSignal,
    /// The current (resource type, sku) pair is billable
    pub selected_is_paid: bool,
    /// None until a resource type is selected and found in the catalog
    pub selected_settings: Option<SettingsCapabilities>,
}

/// Derive the ordered list of visible steps
///
/// The order is fixed: project, resourceType, tier, billing, settings, access.
/// The access step only appears when the resource lands in an existing
/// project.
pub fn derive_steps(state: &WizardState, signals: &SignalSnapshot) -> Vec<StepDefinition> {
    let mut steps = Vec::with_capacity(StepId::all().len());

    if !signals.project_fixed {
        let label = if signals.has_existing_projects {
            "Select Project"
        } else {
            "Create Project"
        };
        steps.push(StepDefinition::new(StepId::Project, label, true));
    }

    if !signals.resource_type_preselected {
        steps.push(StepDefinition::new(StepId::ResourceType, "Resource Type", true));
    }

    steps.push(StepDefinition::new(StepId::Tier, "Name & Tier", true));

    if signals.selected_is_paid && signals.billing.lacks_payment_method() {
        steps.push(StepDefinition::new(StepId::Billing, "Billing", true));
    }

    if let Some(caps) = signals.selected_settings {
        if caps.offered && !state.skip_settings {
            steps.push(StepDefinition::new(StepId::Settings, "Settings", caps.required));
        }
    }

    // A brand-new project has no other members to grant access to
    let has_grantees = signals.project_fixed || signals.has_existing_projects;
    if has_grantees && !state.skip_access {
        steps.push(StepDefinition::new(StepId::Access, "Access", false));
    }

    steps
}

/// Whether the user may move forward from `step`
pub fn can_advance(
    step: &StepDefinition,
    state: &WizardState,
    signals: &SignalSnapshot,
) -> bool {
    match step.id {
        StepId::Project => state.project_id.as_deref().is_some_and(|id| !id.is_empty()),
        StepId::ResourceType => state.resource_type.is_some(),
        StepId::Tier => state.has_identity(),
        StepId::Billing => signals.billing.has_payment_method(),
        StepId::Settings => !step.required || state.settings.is_some(),
        StepId::Access => true,
    }
}
