// ABOUTME: Flow controller for the resource-creation wizard
// Owns wizard state, re-derives visible steps on every change and gates navigation

use serde::Serialize;
use tracing::{debug, info, warn};

use super::creation::{CreateResourceRequest, CreatedResource, ResourceCreator};
use super::entry::EntryParams;
use super::error::{CreationError, WizardError, WizardResult};
use super::state::{StateChange, WizardState};
use super::steps::{
    can_advance, derive_steps, BillingSignal, SettingsCapabilities, SignalSnapshot,
    StepDefinition, StepId,
};
use crate::catalog::{is_paid_in_catalog, Catalog, PaidClassifier, FREE_SKU};

/// Route-level context the wizard is opened in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowContext {
    /// Project fixed by the route, if the wizard runs inside one
    pub fixed_project_id: Option<String>,
    pub has_existing_projects: bool,
    pub billing: BillingSignal,
}

/// Request for the billing collaborator to start payment-method setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingSetupIntent {
    pub project_id: String,
}

/// A creation call handed to the collaborator and not yet finished
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCreation {
    pub project_id: String,
    pub request: CreateResourceRequest,
}

/// Everything a step renderer needs, in one serialisable value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSnapshot {
    pub state: WizardState,
    pub steps: Vec<StepDefinition>,
    pub current_index: usize,
    pub current_step: Option<StepId>,
    pub is_last_step: bool,
    pub can_go_next: bool,
    pub can_go_back: bool,
    pub creating: bool,
    pub completed: bool,
}

/// Stateful controller for one creation session
pub struct FlowController {
    state: WizardState,
    context: FlowContext,
    entry: EntryParams,
    catalog: Catalog,
    classifier: Option<Box<dyn PaidClassifier + Send + Sync>>,
    default_sku: String,
    current_index: usize,
    /// Step the index pointed at after the last reconciliation
    current_id: Option<StepId>,
    creating: bool,
    completed: bool,
}

impl std::fmt::Debug for FlowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowController")
            .field("state", &self.state)
            .field("context", &self.context)
            .field("entry", &self.entry)
            .field("current_index", &self.current_index)
            .field("current_id", &self.current_id)
            .field("creating", &self.creating)
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

impl FlowController {
    /// Start a session, seeding state from the route context and entry URL
    pub fn new(context: FlowContext, entry: EntryParams, catalog: Catalog) -> Self {
        let mut state = WizardState::new(entry.sku.as_deref().unwrap_or(FREE_SKU));
        state.project_id = context
            .fixed_project_id
            .clone()
            .or_else(|| entry.project_id.clone());
        state.resource_type = entry.resource_type;
        state.ensure_sku_offered(&catalog, FREE_SKU);

        let mut controller = Self {
            state,
            context,
            entry,
            catalog,
            classifier: None,
            default_sku: FREE_SKU.to_string(),
            current_index: 0,
            current_id: None,
            creating: false,
            completed: false,
        };
        controller.reconcile();
        info!(
            "Creation wizard started with steps [{}]",
            controller
                .steps()
                .iter()
                .map(|step| step.id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        controller
    }

    /// Use an external paid-tier classification instead of catalog prices
    pub fn with_classifier<C>(mut self, classifier: C) -> Self
    where
        C: PaidClassifier + Send + Sync + 'static,
    {
        self.classifier = Some(Box::new(classifier));
        self.reconcile();
        self
    }

    /// Tier to fall back to when the entry URL names none
    pub fn with_default_sku(mut self, sku: &str) -> Self {
        self.default_sku = sku.to_string();
        if self.entry.sku.is_none() {
            self.state.sku = sku.to_string();
        }
        self.state.ensure_sku_offered(&self.catalog, &self.default_sku);
        self.reconcile();
        self
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn context(&self) -> &FlowContext {
        &self.context
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    fn is_paid(&self) -> bool {
        let Some(resource_type) = self.state.resource_type else {
            return false;
        };
        match &self.classifier {
            Some(classifier) => classifier.is_paid(resource_type, &self.state.sku),
            None => is_paid_in_catalog(&self.catalog, resource_type, &self.state.sku),
        }
    }

    /// Current external inputs as plain data
    pub fn signals(&self) -> SignalSnapshot {
        let selected_settings = self
            .state
            .resource_type
            .and_then(|id| self.catalog.get(id))
            .map(|definition| SettingsCapabilities {
                offered: definition.offers_settings(),
                required: definition.requires_settings,
            });

        SignalSnapshot {
            project_fixed: self.context.fixed_project_id.is_some(),
            has_existing_projects: self.context.has_existing_projects,
            resource_type_preselected: self.entry.resource_type.is_some(),
            billing: self.context.billing,
            selected_is_paid: self.is_paid(),
            selected_settings,
        }
    }

    /// Visible steps for the current state, recomputed on every call
    pub fn steps(&self) -> Vec<StepDefinition> {
        derive_steps(&self.state, &self.signals())
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_step(&self) -> Option<StepDefinition> {
        self.steps().get(self.current_index).cloned()
    }

    pub fn is_last_step(&self) -> bool {
        self.current_index + 1 >= self.steps().len()
    }

    pub fn can_go_back(&self) -> bool {
        self.current_index > 0
    }

    /// The current step's predicate holds and a later step exists
    pub fn can_go_next(&self) -> bool {
        let steps = self.steps();
        match steps.get(self.current_index) {
            Some(step) => {
                self.current_index + 1 < steps.len()
                    && can_advance(step, &self.state, &self.signals())
            }
            None => false,
        }
    }

    pub fn go_next(&mut self) -> bool {
        let steps = self.steps();
        let Some(step) = steps.get(self.current_index) else {
            return false;
        };
        if !can_advance(step, &self.state, &self.signals()) {
            debug!("Refusing to advance: step {} is incomplete", step.id);
            return false;
        }
        if self.current_index + 1 >= steps.len() {
            debug!("Refusing to advance: {} is the last step", step.id);
            return false;
        }
        self.move_to(self.current_index + 1, &steps);
        true
    }

    pub fn go_back(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        let steps = self.steps();
        self.move_to(self.current_index - 1, &steps);
        true
    }

    /// Jump to a visible step; no-op when the step is not in the list
    pub fn go_to_step(&mut self, id: StepId) -> bool {
        let steps = self.steps();
        match steps.iter().position(|step| step.id == id) {
            Some(index) => {
                self.move_to(index, &steps);
                true
            }
            None => {
                debug!("Ignoring jump to {}: step not visible", id);
                false
            }
        }
    }

    /// Dismiss the current optional step for the rest of the session
    ///
    /// Once the step is gone from the list the same position holds the step
    /// that followed it, so the user lands there. When nothing followed, the
    /// index is clamped and the user lands on the step before it, which is
    /// now the last one.
    pub fn skip_current_step(&mut self) -> bool {
        let Some(step) = self.current_step() else {
            return false;
        };
        if step.required {
            debug!("Refusing to skip required step {}", step.id);
            return false;
        }
        match step.id {
            StepId::Settings => self.state.skip_settings = true,
            StepId::Access => self.state.skip_access = true,
            other => {
                debug!("Step {} has no skip flag", other);
                return false;
            }
        }
        info!("Skipped step {} for this session", step.id);
        self.reconcile();
        true
    }

    /// Apply a user edit and re-derive the steps
    pub fn update(&mut self, change: StateChange) {
        debug!("Applying wizard change {}", change.describe());
        self.state.apply(change, &self.catalog, &self.default_sku);
        self.reconcile();
    }

    /// Refresh the billing signal (e.g. after the user added a payment method)
    pub fn set_billing(&mut self, billing: BillingSignal) {
        self.context.billing = billing;
        self.reconcile();
    }

    /// Refresh the project list; a single project becomes the default pick
    pub fn set_projects(&mut self, project_ids: &[String]) {
        self.context.has_existing_projects = !project_ids.is_empty();
        if self.state.project_id.is_none() {
            if let [only] = project_ids {
                info!("Defaulting to the only project {}", only);
                self.state.project_id = Some(only.clone());
            }
        }
        self.reconcile();
    }

    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.state.ensure_sku_offered(&self.catalog, &self.default_sku);
        self.reconcile();
    }

    /// Billing setup request while the user sits on the billing step
    pub fn billing_setup_intent(&self) -> Option<BillingSetupIntent> {
        if self.current_step()?.id != StepId::Billing {
            return None;
        }
        self.state
            .project_id
            .clone()
            .map(|project_id| BillingSetupIntent { project_id })
    }

    /// Assemble the creation payload from the current state
    ///
    /// Every required visible step must pass its predicate first. The field
    /// checks after that cover values seeded by the route or entry URL, whose
    /// steps are hidden.
    pub fn creation_request(&self) -> WizardResult<PendingCreation> {
        let signals = self.signals();
        if let Some(step) = derive_steps(&self.state, &signals)
            .into_iter()
            .find(|step| step.required && !can_advance(step, &self.state, &signals))
        {
            return Err(WizardError::StepIncomplete(step.id));
        }

        let project_id = self
            .state
            .project_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or(WizardError::Incomplete("project"))?;
        let resource_type = self
            .state
            .resource_type
            .ok_or(WizardError::Incomplete("resource type"))?;
        if self.state.resource_name.trim().is_empty() {
            return Err(WizardError::Incomplete("resource name"));
        }
        if self.state.resource_id.is_empty() {
            return Err(WizardError::Incomplete("resource id"));
        }
        if self.state.sku.is_empty() {
            return Err(WizardError::Incomplete("sku"));
        }

        Ok(PendingCreation {
            project_id,
            request: CreateResourceRequest {
                id: self.state.resource_id.clone(),
                name: self.state.resource_name.clone(),
                resource_type,
                sku: self.state.sku.clone(),
                settings: self.state.settings.clone(),
            },
        })
    }

    /// Mark a creation call as in flight and hand out its payload
    pub fn begin_creation(&mut self) -> WizardResult<PendingCreation> {
        if self.completed {
            return Err(WizardError::AlreadyCompleted);
        }
        let pending = self.creation_request()?;
        self.creating = true;
        info!(
            "Creating {} {} in project {}",
            pending.request.resource_type, pending.request.id, pending.project_id
        );
        Ok(pending)
    }

    /// Record the collaborator's answer; failures leave the state untouched
    pub fn finish_creation(
        &mut self,
        result: Result<CreatedResource, CreationError>,
    ) -> WizardResult<CreatedResource> {
        self.creating = false;
        match result {
            Ok(created) => {
                info!("Created resource {} in project {}", created.id, created.project_id);
                self.completed = true;
                Ok(created)
            }
            Err(e) => {
                warn!("Resource creation failed: {}", e);
                Err(WizardError::CreationFailed(e))
            }
        }
    }

    /// Run the creation call through `creator`
    pub async fn create(&mut self, creator: &dyn ResourceCreator) -> WizardResult<CreatedResource> {
        let pending = self.begin_creation()?;
        let result = creator
            .create_resource(&pending.project_id, &pending.request)
            .await;
        self.finish_creation(result)
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        let steps = self.steps();
        let current_step = steps.get(self.current_index).map(|step| step.id);
        FlowSnapshot {
            state: self.state.clone(),
            current_index: self.current_index,
            current_step,
            is_last_step: self.is_last_step(),
            can_go_next: self.can_go_next(),
            can_go_back: self.can_go_back(),
            creating: self.creating,
            completed: self.completed,
            steps,
        }
    }

    fn move_to(&mut self, index: usize, steps: &[StepDefinition]) {
        let from = self.current_id;
        self.current_index = index;
        self.current_id = steps.get(index).map(|step| step.id);
        if let (Some(from), Some(to)) = (from, self.current_id) {
            info!("Wizard moved {} -> {}", from, to);
        }
    }

    /// Keep the index on the same step id, or on the same position when
    /// that step is no longer visible
    ///
    /// A required step that appears behind the cursor and is not satisfied
    /// pulls the cursor back to it.
    fn reconcile(&mut self) {
        let steps = self.steps();
        if steps.is_empty() {
            self.current_index = 0;
            self.current_id = None;
            return;
        }

        let anchored = self
            .current_id
            .and_then(|id| steps.iter().position(|step| step.id == id));
        let mut index = anchored.unwrap_or_else(|| self.current_index.min(steps.len() - 1));

        if anchored.is_some_and(|position| position > self.current_index) {
            let signals = self.signals();
            if let Some(blocking) = steps[..index]
                .iter()
                .position(|step| step.required && !can_advance(step, &self.state, &signals))
            {
                info!(
                    "Step {} appeared before {} and is incomplete; moving back",
                    steps[blocking].id, steps[index].id
                );
                index = blocking;
            }
        }

        if anchored.is_none() && self.current_id.is_some() {
            debug!(
                "Step {:?} left the list; now on {}",
                self.current_id, steps[index].id
            );
        }
        self.current_index = index;
        self.current_id = Some(steps[index].id);
    }
}
