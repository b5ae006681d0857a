// ABOUTME: Behavioural tests for step derivation and navigation of the creation wizard

use konnektr_wizard::catalog::{Catalog, ResourceType};
use konnektr_wizard::wizard::{
    BillingSignal, EntryParams, FlowContext, FlowController, StateChange, StepId,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn ids(controller: &FlowController) -> Vec<StepId> {
    controller.steps().iter().map(|step| step.id).collect()
}

fn in_project(billing: BillingSignal) -> FlowContext {
    FlowContext {
        fixed_project_id: Some("proj-1".to_string()),
        has_existing_projects: true,
        billing,
    }
}

fn assert_index_valid(controller: &FlowController) {
    let len = controller.steps().len();
    assert!(len > 0, "step list must not be empty");
    assert!(
        controller.current_index() < len,
        "index {} out of range for {} steps",
        controller.current_index(),
        len
    );
}

#[test]
fn test_preselected_type_in_fixed_project_shows_only_remaining_steps() {
    let entry = EntryParams::from_query("resourceType=Konnektr.Assembler&sku=free");
    let controller = FlowController::new(
        in_project(BillingSignal::loaded(false)),
        entry,
        Catalog::default(),
    );

    assert_eq!(
        ids(&controller),
        vec![StepId::Tier, StepId::Settings, StepId::Access]
    );
    assert_eq!(controller.current_step().unwrap().id, StepId::Tier);
}

#[test]
fn test_new_user_graph_without_ready_settings() {
    let mut controller = FlowController::new(
        FlowContext::default(),
        EntryParams::default(),
        Catalog::default(),
    );
    controller.update(StateChange::SelectResourceType(ResourceType::Graph));

    assert_eq!(
        ids(&controller),
        vec![StepId::Project, StepId::ResourceType, StepId::Tier]
    );
    assert_eq!(controller.steps()[0].label, "Create Project");
}

#[test]
fn test_paid_tier_without_payment_method_inserts_billing_after_tier() {
    let entry = EntryParams::from_query("resourceType=Konnektr.Graph&sku=standard");
    let mut controller = FlowController::new(
        in_project(BillingSignal::loaded(false)),
        entry,
        Catalog::default(),
    );

    assert_eq!(
        ids(&controller),
        vec![StepId::Tier, StepId::Billing, StepId::Access]
    );

    // Tier blocks only on its own inputs
    assert!(!controller.go_next());
    controller.update(StateChange::SetName("Plant West".to_string()));
    assert!(controller.go_next());
    assert_eq!(controller.current_step().unwrap().id, StepId::Billing);

    // Billing blocks until a payment method exists
    assert!(!controller.go_next());
    assert!(controller.billing_setup_intent().is_some());
}

#[test]
fn test_billing_step_disappears_when_payment_method_arrives() {
    let entry = EntryParams::from_query("resourceType=Konnektr.Assembler&sku=standard");
    let mut controller = FlowController::new(
        in_project(BillingSignal::loaded(false)),
        entry,
        Catalog::default(),
    );
    controller.update(StateChange::SetName("Assembler".to_string()));
    controller.go_next();
    assert_eq!(controller.current_step().unwrap().id, StepId::Billing);

    controller.set_billing(BillingSignal::loaded(true));

    assert_eq!(
        ids(&controller),
        vec![StepId::Tier, StepId::Settings, StepId::Access]
    );
    assert_eq!(controller.current_step().unwrap().id, StepId::Settings);
    assert!(controller.go_next());
    assert_eq!(controller.current_step().unwrap().id, StepId::Access);
}

#[test]
fn test_billing_step_hidden_while_status_loading() {
    let entry = EntryParams::from_query("resourceType=Konnektr.Graph&sku=premium");
    let mut controller =
        FlowController::new(in_project(BillingSignal::loading()), entry, Catalog::default());
    assert!(!ids(&controller).contains(&StepId::Billing));

    controller.set_billing(BillingSignal::loaded(false));
    assert!(ids(&controller).contains(&StepId::Billing));
}

#[test]
fn test_skipping_settings_is_sticky() {
    let entry = EntryParams::from_query("sku=free");
    let mut controller = FlowController::new(
        in_project(BillingSignal::loaded(true)),
        entry,
        Catalog::default(),
    );
    controller.update(StateChange::SelectResourceType(ResourceType::Assembler));
    controller.update(StateChange::SetName("Ingest".to_string()));
    assert!(controller.go_to_step(StepId::Settings));
    assert!(!controller.current_step().unwrap().required);

    assert!(controller.skip_current_step());
    assert!(controller.state().skip_settings);
    assert_eq!(controller.current_step().unwrap().id, StepId::Access);

    // Other state changes never bring the step back
    controller.update(StateChange::SelectResourceType(ResourceType::Flow));
    controller.update(StateChange::SelectSku("standard".to_string()));
    controller.update(StateChange::SelectResourceType(ResourceType::Assembler));
    assert!(!ids(&controller).contains(&StepId::Settings));
    assert!(!controller.go_to_step(StepId::Settings));
}

#[test]
fn test_required_settings_cannot_be_skipped() {
    let entry = EntryParams::from_query("resourceType=Konnektr.Flow");
    let mut controller = FlowController::new(
        in_project(BillingSignal::loaded(true)),
        entry,
        Catalog::default(),
    );
    controller.update(StateChange::SetName("Pipeline".to_string()));
    controller.go_next();
    let step = controller.current_step().unwrap();
    assert_eq!(step.id, StepId::Settings);
    assert!(step.required);

    assert!(!controller.skip_current_step());
    assert!(!controller.go_next());

    controller.update(StateChange::CaptureSettings(json!({"schedule": "hourly"})));
    assert!(controller.go_next());
    assert_eq!(controller.current_step().unwrap().id, StepId::Access);
}

#[test]
fn test_full_walk_from_scratch() {
    let mut controller = FlowController::new(
        FlowContext {
            has_existing_projects: true,
            billing: BillingSignal::loaded(true),
            ..FlowContext::default()
        },
        EntryParams::default(),
        Catalog::default(),
    );
    assert_eq!(controller.steps()[0].label, "Select Project");

    assert!(!controller.go_next());
    controller.update(StateChange::SelectProject("proj-9".to_string()));
    assert!(controller.go_next());

    assert!(!controller.go_next());
    controller.update(StateChange::SelectResourceType(ResourceType::Compass));
    assert!(controller.go_next());

    // Compass has no free tier, so its first tier is picked
    assert_eq!(controller.state().sku, "standard");
    controller.update(StateChange::SetName("Fleet Compass".to_string()));
    assert!(controller.go_next());

    assert_eq!(controller.current_step().unwrap().id, StepId::Access);
    assert!(controller.is_last_step());

    // Going back keeps what was entered
    assert!(controller.go_back());
    assert_eq!(controller.state().resource_id, "fleet-compass");
}

#[test]
fn test_manual_id_survives_name_changes() {
    let mut controller = FlowController::new(
        in_project(BillingSignal::loaded(true)),
        EntryParams::from_query("resourceType=Konnektr.Graph"),
        Catalog::default(),
    );
    controller.update(StateChange::SetName("Plant".to_string()));
    controller.update(StateChange::SetResourceId("plant-prod".to_string()));
    controller.update(StateChange::SetName("Plant Production".to_string()));

    assert!(controller.state().id_manually_edited());
    assert_eq!(controller.state().resource_id, "plant-prod");
}

#[test]
fn test_index_stays_valid_through_signal_and_state_churn() {
    let mut controller = FlowController::new(
        FlowContext {
            has_existing_projects: true,
            billing: BillingSignal::loaded(false),
            ..FlowContext::default()
        },
        EntryParams::default(),
        Catalog::default(),
    );

    controller.update(StateChange::SelectProject("p".to_string()));
    controller.go_next();
    controller.update(StateChange::SelectResourceType(ResourceType::Assembler));
    controller.go_next();
    controller.update(StateChange::SetName("Churn".to_string()));
    controller.update(StateChange::SelectSku("standard".to_string()));
    controller.go_next();
    assert_index_valid(&controller);

    controller.go_to_step(StepId::Access);
    assert_index_valid(&controller);
    controller.set_billing(BillingSignal::loaded(true));
    assert_index_valid(&controller);
    assert_eq!(controller.current_step().unwrap().id, StepId::Access);

    controller.skip_current_step();
    assert_index_valid(&controller);
    controller.set_billing(BillingSignal::loading());
    controller.update(StateChange::SelectSku("free".to_string()));
    controller.set_catalog(Catalog::new(Vec::new()));
    assert_index_valid(&controller);
}

#[test]
fn test_url_preselected_compass_starts_on_offered_tier() {
    let mut controller = FlowController::new(
        in_project(BillingSignal::loaded(false)),
        EntryParams::from_query("resourceType=Konnektr.Compass"),
        Catalog::default(),
    );
    assert_eq!(controller.state().sku, "standard");
    // Compass standard is paid and no payment method exists
    assert_eq!(
        ids(&controller),
        vec![StepId::Tier, StepId::Billing, StepId::Access]
    );

    controller.update(StateChange::SetName("Fleet".to_string()));
    let pending = controller.creation_request();
    assert!(pending.is_err());
    controller.set_billing(BillingSignal::loaded(true));
    assert_eq!(controller.creation_request().unwrap().request.sku, "standard");
}

#[test]
fn test_derivation_is_stable_for_identical_inputs() {
    let controller = FlowController::new(
        in_project(BillingSignal::loaded(false)),
        EntryParams::from_query("resourceType=Konnektr.Assembler&sku=standard"),
        Catalog::default(),
    );
    assert_eq!(controller.steps(), controller.steps());
    assert_eq!(controller.snapshot(), controller.snapshot());
}
