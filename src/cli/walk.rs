// ABOUTME: CLI walk command - drive the wizard through scripted actions
//
// Applies each action in order and prints the wizard snapshot after it.
// Creation uses a dry-run creator that only echoes the payload.

use super::script::{parse_actions, ScriptedAction};
use super::steps::render_steps;
use super::{OutputFormat, WalkArgs};
use crate::config::WizardConfig;
use crate::wizard::{
    BillingSignal, CreateResourceRequest, CreatedResource, CreationError, FlowController,
    FlowSnapshot, ResourceCreator,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

/// Creator that accepts every request without contacting the platform
pub struct DryRunCreator;

#[async_trait]
impl ResourceCreator for DryRunCreator {
    async fn create_resource(
        &self,
        project_id: &str,
        request: &CreateResourceRequest,
    ) -> Result<CreatedResource, CreationError> {
        let payload = serde_json::to_string(request)
            .map_err(|e| CreationError::new(format!("failed to encode payload: {e}")))?;
        info!("Dry-run creation in project {}: {}", project_id, payload);
        Ok(CreatedResource {
            id: request.id.clone(),
            project_id: project_id.to_string(),
            status: Some("dry-run".to_string()),
        })
    }
}

/// Outcome of one scripted action
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkStep {
    pub action: String,
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub snapshot: FlowSnapshot,
}

/// Execute the walk command
pub async fn execute(args: &WalkArgs, config: &WizardConfig, format: OutputFormat) -> Result<()> {
    let actions = parse_actions(&args.actions).map_err(|e| anyhow!(e))?;
    let mut controller = args.flow.controller(config);
    let walk = run_script(&mut controller, &actions, &DryRunCreator).await;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&walk)?),
        OutputFormat::Text => output_text(&walk),
    }
    Ok(())
}

/// Apply `actions` in order, recording the wizard after each one
pub async fn run_script(
    controller: &mut FlowController,
    actions: &[ScriptedAction],
    creator: &dyn ResourceCreator,
) -> Vec<WalkStep> {
    let mut walk = Vec::with_capacity(actions.len());

    for action in actions {
        let mut message = None;
        let applied = match action {
            ScriptedAction::Change(change) => {
                controller.update(change.clone());
                true
            }
            ScriptedAction::Next => controller.go_next(),
            ScriptedAction::Back => controller.go_back(),
            ScriptedAction::Skip => controller.skip_current_step(),
            ScriptedAction::Goto(step) => controller.go_to_step(*step),
            ScriptedAction::Payment => {
                controller.set_billing(BillingSignal::loaded(true));
                true
            }
            ScriptedAction::Create => match controller.create(creator).await {
                Ok(created) => {
                    message = Some(format!("created {} in {}", created.id, created.project_id));
                    true
                }
                Err(e) => {
                    message = Some(e.to_string());
                    false
                }
            },
        };

        walk.push(WalkStep {
            action: action.to_string(),
            applied,
            message,
            snapshot: controller.snapshot(),
        });
    }

    walk
}

fn output_text(walk: &[WalkStep]) {
    for step in walk {
        let outcome = if step.applied { "ok" } else { "refused" };
        println!("{} [{}]", step.action, outcome);
        if let Some(message) = &step.message {
            println!("  {message}");
        }
        for line in render_steps(&step.snapshot.steps, step.snapshot.current_index) {
            println!("  {line}");
        }
    }
}
