// ABOUTME: CLI steps command - print the derived wizard steps

use super::{FlowArgs, OutputFormat};
use crate::config::WizardConfig;
use crate::wizard::StepDefinition;
use anyhow::Result;

/// Execute the steps command
pub fn execute(args: &FlowArgs, config: &WizardConfig, format: OutputFormat) -> Result<()> {
    let controller = args.controller(config);
    let steps = controller.steps();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&steps)?),
        OutputFormat::Text => output_text(&steps, controller.current_index()),
    }
    Ok(())
}

/// Render steps as a numbered list, marking the current one
pub fn render_steps(steps: &[StepDefinition], current: usize) -> Vec<String> {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let marker = if index == current { ">" } else { " " };
            let optional = if step.required { "" } else { " (optional)" };
            format!("{marker} {}. {}{optional}", index + 1, step.label)
        })
        .collect()
}

fn output_text(steps: &[StepDefinition], current: usize) {
    for line in render_steps(steps, current) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{derive_steps, SignalSnapshot, WizardState};

    #[test]
    fn test_render_marks_current_and_optional() {
        let signals = SignalSnapshot {
            project_fixed: true,
            resource_type_preselected: true,
            ..SignalSnapshot::default()
        };
        let steps = derive_steps(&WizardState::new("free"), &signals);
        let lines = render_steps(&steps, 1);
        assert_eq!(lines, vec!["  1. Name & Tier", "> 2. Access (optional)"]);
    }
}
