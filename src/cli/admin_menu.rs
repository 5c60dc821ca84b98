//! Admin console: direct entity creation without model assistance.

use std::collections::BTreeMap;

use tracing::info;

use crate::agent::console::{pause, prompt};
use crate::agent::Console;
use crate::error::Result;
use crate::personas::{Persona, PersonaRegistry};

pub async fn admin_console(console: &mut dyn Console, personas: &mut PersonaRegistry) -> Result<()> {
    loop {
        console.write_line("\n=== Admin Console ===");
        console.write_line("[p] Create Persona (Manual)");
        console.write_line("[s] Create Scenario (Manual)");
        console.write_line("[b] Back to main menu");

        let Some(choice) = prompt(console, "\nEnter your choice: ").await? else {
            return Ok(());
        };

        match choice.to_lowercase().as_str() {
            "p" => create_persona_manual(console, personas).await?,
            "s" => {
                console.write_line("\n[Create Scenario Manual - Coming Soon]");
                pause(console).await?;
            }
            "b" => return Ok(()),
            _ => console.write_line("\nInvalid choice. Please try again."),
        }
    }
}

/// Collect lines until an empty one (or end of input).
async fn read_list(console: &mut dyn Console, label: &str) -> Result<Vec<String>> {
    let mut items = Vec::new();
    while let Some(item) = prompt(console, &format!("  {label}: ")).await? {
        if item.is_empty() {
            break;
        }
        items.push(item);
    }
    Ok(items)
}

async fn read_optional(console: &mut dyn Console, label: &str) -> Result<Option<String>> {
    Ok(prompt(console, label).await?.filter(|value| !value.is_empty()))
}

/// Build a persona field by field and add it to `personas`.
///
/// Existing names are refused rather than overwritten.
pub async fn create_persona_manual(
    console: &mut dyn Console,
    personas: &mut PersonaRegistry,
) -> Result<()> {
    console.write_line("\n=== Manual Persona Creation ===");

    let Some(name) = read_optional(console, "Enter persona name: ").await? else {
        console.write_line("Name is required!");
        return Ok(());
    };
    if personas.contains(&name) {
        console.write_line(&format!("Persona '{name}' already exists!"));
        return Ok(());
    }

    let Some(background) = read_optional(console, "Enter background/description: ").await? else {
        console.write_line("Background is required!");
        return Ok(());
    };

    console.write_line(
        "\nEnter personality traits (one per line, press Enter with empty line to finish):",
    );
    let personality_traits = read_list(console, "Trait").await?;

    console.write_line("\nEnter goals (one per line, press Enter with empty line to finish):");
    let goals = read_list(console, "Goal").await?;

    console.write_line("\nOptional fields (press Enter to skip):");
    let communication_style = read_optional(console, "Communication style: ").await?;
    let expertise = read_optional(console, "Expertise/skills: ").await?;
    let quirks = read_optional(console, "Quirks/unique behaviors: ").await?;

    console.write_line("\nEnter values (press Enter with empty key to finish):");
    let mut values = BTreeMap::new();
    while let Some(key) = read_optional(console, "  Value name: ").await? {
        let label = format!("  {key} description: ");
        if let Some(description) = read_optional(console, &label).await? {
            values.insert(key, serde_json::Value::String(description));
        }
    }

    let persona = Persona {
        name: name.clone(),
        background,
        personality_traits,
        goals,
        communication_style,
        expertise,
        values: (!values.is_empty()).then_some(values),
        quirks,
    };
    let summary = persona.summary();
    personas.insert(persona);
    info!(persona = %name, "persona created manually");

    console.write_line(&format!("\nPersona '{name}' created successfully!"));
    console.write_line(&format!("Summary: {summary}"));
    pause(console).await?;
    Ok(())
}
