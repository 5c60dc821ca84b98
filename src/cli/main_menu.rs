//! Top-level menu loop.

use tracing::warn;

use crate::agent::console::{pause, prompt};
use crate::agent::{AgentRuntime, Console};
use crate::error::{Result, SimError};
use crate::personas::PersonaRegistry;

use super::admin_menu::admin_console;
use super::persona_menu::manage_personas;
use super::scenario_menu::manage_scenarios;
use super::simulation_menu::run_simulation;

const EXIT_MESSAGE: &str = "\n\nExiting Decision Simulator...";

fn display_menu(console: &mut dyn Console) {
    console.write_line("\n=== Decision Simulator ===");
    console.write_line("[a] Admin Console");
    console.write_line("[p] Manage Personas");
    console.write_line("[s] Manage Scenarios");
    console.write_line("[r] Run Simulation");
    console.write_line("[q] Quit");
}

/// Run the main menu until the user quits or interrupts.
///
/// Errors from a submenu are reported and the loop resumes. An interrupt at
/// any depth ends the loop.
pub async fn run_main_loop(
    console: &mut dyn Console,
    personas: &mut PersonaRegistry,
    runtime: &AgentRuntime,
) -> Result<()> {
    console.write_line("Welcome to Decision Simulator!");
    console.write_line("Use the letter commands shown in brackets to navigate.");

    match menu_loop(console, personas, runtime).await {
        Err(SimError::Interrupted) => {
            console.write_line(EXIT_MESSAGE);
            Ok(())
        }
        other => other,
    }
}

async fn menu_loop(
    console: &mut dyn Console,
    personas: &mut PersonaRegistry,
    runtime: &AgentRuntime,
) -> Result<()> {
    loop {
        display_menu(console);

        let Some(choice) = prompt(console, "\nEnter your choice: ").await? else {
            console.write_line(EXIT_MESSAGE);
            return Ok(());
        };

        let outcome = match choice.to_lowercase().as_str() {
            "a" => admin_console(console, personas).await,
            "p" => manage_personas(console, personas, runtime).await,
            "s" => manage_scenarios(console).await,
            "r" => run_simulation(console, personas).await,
            "q" => {
                console.write_line("\nThank you for using Decision Simulator. Goodbye!");
                return Ok(());
            }
            _ => {
                console.write_line("\nInvalid choice. Please use a, p, s, r, or q.");
                Ok(())
            }
        };

        match outcome {
            Err(SimError::Interrupted) => return Err(SimError::Interrupted),
            Err(err) => {
                warn!(error = %err, "menu action failed");
                console.write_line(&format!("\nAn error occurred: {err}"));
                pause(console).await?;
            }
            Ok(()) => {}
        }
    }
}
