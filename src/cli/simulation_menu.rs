//! Simulation menu.

use crate::agent::console::{pause, prompt};
use crate::agent::Console;
use crate::error::Result;
use crate::personas::PersonaRegistry;

pub async fn run_simulation(console: &mut dyn Console, personas: &PersonaRegistry) -> Result<()> {
    loop {
        console.write_line("\n=== Run Simulation ===");
        console.write_line("[s] Select scenario");
        console.write_line("[p] Select personas");
        console.write_line("[r] Run with current selection");
        console.write_line("[v] View last results");
        console.write_line("[b] Back to main menu");

        let Some(choice) = prompt(console, "\nEnter your choice: ").await? else {
            return Ok(());
        };

        match choice.to_lowercase().as_str() {
            "s" => console.write_line("\n[Select Scenario - Coming Soon]"),
            "p" => {
                console.write_line("\n[Select Personas - Coming Soon]");
                if personas.is_empty() {
                    console.write_line("No personas available. Create some first!");
                } else {
                    console.write_line("Available personas:");
                    for name in personas.names() {
                        console.write_line(&format!("  - {name}"));
                    }
                }
            }
            "r" => console.write_line("\n[Running Simulation - Coming Soon]"),
            "v" => console.write_line("\n[View Results - Coming Soon]"),
            "b" => return Ok(()),
            _ => {
                console.write_line("\nInvalid choice. Please try again.");
                continue;
            }
        }
        pause(console).await?;
    }
}
