//! Scenario management menu. Scenario storage does not exist yet; every
//! action is a placeholder.

use crate::agent::console::{pause, prompt};
use crate::agent::Console;
use crate::error::Result;

pub async fn manage_scenarios(console: &mut dyn Console) -> Result<()> {
    loop {
        console.write_line("\n=== Scenario Management ===");
        console.write_line("[c] Create new scenario");
        console.write_line("[l] List all scenarios");
        console.write_line("[e] Edit scenario");
        console.write_line("[d] Delete scenario");
        console.write_line("[b] Back to main menu");

        let Some(choice) = prompt(console, "\nEnter your choice: ").await? else {
            return Ok(());
        };

        let placeholder = match choice.to_lowercase().as_str() {
            "c" => "Create Scenario",
            "l" => "List Scenarios",
            "e" => "Edit Scenario",
            "d" => "Delete Scenario",
            "b" => return Ok(()),
            _ => {
                console.write_line("\nInvalid choice. Please try again.");
                continue;
            }
        };
        console.write_line(&format!("\n[{placeholder} - Coming Soon]"));
        pause(console).await?;
    }
}
