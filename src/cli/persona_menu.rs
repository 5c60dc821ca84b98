//! Persona management: AI-assisted creation, browsing, chat, deletion.

use tracing::{info, warn};

use crate::agent::console::{interruptible, pause, prompt};
use crate::agent::{AgentRuntime, Console};
use crate::error::{Result, SimError};
use crate::personas::{Persona, PersonaRegistry};

const CHARACTER_BUILDER_INSTRUCTION: &str = "You are an expert character designer. Take the given persona data and create a comprehensive, detailed character description that an AI can embody convincingly.

Include speech patterns, behavioral quirks, decision-making style, emotional responses, and how they express their traits in conversation.";

const PROMPT_SYNTHESIZER_INSTRUCTION: &str = "You are an expert at creating system prompts. Combine character descriptions with scenarios into clear, natural prompts that enable authentic roleplay.";

fn generator_instruction(name: &str) -> String {
    format!(
        "You are a persona creation assistant helping users design detailed, realistic personas for decision simulation.

The user is creating a persona named: {name}

Your job is to:
1. Interview the user to gather comprehensive information about the persona
2. Ask probing questions to flesh out personality, background, goals, and other characteristics
3. Help them think deeply about what makes this persona unique
4. Continue gathering information until the user explicitly says they are done

Focus especially on:
- Getting a clear, specific background story
- Understanding multiple personality traits (not just adjectives, but behavioral patterns)
- Identifying concrete goals and motivations
- Capturing their communication style with examples
- Any unique quirks or characteristics"
    )
}

fn structurer_instruction(name: &str) -> String {
    format!(
        "You are a data extraction expert. Your job is to extract structured persona data from conversation history.

You must extract:
- name (string)
- background (string)
- personality_traits (list of strings)
- goals (list of strings)
- communication_style (optional string)
- expertise (optional string)
- quirks (optional string)
- values (optional dict)

The conversation is about a persona named \"{name}\"; name must be \"{name}\". personality_traits and goals must be lists.

Return ONLY valid JSON with these fields."
    )
}

pub async fn manage_personas(
    console: &mut dyn Console,
    personas: &mut PersonaRegistry,
    runtime: &AgentRuntime,
) -> Result<()> {
    loop {
        console.write_line("\n=== Persona Management ===");
        console.write_line("[c] Create new persona");
        console.write_line("[l] List all personas");
        console.write_line("[e] Edit persona");
        console.write_line("[d] Delete persona");
        console.write_line("[b] Back to main menu");

        let Some(choice) = prompt(console, "\nEnter your choice: ").await? else {
            return Ok(());
        };

        match choice.to_lowercase().as_str() {
            "c" => create_persona_with_ai(console, personas, runtime).await?,
            "l" => list_personas(console, personas, runtime).await?,
            "e" => {
                console.write_line("\n[Edit Persona - Coming Soon]");
                pause(console).await?;
            }
            "d" => delete_persona(console, personas).await?,
            "b" => return Ok(()),
            _ => console.write_line("\nInvalid choice. Please try again."),
        }
    }
}

/// Interview the user about a new persona, then extract it as JSON.
///
/// Interview and extraction failures are reported on the console and do not
/// propagate. An interrupt does.
pub async fn create_persona_with_ai(
    console: &mut dyn Console,
    personas: &mut PersonaRegistry,
    runtime: &AgentRuntime,
) -> Result<()> {
    console.write_line("\n=== AI-Assisted Persona Creation ===");
    let name = prompt(console, "Enter a name for this persona: ")
        .await?
        .unwrap_or_default();
    if name.is_empty() {
        console.write_line("Name is required!");
        return Ok(());
    }

    if personas.contains(&name) {
        let question = format!("Persona '{name}' already exists. Overwrite? (y/n): ");
        let answer = prompt(console, &question).await?.unwrap_or_default();
        if !answer.eq_ignore_ascii_case("y") {
            console.write_line("Persona creation cancelled.");
            return Ok(());
        }
    }

    match interview_persona(console, runtime, &name).await {
        Ok(persona) => {
            personas.insert(persona.clone());
            info!(persona = %name, "persona created from interview");
            console.write_line(&format!("\nPersona '{name}' added successfully!"));

            let answer = prompt(console, "\nWould you like to chat with this persona now? (y/n): ")
                .await?
                .unwrap_or_default();
            if answer.eq_ignore_ascii_case("y") {
                chat_with_persona(console, &persona, runtime).await?;
            }
        }
        Err(SimError::Interrupted) => return Err(SimError::Interrupted),
        Err(err) => {
            warn!(persona = %name, error = %err, "persona creation failed");
            console.write_line(&format!("\nError creating persona: {err}"));
            pause(console).await?;
        }
    }
    Ok(())
}

async fn interview_persona(
    console: &mut dyn Console,
    runtime: &AgentRuntime,
    name: &str,
) -> Result<Persona> {
    let mut generator = runtime.create_agent("Persona Generator", generator_instruction(name))?;

    console.write_line(&format!("\nCreating persona: {name}"));
    console.write_line("I'll interview you to build out this persona.");
    console.write_line("Type 'exit' when you're done.\n");

    let opener = format!(
        "Let's start creating {name}. Can you tell me about their background? Where are they from, what's their history, and what experiences have shaped who they are?"
    );
    let extraction = structurer_instruction(name);
    let interaction = generator
        .interact(console, Some(opener.as_str()), Some(extraction.as_str()))
        .await?;

    console.write_line("\nExtracting persona details...");
    let extracted = interruptible(console, interaction.finalize())
        .await?
        .unwrap_or_default();
    let mut persona = Persona::from_model_output(&extracted)?;
    // The record is keyed by the name the user chose, whatever the model returned.
    persona.name = name.to_string();
    Ok(persona)
}

pub async fn list_personas(
    console: &mut dyn Console,
    personas: &PersonaRegistry,
    runtime: &AgentRuntime,
) -> Result<()> {
    console.write_line("\n=== All Personas ===");
    if personas.is_empty() {
        console.write_line("No personas created yet.");
        pause(console).await?;
        return Ok(());
    }

    for (i, persona) in personas.iter().enumerate() {
        console.write_line(&format!("{}. {}", i + 1, persona.summary()));
    }

    let choice = prompt(
        console,
        "\nEnter persona number to view details (or press Enter to go back): ",
    )
    .await?
    .unwrap_or_default();

    let Ok(number) = choice.parse::<usize>() else {
        return Ok(());
    };
    match number.checked_sub(1).and_then(|idx| personas.get_index(idx)) {
        Some(persona) => show_persona_detail(console, persona, runtime).await,
        None => {
            console.write_line("Invalid selection.");
            pause(console).await?;
            Ok(())
        }
    }
}

fn render_detail(console: &mut dyn Console, persona: &Persona) {
    console.write_line(&format!("\n=== Persona: {} ===", persona.name));
    console.write_line(&format!("Background: {}", persona.background));

    if !persona.personality_traits.is_empty() {
        console.write_line("\nPersonality Traits:");
        for trait_ in &persona.personality_traits {
            console.write_line(&format!("  - {trait_}"));
        }
    }
    if !persona.goals.is_empty() {
        console.write_line("\nGoals:");
        for goal in &persona.goals {
            console.write_line(&format!("  - {goal}"));
        }
    }
    if let Some(ref style) = persona.communication_style {
        console.write_line(&format!("\nCommunication Style: {style}"));
    }
    if let Some(ref expertise) = persona.expertise {
        console.write_line(&format!("Expertise: {expertise}"));
    }
    if let Some(ref quirks) = persona.quirks {
        console.write_line(&format!("Quirks: {quirks}"));
    }
    if let Some(ref values) = persona.values {
        console.write_line("\nValues:");
        for (key, value) in values {
            let value = value
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string());
            console.write_line(&format!("  - {key}: {value}"));
        }
    }
}

pub async fn show_persona_detail(
    console: &mut dyn Console,
    persona: &Persona,
    runtime: &AgentRuntime,
) -> Result<()> {
    loop {
        render_detail(console, persona);
        console.write_line("\n[c] Chat with this persona");
        console.write_line("[b] Back to persona list");

        let Some(choice) = prompt(console, "\nEnter your choice: ").await? else {
            return Ok(());
        };
        match choice.to_lowercase().as_str() {
            "c" => chat_with_persona(console, persona, runtime).await?,
            "b" => return Ok(()),
            _ => console.write_line("\nInvalid choice. Please try again."),
        }
    }
}

/// Turn `persona` into a role-play system prompt and open a chat with it.
///
/// Two one-shot calls build the prompt: a character description from the
/// persona record, then a system prompt from that description.
pub async fn chat_with_persona(
    console: &mut dyn Console,
    persona: &Persona,
    runtime: &AgentRuntime,
) -> Result<()> {
    console.write_line(&format!("\nPreparing chat with {}...", persona.name));

    console.write_line("Building character profile...");
    let description_request = format!(
        "Create a detailed character description for: {}",
        persona.to_json()?
    );
    let character = interruptible(
        console,
        runtime.invoke(
            "Character Builder",
            CHARACTER_BUILDER_INSTRUCTION,
            &description_request,
        ),
    )
    .await?;

    console.write_line("Preparing conversation...");
    let prompt_request = format!(
        "Create a system prompt for this character in a casual conversation:

CHARACTER: {character}

SCENARIO: Having a friendly chat with someone who wants to get to know you better."
    );
    let system_prompt = interruptible(
        console,
        runtime.invoke(
            "Prompt Synthesizer",
            PROMPT_SYNTHESIZER_INSTRUCTION,
            &prompt_request,
        ),
    )
    .await?;

    let mut agent = runtime.create_agent(persona.name.clone(), system_prompt)?;

    console.write_line(&format!("\n=== Starting chat with {} ===", persona.name));
    console.write_line("Type 'exit' to end the conversation.");
    console.write_line(&"-".repeat(60));
    console.write_line("");

    let greeting = format!(
        "Hello! I'm {}. It's nice to meet you. What would you like to talk about?",
        persona.name
    );
    agent.interact(console, Some(greeting.as_str()), None).await?;
    Ok(())
}

pub async fn delete_persona(console: &mut dyn Console, personas: &mut PersonaRegistry) -> Result<()> {
    if personas.is_empty() {
        console.write_line("\nNo personas to delete.");
        pause(console).await?;
        return Ok(());
    }

    console.write_line("\n=== Delete Persona ===");
    console.write_line("Available personas:");
    for (i, name) in personas.names().iter().enumerate() {
        console.write_line(&format!("{}. {name}", i + 1));
    }

    let name = prompt(
        console,
        "\nEnter persona name to delete (or press Enter to cancel): ",
    )
    .await?
    .unwrap_or_default();

    if personas.contains(&name) {
        let question = format!("Are you sure you want to delete '{name}'? (y/n): ");
        let answer = prompt(console, &question).await?.unwrap_or_default();
        if answer.eq_ignore_ascii_case("y") {
            personas.remove(&name);
            info!(persona = %name, "persona deleted");
            console.write_line(&format!("Persona '{name}' deleted."));
        }
    } else if !name.is_empty() {
        console.write_line(&format!("Persona '{name}' not found."));
    }

    pause(console).await?;
    Ok(())
}
