//! Single-shot decision outcome simulation.

use serde::Serialize;
use tracing::debug;

use crate::agent::AgentRuntime;
use crate::error::Result;

const SIMULATOR_NAME: &str = "Decision Simulator";
const SIMULATOR_INSTRUCTION: &str = "You are a decision outcome simulator. Given a scenario, analyze potential decisions and their likely outcomes.";

/// One parsed simulation answer. Missing sections are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    pub decision: String,
    pub outcome: String,
    pub reasoning: String,
}

/// Runs independent simulation iterations against a runtime.
pub struct DecisionSimulator {
    runtime: AgentRuntime,
    verbose: bool,
}

impl DecisionSimulator {
    pub fn new(runtime: AgentRuntime, verbose: bool) -> Self {
        Self { runtime, verbose }
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Ask for a decision, outcome, and reasoning `iterations` times. Each
    /// iteration is a fresh one-shot call with no shared history.
    pub async fn simulate(&self, scenario: &str, iterations: usize) -> Result<Vec<SimulationResult>> {
        let prompt = build_prompt(scenario);
        let mut results = Vec::with_capacity(iterations);
        for iteration in 0..iterations {
            debug!(iteration, "simulation iteration");
            let response = self
                .runtime
                .invoke(SIMULATOR_NAME, SIMULATOR_INSTRUCTION, &prompt)
                .await?;
            results.push(parse_response(&response));
        }
        Ok(results)
    }
}

fn build_prompt(scenario: &str) -> String {
    format!(
        "Scenario: {scenario}\n\n\
         Please analyze this scenario and provide:\n\
         1. A recommended decision\n\
         2. The likely outcome of that decision\n\
         3. Brief reasoning for this prediction\n\n\
         Format your response as:\n\
         DECISION: [your decision]\n\
         OUTCOME: [predicted outcome]\n\
         REASONING: [brief explanation]"
    )
}

/// Pull the `DECISION:`, `OUTCOME:` and `REASONING:` lines out of a reply.
pub fn parse_response(response: &str) -> SimulationResult {
    let mut result = SimulationResult::default();
    for line in response.trim().lines() {
        if let Some(rest) = line.strip_prefix("DECISION:") {
            result.decision = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("OUTCOME:") {
            result.outcome = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("REASONING:") {
            result.reasoning = rest.trim().to_string();
        }
    }
    result
}
