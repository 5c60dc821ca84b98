//! Shared test helpers: a scripted provider and a scripted console.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use decision_sim::agent::{AgentRuntime, Console, ConsoleInput};
use decision_sim::error::ProviderError;
use decision_sim::provider::{CompletionRequest, CompletionService, ModelProvider};
use decision_sim::types::GenerationSettings;

/// What the stub does for one call.
pub enum Outcome {
    Reply(String),
    Fail(ProviderError),
    /// Never completes.
    Hang,
}

/// A provider that records every request and replays queued outcomes.
///
/// With an empty queue it replies `"stub response"`.
pub struct StubProvider {
    outcomes: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn with_replies(replies: &[&str]) -> Arc<Self> {
        let stub = Self::new();
        for reply in replies {
            stub.reply(reply);
        }
        stub
    }

    pub fn reply(&self, text: &str) {
        self.push(Outcome::Reply(text.to_string()));
    }

    pub fn fail(&self, err: ProviderError) {
        self.push(Outcome::Fail(err));
    }

    pub fn hang(&self) {
        self.push(Outcome::Hang);
    }

    fn push(&self, outcome: Outcome) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelProvider for StubProvider {
    fn provider_name(&self) -> &str {
        "stub"
    }

    fn model_id(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(Outcome::Reply(text)) => Ok(text),
            Some(Outcome::Fail(err)) => Err(err),
            Some(Outcome::Hang) => std::future::pending().await,
            None => Ok("stub response".to_string()),
        }
    }
}

/// A runtime whose completions come from `stub`.
pub fn stub_runtime(stub: &Arc<StubProvider>) -> AgentRuntime {
    let provider: Arc<dyn ModelProvider> = stub.clone();
    AgentRuntime::new(CompletionService::with_provider(
        provider,
        GenerationSettings::default(),
    ))
}

/// A console fed from a fixed script that captures everything written.
///
/// After the script runs out every read reports [`ConsoleInput::Closed`].
#[derive(Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<ConsoleInput>,
    pub output: Vec<String>,
    pub prompts: Vec<String>,
    interrupt_turns: bool,
}

impl ScriptedConsole {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            inputs: lines
                .iter()
                .map(|line| ConsoleInput::Line(line.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn then(mut self, input: ConsoleInput) -> Self {
        self.inputs.push_back(input);
        self
    }

    /// Deliver an interrupt while any turn is in flight.
    pub fn interrupting_turns(mut self) -> Self {
        self.interrupt_turns = true;
        self
    }

    pub fn printed(&self) -> String {
        self.output.join("\n")
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<ConsoleInput> {
        self.prompts.push(prompt.to_string());
        Ok(self.inputs.pop_front().unwrap_or(ConsoleInput::Closed))
    }

    fn write_line(&mut self, line: &str) {
        self.output.push(line.to_string());
    }

    async fn interrupted(&mut self) {
        if !self.interrupt_turns {
            std::future::pending::<()>().await
        }
    }
}
