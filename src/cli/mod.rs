//! CLI entry point for decision-sim.

pub mod admin_menu;
pub mod main_menu;
pub mod persona_menu;
pub mod scenario_menu;
pub mod simulation_menu;

pub use main_menu::run_main_loop;

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::CompletionConfig;
use crate::error::Result;

/// Decision Simulator CLI
#[derive(Parser, Debug)]
#[command(
    name = "decision-sim",
    version,
    about = "Decision Simulator: simulate outcomes of decisions using AI agents"
)]
pub struct Cli {
    #[command(flatten)]
    pub completion: CompletionArgs,

    /// Defaults to the interactive menu.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive menus for personas, scenarios and simulations
    Menu,
    /// Simulate the outcome of a decision scenario
    Simulate(SimulateArgs),
}

/// Completion backend overrides, applied on top of file and environment.
#[derive(Args, Debug, Default, Clone)]
pub struct CompletionArgs {
    /// Path to a config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Completion backend (openai, anthropic, openai-compatible)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Model identifier
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Temperature (0.0 - 2.0)
    #[arg(long, global = true)]
    pub temperature: Option<f64>,

    /// Max tokens per completion
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// Per-call deadline in seconds (0 disables)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

impl CompletionArgs {
    /// Flags expressed as the environment keys they override.
    pub fn overrides(&self) -> HashMap<&'static str, String> {
        let mut overrides = HashMap::new();
        if let Some(ref backend) = self.backend {
            overrides.insert("DECISION_SIM_BACKEND", backend.clone());
        }
        if let Some(ref model) = self.model {
            overrides.insert("DECISION_SIM_MODEL", model.clone());
        }
        if let Some(temperature) = self.temperature {
            overrides.insert("DECISION_SIM_TEMPERATURE", temperature.to_string());
        }
        if let Some(max_tokens) = self.max_tokens {
            overrides.insert("DECISION_SIM_MAX_TOKENS", max_tokens.to_string());
        }
        if let Some(secs) = self.timeout_secs {
            overrides.insert("DECISION_SIM_TIMEOUT_SECS", secs.to_string());
        }
        overrides
    }

    /// Load the config with these flags taking precedence over everything.
    pub fn load_config(&self) -> Result<CompletionConfig> {
        let _ = dotenvy::dotenv();
        let overrides = self.overrides();
        CompletionConfig::load_with_env(self.config.as_deref(), |key| {
            overrides
                .get(key)
                .cloned()
                .or_else(|| std::env::var(key).ok())
        })
    }
}

/// Arguments for the `simulate` subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Decision scenario to simulate
    #[arg(short, long)]
    pub scenario: Option<String>,

    /// Number of simulation iterations
    #[arg(short, long, default_value_t = 1)]
    pub iterations: usize,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
