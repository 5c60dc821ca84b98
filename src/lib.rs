//! decision-sim: agents, runtime and interactions over a completion backend
//!
//! An [`agent::Agent`] pairs a name and a system instruction with a message
//! history. The [`agent::AgentRuntime`] owns the completion backend and runs
//! turns for its agents; an interactive session returns an
//! [`agent::Interaction`] that can be condensed by an accumulator agent.
//!
//! # Quick Start
//!
//! ```no_run
//! use decision_sim::prelude::*;
//!
//! # async fn example() -> decision_sim::error::Result<()> {
//! let runtime = AgentRuntime::create(None)?;
//! let mut helper = runtime.create_agent("Helper", "You are a helpful assistant.")?;
//! let reply = helper.send("What is 2+2?").await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod personas;
pub mod prelude;
pub mod provider;
pub mod simulator;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
