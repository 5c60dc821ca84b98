//! Convenience re-exports for common use.

pub use crate::agent::{Agent, AgentRuntime, Console, ConsoleInput, Interaction, StdConsole};
pub use crate::config::{Backend, CompletionConfig};
pub use crate::error::{ProviderError, Result, SimError};
pub use crate::personas::{Persona, PersonaRegistry};
pub use crate::provider::{CompletionRequest, ModelProvider};
pub use crate::simulator::{DecisionSimulator, SimulationResult};
pub use crate::types::{GenerationSettings, Message, Role};
