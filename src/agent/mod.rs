//! Agent system: stateful agents, the runtime that executes them, and
//! captured interactions.

pub mod agent;
pub mod console;
pub mod interaction;
pub mod runtime;

pub use agent::Agent;
pub use console::{Console, ConsoleInput, StdConsole};
pub use interaction::Interaction;
pub use runtime::{is_exit_command, AgentRuntime, ChatState};
