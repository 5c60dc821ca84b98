//! Persona records and the registry that holds them.

pub mod persona;
pub mod registry;

pub use persona::Persona;
pub use registry::PersonaRegistry;
