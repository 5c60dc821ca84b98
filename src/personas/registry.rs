//! In-memory, name-keyed persona store.

use super::persona::Persona;

/// Personas keyed by name, in insertion order.
///
/// Built once at startup and passed by reference to whatever needs it.
#[derive(Debug, Default, Clone)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

impl PersonaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a persona. An existing entry with the same name is replaced in
    /// place and returned.
    pub fn insert(&mut self, persona: Persona) -> Option<Persona> {
        match self.position(&persona.name) {
            Some(idx) => Some(std::mem::replace(&mut self.personas[idx], persona)),
            None => {
                self.personas.push(persona);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.name == name)
    }

    /// Persona at a zero-based position in insertion order.
    pub fn get_index(&self, index: usize) -> Option<&Persona> {
        self.personas.get(index)
    }

    pub fn remove(&mut self, name: &str) -> Option<Persona> {
        self.position(name).map(|idx| self.personas.remove(idx))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Persona> {
        self.personas.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.personas.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.personas.iter().position(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut registry = PersonaRegistry::new();
        registry.insert(Persona::new("Ada", "first"));
        registry.insert(Persona::new("Bob", "second"));

        let previous = registry.insert(Persona::new("Ada", "updated"));

        assert_eq!(previous.map(|p| p.background), Some("first".to_string()));
        assert_eq!(registry.names(), vec!["Ada", "Bob"]);
        assert_eq!(registry.get("Ada").unwrap().background, "updated");
    }

    #[test]
    fn remove_and_lookup() {
        let mut registry = PersonaRegistry::new();
        registry.insert(Persona::new("Ada", "x"));
        assert!(registry.contains("Ada"));
        assert_eq!(registry.get_index(0).map(|p| p.name.as_str()), Some("Ada"));

        assert!(registry.remove("Ada").is_some());
        assert!(registry.remove("Ada").is_none());
        assert!(registry.is_empty());
    }
}
