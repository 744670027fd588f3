//! Variable storage as a stack of owned frames.
//!
//! Frame 0 is the global frame and lives for the whole run. Every instruction
//! call pushes a short-lived frame holding its bound parameters and pops it
//! when the call returns.

use crate::runtime::value::Value;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Scope {
    frames: Vec<HashMap<String, Value>>,
}

impl Default for Scope {
    fn default() -> Self { Self::new() }
}

impl Scope {
    pub fn new() -> Self {
        Self { frames: vec![HashMap::new()] }
    }

    pub fn depth(&self) -> usize { self.frames.len() }

    pub fn push_frame(&mut self) { self.frames.push(HashMap::new()); }

    /// The global frame is never popped.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 { self.frames.pop(); }
    }

    /// Binds `name` in the innermost frame, shadowing any outer binding.
    pub fn declare(&mut self, name: &str, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), value);
        }
    }

    /// Updates the nearest frame that already defines `name`, otherwise
    /// defines it in the innermost frame.
    pub fn assign(&mut self, name: &str, value: Value) {
        match self.frames.iter_mut().rev().find(|f| f.contains_key(name)) {
            Some(frame) => { frame.insert(name.to_string(), value); }
            None => self.declare(name, value),
        }
    }

    /// Walks outward from the innermost frame.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.frames.iter().rev().find_map(|f| f.get(name))
    }

    /// Consumes the stack, keeping only the global bindings.
    pub fn into_globals(mut self) -> HashMap<String, Value> {
        self.frames.truncate(1);
        self.frames.pop().unwrap_or_default()
    }
}
