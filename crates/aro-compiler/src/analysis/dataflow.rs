//! Per-statement data-flow facts.

use std::fmt;

/// Inputs, outputs and side effects of one top-level statement.
///
/// Each list holds unique names in first-seen order. A match statement's
/// record also folds in the facts of every statement nested in its bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFlowInfo {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    /// `"<verb>:<result>"` for response-role statements.
    pub side_effects: Vec<String>,
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

impl DataFlowInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_input(&mut self, name: &str) {
        push_unique(&mut self.inputs, name);
    }

    pub fn add_output(&mut self, name: &str) {
        push_unique(&mut self.outputs, name);
    }

    pub fn add_side_effect(&mut self, verb: &str, result: &str) {
        push_unique(&mut self.side_effects, &format!("{verb}:{result}"));
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty() && self.side_effects.is_empty()
    }
}

impl fmt::Display for DataFlowInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "in [{}] out [{}]",
            self.inputs.join(", "),
            self.outputs.join(", ")
        )?;
        if !self.side_effects.is_empty() {
            write!(f, " effects [{}]", self.side_effects.join(", "))?;
        }
        Ok(())
    }
}
