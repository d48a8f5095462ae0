//! Parameter table contract, per-tick snapshots, and an in-memory table.
//!
//! The live table belongs to the model-deformation runtime. Hosts implement
//! [`ParameterTable`] over it and hand it to the managers each tick.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Read/write access to a model's parameters and part opacities.
pub trait ParameterTable {
    /// Current value of a parameter (0 for unknown ids).
    fn parameter_value(&self, id: &str) -> f32;
    fn set_parameter_value(&mut self, id: &str, value: f32);
    /// Every parameter with its current value.
    fn parameter_values(&self) -> Vec<(String, f32)>;
    fn set_part_opacity(&mut self, id: &str, opacity: f32);
}

/// Parameter values captured after one tick and restored before the next.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterSnapshot {
    values: HashMap<String, f32>,
}

impl ParameterSnapshot {
    pub fn capture(table: &dyn ParameterTable) -> Self {
        Self {
            values: table.parameter_values().into_iter().collect(),
        }
    }

    /// Write every captured value back into the table.
    pub fn restore(&self, table: &mut dyn ParameterTable) {
        for (id, value) in &self.values {
            table.set_parameter_value(id, *value);
        }
    }

    pub fn get(&self, id: &str) -> Option<f32> {
        self.values.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One model parameter with its range and default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: String,
    pub minimum: f32,
    pub maximum: f32,
    pub default: f32,
    pub current: f32,
}

/// In-memory [`ParameterTable`] for hosts without a native runtime and for tests.
///
/// Writes to unknown parameter or part ids are ignored, like the native
/// runtime does.
#[derive(Clone, Debug, Default)]
pub struct ParameterStore {
    parameters: Vec<Parameter>,
    index: HashMap<String, usize>,
    parts: HashMap<String, f32>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parameter; its current value starts at `default`.
    /// Re-registering an id replaces the previous definition.
    pub fn add_parameter(&mut self, id: &str, minimum: f32, maximum: f32, default: f32) {
        let param = Parameter {
            id: id.to_string(),
            minimum,
            maximum,
            default,
            current: default,
        };
        match self.index.get(id) {
            Some(&i) => self.parameters[i] = param,
            None => {
                self.index.insert(id.to_string(), self.parameters.len());
                self.parameters.push(param);
            }
        }
    }

    pub fn with_parameter(mut self, id: &str, minimum: f32, maximum: f32, default: f32) -> Self {
        self.add_parameter(id, minimum, maximum, default);
        self
    }

    pub fn add_part(&mut self, id: &str, opacity: f32) {
        self.parts.insert(id.to_string(), opacity);
    }

    pub fn with_part(mut self, id: &str, opacity: f32) -> Self {
        self.add_part(id, opacity);
        self
    }

    pub fn parameter(&self, id: &str) -> Option<&Parameter> {
        self.index.get(id).map(|&i| &self.parameters[i])
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn part_opacity(&self, id: &str) -> Option<f32> {
        self.parts.get(id).copied()
    }
}

impl ParameterTable for ParameterStore {
    fn parameter_value(&self, id: &str) -> f32 {
        self.parameter(id).map_or(0.0, |p| p.current)
    }

    fn set_parameter_value(&mut self, id: &str, value: f32) {
        match self.index.get(id) {
            Some(&i) => self.parameters[i].current = value,
            None => log::trace!("ignoring write to unknown parameter '{id}'"),
        }
    }

    fn parameter_values(&self) -> Vec<(String, f32)> {
        self.parameters
            .iter()
            .map(|p| (p.id.clone(), p.current))
            .collect()
    }

    fn set_part_opacity(&mut self, id: &str, opacity: f32) {
        match self.parts.get_mut(id) {
            Some(slot) => *slot = opacity,
            None => log::trace!("ignoring opacity write to unknown part '{id}'"),
        }
    }
}
