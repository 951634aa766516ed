//! Output ↔ input bindings.
//!
//! Each output figure is registered together with the input signals it
//! watches and a pure recompute function. When the UI reports that a signal
//! changed, every dependent output is rebuilt from the full table.

use crate::data::model::{FilterCriteria, LaunchTable};
use crate::figure::{Figure, pie_figure, scatter_figure};

/// A watched UI input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Site,
    PayloadRange,
}

/// A rendered chart slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputId {
    SuccessPie,
    PayloadScatter,
}

pub type Recompute = fn(&LaunchTable, &FilterCriteria) -> Figure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Recomputing,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("output {0:?} is already bound")]
    DuplicateOutput(OutputId),
    #[error("output {0:?} must watch at least one input")]
    NoInputs(OutputId),
}

struct Binding {
    output: OutputId,
    inputs: Vec<Signal>,
    recompute: Recompute,
}

/// Registration table of `{output, inputs} → recompute`.
pub struct CallbackRegistry {
    bindings: Vec<Binding>,
    phase: Phase,
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            phase: Phase::Idle,
        }
    }

    pub fn register(
        &mut self,
        output: OutputId,
        inputs: &[Signal],
        recompute: Recompute,
    ) -> Result<&mut Self, RegistryError> {
        if inputs.is_empty() {
            return Err(RegistryError::NoInputs(output));
        }
        if self.bindings.iter().any(|b| b.output == output) {
            return Err(RegistryError::DuplicateOutput(output));
        }
        self.bindings.push(Binding {
            output,
            inputs: inputs.to_vec(),
            recompute,
        });
        Ok(self)
    }

    /// Outputs that watch `signal`, in registration order.
    pub fn dependents(&self, signal: Signal) -> Vec<OutputId> {
        self.bindings
            .iter()
            .filter(|b| b.inputs.contains(&signal))
            .map(|b| b.output)
            .collect()
    }

    /// Rebuild every output watching `signal`.
    pub fn dispatch(
        &mut self,
        signal: Signal,
        table: &LaunchTable,
        criteria: &FilterCriteria,
    ) -> Vec<(OutputId, Figure)> {
        self.run(|b| b.inputs.contains(&signal), table, criteria)
    }

    /// Rebuild every output, used for the first frame.
    pub fn recompute_all(
        &mut self,
        table: &LaunchTable,
        criteria: &FilterCriteria,
    ) -> Vec<(OutputId, Figure)> {
        self.run(|_| true, table, criteria)
    }

    fn run(
        &mut self,
        selected: impl Fn(&Binding) -> bool,
        table: &LaunchTable,
        criteria: &FilterCriteria,
    ) -> Vec<(OutputId, Figure)> {
        self.transition(Phase::Recomputing);
        let figures = self
            .bindings
            .iter()
            .filter(|b| selected(*b))
            .map(|b| {
                log::debug!(
                    "recomputing {:?} for site={} payload={}",
                    b.output,
                    criteria.site,
                    criteria.payload_range
                );
                (b.output, (b.recompute)(table, criteria))
            })
            .collect();
        self.transition(Phase::Idle);
        figures
    }

    fn transition(&mut self, next: Phase) {
        log::trace!("registry {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}

/// The dashboard's two bindings: the pie follows the site dropdown, the
/// scatter follows both the dropdown and the payload slider.
pub fn dashboard_registry() -> Result<CallbackRegistry, RegistryError> {
    let mut registry = CallbackRegistry::new();
    registry
        .register(OutputId::SuccessPie, &[Signal::Site], pie_figure)?
        .register(
            OutputId::PayloadScatter,
            &[Signal::Site, Signal::PayloadRange],
            scatter_figure,
        )?;
    Ok(registry)
}
