use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{EngineError, EngineResult, ErrorContext};

/// Kind of rotating equipment tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineKind {
    Compressor,
    CoolingTower,
}

/// A machine on the plant roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub id: String,
    pub kind: MachineKind,
}

impl Machine {
    pub fn new(id: impl Into<String>, kind: MachineKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

/// Refrigeration compressors, in the order the plant lists them.
pub const PLANT_COMPRESSORS: [&str; 13] = [
    "Sabroe VMY336B (1)",
    "Sabroe VMY336B (2)",
    "Howden MK6D (5)",
    "Howden MK6D (6)",
    "Sabroe SGC 1918 (7)",
    "Sabroe SGC 1918 (9)",
    "Sabroe SGC 1918 (10)",
    "Sabroe SGC 2813 (11)",
    "Sabroe SGC 2813 (12)",
    "Howden MK6D (13)",
    "Howden MK6D (14)",
    "Howden MK6D (15)",
    "Howden MK6D (16)",
];

pub const PLANT_COOLING_TOWERS: [&str; 6] = [
    "Cooling Tower (1)",
    "Cooling Tower (2)",
    "Cooling Tower (3)",
    "Cooling Tower (4)",
    "Cooling Tower (5)",
    "Cooling Tower (6)",
];

/// Ordered, duplicate-free list of known machines.
///
/// Every engine operation validates its records against a roster; a record
/// naming a machine outside it is a caller error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineRoster {
    machines: Vec<Machine>,
}

impl MachineRoster {
    /// Build a roster, rejecting empty ids and duplicates.
    pub fn new(machines: Vec<Machine>) -> EngineResult<Self> {
        let mut seen = HashSet::new();
        for machine in &machines {
            if machine.id.trim().is_empty() {
                return Err(EngineError::invalid_input_with_context(
                    "machine id must not be empty",
                    ErrorContext::new("build_roster").with_entity("machine"),
                ));
            }
            if !seen.insert(machine.id.as_str()) {
                return Err(EngineError::invalid_input_with_context(
                    format!("machine '{}' appears twice in the roster", machine.id),
                    ErrorContext::new("build_roster")
                        .with_entity("machine")
                        .with_entity_id(&machine.id),
                ));
            }
        }
        Ok(Self { machines })
    }

    /// Roster made only of compressors.
    pub fn compressors<I, S>(ids: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            ids.into_iter()
                .map(|id| Machine::new(id, MachineKind::Compressor))
                .collect(),
        )
    }

    /// The plant's full roster: 13 compressors followed by 6 cooling towers.
    pub fn plant_default() -> Self {
        let machines = PLANT_COMPRESSORS
            .iter()
            .map(|id| Machine::new(*id, MachineKind::Compressor))
            .chain(
                PLANT_COOLING_TOWERS
                    .iter()
                    .map(|id| Machine::new(*id, MachineKind::CoolingTower)),
            )
            .collect();
        Self { machines }
    }

    /// Sub-roster of the given kind, order preserved.
    pub fn of_kind(&self, kind: MachineKind) -> Self {
        Self {
            machines: self
                .machines
                .iter()
                .filter(|m| m.kind == kind)
                .cloned()
                .collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.machines.iter().any(|m| m.id == id)
    }

    /// Fail with `InvalidInput` unless `id` is on the roster.
    pub fn ensure_known(&self, id: &str) -> EngineResult<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(EngineError::unknown_machine(id))
        }
    }

    /// Fail on the first id in `ids` that is not on the roster.
    pub fn ensure_all_known<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> EngineResult<()> {
        let known: HashSet<&str> = self.machines.iter().map(|m| m.id.as_str()).collect();
        for id in ids {
            if !known.contains(id) {
                return Err(EngineError::unknown_machine(id));
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Machine> {
        self.machines.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.machines.iter().map(|m| m.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

impl Default for MachineRoster {
    fn default() -> Self {
        Self::plant_default()
    }
}
