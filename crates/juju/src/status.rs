// Copyright 2026 Ceph Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Model status as reported by `juju status --format json`.
//!
//! Only the slice of the payload this tool reads is modelled: per-unit
//! workload and agent status, leadership, and the unit address. Unknown
//! fields are ignored so the adapter survives orchestrator upgrades.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level status payload for one model.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelStatus {
    /// Applications deployed in the model, by name.
    #[serde(default)]
    pub applications: BTreeMap<String, ApplicationStatus>,
}

/// Status of one deployed application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationStatus {
    /// Units of the application, by full unit name (`app/N`).
    #[serde(default)]
    pub units: BTreeMap<String, UnitStatus>,
}

/// Status of one unit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitStatus {
    /// Workload status (`active`, `blocked`, `waiting`, ...).
    #[serde(rename = "workload-status", default)]
    pub workload: StatusInfo,
    /// Agent status (`idle`, `executing`, `allocating`, ...).
    #[serde(rename = "juju-status", default)]
    pub agent: StatusInfo,
    /// Whether this unit holds application leadership.
    #[serde(default)]
    pub leader: bool,
    /// Address the unit's workload is reachable on.
    #[serde(rename = "public-address", default)]
    pub public_address: Option<String>,
}

/// One status facet: current state plus operator message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusInfo {
    /// Current state string.
    #[serde(default)]
    pub current: String,
    /// Free-form message attached by the charm or agent.
    #[serde(default)]
    pub message: String,
}

impl UnitStatus {
    /// A unit is ready when its workload is active and its agent has
    /// settled.
    pub fn is_ready(&self) -> bool {
        self.workload.current == "active" && self.agent.current == "idle"
    }
}

impl ModelStatus {
    /// True when every unit of every application is ready.
    ///
    /// A model with no units yet (deploy still allocating machines)
    /// counts as not ready.
    pub fn all_units_ready(&self) -> bool {
        let mut seen = false;
        for app in self.applications.values() {
            for unit in app.units.values() {
                seen = true;
                if !unit.is_ready() {
                    return false;
                }
            }
        }
        seen
    }

    /// Units of one application, sorted by name, leader first.
    pub fn units_of(&self, app: &str) -> Vec<(&str, &UnitStatus)> {
        let mut units: Vec<(&str, &UnitStatus)> = self
            .applications
            .get(app)
            .map(|a| a.units.iter().map(|(n, u)| (n.as_str(), u)).collect())
            .unwrap_or_default();
        units.sort_by_key(|(name, unit)| (!unit.leader, *name));
        units
    }
}
