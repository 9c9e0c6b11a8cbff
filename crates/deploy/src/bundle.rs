// Copyright 2026 Ceph Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Bundle planning.
//!
//! A deployment is described to the orchestrator as a YAML bundle:
//! applications with placement directives, the machines they land on,
//! and the relations wiring them together. [`plan`] builds that bundle
//! from a [`DeploymentSpec`].

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use ceph_bench_core::BENCH_APP;

use crate::spec::DeploymentSpec;

/// A deployable bundle.
#[derive(Debug, Clone, Serialize)]
pub struct Bundle {
    /// Default series for machines in the bundle.
    pub series: String,
    /// Applications keyed by name.
    pub applications: BTreeMap<String, Application>,
    /// Machines keyed by id.
    pub machines: BTreeMap<String, Machine>,
    /// Endpoint pairs to relate.
    pub relations: Vec<[String; 2]>,
}

/// One application entry in a bundle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Application {
    /// Charm reference (`ch:` store name or a local path).
    pub charm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Unit count; omitted for subordinates.
    pub num_units: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Charm channel.
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Series override for this application.
    pub series: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    /// Charm configuration options.
    pub options: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    /// Storage directives.
    pub storage: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    /// Machine placement directives.
    pub to: Vec<String>,
}

/// One machine entry in a bundle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Machine {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Constraints for this machine.
    pub constraints: Option<String>,
}

fn app(charm: &str, num_units: u32, to: &[u32]) -> Application {
    Application {
        charm: charm.to_string(),
        num_units: Some(num_units),
        to: to.iter().map(u32::to_string).collect(),
        ..Application::default()
    }
}

/// Build the bundle for a deployment spec.
pub fn plan(spec: &DeploymentSpec) -> Bundle {
    let mut applications = BTreeMap::new();
    let mut relations = vec![
        rel("ceph-mon:osd", "ceph-osd:mon"),
        rel("woodpecker:ceph-client", "ceph-mon:client"),
    ];

    let mut ceph_mon = app("ch:ceph-mon", 3, &[0, 1, 2]);
    ceph_mon
        .options
        .insert("monitor-count".to_string(), Value::from(3));
    applications.insert("ceph-mon".to_string(), ceph_mon);

    let mut woodpecker = app(&spec.charm_path.display().to_string(), 1, &[3]);
    woodpecker.series = Some(spec.series.clone());
    applications.insert(BENCH_APP.to_string(), woodpecker);

    // Highest machine id used by a static placement.
    let mut last_static = 3;

    if spec.deploy_gateway {
        applications.insert("ceph-radosgw".to_string(), app("ch:ceph-radosgw", 1, &[4]));
        applications.insert(
            "vault-mysql-router".to_string(),
            Application {
                charm: "ch:mysql-router".to_string(),
                ..Application::default()
            },
        );
        applications.insert(
            "mysql-innodb-cluster".to_string(),
            app("ch:mysql-innodb-cluster", 3, &[5, 6, 7]),
        );
        applications.insert("vault".to_string(), app("ch:vault", 1, &[8]));
        relations.extend([
            rel("vault:shared-db", "vault-mysql-router:shared-db"),
            rel("vault-mysql-router:db-router", "mysql-innodb-cluster:db-router"),
            rel("ceph-radosgw:mon", "ceph-mon:radosgw"),
        ]);
        last_static = 8;
    }

    // OSD machines come after every static placement.
    let osd_base = last_static + 1;
    let mut ceph_osd = Application {
        charm: "ch:ceph-osd".to_string(),
        num_units: Some(spec.osd_count),
        channel: Some(spec.channel.clone()),
        to: (0..spec.osd_count)
            .map(|i| (osd_base + i).to_string())
            .collect(),
        ..Application::default()
    };
    if let Some(storage) = &spec.storage {
        ceph_osd
            .storage
            .insert("osd-devices".to_string(), storage.clone());
    }
    applications.insert("ceph-osd".to_string(), ceph_osd);

    if let Some(ppa) = &spec.ppa {
        for (name, app) in applications.iter_mut() {
            if name.contains("ceph-") {
                app.options
                    .insert("source".to_string(), Value::from(ppa.clone()));
            }
        }
    }

    let mut machines: BTreeMap<String, Machine> = (0..=last_static)
        .map(|i| (i.to_string(), Machine::default()))
        .collect();
    for i in 0..spec.osd_count {
        machines.insert(
            (osd_base + i).to_string(),
            Machine {
                constraints: spec.constraints.clone(),
            },
        );
    }

    Bundle {
        series: spec.series.clone(),
        applications,
        machines,
        relations,
    }
}

fn rel(a: &str, b: &str) -> [String; 2] {
    [a.to_string(), b.to_string()]
}
