use crate::container::{ContainerRef, ContainerToken};
use crate::metrics::{ContainerMetric, Snapshot};

#[derive(Debug, serde::Serialize)]
pub struct ContainerIdentifier {
    pub token: ContainerToken,
    pub type_name: String,
    pub namespace: String,
}

impl From<&ContainerRef> for ContainerIdentifier {
    fn from(value: &ContainerRef) -> Self {
        Self {
            token: value.token(),
            type_name: value.type_name().to_owned(),
            namespace: value.namespace().to_owned(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ContainerEntry {
    pub reference: ContainerIdentifier,
    pub metric: ContainerMetric,
}

#[derive(Debug, serde::Serialize)]
pub struct MetricsExport {
    pub namespace: String,
    pub containers: Vec<ContainerEntry>,
}

impl From<Snapshot> for MetricsExport {
    fn from(value: Snapshot) -> Self {
        let containers = value
            .sorted()
            .into_iter()
            .map(|(reference, metric)| ContainerEntry {
                reference: reference.into(),
                metric: metric.clone(),
            })
            .collect();
        Self {
            namespace: value.namespace().to_string(),
            containers,
        }
    }
}
