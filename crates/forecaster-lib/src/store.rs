//! Storage boundary for stations and demand history
//!
//! The forecasting core only ever sees this trait; the backing store is an
//! external collaborator. `MemoryStore` is the in-process implementation
//! used by the server binary and by tests.

use crate::models::{DemandRecord, Station};
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Queryable ordered collection of stations and demand records
#[async_trait]
pub trait DemandStore: Send + Sync {
    /// All demand records, ordered by descending timestamp
    async fn fetch_all_demand_records(&self) -> Result<Vec<DemandRecord>>;

    /// Look up a station by id
    async fn fetch_station(&self, id: &str) -> Result<Option<Station>>;
}

/// In-memory store backed by RwLock-guarded vectors
#[derive(Debug, Default)]
pub struct MemoryStore {
    stations: RwLock<Vec<Station>>,
    records: RwLock<Vec<DemandRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_station(&self, station: Station) {
        self.stations.write().await.push(station);
    }

    pub async fn add_records(&self, records: Vec<DemandRecord>) {
        self.records.write().await.extend(records);
    }

    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl DemandStore for MemoryStore {
    async fn fetch_all_demand_records(&self) -> Result<Vec<DemandRecord>> {
        let mut records = self.records.read().await.clone();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }

    async fn fetch_station(&self, id: &str) -> Result<Option<Station>> {
        let stations = self.stations.read().await;
        Ok(stations.iter().find(|s| s.id == id).cloned())
    }
}
