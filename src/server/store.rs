// src/server/store.rs
use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::chart::ChartArtifact;

/// Recent charts keyed by request id. Oldest entry is evicted once full.
pub struct ChartStore {
    capacity: usize,
    charts: Mutex<VecDeque<(Uuid, Arc<ChartArtifact>)>>,
}

impl ChartStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { capacity, charts: Mutex::new(VecDeque::with_capacity(capacity)) }
    }

    /// Store `chart` under a fresh id.
    pub fn insert(&self, chart: ChartArtifact) -> Uuid {
        let id = Uuid::new_v4();
        let mut charts = self.charts.lock();
        if charts.len() == self.capacity {
            if let Some((old, _)) = charts.pop_front() {
                logd!("Charts: evicted {}", old);
            }
        }
        charts.push_back((id, Arc::new(chart)));
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<ChartArtifact>> {
        self.charts
            .lock()
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, c)| Arc::clone(c))
    }

    /// Most recently stored chart.
    pub fn latest(&self) -> Option<Arc<ChartArtifact>> {
        self.charts.lock().back().map(|(_, c)| Arc::clone(c))
    }

    pub fn len(&self) -> usize {
        self.charts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::PlotKind;

    fn chart(tag: u8) -> ChartArtifact {
        ChartArtifact { kind: PlotKind::Bar, width: 1, height: 1, png: vec![tag] }
    }

    #[test]
    fn oldest_is_evicted_at_capacity() {
        let store = ChartStore::new(2);
        let a = store.insert(chart(1));
        let b = store.insert(chart(2));
        let c = store.insert(chart(3));
        assert_eq!(store.len(), 2);
        assert!(store.get(&a).is_none());
        assert_eq!(store.get(&b).unwrap().png, vec![2]);
        assert_eq!(store.get(&c).unwrap().png, vec![3]);
        assert_eq!(store.latest().unwrap().png, vec![3]);
    }

    #[test]
    fn empty_store_has_no_latest() {
        let store = ChartStore::new(0);
        assert!(store.is_empty());
        assert!(store.latest().is_none());
        // zero capacity still keeps the newest chart
        let id = store.insert(chart(9));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().png, vec![9]);
    }
}
