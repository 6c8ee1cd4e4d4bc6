use crate::*;
use algograph::graph::{QueryableGraph, VertexId};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug)]
pub struct TransitionModel {
    rows: HashMap<VertexId, Vec<(VertexId, f64)>, ahash::RandomState>,
}

impl TransitionModel {
    pub fn new<G: QueryableGraph>(g: &G, damping: f64) -> crate::Result<Self> {
        if g.vertex_size() == 0 {
            return Err(Error::EmptyGraph);
        }
        if !(0.0 < damping && damping < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "damping factor must lie in (0, 1), got {damping}"
            )));
        }
        let n = g.vertex_size() as f64;
        let jump = (1.0 - damping) / n;
        let mut rows = HashMap::with_hasher(ahash::RandomState::new());
        for u in g.iter_vertices() {
            // rows are built over sorted vertices so that seeded draws
            // walk them in a stable order
            let mut row: BTreeMap<VertexId, f64> =
                g.iter_vertices().map(|v| (v, jump)).collect();
            let outs: Vec<VertexId> = g.out_edges(&u).map(|e| e.sink).collect();
            if outs.is_empty() {
                // a sink behaves as if it linked to the whole corpus
                for w in row.values_mut() {
                    *w += damping / n;
                }
            } else {
                let unit = damping / (outs.len() as f64);
                for v in outs {
                    *row.get_mut(&v).unwrap() += unit;
                }
            }
            rows.insert(u, row.into_iter().collect::<Vec<_>>());
        }
        Ok(Self { rows })
    }

    pub fn distribution(
        &self,
        page: VertexId,
    ) -> crate::Result<HashMap<VertexId, f64, ahash::RandomState>> {
        let row = self.rows.get(&page).ok_or(Error::UnknownVertex(page))?;
        Ok(row.iter().copied().collect())
    }

    pub fn row(&self, page: VertexId) -> Option<&[(VertexId, f64)]> {
        self.rows.get(&page).map(|row| row.as_slice())
    }
}
