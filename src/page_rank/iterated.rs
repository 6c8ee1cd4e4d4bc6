use super::*;
use crate::*;
use algograph::graph::{QueryableGraph, VertexId};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug)]
pub struct IteratedPageRank<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    damping: f64,
    epsilon: f64,
    max_rounds: usize,
    transitions: BTreeMap<(VertexId, VertexId), f64>,
    sinks: Vec<VertexId>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub epsilon: f64,
    pub max_rounds: usize,
}

impl Default for Config {
    fn default() -> Self {
        /*
        The damped chain is irreducible and aperiodic for damping < 1, so
        the iteration always stabilizes eventually. The round cap only
        guards against configs (epsilon near zero) that would turn calc
        into a spin loop; 10_000 is far beyond what any corpus this crate
        targets needs.
        */
        Self {
            damping: 0.85,
            epsilon: 1e-3,
            max_rounds: 10_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    Converged,
    MaxRoundsReached,
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    pub delta: HashMap<VertexId, f64, ahash::RandomState>,
    pub rounds: usize,
    pub convergence: Convergence,
}

impl Result {
    pub fn converged(&self) -> bool {
        self.convergence == Convergence::Converged
    }
}

impl<'a, G: QueryableGraph> IteratedPageRank<'a, G> {
    pub fn new(g: &'a G, config: &Config) -> crate::Result<Self> {
        if g.vertex_size() == 0 {
            return Err(Error::EmptyGraph);
        }
        let damping = config.damping;
        if !(0.0 < damping && damping < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "damping factor must lie in (0, 1), got {damping}"
            )));
        }
        let epsilon = config.epsilon;
        if epsilon <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "convergence threshold must be positive, got {epsilon}"
            )));
        }
        if config.max_rounds == 0 {
            return Err(Error::InvalidParameter(
                "round limit must be at least 1".to_owned(),
            ));
        }
        let mut transitions = BTreeMap::new();
        let mut sinks = Vec::new();
        for u in g.iter_vertices() {
            let out_degree = g.out_edges(&u).count();
            if out_degree == 0 {
                sinks.push(u);
                continue;
            }
            let unit = damping / (out_degree as f64);
            for v in g.out_edges(&u).map(|e| e.sink) {
                if let Some(w) = transitions.get_mut(&(u, v)) {
                    *w += unit;
                } else {
                    transitions.insert((u, v), unit);
                }
            }
        }
        Ok(Self {
            graph: g,
            damping,
            epsilon,
            max_rounds: config.max_rounds,
            transitions,
            sinks,
        })
    }
}

impl<G: QueryableGraph> PageRank for IteratedPageRank<'_, G> {
    type Result = self::Result;

    fn calc(&self) -> Self::Result {
        let n = self.graph.vertex_size() as f64;
        let jump = (1.0 - self.damping) / n;
        let mut p = {
            let mut p = HashMap::with_hasher(ahash::RandomState::new());
            for v in self.graph.iter_vertices() {
                p.insert(v, 1.0 / n);
            }
            p
        };
        let mut r = HashMap::with_hasher(ahash::RandomState::new());
        let mut delta = HashMap::with_hasher(ahash::RandomState::new());
        for round in 1..=self.max_rounds {
            // random-jump share plus the mass sinks spread over everyone
            let sink_mass: f64 = self.sinks.iter().map(|v| *p.get(v).unwrap()).sum();
            let floor = jump + self.damping * sink_mass / n;
            for v in self.graph.iter_vertices() {
                r.insert(v, floor);
            }
            for ((v0, v1), w) in self.transitions.iter() {
                let from = p.get(v0).unwrap();
                let to = r.get_mut(v1).unwrap();
                *to += from * w;
            }

            delta.clear();
            for v in self.graph.iter_vertices() {
                let a = p.get(&v).unwrap();
                let b = r.get(&v).unwrap();
                delta.insert(v, a - b);
            }

            let max_delta = norm_inf(&delta);
            if max_delta < self.epsilon {
                tracing::debug!(round, "page rank stabilized");
                return Self::Result {
                    page_rank: r,
                    delta,
                    rounds: round,
                    convergence: Convergence::Converged,
                };
            }
            tracing::trace!(round, max_delta, "page rank round");

            std::mem::swap(&mut p, &mut r);
            r.clear();
        }
        tracing::warn!(
            rounds = self.max_rounds,
            epsilon = self.epsilon,
            "round limit reached before stabilizing"
        );
        Self::Result {
            page_rank: p,
            delta,
            rounds: self.max_rounds,
            convergence: Convergence::MaxRoundsReached,
        }
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState> {
        &self.page_rank
    }
}
