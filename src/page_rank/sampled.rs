use super::*;
use crate::*;
use algograph::graph::{QueryableGraph, VertexId};
use rand::{prelude::*, rngs::SmallRng};
use std::{cell::RefCell, collections::HashMap};

#[derive(Debug)]
pub struct SampledPageRank<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    samples: usize,
    transitions: TransitionModel,
    rng: RefCell<SmallRng>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    pub visits: HashMap<VertexId, u64, ahash::RandomState>,
}

impl<'a, G: QueryableGraph> SampledPageRank<'a, G> {
    pub fn new(g: &'a G, config: &Config) -> crate::Result<Self> {
        if config.samples < 1 {
            return Err(Error::InvalidParameter(
                "sample count must be at least 1".to_owned(),
            ));
        }
        let transitions = TransitionModel::new(g, config.damping)?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Ok(Self {
            graph: g,
            samples: config.samples,
            transitions,
            rng: RefCell::new(rng),
        })
    }
}

impl<G: QueryableGraph> PageRank for SampledPageRank<'_, G> {
    type Result = self::Result;

    fn calc(&self) -> Self::Result {
        let mut rng = self.rng.borrow_mut();
        // fixed vertex order keeps seeded runs reproducible
        let mut pages: Vec<VertexId> = self.graph.iter_vertices().collect();
        pages.sort();
        let mut visits: HashMap<VertexId, u64, ahash::RandomState> =
            pages.iter().map(|v| (*v, 0)).collect();

        tracing::debug!(samples = self.samples, "walking the surfer chain");
        let mut current = *pages.choose(&mut *rng).unwrap();
        *visits.get_mut(&current).unwrap() += 1;
        for _ in 1..self.samples {
            let row = self.transitions.row(current).unwrap();
            let (next, _) = *row.choose_weighted(&mut *rng, |it| it.1).unwrap();
            current = next;
            *visits.get_mut(&current).unwrap() += 1;
        }

        let total = self.samples as f64;
        let page_rank = visits
            .iter()
            .map(|(v, count)| (*v, *count as f64 / total))
            .collect();
        Self::Result { page_rank, visits }
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState> {
        &self.page_rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_rank::iterated::IteratedPageRank;
    use crate::testkit::{abc_reference, corpus, RandomCorpus};
    use quickcheck_macros::quickcheck;

    #[test]
    fn reproducible_under_a_fixed_seed() {
        let g = corpus(&[("a", &["b"]), ("b", &["c"]), ("c", &["a", "b"])]);
        let config = Config {
            samples: 2_000,
            seed: Some(42),
            ..Config::default()
        };
        let first = SampledPageRank::new(&g, &config).unwrap().calc();
        let second = SampledPageRank::new(&g, &config).unwrap().calc();
        assert_eq!(first.visits, second.visits);
        assert_eq!(first.page_rank, second.page_rank);
    }

    #[test]
    fn single_page_takes_all_the_mass() {
        let g = corpus(&[("a", &[])]);
        let config = Config {
            samples: 50,
            seed: Some(1),
            ..Config::default()
        };
        let res = SampledPageRank::new(&g, &config).unwrap().calc();
        let a = g.vertex("a").unwrap();
        assert_eq!(*res.page_rank.get(&a).unwrap(), 1.0);
        assert_eq!(*res.visits.get(&a).unwrap(), 50);
    }

    #[test]
    fn approximates_the_fixed_point() {
        let g = corpus(&[("a", &["b"]), ("b", &["c"]), ("c", &["a", "b"])]);
        let config = Config {
            samples: 100_000,
            seed: Some(3407),
            ..Config::default()
        };
        let res = SampledPageRank::new(&g, &config).unwrap().calc();
        let (a, b, c) = abc_reference(0.85);
        let got_a = *res.page_rank.get(&g.vertex("a").unwrap()).unwrap();
        let got_b = *res.page_rank.get(&g.vertex("b").unwrap()).unwrap();
        let got_c = *res.page_rank.get(&g.vertex("c").unwrap()).unwrap();
        assert!((got_a - a).abs() < 0.01, "a: {got_a} vs {a}");
        assert!((got_b - b).abs() < 0.01, "b: {got_b} vs {b}");
        assert!((got_c - c).abs() < 0.01, "c: {got_c} vs {c}");
    }

    #[test]
    fn both_estimators_share_the_seam() {
        fn total_mass<P: PageRank>(estimator: &P) -> f64 {
            norm_1(estimator.calc().page_rank())
        }

        let g = corpus(&[("a", &["b"]), ("b", &["c"]), ("c", &["a", "b"])]);
        let sampled = SampledPageRank::new(
            &g,
            &Config {
                samples: 1_000,
                seed: Some(7),
                ..Config::default()
            },
        )
        .unwrap();
        let iterated = IteratedPageRank::new(&g, &Default::default()).unwrap();
        assert!((total_mass(&sampled) - 1.0).abs() < 1e-9);
        assert!((total_mass(&iterated) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_zero_samples() {
        let g = corpus(&[("a", &[])]);
        let config = Config {
            samples: 0,
            ..Config::default()
        };
        let err = SampledPageRank::new(&g, &config).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)), "{err}");
    }

    #[test]
    fn rejects_empty_graph() {
        let g = corpus(&[]);
        let err = SampledPageRank::new(&g, &Config::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyGraph), "{err}");
    }

    #[quickcheck]
    fn mass_is_conserved(c: RandomCorpus) {
        let g = c.build();
        let config = Config {
            samples: 500,
            seed: Some(11),
            ..Config::default()
        };
        let res = SampledPageRank::new(&g, &config).unwrap().calc();
        assert!((norm_1(&res.page_rank) - 1.0).abs() < 1e-9);
        assert_eq!(res.visits.values().sum::<u64>(), 500);
    }
}
