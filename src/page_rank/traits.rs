use algograph::graph::VertexId;
use std::collections::HashMap;

pub trait PageRank {
    type Result: PageRankResult;

    fn calc(&self) -> Self::Result;
}

pub trait PageRankResult {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState>;
}
