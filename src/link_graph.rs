use crate::error::{Error, Result};
use algograph::graph::*;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt,
};

pub struct LinkGraph {
    graph: directed::TreeBackedGraph,
    vertices: BTreeMap<String, VertexId>,
    pages: HashMap<VertexId, String, ahash::RandomState>,
}

impl LinkGraph {
    pub fn from_links(links: &BTreeMap<String, BTreeSet<String>>) -> Result<Self> {
        let mut graph = directed::TreeBackedGraph::new();
        let mut vertices = BTreeMap::new();
        let mut pages = HashMap::with_hasher(ahash::RandomState::new());
        for page in links.keys() {
            let v = graph.add_vertex();
            vertices.insert(page.clone(), v);
            pages.insert(v, page.clone());
        }
        for (page, targets) in links.iter() {
            let u = *vertices.get(page).unwrap();
            for target in targets.iter() {
                if target == page {
                    // self-links carry no rank and are dropped up front
                    continue;
                }
                let Some(v) = vertices.get(target) else {
                    return Err(Error::DanglingLink {
                        page: page.clone(),
                        target: target.clone(),
                    });
                };
                graph.add_edge(u, *v);
            }
        }
        tracing::debug!(
            pages = vertices.len(),
            links = graph.edge_size(),
            "built link graph"
        );
        Ok(Self {
            graph,
            vertices,
            pages,
        })
    }

    pub fn vertex(&self, page: &str) -> Option<VertexId> {
        self.vertices.get(page).copied()
    }

    pub fn page(&self, v: VertexId) -> Option<&str> {
        self.pages.get(&v).map(|p| p.as_str())
    }

    pub fn ranking(&self, ranks: &HashMap<VertexId, f64, ahash::RandomState>) -> Vec<(&str, f64)> {
        self.vertices
            .iter()
            .map(|(page, v)| (page.as_str(), *ranks.get(v).unwrap()))
            .collect()
    }

    pub fn display<'a>(
        &'a self,
        ranks: &'a HashMap<VertexId, f64, ahash::RandomState>,
    ) -> impl fmt::Display + 'a {
        RankingDisplay { graph: self, ranks }
    }
}

impl fmt::Debug for LinkGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkGraph")
            .field("vertices", &self.vertices)
            .field("pages", &self.pages)
            .finish()
    }
}

struct RankingDisplay<'a> {
    graph: &'a LinkGraph,
    ranks: &'a HashMap<VertexId, f64, ahash::RandomState>,
}

impl fmt::Display for RankingDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (page, w) in self.graph.ranking(self.ranks) {
            writeln!(f, "  {page}: {w:.4}")?;
        }
        Ok(())
    }
}

impl QueryableGraph for LinkGraph {
    fn vertex_size(&self) -> usize {
        self.graph.vertex_size()
    }

    fn iter_vertices(&self) -> Box<dyn Iterator<Item = VertexId> + '_> {
        self.graph.iter_vertices()
    }

    fn contains_vertex(&self, v: &VertexId) -> bool {
        self.graph.contains_vertex(v)
    }

    fn edge_size(&self) -> usize {
        self.graph.edge_size()
    }

    fn iter_edges(&self) -> Box<dyn Iterator<Item = Edge> + '_> {
        self.graph.iter_edges()
    }

    fn contains_edge(&self, e: &EdgeId) -> bool {
        self.graph.contains_edge(e)
    }

    fn find_edge(&self, e: &EdgeId) -> Option<Edge> {
        self.graph.find_edge(e)
    }

    fn edges_connecting(
        &self,
        source: &VertexId,
        sink: &VertexId,
    ) -> Box<dyn Iterator<Item = Edge> + '_> {
        self.graph.edges_connecting(source, sink)
    }

    fn in_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = Edge> + '_> {
        self.graph.in_edges(v)
    }

    fn out_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = Edge> + '_> {
        self.graph.out_edges(v)
    }
}
