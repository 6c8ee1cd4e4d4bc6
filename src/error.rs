use algograph::graph::VertexId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph has no pages")]
    EmptyGraph,
    #[error("page {page:?} links to {target:?}, which is not in the graph")]
    DanglingLink { page: String, target: String },
    #[error("vertex {0:?} is not in the graph")]
    UnknownVertex(VertexId),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
