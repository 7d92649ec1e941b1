pub mod graph;
pub mod matching;
pub mod sampling;
pub mod verify;

pub use graph::{GraphLoader, GraphWriter, MatchGraph, NodeId};
pub use matching::{
    BlossomEngine, ForestState, MatcherConfig, MatchingSummary, MaximumMatching, NodeKind,
    ShrinkPolicy, maximum_matching,
};
pub use sampling::{GraphSampler, SampleConfig, disjoint_union};
pub use verify::{AugmentingPathSearch, DegreeCheck, OptimaTable, OptimumCheck};
