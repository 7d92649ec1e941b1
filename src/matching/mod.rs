pub mod engine;
pub mod extract;
pub mod forest;
pub mod path;
pub mod workflow;

pub use engine::{BlossomEngine, SearchStats};
pub use extract::MatchingExtractor;
pub use forest::{BlossomBases, ForestState, NodeKind};
pub use path::{first_common, trace_path};
pub use workflow::{MatcherConfig, MatchingSummary, MaximumMatching, ShrinkPolicy, maximum_matching};
