pub mod cluster;
pub mod config;
pub mod overlap;
pub mod selector;

pub use cluster::merge_clusters;
pub use config::{ClusterConfig, OverlapConfig, SelectionConfig};
pub use overlap::remove_overlapping_clips;
pub use selector::{percentile_value, select_clips};
