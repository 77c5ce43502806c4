pub mod boundary;
pub mod config;
pub mod micro;
pub mod open_loop;
pub mod sliding_window;

pub use boundary::{snap_candidate, snap_to_sentence_end, snap_to_sentence_start};
pub use config::SegmentationConfig;
pub use micro::micro_segment;
pub use open_loop::{
    check_curiosity_gap, close_open_loops, has_bad_opening, has_open_loop, snap_end_boundary,
    snap_start_boundary, CuriosityGap,
};
pub use sliding_window::{boundary_quality, build_sliding_windows, deduplicate_windows};
