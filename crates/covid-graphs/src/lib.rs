//! # Covid Graphs
//!
//! Threshold alignment and chart rendering for COVID-19 time series.
//!
//! Tables are read through a [`TableSource`], aligned per quantity by a
//! [`SeriesAligner`], drawn by a [`GraphRenderer`] into an in-memory
//! [`ChartArtifact`] and handed to an [`ImageSink`].

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aligner;
pub mod animation;
pub mod drawing;
pub mod pairwise;
pub mod reference;
pub mod renderer;
pub mod sink;
pub mod style;
pub mod table;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use aligner::{align_row, SeriesAligner};
pub use animation::{frame_id, AnimationDriver, Frames};
pub use pairwise::PairwiseRenderer;
pub use reference::{reference_curve, ReferenceCurve};
pub use renderer::{ChartRenderer, GraphRenderer};
pub use sink::{ChartArtifact, DirectorySink, ImageSink, MemorySink};
pub use style::{
    fading_segments, parse_hex_color, segment_alpha, ColorCycle, FadeStyle, RenderContext, Segment,
    ACCENT, CATEGORY_PALETTE,
};
pub use table::{CsvTableSource, RawRow, RawTable, RegionTable, TableSource};
pub use types::{format_count, AlignedSeries, ChartSpec};
