#![forbid(unsafe_code)]

//! Core: list reconciliation, interpolated state, and layout measurement.

pub mod animation;
pub mod capability;
pub mod config;
pub mod engine;
pub mod entry;
pub mod geometry;
pub mod logging;
pub mod markup;
pub mod metadata;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};

pub use animation::{EasingFn, Factor, FactorAnimator, FactorDriver, FactorEvent};
pub use capability::{Animatable, CoordsMode, Destroyable, ListItem, Measurable};
pub use config::{AnimatorConfig, ConfigError};
pub use engine::{AnimatorPhase, ChangeSink, ListAnimator, ReconcileSummary, ResetCallback};
pub use entry::{Entry, EntryId};
pub use geometry::RectF;
pub use markup::MarkupTag;
pub use metadata::{LayoutTotals, Metadata, MetadataFields};
