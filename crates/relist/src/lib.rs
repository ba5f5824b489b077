#![forbid(unsafe_code)]

//! relist public facade crate.
//!
//! Re-exports the engine from `relist-core` and the redraw plumbing from
//! `relist-view`, and offers a prelude for day-to-day usage.
//!
//! ```
//! use std::time::Duration;
//! use relist::prelude::*;
//!
//! let config = AnimatorConfig::animated(Duration::from_millis(120));
//! let mut list: ListAnimator<u32> = ListAnimator::from_config(|| {}, &config);
//! list.reconcile(vec![1, 2, 3], true);
//! list.tick(Duration::from_millis(120));
//! assert_eq!(list.settled_len(), 3);
//! ```

use std::fmt;

// --- Engine re-exports -----------------------------------------------------

pub use relist_core::{
    Animatable, AnimatorConfig, AnimatorPhase, ChangeSink, ConfigError, CoordsMode, Destroyable,
    EasingFn, Entry, EntryId, Factor, FactorAnimator, FactorDriver, FactorEvent, LayoutTotals,
    ListAnimator, ListItem, MarkupTag, Measurable, Metadata, MetadataFields, RectF,
    ReconcileSummary, ResetCallback,
};

// --- View re-exports -------------------------------------------------------

pub use relist_view::{
    ContentInvalidator, MeasuredSize, MultipleViewProvider, PostError, PostHandle, PostQueue,
    PostRequest, RedrawTarget, SingleViewProvider, TargetId, ViewProvider, invalidate_sink,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for relist hosts.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Animation settings from the environment were rejected.
    Config(ConfigError),
    /// A redraw request could not be posted to the owner thread.
    Post(PostError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Post(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Post(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<PostError> for Error {
    fn from(err: PostError) -> Self {
        Self::Post(err)
    }
}

/// Standard result type for relist APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnimatorConfig, Error, ListAnimator, ListItem, Measurable, MultipleViewProvider, Result,
        SingleViewProvider, ViewProvider, invalidate_sink,
    };

    pub use crate::{core, view};
}

pub use relist_core as core;
pub use relist_view as view;
