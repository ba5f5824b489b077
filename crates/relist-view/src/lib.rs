#![forbid(unsafe_code)]

//! Redraw-target plumbing for relist.
//!
//! The engine reports "something moved" through a change sink; this crate
//! turns that into redraw requests for however many surfaces show the list.
//!
//! - [`SingleViewProvider`]: one replaceable target.
//! - [`MultipleViewProvider`]: a registry of targets with liveness pruning.
//! - [`PostQueue`]: requests from other threads, applied on the owner thread.

pub mod multiple;
pub mod post;
pub mod provider;
pub mod single;

pub use multiple::MultipleViewProvider;
pub use post::{PostError, PostHandle, PostQueue, PostRequest};
pub use provider::{
    ContentInvalidator, MeasuredSize, RedrawTarget, TargetId, ViewProvider, invalidate_sink,
};
pub use single::SingleViewProvider;
