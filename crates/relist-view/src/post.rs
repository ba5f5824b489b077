#![forbid(unsafe_code)]

//! Marshalling redraw requests onto the thread that owns the providers.
//!
//! Providers hold `Rc` targets and are bound to one thread. Other threads
//! get a [`PostHandle`], which is `Send + Clone` and enqueues requests over
//! a channel; the owner thread calls [`PostQueue::drain_into`] from its
//! frame loop.
//!
//! # Failure Modes
//!
//! - Once the [`PostQueue`] is dropped, every post returns
//!   [`PostError::Disconnected`]. Nothing is buffered for a later queue.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::provider::ViewProvider;

/// A request posted from another thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostRequest {
    Invalidate,
    RequestLayout,
}

/// Posting failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostError {
    /// The owning [`PostQueue`] no longer exists.
    Disconnected,
}

impl fmt::Display for PostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "post queue was dropped"),
        }
    }
}

impl std::error::Error for PostError {}

/// Sending side, usable from any thread.
#[derive(Debug, Clone)]
pub struct PostHandle {
    sender: Sender<PostRequest>,
}

impl PostHandle {
    pub fn post(&self, request: PostRequest) -> Result<(), PostError> {
        self.sender
            .send(request)
            .map_err(|_| PostError::Disconnected)
    }

    pub fn post_invalidate(&self) -> Result<(), PostError> {
        self.post(PostRequest::Invalidate)
    }

    pub fn post_request_layout(&self) -> Result<(), PostError> {
        self.post(PostRequest::RequestLayout)
    }
}

/// Receiving side, owned by the provider's thread.
#[derive(Debug)]
pub struct PostQueue {
    receiver: Receiver<PostRequest>,
    sender: Sender<PostRequest>,
}

impl Default for PostQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PostQueue {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { receiver, sender }
    }

    /// A new handle posting into this queue.
    #[must_use]
    pub fn handle(&self) -> PostHandle {
        PostHandle {
            sender: self.sender.clone(),
        }
    }

    /// Apply every pending request to `provider`. Consecutive duplicates
    /// collapse into one call. Returns the number of requests consumed.
    pub fn drain_into<P: ViewProvider + ?Sized>(&self, provider: &P) -> usize {
        let mut consumed = 0;
        let mut last = None;
        loop {
            match self.receiver.try_recv() {
                Ok(request) => {
                    consumed += 1;
                    if last == Some(request) {
                        continue;
                    }
                    last = Some(request);
                    match request {
                        PostRequest::Invalidate => provider.invalidate(),
                        PostRequest::RequestLayout => provider.request_layout(),
                    }
                }
                // The queue keeps its own sender, so it never disconnects.
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        if consumed > 0 {
            #[cfg(feature = "tracing")]
            tracing::trace!(consumed, "drained posted requests");
        }
        consumed
    }
}
