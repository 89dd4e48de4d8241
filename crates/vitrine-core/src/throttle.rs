#![forbid(unsafe_code)]

//! Animation-frame coalescing for resize and scroll.
//!
//! Browsers fire `resize` and `scroll` far more often than the page can
//! usefully re-layout. [`FrameThrottle`] holds at most one pending value of
//! each kind ("latest wins") and tells the caller when a frame callback
//! needs to be requested. The host then calls [`FrameThrottle::flush`] from
//! that callback.
//!
//! # Usage
//!
//! ```
//! use vitrine_core::event::Viewport;
//! use vitrine_core::throttle::FrameThrottle;
//!
//! let mut throttle = FrameThrottle::new();
//!
//! // First event asks for a frame, the rest ride along.
//! assert!(throttle.push_resize(Viewport::new(800.0, 600.0)));
//! assert!(!throttle.push_resize(Viewport::new(820.0, 600.0)));
//! assert!(!throttle.push_scroll(40.0));
//!
//! let batch = throttle.flush();
//! assert_eq!(batch.resize, Some(Viewport::new(820.0, 600.0)));
//! assert_eq!(batch.scroll, Some(40.0));
//! assert!(throttle.flush().is_empty());
//! ```

use crate::event::Viewport;

/// Events collected during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameBatch {
    /// Latest viewport seen since the previous flush.
    pub resize: Option<Viewport>,
    /// Latest scroll offset seen since the previous flush.
    pub scroll: Option<f64>,
}

impl FrameBatch {
    /// Whether nothing was pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resize.is_none() && self.scroll.is_none()
    }
}

/// Coalesces resize/scroll into one handling per animation frame.
///
/// Not thread-safe; lives on the single UI thread.
#[derive(Debug, Clone, Default)]
pub struct FrameThrottle {
    pending_resize: Option<Viewport>,
    pending_scroll: Option<f64>,
    frame_requested: bool,
}

impl FrameThrottle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resize. Returns `true` when the caller must request a frame.
    pub fn push_resize(&mut self, viewport: Viewport) -> bool {
        self.pending_resize = Some(viewport);
        self.request_frame()
    }

    /// Record a scroll offset. Returns `true` when the caller must request a frame.
    pub fn push_scroll(&mut self, y: f64) -> bool {
        self.pending_scroll = Some(y);
        self.request_frame()
    }

    fn request_frame(&mut self) -> bool {
        if self.frame_requested {
            return false;
        }
        self.frame_requested = true;
        true
    }

    /// Take everything pending and re-arm the frame request.
    #[must_use]
    pub fn flush(&mut self) -> FrameBatch {
        self.frame_requested = false;
        FrameBatch {
            resize: self.pending_resize.take(),
            scroll: self.pending_scroll.take(),
        }
    }

    /// Whether a frame callback is outstanding.
    #[must_use]
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Whether anything is waiting for the next frame.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_resize.is_some() || self.pending_scroll.is_some()
    }
}
