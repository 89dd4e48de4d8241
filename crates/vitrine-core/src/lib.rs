#![forbid(unsafe_code)]

//! Core: overlay state machines, scroll locking, the phone input mask, and
//! responsive layout math for the Vitrine storefront.
//!
//! Nothing in this crate touches the DOM. The host (see `vitrine-web`) feeds
//! [`event::HostEvent`]s and [`app::Command`]s into an [`app::App`], renders
//! the resulting view state, and drains [`app::Effect`]s for the external
//! collaborators (smooth scroll, tweens, carousels).

pub mod accordion;
pub mod app;
pub mod carousel;
pub mod config;
pub mod event;
pub mod layout;
pub mod logging;
pub mod mask;
pub mod menu;
pub mod modal;
pub mod scroll_lock;
pub mod throttle;

// Without the feature the macros are `#[macro_export]`ed to the crate root.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};
