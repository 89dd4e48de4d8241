#![forbid(unsafe_code)]

//! WASM frontend for Vitrine.
//!
//! `boot()` is the only JS-facing entry point. It reads the page, builds a
//! [`vitrine_core::app::App`], wires DOM listeners to it, and bridges the
//! third-party libraries the page loads as globals:
//! - `Lenis` for smooth scrolling (stopped while the page is scroll-locked),
//! - `gsap` for the modal slide tweens,
//! - `Swiper` for carousels,
//! - `Tabby` for tab groups.
//!
//! Every library is optional; a missing one (or missing markup) turns the
//! matching feature into a no-op.

pub mod view;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::boot;

/// Native builds compile this crate as a stub so `cargo check --workspace`
/// stays green on non-wasm targets. The stub only validates boot options.
#[cfg(not(target_arch = "wasm32"))]
pub fn boot(options: Option<&str>) -> Result<(), vitrine_core::config::ConfigError> {
    if let Some(json) = options {
        vitrine_core::config::SiteConfig::from_json(json)?;
    }
    Ok(())
}
