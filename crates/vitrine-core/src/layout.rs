#![forbid(unsafe_code)]

//! Responsive layout math: the spacing multiplier, the header offset applied
//! to top sections, and the header "scrolled" flag.

use crate::event::Viewport;

/// Widest viewport treated as a phone.
pub const PHONE_MAX_WIDTH: f64 = 767.0;
/// Widest viewport treated as a tablet.
pub const TABLET_MAX_WIDTH: f64 = 1024.0;

const PHONE_DESIGN_WIDTH: f64 = 375.0;
const TABLET_DESIGN_WIDTH: f64 = 768.0;
const DESKTOP_DESIGN_WIDTH: f64 = 1920.0;

/// Scale factor from design pixels to viewport pixels. Always `> 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multiplier(f64);

impl Default for Multiplier {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Multiplier {
    /// Derive the multiplier for a viewport.
    ///
    /// Phones and tablets scale by the shorter side so landscape devices do
    /// not blow up; desktops scale by width alone. Degenerate viewports
    /// (zero, negative, NaN) fall back to `1.0`.
    #[must_use]
    pub fn for_viewport(viewport: Viewport) -> Self {
        let Viewport { width, height } = viewport;
        let raw = if width <= PHONE_MAX_WIDTH {
            width.min(height) / PHONE_DESIGN_WIDTH
        } else if width <= TABLET_MAX_WIDTH {
            width.min(height) / TABLET_DESIGN_WIDTH
        } else {
            width / DESKTOP_DESIGN_WIDTH
        };
        if raw.is_finite() && raw > 0.0 {
            Self(raw)
        } else {
            Self::default()
        }
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Scale a design-pixel value.
    #[must_use]
    pub fn scale(self, px: f64) -> f64 {
        px * self.0
    }
}

/// Margin to apply to every top section so the fixed header never covers it.
///
/// `None` when there is no header or no section to offset.
#[must_use]
pub fn section_offset(header_height: Option<f64>, section_count: usize) -> Option<f64> {
    if section_count == 0 {
        return None;
    }
    header_height.filter(|h| h.is_finite() && *h >= 0.0)
}

/// Whether the page has scrolled far enough to restyle the header.
#[must_use]
pub fn header_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn phone_uses_shorter_side() {
        let m = Multiplier::for_viewport(Viewport::new(375.0, 812.0));
        assert!(approx(m.get(), 1.0));
        let landscape = Multiplier::for_viewport(Viewport::new(740.0, 360.0));
        assert!(approx(landscape.get(), 360.0 / 375.0));
    }

    #[test]
    fn tablet_band() {
        let m = Multiplier::for_viewport(Viewport::new(1024.0, 768.0));
        assert!(approx(m.get(), 1.0));
        let m = Multiplier::for_viewport(Viewport::new(768.0, 1024.0));
        assert!(approx(m.get(), 1.0));
    }

    #[test]
    fn desktop_uses_width() {
        let m = Multiplier::for_viewport(Viewport::new(1920.0, 400.0));
        assert!(approx(m.get(), 1.0));
        let m = Multiplier::for_viewport(Viewport::new(1440.0, 900.0));
        assert!(approx(m.get(), 0.75));
        assert!(approx(m.scale(20.0), 15.0));
    }

    #[test]
    fn degenerate_viewport_falls_back() {
        assert_eq!(Multiplier::for_viewport(Viewport::new(0.0, 0.0)).get(), 1.0);
        assert_eq!(
            Multiplier::for_viewport(Viewport::new(f64::NAN, 100.0)).get(),
            1.0
        );
        assert_eq!(
            Multiplier::for_viewport(Viewport::new(300.0, -5.0)).get(),
            1.0
        );
    }

    #[test]
    fn section_offset_needs_header_and_sections() {
        assert_eq!(section_offset(Some(88.0), 2), Some(88.0));
        assert_eq!(section_offset(None, 2), None);
        assert_eq!(section_offset(Some(88.0), 0), None);
        assert_eq!(section_offset(Some(f64::NAN), 1), None);
    }

    #[test]
    fn scrolled_is_strictly_past_threshold() {
        assert!(!header_scrolled(50.0, 50.0));
        assert!(header_scrolled(50.5, 50.0));
    }
}
