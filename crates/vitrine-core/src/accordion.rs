#![forbid(unsafe_code)]

//! Single-open accordion.

/// Tracks which accordion panel (if any) is expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccordionController {
    panels: usize,
    active: Option<usize>,
}

impl AccordionController {
    /// An accordion of `panels` items, all collapsed.
    #[must_use]
    pub fn new(panels: usize) -> Self {
        Self {
            panels,
            active: None,
        }
    }

    /// Start with `index` expanded (markup rendered it active).
    #[must_use]
    pub fn with_active(mut self, index: Option<usize>) -> Self {
        self.active = index.filter(|&i| i < self.panels);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panels
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels == 0
    }

    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Handle a click on panel `index`: collapse every other panel and flip
    /// this one. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.panels {
            return;
        }
        self.active = if self.active == Some(index) {
            None
        } else {
            Some(index)
        };
        crate::debug!(index = index, active = ?self.active, "accordion toggled");
    }

    /// Max-height for panel `index`'s body given its measured content height.
    ///
    /// `None` means "clear the inline value" and lets the stylesheet collapse it.
    #[must_use]
    pub fn body_height(&self, index: usize, content_height: f64) -> Option<f64> {
        self.is_active(index).then_some(content_height)
    }
}
