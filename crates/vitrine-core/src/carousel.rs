#![forbid(unsafe_code)]

//! Carousel presets for the storefront pages.
//!
//! Options serialize with the carousel library's own (camelCase) option
//! names so the host can hand the JSON straight to its constructor. Pixel
//! spacing is given in design pixels and scaled by the current
//! [`Multiplier`] when the presets are built, which is why the multiplier
//! must be up to date before [`storefront_carousels`] is called.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::layout::Multiplier;

/// Pagination bullets container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pagination {
    pub el: String,
}

/// Previous/next buttons.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub next_el: String,
    pub prev_el: String,
}

/// Overrides applied from a minimum viewport width upwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slides_per_view: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_between: Option<f64>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Constructor options for one carousel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slides_per_view: Option<f64>,
    pub space_between: f64,
    #[serde(rename = "loop", skip_serializing_if = "is_false")]
    pub looped: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub free_mode: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub watch_slides_progress: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Navigation>,
    /// Keyed by minimum viewport width.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub breakpoints: BTreeMap<u32, Breakpoint>,
}

impl CarouselOptions {
    /// JSON handed to the carousel constructor.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A named carousel bound to a selector.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSpec {
    pub name: &'static str,
    pub selector: &'static str,
    pub options: CarouselOptions,
    /// Name of an earlier carousel acting as this one's thumbnail strip.
    pub thumbs: Option<&'static str>,
}

fn nav(next: &str, prev: &str) -> Option<Navigation> {
    Some(Navigation {
        next_el: next.into(),
        prev_el: prev.into(),
    })
}

fn bp(slides: Option<f64>, space: Option<f64>) -> Breakpoint {
    Breakpoint {
        slides_per_view: slides,
        space_between: space,
    }
}

/// Every carousel on the storefront, spacing scaled by `m`.
///
/// Thumbnail strips come before the carousel that links to them.
#[must_use]
pub fn storefront_carousels(m: Multiplier) -> Vec<CarouselSpec> {
    let s = |px: f64| m.scale(px);
    vec![
        CarouselSpec {
            name: "hero",
            selector: ".heroSwiper",
            options: CarouselOptions {
                space_between: s(16.0),
                pagination: Some(Pagination {
                    el: ".hero-pagination".into(),
                }),
                ..CarouselOptions::default()
            },
            thumbs: None,
        },
        CarouselSpec {
            name: "catalog",
            selector: ".catalogSwiper",
            options: CarouselOptions {
                slides_per_view: Some(1.05),
                space_between: s(16.0),
                breakpoints: BTreeMap::from([
                    (768, bp(Some(1.5), Some(s(20.0)))),
                    (1025, bp(Some(3.0), Some(s(20.0)))),
                ]),
                ..CarouselOptions::default()
            },
            thumbs: None,
        },
        CarouselSpec {
            name: "products",
            selector: ".productsSwiper",
            options: CarouselOptions {
                slides_per_view: Some(1.05),
                space_between: s(16.0),
                navigation: nav(".products-next", ".products-prev"),
                breakpoints: BTreeMap::from([
                    (768, bp(Some(1.8), Some(s(20.0)))),
                    (1025, bp(Some(4.0), Some(s(20.0)))),
                ]),
                ..CarouselOptions::default()
            },
            thumbs: None,
        },
        CarouselSpec {
            name: "review",
            selector: ".reviewSwiper",
            options: CarouselOptions {
                slides_per_view: Some(1.05),
                space_between: s(16.0),
                looped: true,
                navigation: nav(".review-next", ".review-prev"),
                breakpoints: BTreeMap::from([(768, bp(Some(2.2), Some(s(20.0))))]),
                ..CarouselOptions::default()
            },
            thumbs: None,
        },
        CarouselSpec {
            name: "product-thumbs",
            selector: ".productSwiper",
            options: CarouselOptions {
                slides_per_view: Some(4.0),
                space_between: s(8.0),
                free_mode: true,
                watch_slides_progress: true,
                breakpoints: BTreeMap::from([(768, bp(None, Some(s(20.0))))]),
                ..CarouselOptions::default()
            },
            thumbs: None,
        },
        CarouselSpec {
            name: "product-main",
            selector: ".productSwiper2",
            options: CarouselOptions {
                space_between: s(8.0),
                navigation: nav(".product-next", ".product-prev"),
                breakpoints: BTreeMap::from([(768, bp(None, Some(s(20.0))))]),
                ..CarouselOptions::default()
            },
            thumbs: Some("product-thumbs"),
        },
    ]
}
