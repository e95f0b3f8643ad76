//! One-shot loading strategy for the product image.
//!
//! When a card is created it watches its own position relative to the
//! viewport. The first observation decides the image's `loading` attribute:
//! `eager` if the card is already (nearly) on screen, `lazy` otherwise. The
//! observer then disconnects and never fires again.

use std::sync::atomic::{AtomicBool, Ordering};

/// Value of the image's `loading` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLoading {
    Eager,
    Lazy,
}

impl ImageLoading {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ImageLoading::Eager => "eager",
            ImageLoading::Lazy => "lazy",
        }
    }
}

impl std::fmt::Display for ImageLoading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visibility observer parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Pixels added above and below the viewport.
    pub root_margin_vertical: f64,
    /// Pixels added left and right of the viewport.
    pub root_margin_horizontal: f64,
    /// Visible fraction of the card (0.0–1.0) at which later observations fire.
    pub threshold: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin_vertical: 50.0,
            root_margin_horizontal: 0.0,
            threshold: 0.2,
        }
    }
}

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    fn expand(&self, vertical: f64, horizontal: f64) -> Self {
        Self {
            x: self.x - horizontal,
            y: self.y - vertical,
            width: self.width + 2.0 * horizontal,
            height: self.height + 2.0 * vertical,
        }
    }

    fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    /// Overlap rectangle as `(left, top, right, bottom)`; empty when
    /// `right < left` or `bottom < top`.
    fn overlap(&self, other: &Rect) -> (f64, f64, f64, f64) {
        (
            self.x.max(other.x),
            self.y.max(other.y),
            (self.x + self.width).min(other.x + other.width),
            (self.y + self.height).min(other.y + other.height),
        )
    }

    fn intersection_area(&self, other: &Rect) -> f64 {
        let (left, top, right, bottom) = self.overlap(other);
        (right - left).max(0.0) * (bottom - top).max(0.0)
    }

    /// Whether the rectangles overlap, touching edges included.
    fn touches(&self, other: &Rect) -> bool {
        let (left, top, right, bottom) = self.overlap(other);
        right >= left && bottom >= top
    }
}

/// One visibility observation of the card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    /// Visible fraction of the card inside the margin-expanded viewport.
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    /// Computes the entry for `target` against `viewport`.
    ///
    /// The card is intersecting whenever it overlaps the margin-expanded
    /// viewport at all, edge contact included; the threshold only decides
    /// when later observations would be delivered, and the first one always
    /// is. A zero-area target counts as fully visible when its origin lies
    /// inside the expanded viewport.
    #[must_use]
    pub fn compute(target: Rect, viewport: Rect, options: &ObserverOptions) -> Self {
        let root = viewport.expand(options.root_margin_vertical, options.root_margin_horizontal);
        let target_area = target.area();

        let intersection_ratio = if target_area > 0.0 {
            (target.intersection_area(&root) / target_area).clamp(0.0, 1.0)
        } else if root.contains_point(target.x, target.y) {
            1.0
        } else {
            0.0
        };

        let is_intersecting = if target_area > 0.0 {
            target.touches(&root)
        } else {
            root.contains_point(target.x, target.y)
        };

        Self {
            intersection_ratio,
            is_intersecting,
        }
    }
}

/// One-shot observer choosing the image loading strategy.
#[derive(Debug)]
pub struct LazyImageLoader {
    options: ObserverOptions,
    connected: AtomicBool,
}

impl LazyImageLoader {
    #[must_use]
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            connected: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Handles an observation. Returns the strategy for the first entry only;
    /// every later call returns `None`.
    pub fn observe(&self, entry: &IntersectionEntry) -> Option<ImageLoading> {
        if !self.connected.swap(false, Ordering::AcqRel) {
            return None;
        }

        Some(if entry.is_intersecting {
            ImageLoading::Eager
        } else {
            ImageLoading::Lazy
        })
    }

    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 1280.0,
        height: 800.0,
    };

    fn entry(target: Rect) -> IntersectionEntry {
        IntersectionEntry::compute(target, VIEWPORT, &ObserverOptions::default())
    }

    #[test]
    fn card_fully_on_screen_intersects() {
        let e = entry(Rect::new(100.0, 100.0, 300.0, 400.0));
        assert!((e.intersection_ratio - 1.0).abs() < f64::EPSILON);
        assert!(e.is_intersecting);
    }

    #[test]
    fn card_inside_root_margin_counts() {
        // Top edge 30px below the fold: 20px of a 100px card fall in the 50px margin.
        let e = entry(Rect::new(0.0, 830.0, 200.0, 100.0));
        assert!((e.intersection_ratio - 0.2).abs() < 1e-9);
        assert!(e.is_intersecting);
    }

    #[test]
    fn card_below_threshold_still_intersects() {
        // 10px of a 100px card inside the margin: under 0.2, still on screen.
        let e = entry(Rect::new(0.0, 840.0, 200.0, 100.0));
        assert!((e.intersection_ratio - 0.1).abs() < 1e-9);
        assert!(e.is_intersecting);
    }

    #[test]
    fn card_touching_margin_edge_intersects() {
        let e = entry(Rect::new(0.0, 850.0, 200.0, 100.0));
        assert!(e.intersection_ratio.abs() < f64::EPSILON);
        assert!(e.is_intersecting);
    }

    #[test]
    fn card_just_past_margin_does_not_intersect() {
        let e = entry(Rect::new(0.0, 851.0, 200.0, 100.0));
        assert!(!e.is_intersecting);
    }

    #[test]
    fn card_partly_in_margin_loads_eagerly() {
        let loader = LazyImageLoader::new(ObserverOptions::default());
        let e = entry(Rect::new(0.0, 840.0, 200.0, 100.0));
        assert_eq!(loader.observe(&e), Some(ImageLoading::Eager));
    }

    #[test]
    fn card_far_below_the_fold() {
        let e = entry(Rect::new(0.0, 3000.0, 200.0, 100.0));
        assert!(e.intersection_ratio.abs() < f64::EPSILON);
        assert!(!e.is_intersecting);
    }

    #[test]
    fn horizontal_margin_is_zero() {
        let e = entry(Rect::new(1300.0, 100.0, 200.0, 100.0));
        assert!(!e.is_intersecting);
    }

    #[test]
    fn zero_area_card_uses_its_origin() {
        assert!(entry(Rect::new(10.0, 10.0, 0.0, 0.0)).is_intersecting);
        assert!(!entry(Rect::new(10.0, 2000.0, 0.0, 0.0)).is_intersecting);
    }

    #[test]
    fn loader_is_one_shot() {
        let loader = LazyImageLoader::new(ObserverOptions::default());
        let visible = entry(Rect::new(0.0, 0.0, 100.0, 100.0));
        let hidden = entry(Rect::new(0.0, 5000.0, 100.0, 100.0));

        assert_eq!(loader.observe(&hidden), Some(ImageLoading::Lazy));
        assert!(!loader.is_connected());
        assert_eq!(loader.observe(&visible), None);
    }

    #[test]
    fn disconnected_loader_ignores_observations() {
        let loader = LazyImageLoader::new(ObserverOptions::default());
        loader.disconnect();
        let visible = entry(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(loader.observe(&visible), None);
    }

    #[test]
    fn image_loading_renders_attribute_value() {
        assert_eq!(ImageLoading::Eager.to_string(), "eager");
        assert_eq!(ImageLoading::Lazy.as_str(), "lazy");
    }
}
