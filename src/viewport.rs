/// Size of the area particles live in, in viewport units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Negative and non-finite extents collapse to zero.
    pub fn new(width: f32, height: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }
}

/// Remembers the last observed viewport so hosts without resize events can
/// still tell when to rebuild the field.
#[derive(Clone, Copy, Debug)]
pub struct ViewportBounds {
    current: Viewport,
}

impl ViewportBounds {
    pub fn new(viewport: Viewport) -> Self {
        Self { current: viewport }
    }

    pub fn current(&self) -> Viewport {
        self.current
    }

    /// Record `viewport`, returning true if it differs from the previous one.
    pub fn observe(&mut self, viewport: Viewport) -> bool {
        let changed = viewport != self.current;
        self.current = viewport;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_extents() {
        assert_eq!(Viewport::new(-10.0, f32::NAN), Viewport::new(0.0, 0.0));
        assert_eq!(Viewport::new(800.0, 600.0).center(), (400.0, 300.0));
    }

    #[test]
    fn observe_reports_changes_only() {
        let mut bounds = ViewportBounds::new(Viewport::new(800.0, 600.0));

        assert!(!bounds.observe(Viewport::new(800.0, 600.0)));
        assert!(bounds.observe(Viewport::new(1024.0, 600.0)));
        assert!(!bounds.observe(Viewport::new(1024.0, 600.0)));
        assert_eq!(bounds.current(), Viewport::new(1024.0, 600.0));
    }
}
