use std::fmt;

/// Rectangular view window. `maximize` only ever grows it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::new(0.0, 0.0, 0.0, 0.0)
    }
}

impl Bounds {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Bounds {
            left,
            right,
            top,
            bottom,
        }
    }
    /// symmetric square window of half-width `b`
    pub fn square(b: f64) -> Self {
        Bounds::new(-b, b, b, -b)
    }

    pub fn set_bounds(&mut self, other: &Bounds) {
        *self = *other;
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// grow every side that `other` exceeds; true if anything changed
    pub fn maximize(&mut self, other: &Bounds) -> bool {
        let mut changed = false;
        if other.left < self.left {
            self.left = other.left;
            changed = true;
        }
        if other.right > self.right {
            self.right = other.right;
            changed = true;
        }
        if other.top > self.top {
            self.top = other.top;
            changed = true;
        }
        if other.bottom < self.bottom {
            self.bottom = other.bottom;
            changed = true;
        }
        changed
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bounds[left={:?},right={:?},top={:?},bottom={:?}]",
            self.left, self.right, self.top, self.bottom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maximize_grows_only() {
        let mut b = Bounds::square(10.0);
        assert!(!b.maximize(&Bounds::square(5.0)));
        assert_eq!(b, Bounds::square(10.0));
        assert!(b.maximize(&Bounds::new(-3.0, 12.0, 4.0, -20.0)));
        assert_eq!(b, Bounds::new(-10.0, 12.0, 10.0, -20.0));
    }

    #[test]
    fn test_equality_is_exact() {
        let a = Bounds::new(-1.0, 1.0, 1.0, -1.0);
        let b = Bounds::new(-1.0, 1.0 + 1e-15, 1.0, -1.0);
        assert_ne!(a, b);
        assert_eq!(a.width(), 2.0);
    }
}
