use crate::catalog::Size;
use crate::model::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

// Edge-touching or empty rects do not overlap. Comparisons only, so NaN never
// counts as overlap.
pub fn rect_overlaps(a: &Rect, b: &Rect) -> bool {
    let extent = |r: &Rect| r.width > 0.0 && r.height > 0.0;
    extent(a)
        && extent(b)
        && a.x < b.right()
        && b.x < a.right()
        && a.y < b.bottom()
        && b.y < a.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert!(rect_overlaps(&a, &b));
        assert!(rect_overlaps(&b, &a));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(!rect_overlaps(&a, &Rect::new(100.0, 0.0, 50.0, 50.0)));
        assert!(!rect_overlaps(&a, &Rect::new(0.0, 100.0, 50.0, 50.0)));
    }

    #[test]
    fn requires_overlap_on_both_axes() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(!rect_overlaps(&a, &Rect::new(50.0, 200.0, 100.0, 100.0)));
        assert!(!rect_overlaps(&a, &Rect::new(300.0, 50.0, 100.0, 100.0)));
    }

    #[test]
    fn containment_counts_as_overlap() {
        let outer = Rect::new(0.0, 0.0, 500.0, 500.0);
        let inner = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect_overlaps(&outer, &inner));
    }

    #[test]
    fn degenerate_rects_never_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(!rect_overlaps(&a, &Rect::new(10.0, 10.0, 0.0, 50.0)));
        assert!(!rect_overlaps(&a, &Rect::new(f64::NAN, 10.0, 10.0, 10.0)));
        assert!(!rect_overlaps(&Rect::new(10.0, f64::NAN, 10.0, 10.0), &a));
        assert!(!rect_overlaps(&a, &Rect::new(10.0, 10.0, f64::NAN, 10.0)));
        assert!(!rect_overlaps(&Rect::new(10.0, 10.0, 50.0, 0.0), &a));
    }
}
