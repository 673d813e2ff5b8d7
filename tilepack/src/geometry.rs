/// An axis-aligned rectangle in container coordinates.
///
/// `Rect` is used both for the footprint of a packed item and for the free
/// regions tracked by the packer. A rectangle with zero width and height acts
/// as a point for the purposes of [`Rect::contains`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle of the given size sitting at the origin.
    #[inline]
    pub fn sized(size: (f64, f64)) -> Self {
        Self::new(0.0, 0.0, size.0, size.1)
    }

    /// A degenerate, zero-size rectangle.
    #[inline]
    pub fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Whether this rectangle has a non-negative, finite extent and a finite
    /// position.
    pub(crate) fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Tells whether `other` lies wholly inside this rectangle, boundary
    /// included.
    pub fn contains(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    /// Tells whether the interiors of the two rectangles intersect. Rectangles
    /// that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Treating `self` as a free region, computes what is left of it once
    /// `placed` is occupied.
    ///
    /// If the two don't overlap, the region comes back untouched. Otherwise up
    /// to four maximal pieces are produced, in order: the strip above `placed`,
    /// the strip to its right, the strip below it and the strip to its left.
    /// Each strip spans the whole region on the other axis, so the pieces may
    /// overlap each other but together cover exactly the free part.
    pub fn free_regions_after(&self, placed: &Rect) -> Vec<Rect> {
        if !self.overlaps(placed) {
            return vec![*self];
        }

        let mut regions = Vec::with_capacity(4);

        if self.top() < placed.top() {
            regions.push(Rect::new(
                self.x,
                self.y,
                self.width,
                placed.top() - self.top(),
            ));
        }

        if self.right() > placed.right() {
            regions.push(Rect::new(
                placed.right(),
                self.y,
                self.right() - placed.right(),
                self.height,
            ));
        }

        if self.bottom() > placed.bottom() {
            regions.push(Rect::new(
                self.x,
                placed.bottom(),
                self.width,
                self.bottom() - placed.bottom(),
            ));
        }

        if self.left() < placed.left() {
            regions.push(Rect::new(
                self.x,
                self.y,
                placed.left() - self.left(),
                self.height,
            ));
        }

        regions
    }

    /// Whether something of `other`'s size would fit inside this rectangle,
    /// ignoring position.
    #[inline]
    pub fn can_fit(&self, other: &Rect) -> bool {
        self.width >= other.width && self.height >= other.height
    }

    /// The smallest rectangle enclosing both `self` and `other`.
    pub fn merge(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);

        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    pub fn with_position(&self, x: f64, y: f64) -> Rect {
        Rect::new(x, y, self.width, self.height)
    }

    pub fn with_size(&self, width: f64, height: f64) -> Rect {
        Rect::new(self.x, self.y, width, height)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);

        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.bottom(), 60.0);
    }

    #[test]
    fn contains_rects_and_points() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);

        assert!(outer.contains(&Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(outer.contains(&outer));
        assert!(outer.contains(&Rect::point(100.0, 100.0)));
        assert!(!outer.contains(&Rect::point(100.5, 50.0)));
        assert!(!outer.contains(&Rect::new(90.0, 90.0, 20.0, 5.0)));
        assert!(!Rect::new(10.0, 10.0, 5.0, 5.0).contains(&outer));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);

        assert!(!a.overlaps(&Rect::new(100.0, 0.0, 50.0, 50.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 100.0, 50.0, 50.0)));
        assert!(a.overlaps(&Rect::new(99.0, 99.0, 50.0, 50.0)));
        assert!(a.overlaps(&Rect::new(-10.0, -10.0, 200.0, 200.0)));
    }

    #[test]
    fn free_regions_without_overlap() {
        let free = Rect::new(0.0, 100.0, 500.0, 500.0);
        let placed = Rect::new(0.0, 0.0, 100.0, 100.0);

        assert_eq!(free.free_regions_after(&placed), vec![free]);
    }

    #[test]
    fn free_regions_around_centered_placement() {
        let free = Rect::new(0.0, 0.0, 100.0, 100.0);
        let placed = Rect::new(40.0, 30.0, 20.0, 10.0);

        assert_eq!(
            free.free_regions_after(&placed),
            vec![
                Rect::new(0.0, 0.0, 100.0, 30.0),
                Rect::new(60.0, 0.0, 40.0, 100.0),
                Rect::new(0.0, 40.0, 100.0, 60.0),
                Rect::new(0.0, 0.0, 40.0, 100.0),
            ]
        );
    }

    #[test]
    fn free_regions_skip_degenerate_strips() {
        let free = Rect::new(0.0, 0.0, 1800.0, 15000.0);
        let placed = Rect::new(0.0, 0.0, 200.0, 100.0);

        assert_eq!(
            free.free_regions_after(&placed),
            vec![
                Rect::new(200.0, 0.0, 1600.0, 15000.0),
                Rect::new(0.0, 100.0, 1800.0, 14900.0),
            ]
        );

        // A placement covering the whole region leaves nothing behind.
        assert!(free.free_regions_after(&free).is_empty());
    }

    #[test]
    fn can_fit_ignores_position() {
        let region = Rect::new(500.0, 500.0, 200.0, 100.0);

        assert!(region.can_fit(&Rect::new(0.0, 0.0, 200.0, 100.0)));
        assert!(region.can_fit(&Rect::new(9000.0, 0.0, 10.0, 10.0)));
        assert!(!region.can_fit(&Rect::new(500.0, 500.0, 201.0, 100.0)));
        assert!(!region.can_fit(&Rect::new(500.0, 500.0, 200.0, 100.5)));
    }

    #[test]
    fn merge_encloses_both() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 5.0, 10.0, 30.0);

        assert_eq!(a.merge(&b), Rect::new(0.0, 0.0, 30.0, 35.0));
        assert_eq!(b.merge(&a), a.merge(&b));
    }

    #[test]
    fn validity() {
        assert!(Rect::new(0.0, 0.0, 0.0, 0.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, -1.0, 10.0).is_valid());
        assert!(!Rect::new(f64::NAN, 0.0, 1.0, 1.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, f64::INFINITY, 1.0).is_valid());
    }
}
