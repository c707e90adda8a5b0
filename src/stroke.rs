use egui::Pos2;

/// A straight piece of a stroke between two consecutive pointer positions,
/// in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Pos2,
    pub to: Pos2,
}

impl Segment {
    pub fn new(from: Pos2, to: Pos2) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }

    /// Zero-length segments are pruned instead of rasterized
    pub fn is_degenerate(&self) -> bool {
        self.length() <= f32::EPSILON
    }
}

/// The in-progress stroke: only the pen position survives between segments,
/// everything else is already baked into the pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveStroke {
    current: Pos2,
    segments: usize,
}

impl ActiveStroke {
    pub fn begin(anchor: Pos2) -> Self {
        Self {
            current: anchor,
            segments: 0,
        }
    }

    /// Moves the pen to `to`, returning the segment that was traversed
    pub fn advance(&mut self, to: Pos2) -> Segment {
        let segment = Segment::new(self.current, to);
        self.current = to;
        self.segments += 1;
        segment
    }

    pub fn current(&self) -> Pos2 {
        self.current
    }

    pub fn segment_count(&self) -> usize {
        self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_advance_chains_segments() {
        let mut stroke = ActiveStroke::begin(pos2(1.0, 1.0));

        let first = stroke.advance(pos2(5.0, 1.0));
        let second = stroke.advance(pos2(5.0, 9.0));

        assert_eq!(first, Segment::new(pos2(1.0, 1.0), pos2(5.0, 1.0)));
        assert_eq!(second.from, first.to);
        assert_eq!(stroke.current(), pos2(5.0, 9.0));
        assert_eq!(stroke.segment_count(), 2);
    }

    #[test]
    fn test_degenerate_segment() {
        let point = pos2(4.0, 4.0);
        let segment = Segment::new(point, point);
        assert!(segment.is_degenerate());
        assert!(!Segment::new(point, pos2(4.0, 5.0)).is_degenerate());
    }
}
