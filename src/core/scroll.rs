//! Scroll bookkeeping: the continuous offset of the selected item and the
//! values derived from it each time it moves.

/// Which way the content is travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Finger moving up: content moves up, the next item approaches.
    #[default]
    Up,
    /// Finger moving down: content moves down, the previous item approaches.
    Down,
}

impl Direction {
    /// Sign of the vertical displacement of a neighbour at `count` slots in
    /// this direction: items *above* the centre are [`Direction::Down`].
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }

    /// Step applied to the selected index when looking at the neighbour in
    /// this direction.
    pub fn index_step(self) -> i64 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

/// Where a wheel is in its interaction lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging,
    Rebounding,
}

/// Offset of the selected item from its resting centre, plus the cached
/// scale (0 = fully selected, 1 = fully unselected) and its trend.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    offset: f32,
    pub direction: Direction,
    scale: f32,
    last_scale: f32,
    enlarging: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0.0,
            direction: Direction::Up,
            scale: 0.0,
            last_scale: 1.0,
            enlarging: false,
        }
    }
}

impl ScrollState {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// `true` while the centred item is growing toward the selected size.
    pub fn is_enlarging(&self) -> bool {
        self.enlarging
    }

    /// Move to `offset` and refresh the derived scale and trend.
    pub fn set_offset(&mut self, offset: f32, distance: f32) {
        self.offset = offset;
        let scale = scale_for(offset, distance);
        self.enlarging = scale <= self.last_scale;
        self.last_scale = scale;
        self.scale = scale;
    }

    /// Back to rest at the centre.
    pub fn reset(&mut self, distance: f32) {
        self.set_offset(0.0, distance);
    }
}

/// `min(|offset| / distance * 2, 1)`, reaching 1 half-way to a neighbour.
pub fn scale_for(offset: f32, distance: f32) -> f32 {
    if distance <= 0.0 {
        return 0.0;
    }
    (offset.abs() / distance * 2.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_saturates_at_half_distance() {
        assert_eq!(scale_for(0.0, 40.0), 0.0);
        assert_eq!(scale_for(10.0, 40.0), 0.5);
        assert_eq!(scale_for(-10.0, 40.0), 0.5);
        assert_eq!(scale_for(20.0, 40.0), 1.0);
        assert_eq!(scale_for(35.0, 40.0), 1.0);
        assert_eq!(scale_for(5.0, 0.0), 0.0);
    }

    #[test]
    fn trend_follows_scale() {
        let mut s = ScrollState::default();
        s.set_offset(4.0, 40.0);
        assert!(s.is_enlarging(), "first move from rest compares against 1.0");
        s.set_offset(8.0, 40.0);
        assert!(!s.is_enlarging());
        s.set_offset(6.0, 40.0);
        assert!(s.is_enlarging());
        s.reset(40.0);
        assert_eq!(s.offset(), 0.0);
        assert_eq!(s.scale(), 0.0);
    }
}
