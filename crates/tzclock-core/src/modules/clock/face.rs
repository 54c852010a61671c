use std::time::{Duration, Instant};

use super::reading::{HandAngles, normalize};

const DIAL_POSITIONS: u32 = 60;
const HOURS_ON_DIAL: u32 = 12;

/// A decorative mark on the dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: u32,
    /// Degrees clockwise from 12 o'clock.
    pub rotation: f32,
}

/// Marks for every minute position that is not also an hour position.
pub fn minute_markers() -> Vec<Marker> {
    (0..DIAL_POSITIONS)
        .filter(|position| position % 5 != 0)
        .map(|position| Marker {
            position,
            rotation: position as f32 * 6.0,
        })
        .collect()
}

pub fn hour_markers() -> Vec<Marker> {
    (0..HOURS_ON_DIAL)
        .map(|position| Marker {
            position,
            rotation: position as f32 * 30.0,
        })
        .collect()
}

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    /// `cubic-bezier(0.4, 0.0, 0.2, 1)`
    pub const STANDARD: Self = Self {
        x1: 0.4,
        y1: 0.0,
        x2: 0.2,
        y2: 1.0,
    };

    /// Eased progress for linear progress `t` in `[0, 1]`.
    pub fn ease(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }

        // invert x(s) = t by bisection, x is monotonic for x1, x2 in [0, 1]
        let (mut lo, mut hi) = (0.0, 1.0);
        let mut s = t;
        for _ in 0..32 {
            let x = bezier(self.x1, self.x2, s);
            if (x - t).abs() < 1e-7 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }

        bezier(self.y1, self.y2, s)
    }
}

fn bezier(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

/// How quickly a hand catches up with a new target angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandTransition {
    pub duration: Duration,
    pub easing:   CubicBezier,
}

impl HandTransition {
    pub const HOUR_MINUTE: Self = Self {
        duration: Duration::from_millis(300),
        easing:   CubicBezier::STANDARD,
    };
    pub const SECOND: Self = Self {
        duration: Duration::from_millis(100),
        easing:   CubicBezier::STANDARD,
    };

    fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }

        self.easing
            .ease(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }
}

/// Displayed angle of one hand, easing from its last position to its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedHand {
    from:       f64,
    to:         f64,
    started:    Instant,
    transition: HandTransition,
}

impl AnimatedHand {
    pub fn new(angle: f64, transition: HandTransition, now: Instant) -> Self {
        Self {
            from: angle,
            to: angle,
            started: now,
            transition,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn retarget(&mut self, target: f64, now: Instant) {
        self.from = self.angle_at(now);
        self.to = normalize(target);
        self.started = now;
    }

    /// Angle to draw at `now`, always moving along the shorter arc so a hand
    /// passing 12 o'clock does not spin backwards.
    pub fn angle_at(&self, now: Instant) -> f64 {
        let eased = self
            .transition
            .progress(now.saturating_duration_since(self.started));

        normalize(self.from + shortest_delta(self.from, self.to) * eased)
    }
}

fn shortest_delta(from: f64, to: f64) -> f64 {
    let delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Dial decoration and hand state of one clock.
///
/// A face starts bare; [`ClockFace::build`] installs the markers and hand
/// transitions once, during clock registration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClockFace {
    minute_markers: Vec<Marker>,
    hour_markers:   Vec<Marker>,
    hands:          Option<[AnimatedHand; 3]>,
}

impl ClockFace {
    pub fn build(&mut self, angles: HandAngles, now: Instant) {
        self.minute_markers = minute_markers();
        self.hour_markers = hour_markers();
        self.hands = Some([
            AnimatedHand::new(angles.hour, HandTransition::HOUR_MINUTE, now),
            AnimatedHand::new(angles.minute, HandTransition::HOUR_MINUTE, now),
            AnimatedHand::new(angles.second, HandTransition::SECOND, now),
        ]);
    }

    pub fn is_built(&self) -> bool {
        self.hands.is_some()
    }

    pub fn minute_markers(&self) -> &[Marker] {
        &self.minute_markers
    }

    pub fn hour_markers(&self) -> &[Marker] {
        &self.hour_markers
    }

    pub fn set_targets(&mut self, angles: HandAngles, now: Instant) {
        if let Some([hour, minute, second]) = self.hands.as_mut() {
            hour.retarget(angles.hour, now);
            minute.retarget(angles.minute, now);
            second.retarget(angles.second, now);
        }
    }

    /// Angles to draw at `now`; a bare face reports all hands at 12.
    pub fn displayed(&self, now: Instant) -> HandAngles {
        match &self.hands {
            Some([hour, minute, second]) => HandAngles {
                hour:   hour.angle_at(now),
                minute: minute.angle_at(now),
                second: second.angle_at(now),
            },
            None => HandAngles::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minute_markers_skip_hour_positions() {
        let markers = minute_markers();

        assert_eq!(markers.len(), 55);
        assert!(markers.iter().all(|marker| marker.position % 5 != 0));
        for marker in &markers {
            assert_eq!(marker.rotation, marker.position as f32 * 6.0);
        }
        assert_eq!(markers.first().map(|m| m.rotation), Some(6.0));
        assert_eq!(markers.last().map(|m| m.rotation), Some(354.0));
    }

    #[test]
    fn hour_markers_are_thirty_degrees_apart() {
        let markers = hour_markers();
        assert_eq!(markers.len(), 12);
        assert_eq!(markers[3].rotation, 90.0);
    }

    #[test]
    fn standard_easing_hits_endpoints_and_is_monotonic() {
        let curve = CubicBezier::STANDARD;
        assert_eq!(curve.ease(0.0), 0.0);
        assert_eq!(curve.ease(1.0), 1.0);

        let mut previous = 0.0;
        for step in 1..=20 {
            let value = curve.ease(f64::from(step) / 20.0);
            assert!(value >= previous);
            previous = value;
        }
        // decelerating curve is ahead of linear at the midpoint
        assert!(curve.ease(0.5) > 0.5);
    }

    #[test]
    fn animated_hand_reaches_target_after_duration() {
        let start = Instant::now();
        let mut hand = AnimatedHand::new(0.0, HandTransition::SECOND, start);

        hand.retarget(90.0, start);
        assert_eq!(hand.angle_at(start), 0.0);

        let midway = hand.angle_at(start + Duration::from_millis(50));
        assert!(midway > 0.0 && midway < 90.0);

        assert_eq!(hand.angle_at(start + Duration::from_millis(100)), 90.0);
        assert_eq!(hand.angle_at(start + Duration::from_secs(5)), 90.0);
    }

    #[test]
    fn animated_hand_wraps_forward_past_twelve() {
        let start = Instant::now();
        let mut hand = AnimatedHand::new(354.0, HandTransition::HOUR_MINUTE, start);

        hand.retarget(0.0, start);
        let midway = hand.angle_at(start + Duration::from_millis(150));

        assert!(midway > 354.0 || midway < 1.0, "moved backwards to {midway}");
        assert_eq!(hand.angle_at(start + Duration::from_millis(300)), 0.0);
    }

    #[test]
    fn bare_face_has_no_markers_until_built() {
        let now = Instant::now();
        let mut face = ClockFace::default();
        assert!(!face.is_built());
        assert!(face.minute_markers().is_empty());
        assert_eq!(face.displayed(now), HandAngles::default());

        let angles = HandAngles {
            hour:   75.0,
            minute: 181.5,
            second: 93.0,
        };
        face.build(angles, now);

        assert!(face.is_built());
        assert_eq!(face.minute_markers().len(), 55);
        assert_eq!(face.hour_markers().len(), 12);
        assert_eq!(face.displayed(now), angles);
    }
}
