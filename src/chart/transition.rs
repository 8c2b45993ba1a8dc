//! Timed interpolation of positional attributes.
//!
//! Times are seconds on whatever monotonic clock the caller uses (egui's
//! `input.time` in the viewer, plain numbers in tests).

/// Cubic in-out easing on `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub start: f64,
    pub duration: f64,
}

impl Timing {
    pub fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }

    /// Eased progress at `now`, 1.0 once finished.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ease_cubic_in_out((now - self.start) / self.duration)
    }

    pub fn is_running(&self, now: f64) -> bool {
        self.duration > 0.0 && now < self.start + self.duration
    }
}

/// A scalar that may be moving toward a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animated {
    from: f64,
    to: f64,
    timing: Option<Timing>,
}

impl Animated {
    pub fn settled(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            timing: None,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn value_at(&self, now: f64) -> f64 {
        match self.timing {
            Some(timing) if timing.is_running(now) => {
                let t = timing.progress(now);
                self.from + (self.to - self.from) * t
            }
            _ => self.to,
        }
    }

    /// Start moving toward `to`. An in-flight transition is interrupted and the
    /// new one starts from the value reached so far.
    pub fn animate_to(&mut self, to: f64, now: f64, duration: f64) {
        self.from = self.value_at(now);
        self.to = to;
        self.timing = Some(Timing::new(now, duration));
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.timing.is_some_and(|t| t.is_running(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert_relative_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(-3.0), 0.0);
        assert_eq!(ease_cubic_in_out(7.0), 1.0);
    }

    #[test]
    fn animated_value_moves_then_settles() {
        let mut v = Animated::settled(0.0);
        v.animate_to(100.0, 10.0, 1.0);

        assert_eq!(v.value_at(10.0), 0.0);
        assert_relative_eq!(v.value_at(10.5), 50.0);
        assert_eq!(v.value_at(11.0), 100.0);
        assert!(v.is_animating(10.5));
        assert!(!v.is_animating(11.0));
    }

    #[test]
    fn interrupted_transition_restarts_from_current_value() {
        let mut v = Animated::settled(0.0);
        v.animate_to(100.0, 0.0, 1.0);
        let reached = v.value_at(0.5);

        v.animate_to(-100.0, 0.5, 1.0);
        assert_relative_eq!(v.value_at(0.5), reached);
        assert_eq!(v.value_at(1.5), -100.0);
        assert_eq!(v.target(), -100.0);
    }

    #[test]
    fn zero_duration_jumps() {
        let mut v = Animated::settled(1.0);
        v.animate_to(2.0, 0.0, 0.0);
        assert_eq!(v.value_at(0.0), 2.0);
        assert!(!v.is_animating(0.0));
    }
}
