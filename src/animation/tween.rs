use crate::animation::ease::{Ease, Lerp};

/// Upper bound on frames for a single transition.
pub(crate) const MAX_STEPS: usize = 1 << 20;

/// Fixed-rate sampling plan for one animated transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Tween {
    pub(crate) duration_secs: f64,
    pub(crate) fps: u32,
    pub(crate) ease: Ease,
}

impl Tween {
    pub(crate) fn new(duration_secs: f64, fps: u32, ease: Ease) -> Self {
        Self {
            duration_secs,
            fps,
            ease,
        }
    }

    /// Number of frames the transition spans, between one and [`MAX_STEPS`].
    pub(crate) fn steps(&self) -> usize {
        let frames = (self.duration_secs * f64::from(self.fps)).round();
        if frames.is_nan() || frames < 1.0 {
            return 1;
        }
        if frames >= MAX_STEPS as f64 {
            return MAX_STEPS;
        }
        frames as usize
    }

    /// Eased progress for frames `1..=steps`; the last sample is exactly `1.0`.
    pub(crate) fn progress(&self) -> impl Iterator<Item = f64> + '_ {
        let steps = self.steps();
        (1..=steps).map(move |i| {
            if i == steps {
                1.0
            } else {
                self.ease.apply(i as f64 / steps as f64)
            }
        })
    }

    /// Interpolated values for every frame of the transition, sampled on demand.
    pub(crate) fn frames<'a, T: Lerp>(
        &'a self,
        from: &'a T,
        to: &'a T,
    ) -> impl Iterator<Item = T> + 'a {
        self.progress().map(move |t| T::lerp(from, to, t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
