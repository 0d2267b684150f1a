use std::time::Instant;

/// Velocity from successive position samples, in position units per second.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VelocityEstimator {
    last: Option<(Instant, f64)>,
    velocity: f64,
}

impl VelocityEstimator {
    pub fn update(&mut self, position: f64, now: Instant) {
        if let Some((then, last_position)) = self.last {
            let dt = now.saturating_duration_since(then).as_secs_f64();
            if dt > 0. {
                self.velocity = (position - last_position) / dt;
            }
        }
        self.last = Some((now, position));
    }

    /// Forget the last sample, e.g. after the encoder is re-zeroed.
    pub fn reset(&mut self) {
        self.last = None;
        self.velocity = 0.;
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_sample_reads_zero() {
        let mut estimator = VelocityEstimator::default();
        estimator.update(12., Instant::now());
        assert_eq!(estimator.velocity(), 0.);
    }

    #[test]
    fn slope_between_samples() {
        let mut estimator = VelocityEstimator::default();
        let start = Instant::now();

        estimator.update(10., start);
        estimator.update(11., start + Duration::from_millis(20));
        assert!((estimator.velocity() - 50.).abs() < 1e-9);

        estimator.update(10., start + Duration::from_millis(40));
        assert!((estimator.velocity() + 50.).abs() < 1e-9);
    }

    #[test]
    fn repeated_timestamp_keeps_last_velocity() {
        let mut estimator = VelocityEstimator::default();
        let start = Instant::now();

        estimator.update(0., start);
        estimator.update(2., start + Duration::from_millis(20));
        estimator.update(5., start + Duration::from_millis(20));
        assert!((estimator.velocity() - 100.).abs() < 1e-9);
    }

    #[test]
    fn reset_after_zeroing() {
        let mut estimator = VelocityEstimator::default();
        let start = Instant::now();

        estimator.update(40., start);
        estimator.update(41., start + Duration::from_millis(20));
        estimator.reset();
        estimator.update(0., start + Duration::from_millis(40));
        assert_eq!(estimator.velocity(), 0.);
    }
}
