use rand_distr::{Distribution, Normal};
use rand::Rng;

/// Uniform distribution over {-1, 0, 1}.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ternary;

impl Distribution<i64> for Ternary {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.random_range(-1i64..=1)
    }
}

/// Centered normal distribution rounded to the nearest integer, with
/// samples of magnitude above `bound` rejected.
#[derive(Clone, Copy, Debug)]
pub struct ClippedNormal {
    normal: Normal<f64>,
    sigma: f64,
    bound: f64,
}

impl ClippedNormal {
    /// Returns `None` unless `sigma` is finite and positive and `bound >= sigma`.
    pub fn new(sigma: f64, bound: f64) -> Option<Self> {
        if !sigma.is_finite() || sigma <= 0.0 || !bound.is_finite() || bound < sigma {
            return None;
        }
        let normal: Normal<f64> = Normal::new(0.0, sigma).ok()?;
        Some(Self {
            normal,
            sigma,
            bound,
        })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }
}

impl Distribution<i64> for ClippedNormal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        loop {
            let x: f64 = self.normal.sample(rng);
            if x.abs() <= self.bound {
                return x.round() as i64;
            }
        }
    }
}
