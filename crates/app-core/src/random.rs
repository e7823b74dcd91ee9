//! Randomness seam for the catch roll, cast targets and bite delays.

use rand::Rng;

pub trait RandomSource {
    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f32;
    /// Uniform in `0..len`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;

    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.unit()
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn unit(&mut self) -> f32 {
        self.gen::<f32>()
    }

    fn index(&mut self, len: usize) -> usize {
        self.gen_range(0..len.max(1))
    }
}

/// Replays a fixed script of unit values, cycling when exhausted.
/// `index` maps the next value onto `0..len`.
#[derive(Clone, Debug)]
pub struct SequenceRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0.0);
        }
        for v in &mut values {
            *v = v.clamp(0.0, 0.999_999);
        }
        Self { values, cursor: 0 }
    }

    /// Always yields the same value.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn unit(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }

    fn index(&mut self, len: usize) -> usize {
        let len = len.max(1);
        ((self.unit() * len as f32) as usize).min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sequence_cycles_and_maps_indices() {
        let mut r = SequenceRandom::new(vec![0.0, 0.5, 0.99]);
        assert_eq!(r.index(3), 0);
        assert_eq!(r.index(3), 1);
        assert_eq!(r.index(3), 2);
        assert_eq!(r.unit(), 0.0);
        assert_eq!(SequenceRandom::constant(1.0).index(4), 3);
    }

    #[test]
    fn std_rng_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let u = RandomSource::unit(&mut rng);
            assert!((0.0..1.0).contains(&u));
            assert!(RandomSource::index(&mut rng, 3) < 3);
            let r = rng.range(1.5, 4.0);
            assert!((1.5..=4.0).contains(&r));
        }
    }
}
