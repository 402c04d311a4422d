use rand::Rng;
use rand::distr::Uniform;
use rand_distr::{Distribution, Geometric};

use crate::error::{Error, Result};
use crate::model::{POTION_CAPACITY, Potion};

pub const DEFAULT_EMPTY_CHANCE: f64 = 0.25;
pub const DEFAULT_PALETTE_SIZE: u8 = 4;

/// Draws starting contents for a potion.
///
/// Each of the four slots is empty with probability `empty_chance`, and the
/// first empty slot ends the stack. The stack length is therefore geometric,
/// truncated at capacity: with the default chance of 1/4,
/// `P(len = k) = (3/4)^k * (1/4)` for `k < 4` and `P(len = 4) = (3/4)^4`.
/// Colors are uniform over `1..=palette_size`, so a full stack is not
/// necessarily closed, and a potion may start out empty.
#[derive(Clone, Debug)]
pub struct ContentsGenerator {
    length: Geometric,
    colors: Uniform<u8>,
}

impl ContentsGenerator {
    pub fn new(empty_chance: f64, palette_size: u8) -> Result<Self> {
        if !(0.0..=1.0).contains(&empty_chance) {
            return Err(Error::InvalidEmptyChance(empty_chance));
        }
        if !(1..=9).contains(&palette_size) {
            return Err(Error::InvalidPalette(palette_size));
        }
        let length =
            Geometric::new(empty_chance).map_err(|_| Error::InvalidEmptyChance(empty_chance))?;
        let colors = Uniform::new_inclusive(1, palette_size)
            .map_err(|_| Error::InvalidPalette(palette_size))?;
        Ok(Self { length, colors })
    }

    pub fn sample_length<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let failures = self.length.sample(rng);
        failures.min(POTION_CAPACITY as u64) as usize
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Potion {
        let len = self.sample_length(rng);
        let ids: Vec<u8> = (0..len).map(|_| self.colors.sample(rng)).collect();
        // Length and ids are in range by construction.
        Potion::with_contents(&ids).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Liquid;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rejects_out_of_range_settings() {
        assert_eq!(
            ContentsGenerator::new(1.5, 4).unwrap_err(),
            Error::InvalidEmptyChance(1.5)
        );
        assert!(matches!(
            ContentsGenerator::new(f64::NAN, 4),
            Err(Error::InvalidEmptyChance(_))
        ));
        assert_eq!(
            ContentsGenerator::new(0.25, 0).unwrap_err(),
            Error::InvalidPalette(0)
        );
        assert_eq!(
            ContentsGenerator::new(0.25, 10).unwrap_err(),
            Error::InvalidPalette(10)
        );
    }

    #[test]
    fn generated_potions_respect_capacity_and_palette() {
        let generator = ContentsGenerator::new(0.25, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..2000 {
            let potion = generator.generate(&mut rng);
            assert!(potion.len() <= POTION_CAPACITY);
            assert!(!potion.is_selected());
            for liquid in potion.contents() {
                assert!((1..=4).contains(&liquid.get_id()), "{liquid:?}");
            }
        }
    }

    #[test]
    fn length_follows_truncated_geometric() {
        let generator = ContentsGenerator::new(DEFAULT_EMPTY_CHANCE, DEFAULT_PALETTE_SIZE).unwrap();
        let mut rng = StdRng::seed_from_u64(12345);
        let trials = 40_000;
        let mut counts = [0usize; POTION_CAPACITY + 1];
        for _ in 0..trials {
            counts[generator.sample_length(&mut rng)] += 1;
        }
        for (k, &count) in counts.iter().enumerate() {
            let expected = if k < POTION_CAPACITY {
                0.75f64.powi(k as i32) * 0.25
            } else {
                0.75f64.powi(POTION_CAPACITY as i32)
            };
            let observed = count as f64 / trials as f64;
            assert!(
                (observed - expected).abs() < 0.015,
                "len {k}: observed {observed}, expected {expected}"
            );
        }
    }

    #[test]
    fn colors_are_roughly_uniform() {
        let generator = ContentsGenerator::new(DEFAULT_EMPTY_CHANCE, DEFAULT_PALETTE_SIZE).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = [0usize; 5];
        let mut total = 0;
        for _ in 0..10_000 {
            for liquid in generator.generate(&mut rng).contents() {
                counts[liquid.get_id() as usize] += 1;
                total += 1;
            }
        }
        assert_eq!(counts[0], 0);
        for &count in &counts[1..] {
            let share = count as f64 / total as f64;
            assert!((share - 0.25).abs() < 0.02, "share {share}");
        }
    }

    #[test]
    fn extreme_chances() {
        let mut rng = StdRng::seed_from_u64(1);
        let always_empty = ContentsGenerator::new(1.0, 4).unwrap();
        let never_empty = ContentsGenerator::new(0.0, 1).unwrap();
        for _ in 0..100 {
            assert!(always_empty.generate(&mut rng).is_empty());
            let full = never_empty.generate(&mut rng);
            assert!(full.is_closed());
            assert_eq!(full.get_top_liquid(), Some(Liquid::new(1)));
        }
    }

    #[test]
    fn same_seed_same_contents() {
        let generator = ContentsGenerator::new(DEFAULT_EMPTY_CHANCE, DEFAULT_PALETTE_SIZE).unwrap();
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            assert_eq!(generator.generate(&mut a), generator.generate(&mut b));
        }
    }
}
