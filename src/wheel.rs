//! Mood wheel geometry.
//!
//! The wheel is split into `n` equal wedges, wedge `i` covering
//! `[i * 360/n, (i + 1) * 360/n)` degrees clockwise from the pointer at the
//! top. Spinning rotates the whole wheel clockwise by a random angle; the
//! winner is the wedge that ends up under the pointer.

use rand::Rng;
use std::time::Duration;

/// Full turns every spin makes before the random remainder.
pub const MIN_TURNS: u32 = 5;
pub const SPIN_DURATION: Duration = Duration::from_secs(4);
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);
/// How long the winning mood is shown before it is selected.
pub const REVEAL_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spin {
    /// Total clockwise rotation in degrees.
    pub rotation: u32,
    /// Winning wedge.
    pub index: usize,
}

/// A random rotation of at least `MIN_TURNS` full turns plus 1 to 360 degrees.
pub fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    MIN_TURNS * 360 + rng.random_range(1..=360)
}

/// Maps a total rotation to the wedge under the pointer.
///
/// Returns `None` when the wheel has no segments.
pub fn segment_index(rotation: u32, segments: usize) -> Option<usize> {
    if segments == 0 {
        return None;
    }
    // floor((360 - angle) / (360 / n)) in integers, so exact wedge
    // boundaries land in the same wedge `segment_bounds` reports.
    let angle = (rotation % 360) as usize;
    Some((360 - angle) * segments / 360 % segments)
}

/// Start and end angle of wedge `index`, in degrees.
pub fn segment_bounds(index: usize, segments: usize) -> (f64, f64) {
    let n = segments as f64;
    ((index * 360) as f64 / n, ((index + 1) * 360) as f64 / n)
}

pub fn spin<R: Rng + ?Sized>(rng: &mut R, segments: usize) -> Option<Spin> {
    let rotation = random_rotation(rng);
    segment_index(rotation, segments).map(|index| Spin { rotation, index })
}

/// Number of ticks played during one spin.
pub fn tick_count() -> u32 {
    (SPIN_DURATION.as_millis() / TICK_INTERVAL.as_millis()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_no_segments() {
        assert_eq!(segment_index(1900, 0), None);
    }

    #[test]
    fn test_index_in_range() {
        for n in 1..=24 {
            for rotation in 1800..=2160 {
                let index = segment_index(rotation, n).unwrap();
                assert!(index < n, "rotation {} n {} gave {}", rotation, n, index);
            }
        }
    }

    #[test]
    fn test_known_angles() {
        // Four wedges of 90 degrees.
        assert_eq!(segment_index(1800, 4), Some(0));
        assert_eq!(segment_index(1800 + 1, 4), Some(3));
        assert_eq!(segment_index(1800 + 90, 4), Some(3));
        assert_eq!(segment_index(1800 + 91, 4), Some(2));
        assert_eq!(segment_index(1800 + 180, 4), Some(2));
        assert_eq!(segment_index(1800 + 270, 4), Some(1));
        assert_eq!(segment_index(1800 + 359, 4), Some(0));
        assert_eq!(segment_index(2160, 4), Some(0));
    }

    #[test]
    fn test_matches_wedge_under_pointer() {
        // After rotating clockwise by `angle`, the pointer sits over the
        // wheel's own angle `360 - angle`, which is 0 for a whole turn.
        for n in 1..=64 {
            for angle in 0..360u32 {
                let index = segment_index(1800 + angle, n).unwrap();
                let (start, end) = segment_bounds(index, n);
                let under_pointer = f64::from((360 - angle) % 360);
                assert!(
                    start <= under_pointer && under_pointer < end,
                    "n {} angle {} index {} bounds {:?}",
                    n,
                    angle,
                    index,
                    (start, end)
                );
            }
        }
    }

    #[test]
    fn test_exact_boundaries_with_uneven_wedges() {
        // 35 wedges: 288 degrees is exactly the start of wedge 28.
        assert_eq!(segment_bounds(28, 35).0, 288.0);
        assert_eq!(segment_index(1800 + 72, 35), Some(28));
        assert_eq!(segment_index(1800 + 144, 35), Some(21));
        assert_eq!(segment_index(1800 + 216, 35), Some(14));
        assert_eq!(segment_index(1800 + 288, 35), Some(7));
    }

    #[test]
    fn test_random_rotation_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let rotation = random_rotation(&mut rng);
            assert!((1801..=2160).contains(&rotation));
        }
    }

    #[test]
    fn test_spin_distribution() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 6];
        for _ in 0..6000 {
            let spin = spin(&mut rng, 6).unwrap();
            counts[spin.index] += 1;
        }
        for count in counts {
            assert!(count > 700 && count < 1300, "counts {:?}", counts);
        }
    }

    #[test]
    fn test_tick_count() {
        assert_eq!(tick_count(), 20);
    }
}
