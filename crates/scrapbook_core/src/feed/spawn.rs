//! Per-frame spawn decision.
//!
//! Kept as pure functions over a spectrum slice so the decision logic is
//! testable without any timing or rendering machinery: the host samples its
//! 256-sample FFT analyzer each frame and passes the byte-magnitude bins
//! straight through.

/// Analysis window the host's frequency analyzer is configured with.
pub const FFT_WINDOW: usize = 256;

/// Number of frequency bins produced by a [`FFT_WINDOW`]-sample analysis.
pub const SPECTRUM_BINS: usize = FFT_WINDOW / 2;

/// Mean bin magnitude above which a frame spawns a particle.
pub const SPAWN_THRESHOLD: f32 = 100.0;

/// Mean magnitude across all frequency bins. An empty spectrum (no audio
/// signal available) has zero loudness.
pub fn mean_magnitude(spectrum: &[u8]) -> f32 {
    if spectrum.is_empty() {
        return 0.0;
    }
    let sum: u32 = spectrum.iter().map(|bin| u32::from(*bin)).sum();
    sum as f32 / spectrum.len() as f32
}

/// The spawn decision: is this frame loud enough for a new particle?
pub fn should_spawn(spectrum: &[u8]) -> bool {
    mean_magnitude(spectrum) > SPAWN_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::{mean_magnitude, should_spawn, SPECTRUM_BINS};

    #[test]
    fn empty_spectrum_has_zero_loudness() {
        assert_eq!(mean_magnitude(&[]), 0.0);
        assert!(!should_spawn(&[]));
    }

    #[test]
    fn mean_is_computed_across_all_bins() {
        let spectrum = [0u8, 100, 200];
        assert_eq!(mean_magnitude(&spectrum), 100.0);
    }

    #[test]
    fn threshold_is_exclusive() {
        let at_threshold = vec![100u8; SPECTRUM_BINS];
        assert!(!should_spawn(&at_threshold));

        let above = vec![101u8; SPECTRUM_BINS];
        assert!(should_spawn(&above));
    }
}
