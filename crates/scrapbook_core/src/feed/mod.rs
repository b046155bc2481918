//! Audio-reactive particle feed.
//!
//! # Responsibility
//! - Decide once per rendering frame whether the audio is loud enough to
//!   spawn a decorative particle.
//! - Own the live particle set and retire particles when their animation
//!   lifetime elapses.
//!
//! # Invariants
//! - At most one particle spawns per frame.
//! - Every spawned particle is removed within its lifetime; no manual
//!   cleanup is required by the caller.
//! - An absent audio signal (empty spectrum) spawns nothing and never fails.
//!
//! The feed is purely advisory: the host's rendering layer reads the live
//! set each frame and draws it. It never calls back into the host.

pub mod particle;
pub mod spawn;

use particle::{Particle, ParticleId, LIFETIME_RANGE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spawn::should_spawn;

struct LiveParticle {
    particle: Particle,
    /// Feed-clock instant at which the particle is retired.
    expires_at: f32,
}

/// Frame-driven particle generator.
///
/// The host drives it from its display-refresh callback:
/// `feed.on_frame(&bins, dt)` with the current spectrum and the seconds
/// elapsed since the previous frame, then renders `feed.particles()`.
pub struct ParticleFeed {
    rng: StdRng,
    next_id: ParticleId,
    clock: f32,
    live: Vec<LiveParticle>,
}

impl ParticleFeed {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Builds a feed with a fixed seed. Spawn parameters become
    /// deterministic, which tests rely on.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            next_id: 0,
            clock: 0.0,
            live: Vec::new(),
        }
    }

    /// Advances the feed by one rendering frame.
    ///
    /// Retires expired particles, then spawns exactly one new particle when
    /// the spectrum's mean magnitude exceeds the loudness threshold.
    /// Returns the id of the spawned particle, if any.
    ///
    /// `spectrum` holds byte-magnitude frequency bins from a 256-sample FFT
    /// analyzer; pass an empty slice when no audio signal is available.
    /// `dt` is the time elapsed since the previous frame, in seconds;
    /// negative values are treated as zero.
    pub fn on_frame(&mut self, spectrum: &[u8], dt: f32) -> Option<ParticleId> {
        self.clock += dt.max(0.0);
        let clock = self.clock;
        self.live.retain(|live| live.expires_at > clock);

        if !should_spawn(spectrum) {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        let particle = Particle::random(id, &mut self.rng);
        let lifetime = self.rng.gen_range(LIFETIME_RANGE);
        self.live.push(LiveParticle {
            particle,
            expires_at: clock + lifetime,
        });
        Some(id)
    }

    /// Currently animating particles, oldest first.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.live.iter().map(|live| &live.particle)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Drops all live particles, e.g. when the hosting view is torn down.
    pub fn clear(&mut self) {
        self.live.clear();
    }
}

impl Default for ParticleFeed {
    fn default() -> Self {
        Self::new()
    }
}
