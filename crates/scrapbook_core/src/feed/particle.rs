//! Particle record and randomized appearance parameters.
//!
//! Parameter ranges match the host animation's expectations: positions are
//! percentages of the container width, sizes and amplitudes are in layout
//! units, rotation is in degrees.

use rand::Rng;
use std::ops::Range;

/// Identifier for a spawned particle, unique within one feed.
pub type ParticleId = u64;

/// Horizontal spawn position, percent of container width.
pub const POSITION_RANGE: Range<f32> = 10.0..90.0;
/// Base glyph size, layout units.
pub const SIZE_RANGE: Range<f32> = 15.0..35.0;
/// Peak scale factor applied over the particle's life.
pub const SCALE_RANGE: Range<f32> = 0.8..1.4;
/// Horizontal sway amplitude, layout units.
pub const SWAY_RANGE: Range<f32> = 5.0..15.0;
/// Rotation amplitude, degrees.
pub const ROTATE_RANGE: Range<f32> = 5.0..20.0;
/// Total animation duration, seconds.
pub const LIFETIME_RANGE: Range<f32> = 2.0..3.0;

/// The five-color palette particles draw from, uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    Raspberry,
    HotPink,
    LightPink,
    Blush,
    Rose,
}

impl ParticleColor {
    pub const ALL: [ParticleColor; 5] = [
        Self::Raspberry,
        Self::HotPink,
        Self::LightPink,
        Self::Blush,
        Self::Rose,
    ];

    /// CSS hex value the rendering layer applies.
    pub fn as_hex(self) -> &'static str {
        match self {
            Self::Raspberry => "#e91e63",
            Self::HotPink => "#ff4081",
            Self::LightPink => "#ff80ab",
            Self::Blush => "#f48fb1",
            Self::Rose => "#f06292",
        }
    }
}

/// One decorative particle.
///
/// Immutable after creation; the feed retires it when its animation
/// lifetime elapses.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    /// Percent of container width, within [`POSITION_RANGE`].
    pub horizontal_pos: f32,
    pub base_size: f32,
    pub size_scale: f32,
    pub sway_amplitude: f32,
    pub rotate_amplitude: f32,
    pub color: ParticleColor,
}

impl Particle {
    /// Draws fresh randomized appearance parameters.
    pub fn random(id: ParticleId, rng: &mut impl Rng) -> Self {
        Self {
            id,
            horizontal_pos: rng.gen_range(POSITION_RANGE),
            base_size: rng.gen_range(SIZE_RANGE),
            size_scale: rng.gen_range(SCALE_RANGE),
            sway_amplitude: rng.gen_range(SWAY_RANGE),
            rotate_amplitude: rng.gen_range(ROTATE_RANGE),
            color: ParticleColor::ALL[rng.gen_range(0..ParticleColor::ALL.len())],
        }
    }
}
