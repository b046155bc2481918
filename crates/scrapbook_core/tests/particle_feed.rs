use scrapbook_core::feed::particle::{
    LIFETIME_RANGE, POSITION_RANGE, ROTATE_RANGE, SCALE_RANGE, SIZE_RANGE, SWAY_RANGE,
};
use scrapbook_core::feed::spawn::{SPAWN_THRESHOLD, SPECTRUM_BINS};
use scrapbook_core::ParticleFeed;

const FRAME_DT: f32 = 1.0 / 60.0;

fn loud() -> Vec<u8> {
    vec![180; SPECTRUM_BINS]
}

fn quiet() -> Vec<u8> {
    vec![(SPAWN_THRESHOLD as u8) - 40; SPECTRUM_BINS]
}

#[test]
fn sustained_loud_audio_spawns_one_particle_per_frame() {
    let mut feed = ParticleFeed::seeded(1);

    for _ in 0..30 {
        assert!(feed.on_frame(&loud(), FRAME_DT).is_some());
    }
    // All lifetimes are at least 2 s; nothing can have expired in 0.5 s.
    assert_eq!(feed.len(), 30);
}

#[test]
fn every_spawned_particle_is_removed_within_bounded_time() {
    let mut feed = ParticleFeed::seeded(2);

    for _ in 0..120 {
        feed.on_frame(&loud(), FRAME_DT);
    }
    assert_eq!(feed.len(), 120);

    // Silence for longer than the max lifetime retires the entire set.
    let silent_frames = (LIFETIME_RANGE.end / FRAME_DT).ceil() as usize + 1;
    for _ in 0..silent_frames {
        feed.on_frame(&quiet(), FRAME_DT);
    }
    assert!(feed.is_empty());
}

#[test]
fn steady_state_population_stays_bounded_by_spawn_rate_times_lifetime() {
    let mut feed = ParticleFeed::seeded(3);

    // Ten seconds of continuous over-threshold audio at 60 fps.
    let mut max_live = 0;
    for _ in 0..600 {
        feed.on_frame(&loud(), FRAME_DT);
        max_live = max_live.max(feed.len());
    }
    // 60 spawns/s x 3 s max lifetime.
    assert!(max_live <= 180);
    // And with at least 2 s lifetimes the population is substantial.
    assert!(feed.len() >= 120);
}

#[test]
fn live_particles_expose_in_range_parameters() {
    let mut feed = ParticleFeed::seeded(4);

    for _ in 0..60 {
        feed.on_frame(&loud(), FRAME_DT);
    }

    for particle in feed.particles() {
        assert!(POSITION_RANGE.contains(&particle.horizontal_pos));
        assert!(SIZE_RANGE.contains(&particle.base_size));
        assert!(SCALE_RANGE.contains(&particle.size_scale));
        assert!(SWAY_RANGE.contains(&particle.sway_amplitude));
        assert!(ROTATE_RANGE.contains(&particle.rotate_amplitude));
    }
}

#[test]
fn particles_are_never_mutated_after_spawn() {
    let mut feed = ParticleFeed::seeded(5);

    let id = feed.on_frame(&loud(), FRAME_DT).unwrap();
    let spawned = feed.particles().next().unwrap().clone();

    for _ in 0..10 {
        feed.on_frame(&loud(), FRAME_DT);
    }

    let still_live = feed
        .particles()
        .find(|particle| particle.id == id)
        .expect("particle is within its minimum lifetime");
    assert_eq!(*still_live, spawned);
}

#[test]
fn feed_without_audio_produces_an_empty_sequence_forever() {
    let mut feed = ParticleFeed::new();

    for _ in 0..300 {
        assert!(feed.on_frame(&[], FRAME_DT).is_none());
    }
    assert!(feed.is_empty());
    assert_eq!(feed.particles().count(), 0);
}
