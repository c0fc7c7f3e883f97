//! Burst and confetti models.
//!
//! These only describe the motion; drawing them is up to the front end.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const BURST_PARTICLES: usize = 10;
pub const CONFETTI_COLORS: [&str; 3] = ["#FFD700", "#FF0000", "#FFA500"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub origin: (f32, f32),
    /// Radians
    pub angle: f32,
    /// Pixels travelled over the full lifetime
    pub velocity: f32,
    pub lifetime: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleFrame {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
}

impl Particle {
    /// Where the particle is `elapsed` after the burst, or `None` once it has
    /// faded out.
    pub fn at(&self, elapsed: Duration) -> Option<ParticleFrame> {
        if self.lifetime.is_zero() {
            return None;
        }

        let progress = elapsed.as_secs_f32() / self.lifetime.as_secs_f32();
        if progress >= 1.0 {
            return None;
        }

        let distance = self.velocity * progress;
        Some(ParticleFrame {
            x: self.origin.0 + self.angle.cos() * distance,
            y: self.origin.1 + self.angle.sin() * distance,
            opacity: 1.0 - progress,
        })
    }
}

/// Ring of particles thrown out from a revealed number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Burst {
    pub position: usize,
    pub particles: Vec<Particle>,
}

impl Burst {
    pub fn new<R: Rng + ?Sized>(position: usize, x: f32, y: f32, rng: &mut R) -> Self {
        let particles = (0..BURST_PARTICLES)
            .map(|i| Particle {
                origin: (x, y),
                angle: (i as f32 * 36.0).to_radians(),
                velocity: 100.0 + rng.gen_range(0.0..50.0),
                lifetime: Duration::from_millis(500 + rng.gen_range(0..500)),
            })
            .collect();

        Self {
            position,
            particles,
        }
    }

    /// Longest particle lifetime; the burst is over after this.
    pub fn duration(&self) -> Duration {
        self.particles
            .iter()
            .map(|p| p.lifetime)
            .max()
            .unwrap_or_default()
    }

    /// Visible particles at `elapsed`.
    pub fn frame(&self, elapsed: Duration) -> Vec<ParticleFrame> {
        self.particles.iter().filter_map(|p| p.at(elapsed)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Emitter {
    /// Degrees
    pub angle: f32,
    pub spread: f32,
    /// 0.0 is the left edge, 1.0 the right
    pub origin_x: f32,
    pub particle_count: u32,
}

/// Finale shown once every number is revealed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confetti {
    pub duration: Duration,
    pub emitters: Vec<Emitter>,
    pub colors: Vec<String>,
}

impl Default for Confetti {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(3),
            emitters: vec![
                Emitter {
                    angle: 60.0,
                    spread: 55.0,
                    origin_x: 0.0,
                    particle_count: 3,
                },
                Emitter {
                    angle: 120.0,
                    spread: 55.0,
                    origin_x: 1.0,
                    particle_count: 3,
                },
            ],
            colors: CONFETTI_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Confetti {
    /// Fire times for a front end refreshing every `interval`. Both emitters
    /// fire on each frame, the last one at or after `duration`.
    pub fn frames(&self, interval: Duration) -> impl Iterator<Item = Duration> {
        let interval = interval.max(Duration::from_millis(1));
        let count = (self.duration.as_nanos() / interval.as_nanos()) as u32 + 1;
        (0..count).map(move |k| interval * k)
    }

    pub fn particles_per_frame(&self) -> u32 {
        self.emitters.iter().map(|e| e.particle_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_burst_shape() {
        let mut rng = StdRng::seed_from_u64(9);
        let burst = Burst::new(2, 50.0, 50.0, &mut rng);

        assert_eq!(burst.position, 2);
        assert_eq!(burst.particles.len(), BURST_PARTICLES);
        for (i, p) in burst.particles.iter().enumerate() {
            assert!((p.angle - (i as f32 * 36.0).to_radians()).abs() < 1e-6);
            assert!((100.0..150.0).contains(&p.velocity));
            assert!(p.lifetime >= Duration::from_millis(500));
            assert!(p.lifetime < Duration::from_millis(1000));
        }
        assert!(burst.duration() < Duration::from_millis(1000));
    }

    #[test]
    fn test_particle_fades() {
        let p = Particle {
            origin: (0.0, 0.0),
            angle: 0.0,
            velocity: 100.0,
            lifetime: Duration::from_millis(500),
        };

        let half = p.at(Duration::from_millis(250)).unwrap();
        assert!((half.x - 50.0).abs() < 1e-3);
        assert!(half.y.abs() < 1e-3);
        assert!((half.opacity - 0.5).abs() < 1e-3);

        assert!(p.at(Duration::from_millis(500)).is_none());
    }

    #[test]
    fn test_zero_lifetime_is_invisible() {
        let p = Particle {
            origin: (0.0, 0.0),
            angle: 0.0,
            velocity: 100.0,
            lifetime: Duration::ZERO,
        };
        assert!(p.at(Duration::ZERO).is_none());
    }

    #[test]
    fn test_confetti_schedule() {
        let confetti = Confetti::default();
        let frames: Vec<Duration> = confetti.frames(Duration::from_millis(500)).collect();

        assert_eq!(frames.len(), 7);
        assert_eq!(frames[0], Duration::ZERO);
        assert_eq!(*frames.last().unwrap(), Duration::from_secs(3));
        assert_eq!(confetti.particles_per_frame(), 6);
    }
}
