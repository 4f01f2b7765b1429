//! Particle bursts: sparkles on the start button and confetti for the
//! finale. Generated as plain data, rendered by `components::effects`.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub const SPARKLE_GLYPHS: [&str; 3] = ["✨", "💖", "🌟"];
pub const CONFETTI_GLYPHS: [&str; 3] = ["💖", "✨", "🎉"];
pub const SPARKLE_COUNT: usize = 12;
pub const CONFETTI_COUNT: usize = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Px,
    Percent,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Percent => "%",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Particle {
    pub glyph: &'static str,
    pub left: f64,
    pub top: f64,
    pub unit: Unit,
    pub size_px: f64,
    /// Drift applied once the particle is released, in px.
    pub dx: f64,
    pub dy: f64,
    pub rotate_deg: f64,
}

impl Particle {
    fn drifts(&self) -> bool {
        self.dx != 0.0 || self.dy != 0.0
    }

    /// Inline style before and after release. Drifting particles rotate
    /// and fade on release; static ones keep their rotation throughout.
    pub fn style(&self, released: bool) -> String {
        let u = self.unit.suffix();
        let motion = match (self.drifts(), released) {
            (true, true) => format!(
                "transform:translate({:.1}px, {:.1}px) rotate({:.0}deg); opacity:0;",
                self.dx, self.dy, self.rotate_deg
            ),
            (true, false) => "transform:none; opacity:1;".to_string(),
            (false, _) => format!("transform:rotate({:.0}deg);", self.rotate_deg),
        };
        format!(
            "position:fixed; left:{:.1}{u}; top:{:.1}{u}; font-size:{:.1}px; transition:all 0.9s ease-out; pointer-events:none; z-index:60; {}",
            self.left, self.top, self.size_px, motion
        )
    }
}

fn glyph<R: Rng + ?Sized>(rng: &mut R, set: &[&'static str]) -> &'static str {
    set.choose(rng).copied().unwrap_or("✨")
}

/// Sparkles flying outward from a point in viewport pixels.
pub fn sparkle_burst<R: Rng + ?Sized>(rng: &mut R, center_x: f64, center_y: f64) -> Vec<Particle> {
    (0..SPARKLE_COUNT)
        .map(|_| Particle {
            glyph: glyph(rng, &SPARKLE_GLYPHS),
            left: center_x,
            top: center_y,
            unit: Unit::Px,
            size_px: 10.0 + rng.gen_range(0.0..14.0),
            dx: rng.gen_range(-60.0..60.0),
            dy: -rng.gen_range(0.0..100.0),
            rotate_deg: rng.gen_range(0.0..180.0),
        })
        .collect()
}

/// Confetti scattered over the middle of the viewport.
pub fn confetti_burst<R: Rng + ?Sized>(rng: &mut R) -> Vec<Particle> {
    (0..CONFETTI_COUNT)
        .map(|_| Particle {
            glyph: glyph(rng, &CONFETTI_GLYPHS),
            left: 20.0 + rng.gen_range(0.0..60.0),
            top: 10.0 + rng.gen_range(0.0..60.0),
            unit: Unit::Percent,
            size_px: 10.0 + rng.gen_range(0.0..18.0),
            dx: 0.0,
            dy: 0.0,
            rotate_deg: rng.gen_range(0.0..360.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sparkles_drift_up_and_sideways() {
        let mut rng = StdRng::seed_from_u64(3);
        let burst = sparkle_burst(&mut rng, 100.0, 200.0);
        assert_eq!(burst.len(), SPARKLE_COUNT);
        for p in &burst {
            assert!(SPARKLE_GLYPHS.contains(&p.glyph));
            assert!((-60.0..60.0).contains(&p.dx));
            assert!(p.dy <= 0.0 && p.dy > -100.0);
            assert!((10.0..24.0).contains(&p.size_px));
            assert_eq!((p.left, p.top), (100.0, 200.0));
            assert!(p.style(true).contains("opacity:0"));
        }
    }

    #[test]
    fn confetti_stays_in_central_band() {
        let mut rng = StdRng::seed_from_u64(9);
        let burst = confetti_burst(&mut rng);
        assert_eq!(burst.len(), CONFETTI_COUNT);
        for p in &burst {
            assert!((20.0..80.0).contains(&p.left));
            assert!((10.0..70.0).contains(&p.top));
            assert_eq!(p.unit, Unit::Percent);
            assert!(p.style(true).contains('%'));
        }
    }
}
