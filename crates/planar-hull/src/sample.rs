//! Seeded point clouds for demos, benches, and tests.
//!
//! Purpose
//! - Reproduce the interactive tool's "random fill": uniform integer draws in
//!   a box with a minimum separation, where a draw that lands too close to an
//!   accepted point is discarded (so fewer than `count` points may come back).
//!   Continuous draws are available for scale tests (`integral: false`).
//! - Integer-grid and circle samplers for exact-arithmetic tests and worst
//!   cases (every point on the hull).
//!
//! Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use std::collections::HashSet;

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::HullError;

/// Uniform box sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SampleCfg {
    /// Number of draws (accepted points may be fewer).
    pub count: usize,
    pub width: f64,
    pub height: f64,
    /// Draws closer than this to an accepted point are dropped. `<= 0` disables the check.
    pub min_separation: f64,
    /// Integer coordinates in `0..=floor(extent)`; repeated draws are always dropped.
    pub integral: bool,
}

impl Default for SampleCfg {
    fn default() -> Self {
        Self {
            count: 30,
            width: 800.0,
            height: 450.0,
            min_separation: 12.0,
            integral: true,
        }
    }
}

impl SampleCfg {
    fn validate(&self) -> Result<(), HullError> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(HullError::invalid_cfg("box extents must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(HullError::invalid_cfg("box extents must be > 0"));
        }
        if !self.min_separation.is_finite() {
            return Err(HullError::invalid_cfg("min_separation must be finite"));
        }
        Ok(())
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64) -> Self {
        Self { seed, index: 0 }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer on both fields.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Uniform points in `[0, width] × [0, height]` with rejection by separation.
pub fn sample_points(cfg: SampleCfg, tok: ReplayToken) -> Result<Vec<Vector2<f64>>, HullError> {
    cfg.validate()?;
    let mut rng = tok.to_std_rng();
    let sep2 = cfg.min_separation * cfg.min_separation;
    let (wi, hi) = (cfg.width.floor() as i64, cfg.height.floor() as i64);
    let mut seen: HashSet<(i64, i64)> = HashSet::new();
    let mut out: Vec<Vector2<f64>> = Vec::with_capacity(cfg.count);
    for _ in 0..cfg.count {
        let p = if cfg.integral {
            let (x, y) = (rng.gen_range(0..=wi), rng.gen_range(0..=hi));
            if !seen.insert((x, y)) {
                continue;
            }
            Vector2::new(x as f64, y as f64)
        } else {
            Vector2::new(rng.gen_range(0.0..=cfg.width), rng.gen_range(0.0..=cfg.height))
        };
        let clashes =
            cfg.min_separation > 0.0 && out.iter().any(|q| (p - q).norm_squared() < sep2);
        if !clashes {
            out.push(p);
        }
    }
    Ok(out)
}

/// Distinct integer points in `[-span, span]²`; `count` is capped by the grid size.
pub fn sample_grid_points(count: usize, span: u32, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let side = 2 * span as usize + 1;
    let count = count.min(side * side);
    let mut rng = tok.to_std_rng();
    let s = span as i64;
    let mut seen: HashSet<(i64, i64)> = HashSet::with_capacity(count);
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let (x, y) = (rng.gen_range(-s..=s), rng.gen_range(-s..=s));
        if seen.insert((x, y)) {
            out.push(Vector2::new(x as f64, y as f64));
        }
    }
    out
}

/// Points on a circle at jittered angles (all in convex position).
pub fn sample_circle_points(count: usize, radius: f64, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let delta = std::f64::consts::TAU / count.max(1) as f64;
    (0..count)
        .map(|k| {
            let th = (k as f64 + rng.gen_range(0.0..0.5)) * delta;
            Vector2::new(radius * th.cos(), radius * th.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_sampler_replays_and_respects_separation() {
        let cfg = SampleCfg::default();
        let a = sample_points(cfg, ReplayToken::new(5)).unwrap();
        let b = sample_points(cfg, ReplayToken::new(5)).unwrap();
        assert_eq!(a, b);
        assert!(!a.is_empty() && a.len() <= cfg.count);
        for (i, p) in a.iter().enumerate() {
            assert!(p.x >= 0.0 && p.x <= cfg.width && p.y >= 0.0 && p.y <= cfg.height);
            for q in &a[i + 1..] {
                assert!((p - q).norm() >= cfg.min_separation);
            }
        }
        let c = sample_points(cfg, ReplayToken { seed: 5, index: 1 }).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn integral_draws_are_whole_and_distinct() {
        let cfg = SampleCfg {
            count: 400,
            width: 10.0,
            height: 10.0,
            min_separation: 0.0,
            integral: true,
        };
        let pts = sample_points(cfg, ReplayToken::new(8)).unwrap();
        assert!(pts.len() <= 121);
        let set: HashSet<(i64, i64)> = pts.iter().map(|p| (p.x as i64, p.y as i64)).collect();
        assert_eq!(set.len(), pts.len());
        assert!(pts.iter().all(|p| p.x.fract() == 0.0 && p.y.fract() == 0.0));
    }

    #[test]
    fn continuous_draws_stay_in_a_small_box() {
        let cfg = SampleCfg {
            count: 50,
            width: 0.01,
            height: 0.01,
            min_separation: 0.0,
            integral: false,
        };
        let pts = sample_points(cfg, ReplayToken::new(8)).unwrap();
        assert_eq!(pts.len(), 50);
        assert!(pts.iter().all(|p| (0.0..=0.01).contains(&p.x) && (0.0..=0.01).contains(&p.y)));
    }

    #[test]
    fn box_sampler_rejects_bad_cfg() {
        let cfg = SampleCfg {
            width: 0.0,
            ..SampleCfg::default()
        };
        assert!(matches!(
            sample_points(cfg, ReplayToken::new(1)),
            Err(HullError::InvalidSampleCfg { .. })
        ));
    }

    #[test]
    fn grid_sampler_is_distinct_and_capped() {
        let pts = sample_grid_points(100, 2, ReplayToken::new(3));
        assert_eq!(pts.len(), 25);
        let set: HashSet<(i64, i64)> = pts.iter().map(|p| (p.x as i64, p.y as i64)).collect();
        assert_eq!(set.len(), 25);
    }

    #[test]
    fn circle_sampler_radius() {
        let pts = sample_circle_points(64, 3.0, ReplayToken::new(9));
        assert_eq!(pts.len(), 64);
        assert!(pts.iter().all(|p| (p.norm() - 3.0).abs() < 1e-9));
    }
}
