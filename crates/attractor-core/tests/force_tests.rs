use attractor_core::forces::attractor::{force_on, ForceMode, ForceParams, TargetSource};
use attractor_core::particle::Particle;
use glam::{Vec3, Vec4};
use rand::rngs::SmallRng;
use rand::SeedableRng;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Unit constants: G = 1 and both masses 1, so `|F| = 1 / d²`.
fn unit_params(bounds: f32, far_threshold: f32) -> ForceParams {
    ForceParams {
        g: 1.0,
        g_repel: 1.0,
        bounds,
        far_threshold,
        mass_scale_attract: 1.0,
        mass_scale_repel: 1.0,
        mass_scale_mesh: 1.0,
        degenerate_epsilon: 1e-4,
        jitter_extent: 0.01,
    }
}

fn origin_particle() -> Particle {
    Particle::new(Vec3::ZERO, 1.0, Vec4::ONE, 0).unwrap()
}

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(42)
}

fn force(target: Vec3, mode: ForceMode, params: &ForceParams) -> Vec3 {
    force_on(&origin_particle(), target, mode, TargetSource::Pointer, params, &mut rng())
}

fn assert_finite(v: Vec3, label: &str) {
    assert!(v.is_finite(), "{label}: non-finite force {:?}", v);
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_attract_far_target_is_capped() {
    let params = unit_params(1.0, 5.0);
    let f = force(Vec3::new(10.0, 0.0, 0.0), ForceMode::Attract, &params);

    assert!((f.length() - 1.0 / 25.0).abs() < 1e-6, "|F| = {}", f.length());
    assert!(f.x > 0.0);
    assert_eq!(f.y, 0.0);
    assert_eq!(f.z, 0.0);
}

#[test]
fn test_repel_inside_bounds_pushes_away() {
    let params = unit_params(5.0, 10.0);
    let f = force(Vec3::new(3.0, 0.0, 0.0), ForceMode::Repel, &params);

    assert!(f.x < 0.0, "repel should point along -x, got {:?}", f);
    assert_eq!(f.y, 0.0);
    assert_eq!(f.z, 0.0);
    // Inside the near plateau the magnitude uses d = bounds.
    assert!((f.length() - 1.0 / 25.0).abs() < 1e-6);
}

#[test]
fn test_repel_outside_bounds_is_zero() {
    let params = unit_params(5.0, 10.0);
    let f = force(Vec3::new(7.0, 0.0, 0.0), ForceMode::Repel, &params);
    assert_eq!(f, Vec3::ZERO);
}

// ---------------------------------------------------------------------------
// Force law
// ---------------------------------------------------------------------------

#[test]
fn test_inverse_square_falloff() {
    let params = unit_params(1.0, 100.0);
    for dir in [Vec3::X, Vec3::NEG_Y, Vec3::new(1.0, 2.0, -2.0).normalize()] {
        let near = force(dir * 4.0, ForceMode::Attract, &params).length();
        let far = force(dir * 8.0, ForceMode::Attract, &params).length();
        let ratio = near / far;
        assert!((ratio - 4.0).abs() < 1e-3, "dir {:?}: ratio {}", dir, ratio);
    }
}

#[test]
fn test_attract_inside_bounds_is_suppressed() {
    let params = unit_params(2.0, 10.0);
    for d in [0.5, 1.0, 1.99] {
        let f = force(Vec3::new(d, 0.0, 0.0), ForceMode::Attract, &params);
        assert_eq!(f, Vec3::ZERO, "distance {d} inside bounds should give zero");
    }
}

#[test]
fn test_attract_at_bounds_is_full_strength() {
    let params = unit_params(2.0, 10.0);
    let f = force(Vec3::new(2.0, 0.0, 0.0), ForceMode::Attract, &params);
    assert!((f.length() - 0.25).abs() < 1e-6);
}

#[test]
fn test_far_clamp_not_extrapolated() {
    let params = unit_params(2.0, 10.0);
    let at_cap = force(Vec3::new(10.0, 0.0, 0.0), ForceMode::Attract, &params);
    for d in [10.5, 20.0, 1000.0] {
        let f = force(Vec3::new(d, 0.0, 0.0), ForceMode::Attract, &params);
        assert_eq!(f.length(), at_cap.length(), "distance {d}");
    }
}

#[test]
fn test_idle_mode_is_zero() {
    let params = unit_params(1.0, 10.0);
    for target in [Vec3::ZERO, Vec3::X * 0.5, Vec3::X * 3.0, Vec3::X * 50.0] {
        assert_eq!(force(target, ForceMode::Idle, &params), Vec3::ZERO);
    }
}

#[test]
fn test_force_scales_with_particle_mass_squared() {
    let params = unit_params(1.0, 100.0);
    let target = Vec3::new(3.0, 0.0, 0.0);
    let light = Particle::new(Vec3::ZERO, 1.0, Vec4::ONE, 0).unwrap();
    let heavy = Particle::new(Vec3::ZERO, 2.0, Vec4::ONE, 1).unwrap();

    let f1 = force_on(&light, target, ForceMode::Attract, TargetSource::Pointer, &params, &mut rng());
    let f2 = force_on(&heavy, target, ForceMode::Attract, TargetSource::Pointer, &params, &mut rng());

    // mass2 is a multiple of mass1, so F grows with m1².
    assert!((f2.length() / f1.length() - 4.0).abs() < 1e-4);
}

#[test]
fn test_mass_scale_by_mode_and_source() {
    let params = ForceParams {
        mass_scale_attract: 10.0,
        mass_scale_repel: 3.0,
        mass_scale_mesh: 20.0,
        ..unit_params(1.0, 10.0)
    };
    assert_eq!(params.mass_scale(ForceMode::Attract, TargetSource::Pointer), 10.0);
    assert_eq!(params.mass_scale(ForceMode::Attract, TargetSource::Mesh), 20.0);
    assert_eq!(params.mass_scale(ForceMode::Repel, TargetSource::Pointer), 3.0);
    assert_eq!(params.mass_scale(ForceMode::Repel, TargetSource::Mesh), 3.0);

    let target = Vec3::new(4.0, 0.0, 0.0);
    let p = origin_particle();
    let pointer = force_on(&p, target, ForceMode::Attract, TargetSource::Pointer, &params, &mut rng());
    let mesh = force_on(&p, target, ForceMode::Attract, TargetSource::Mesh, &params, &mut rng());
    assert!((mesh.length() / pointer.length() - 2.0).abs() < 1e-5);
}

#[test]
fn test_default_repel_uses_its_own_constant() {
    let params = ForceParams::default();
    assert_eq!(params.force_constant(ForceMode::Repel), 0.05);
    assert_eq!(params.force_constant(ForceMode::Attract), 1.0);

    // d = 5 sits inside bounds (15), so the magnitude uses d = 15.
    let f = force(Vec3::new(5.0, 0.0, 0.0), ForceMode::Repel, &params);
    let expected = 0.05 * 3.0 / (15.0 * 15.0);
    assert!(f.x < 0.0);
    assert!((f.length() - expected).abs() < 1e-9, "|F| = {}, expected {}", f.length(), expected);
}

#[test]
fn test_repel_constant_does_not_affect_attract() {
    let params = ForceParams {
        g_repel: 0.5,
        ..unit_params(1.0, 100.0)
    };
    let attract = force(Vec3::new(4.0, 0.0, 0.0), ForceMode::Attract, &params);
    let repel = force(Vec3::new(0.5, 0.0, 0.0), ForceMode::Repel, &params);
    assert!((attract.length() - 1.0 / 16.0).abs() < 1e-6);
    // Repel inside bounds: d clamped to 1.
    assert!((repel.length() - 0.5).abs() < 1e-6);
}

// ---------------------------------------------------------------------------
// Degenerate geometry
// ---------------------------------------------------------------------------

#[test]
fn test_coincident_target_never_nan() {
    let params = unit_params(1.0, 10.0);
    let p = Particle::new(Vec3::new(2.0, -1.0, 0.5), 1.0, Vec4::ONE, 0).unwrap();
    for seed in 0..200 {
        for mode in [ForceMode::Attract, ForceMode::Repel] {
            let mut rng = SmallRng::seed_from_u64(seed);
            let f = force_on(&p, p.curr_pos, mode, TargetSource::Pointer, &params, &mut rng);
            assert_finite(f, &format!("seed {seed}, {mode:?}"));
        }
    }
}

#[test]
fn test_coincident_repel_uses_seeded_jitter() {
    let params = unit_params(1.0, 10.0);
    let p = origin_particle();

    let a = force_on(&p, Vec3::ZERO, ForceMode::Repel, TargetSource::Pointer, &params, &mut SmallRng::seed_from_u64(9));
    let b = force_on(&p, Vec3::ZERO, ForceMode::Repel, TargetSource::Pointer, &params, &mut SmallRng::seed_from_u64(9));
    assert_eq!(a, b, "same seed must give the same jitter");

    // Jitter components are non-negative, so the push is toward -x/-y/-z.
    assert!(a.x <= 0.0 && a.y <= 0.0 && a.z <= 0.0, "{:?}", a);
    assert!((a.length() - 1.0).abs() < 1e-4, "plateau magnitude 1/bounds², got {}", a.length());
}

#[test]
fn test_coincident_attract_is_suppressed() {
    // Jitter keeps the particle well inside bounds, so attraction is off.
    let params = unit_params(1.0, 10.0);
    let f = force(Vec3::ZERO, ForceMode::Attract, &params);
    assert_eq!(f, Vec3::ZERO);
}
