// Lighting and refraction of the CPU compositor.

use glam::{Vec2, Vec3, Vec4};
use ripple_core::{
    composite, lighting, sample_bilinear, surface_normal, Cell, ColorGrid, CompositeParams,
    GridSize, RippleError, SimGrid,
};

fn assert_vec3_close(actual: Vec3, expected: Vec3) {
    assert!(
        actual.abs_diff_eq(expected, 1e-5),
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn flat_surface_lights_and_tints_background() {
    let params = CompositeParams::default();
    let size = GridSize::new(3, 2);
    let bg = Vec4::new(0.2, 0.6, 1.0, 1.0);
    let out = composite(
        &SimGrid::zeroed(size),
        &ColorGrid::filled(size, bg),
        &params,
    )
    .unwrap();

    // Flat normal (0, 1, 0): diffuse = 2 / sqrt(6), no specular toward the viewer.
    let diffuse = 2.0 / 6.0_f32.sqrt();
    let shade = diffuse * 0.8 + 0.4;
    let expected = (bg.truncate() * shade).lerp(Vec3::new(0.0, 0.3, 0.6), 0.15);
    for c in out.cells() {
        assert_vec3_close(c.truncate(), expected.min(Vec3::ONE));
        assert_eq!(c.w, 1.0);
    }
}

#[test]
fn refraction_samples_shifted_background() {
    let params = CompositeParams::default();
    let size = GridSize::new(10, 1);
    let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
    let blue = Vec4::new(0.0, 0.0, 1.0, 1.0);
    let bg = ColorGrid::from_cells(
        size,
        (0..10).map(|x| if x < 5 { red } else { blue }).collect(),
    )
    .unwrap();

    let mut sim = SimGrid::zeroed(size);
    // u = 0.25 + 20 * 0.03 = 0.85, the centre of texel 8.
    sim.set(
        2,
        0,
        Cell {
            grad_x: 20.0,
            ..Cell::ZERO
        },
    );
    let out = composite(&sim, &bg, &params).unwrap();

    let refracted = out.get(2, 0);
    assert!(refracted.z > 0.5, "{refracted:?}");
    assert!(refracted.x < 0.1, "{refracted:?}");

    let untouched = out.get(1, 0);
    assert!(untouched.x > 0.5 && untouched.z < 0.2, "{untouched:?}");
}

#[test]
fn vertical_gradient_moves_sample_up_the_screen() {
    let params = CompositeParams::default();
    let size = GridSize::new(1, 10);
    let top = Vec4::new(0.0, 1.0, 0.0, 1.0);
    let bottom = Vec4::new(1.0, 0.0, 0.0, 1.0);
    let bg = ColorGrid::from_cells(
        size,
        (0..10).map(|y| if y < 5 { top } else { bottom }).collect(),
    )
    .unwrap();

    let mut sim = SimGrid::zeroed(size);
    // Row 7 sits in the bottom half; a positive grad_y samples from above.
    sim.set(
        0,
        7,
        Cell {
            grad_y: 20.0,
            ..Cell::ZERO
        },
    );
    let out = composite(&sim, &bg, &params).unwrap();
    let c = out.get(0, 7);
    assert!(c.y > c.x, "{c:?}");
}

#[test]
fn sampling_clamps_to_edges() {
    let size = GridSize::new(3, 1);
    let img = ColorGrid::from_cells(size, vec![Vec4::X, Vec4::Y, Vec4::Z]).unwrap();
    assert_eq!(sample_bilinear(&img, Vec2::new(-3.0, 0.5)), Vec4::X);
    assert_eq!(sample_bilinear(&img, Vec2::new(0.0, 0.5)), Vec4::X);
    assert_eq!(sample_bilinear(&img, Vec2::new(4.0, -2.0)), Vec4::Z);
}

#[test]
fn specular_peaks_at_half_vector() {
    let params = CompositeParams::default();
    let half = (params.light_dir + params.view_dir).normalize();
    let (_, specular) = lighting(half, &params);
    assert!(specular > 0.999, "{specular}");

    let (diffuse, specular) = lighting(Vec3::Y, &params);
    assert_eq!(specular, 0.0);
    assert!((diffuse - 2.0 / 6.0_f32.sqrt()).abs() < 1e-6);
}

#[test]
fn steeper_gradients_tilt_the_normal() {
    let params = CompositeParams::default();
    let n = surface_normal(0.5, 0.0, &params);
    assert!(n.is_normalized());
    assert!(n.x < 0.0 && n.z == 0.0);
    assert_vec3_close(n, Vec3::new(-4.0, 1.0, 0.0).normalize());
}

#[test]
fn mismatched_background_is_rejected() {
    let sim = SimGrid::zeroed(GridSize::new(4, 4));
    let bg = ColorGrid::filled(GridSize::new(4, 5), Vec4::ONE);
    let err = composite(&sim, &bg, &CompositeParams::default()).unwrap_err();
    assert_eq!(
        err,
        RippleError::ShapeMismatch {
            expected: GridSize::new(4, 4),
            found: GridSize::new(4, 5),
        }
    );
}
