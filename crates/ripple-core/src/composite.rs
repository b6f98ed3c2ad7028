//! CPU reference for the lighting and refraction pass.
//!
//! Mirrors `shaders/composite.wgsl`.

use glam::{Vec2, Vec3, Vec4};

use crate::error::{Result, RippleError};
use crate::grid::{ColorGrid, SimGrid};
use crate::params::CompositeParams;

/// Bilinear sample with clamp-to-edge addressing, texel centres at `(i + 0.5) / n`.
pub fn sample_bilinear(image: &ColorGrid, uv: Vec2) -> Vec4 {
    let w = image.width() as i64;
    let h = image.height() as i64;
    let x = uv.x * w as f32 - 0.5;
    let y = uv.y * h as f32 - 0.5;
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let texel = |tx: i64, ty: i64| image.get(tx.clamp(0, w - 1) as u32, ty.clamp(0, h - 1) as u32);
    // Keeps `+ 1` in range for huge or infinite coordinates.
    let (x0, y0) = ((x0 as i64).clamp(-1, w), (y0 as i64).clamp(-1, h));
    let top = texel(x0, y0).lerp(texel(x0 + 1, y0), fx);
    let bottom = texel(x0, y0 + 1).lerp(texel(x0 + 1, y0 + 1), fx);
    top.lerp(bottom, fy)
}

/// Surface normal from the stored pressure gradient (`grad_y` points up).
#[inline]
pub fn surface_normal(grad_x: f32, grad_y: f32, params: &CompositeParams) -> Vec3 {
    Vec3::new(
        -grad_x * params.normal_steepness,
        1.0,
        -grad_y * params.normal_steepness,
    )
    .normalize()
}

#[inline]
fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

/// `(diffuse, specular)` terms for a unit surface normal.
pub fn lighting(normal: Vec3, params: &CompositeParams) -> (f32, f32) {
    let light = params.light_dir;
    let diffuse = normal.dot(light).max(0.0);
    let specular = reflect(-light, normal)
        .dot(params.view_dir)
        .max(0.0)
        .powf(params.specular_power);
    (diffuse, specular)
}

pub fn composite_into(
    sim: &SimGrid,
    background: &ColorGrid,
    out: &mut ColorGrid,
    params: &CompositeParams,
) -> Result<()> {
    let size = sim.size();
    RippleError::check_shape(size, background.size())?;
    RippleError::check_shape(size, out.size())?;

    for y in 0..size.height {
        for x in 0..size.width {
            let cell = sim.get(x, y);
            let [u, v] = size.cell_uv(x, y);
            // Rows run top-down while grad_y points up the screen.
            let offset = Vec2::new(cell.grad_x, -cell.grad_y) * params.refraction;
            let color = sample_bilinear(background, Vec2::new(u, v) + offset).truncate();

            let normal = surface_normal(cell.grad_x, cell.grad_y, params);
            let (diffuse, specular) = lighting(normal, params);
            let lit = color * (diffuse * params.diffuse_scale + params.ambient)
                + Vec3::splat(specular * params.specular_scale);
            let tinted = lit.lerp(params.tint, params.tint_mix);

            out.set(
                x,
                y,
                tinted.clamp(Vec3::ZERO, Vec3::ONE).extend(1.0),
            );
        }
    }
    Ok(())
}

pub fn composite(
    sim: &SimGrid,
    background: &ColorGrid,
    params: &CompositeParams,
) -> Result<ColorGrid> {
    let mut out = ColorGrid::filled(sim.size(), Vec4::W);
    composite_into(sim, background, &mut out, params)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSize;

    #[test]
    fn bilinear_hits_texel_centres_exactly() {
        let size = GridSize::new(2, 1);
        let img = ColorGrid::from_cells(size, vec![Vec4::ZERO, Vec4::ONE]).unwrap();
        assert_eq!(sample_bilinear(&img, Vec2::new(0.25, 0.5)), Vec4::ZERO);
        assert_eq!(sample_bilinear(&img, Vec2::new(0.75, 0.5)), Vec4::ONE);
        assert_eq!(sample_bilinear(&img, Vec2::new(0.5, 0.5)), Vec4::splat(0.5));
    }

    #[test]
    fn flat_normal_points_up() {
        let n = surface_normal(0.0, 0.0, &CompositeParams::default());
        assert_eq!(n, Vec3::Y);
    }
}
