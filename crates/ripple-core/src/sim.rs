//! CPU reference for one step of the wave simulation.
//!
//! `shaders/simulation.wgsl` implements the same rule per fragment; keep the two
//! in sync.

use crate::error::{Result, RippleError};
use crate::grid::{Cell, GridSize, SimGrid};
use crate::params::SimParams;
use crate::pointer::PointerState;

/// Neighbour index with a reflective (Neumann) boundary: the missing side takes
/// the opposite neighbour, and a 1-wide axis reads the cell itself.
#[inline]
fn neighbours(i: u32, n: u32) -> (u32, u32) {
    if n == 1 {
        return (i, i);
    }
    let lo = if i == 0 { i + 1 } else { i - 1 };
    let hi = if i == n - 1 { i - 1 } else { i + 1 };
    (lo, hi)
}

#[inline]
fn guard(v: f32, limit: f32) -> f32 {
    if v.is_finite() {
        v.clamp(-limit, limit)
    } else {
        0.0
    }
}

/// Pointer excitation for a cell centre, as `(pressure, velocity)` increments.
pub fn pointer_impulse(
    pointer: PointerState,
    size: GridSize,
    x: u32,
    y: u32,
    params: &SimParams,
) -> Option<(f32, f32)> {
    let [mu, mv] = pointer.normalized(size)?;
    let [u, v] = size.cell_uv(x, y);
    let dist = ((u - mu).powi(2) + (v - mv).powi(2)).sqrt();
    if dist < params.pointer_radius {
        let strength = params.pointer_pressure_impulse * (1.0 - dist / params.pointer_radius);
        Some((strength, strength * params.pointer_velocity_ratio))
    } else {
        None
    }
}

/// Writes the state after one step of `current` into `next`.
///
/// Frame 0 clears `next` regardless of `current`.
pub fn step_into(
    current: &SimGrid,
    next: &mut SimGrid,
    pointer: PointerState,
    frame: u64,
    params: &SimParams,
) -> Result<()> {
    RippleError::check_shape(current.size(), next.size())?;
    write_step(current, next, pointer, frame, params);
    Ok(())
}

/// Allocating variant of [`step_into`].
pub fn step(current: &SimGrid, pointer: PointerState, frame: u64, params: &SimParams) -> SimGrid {
    let mut next = SimGrid::zeroed(current.size());
    write_step(current, &mut next, pointer, frame, params);
    next
}

/// Step kernel; `next` must have the shape of `current`.
fn write_step(
    current: &SimGrid,
    next: &mut SimGrid,
    pointer: PointerState,
    frame: u64,
    params: &SimParams,
) {
    let size = current.size();
    if frame == 0 {
        next.fill(Cell::ZERO);
        return;
    }

    for y in 0..size.height {
        let (up, down) = neighbours(y, size.height);
        for x in 0..size.width {
            let (left, right) = neighbours(x, size.width);
            let c = current.get(x, y);
            let p_left = current.get(left, y).pressure;
            let p_right = current.get(right, y).pressure;
            let p_up = current.get(x, up).pressure;
            let p_down = current.get(x, down).pressure;

            let laplacian = p_right + p_left + p_up + p_down - 4.0 * c.pressure;
            let mut velocity = (c.velocity + params.delta * laplacian) * params.velocity_damping;
            let mut pressure = (c.pressure + params.delta * velocity) * params.damping;

            if let Some((dp, dv)) = pointer_impulse(pointer, size, x, y, params) {
                pressure += dp;
                velocity += dv;
            }

            next.set(
                x,
                y,
                Cell {
                    pressure: guard(pressure, params.max_amplitude),
                    velocity: guard(velocity, params.max_amplitude),
                    grad_x: 0.5 * (p_right - p_left),
                    grad_y: 0.5 * (p_up - p_down),
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_mirror_at_edges() {
        assert_eq!(neighbours(0, 4), (1, 1));
        assert_eq!(neighbours(3, 4), (2, 2));
        assert_eq!(neighbours(2, 4), (1, 3));
        assert_eq!(neighbours(0, 1), (0, 0));
    }

    #[test]
    fn guard_replaces_non_finite_values() {
        assert_eq!(guard(f32::NAN, 10.0), 0.0);
        assert_eq!(guard(f32::INFINITY, 10.0), 0.0);
        assert_eq!(guard(-25.0, 10.0), -10.0);
        assert_eq!(guard(3.0, 10.0), 3.0);
    }

    #[test]
    fn allocating_step_matches_step_into() {
        let size = GridSize::new(5, 3);
        let mut cur = SimGrid::zeroed(size);
        cur.set(2, 1, Cell { pressure: 1.0, ..Cell::ZERO });
        let params = SimParams::default();
        let pointer = PointerState::Active { x: 0.5, y: 0.5 };
        let mut next = SimGrid::zeroed(size);
        step_into(&cur, &mut next, pointer, 3, &params).unwrap();
        assert_eq!(step(&cur, pointer, 3, &params), next);
        assert!(!next.is_all_zero());
    }

    #[test]
    fn mismatched_next_buffer_is_rejected() {
        let cur = SimGrid::zeroed(GridSize::new(4, 4));
        let mut next = SimGrid::zeroed(GridSize::new(3, 4));
        let err = step_into(&cur, &mut next, PointerState::Inactive, 1, &SimParams::default());
        assert!(matches!(err, Err(RippleError::ShapeMismatch { .. })));
    }
}
