//! Grid storage for the simulation and for colour images.
//!
//! Grids are row-major with row 0 at the top of the screen and column 0 at the
//! left, matching device-pixel coordinates and WebGPU texture space.

use std::fmt;

use glam::Vec4;

/// Resolution of a grid in cells. Both dimensions are at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Normalized coordinate of the centre of cell `(x, y)`.
    #[inline]
    pub fn cell_uv(&self, x: u32, y: u32) -> [f32; 2] {
        [
            (x as f32 + 0.5) / self.width as f32,
            (y as f32 + 0.5) / self.height as f32,
        ]
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Per-cell simulation state. Laid out as one `Rgba32Float` texel.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Cell {
    pub pressure: f32,
    pub velocity: f32,
    pub grad_x: f32,
    pub grad_y: f32,
}

impl Cell {
    pub const ZERO: Cell = Cell {
        pressure: 0.0,
        velocity: 0.0,
        grad_x: 0.0,
        grad_y: 0.0,
    };

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Cell::ZERO
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    size: GridSize,
    cells: Vec<T>,
}

pub type SimGrid = Grid<Cell>;
pub type ColorGrid = Grid<Vec4>;

impl<T: Copy> Grid<T> {
    pub fn filled(size: GridSize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size.cell_count()],
        }
    }

    /// Builds a grid from row-major cells; `None` if the length does not match.
    pub fn from_cells(size: GridSize, cells: Vec<T>) -> Option<Self> {
        (cells.len() == size.cell_count()).then_some(Self { size, cells })
    }

    #[inline]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> T {
        self.cells[self.size.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: T) {
        let i = self.size.index(x, y);
        self.cells[i] = value;
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }
}

impl SimGrid {
    pub fn zeroed(size: GridSize) -> Self {
        Self::filled(size, Cell::ZERO)
    }

    pub fn is_all_zero(&self) -> bool {
        self.cells.iter().all(Cell::is_zero)
    }

    /// Sum of |pressure| over the grid.
    pub fn total_abs_pressure(&self) -> f32 {
        self.cells.iter().map(|c| c.pressure.abs()).sum()
    }
}

impl ColorGrid {
    /// Decodes tightly packed 8-bit RGBA (as returned by a 2D canvas).
    pub fn from_rgba8(size: GridSize, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != size.cell_count() * 4 {
            return None;
        }
        let cells = bytes
            .chunks_exact(4)
            .map(|px| {
                Vec4::new(
                    px[0] as f32 / 255.0,
                    px[1] as f32 / 255.0,
                    px[2] as f32 / 255.0,
                    px[3] as f32 / 255.0,
                )
            })
            .collect();
        Self::from_cells(size, cells)
    }

    /// Encodes into tightly packed 8-bit RGBA, saturating each channel.
    pub fn write_rgba8(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.cells.len() * 4);
        for c in &self.cells {
            for v in c.to_array() {
                out.push((v.clamp(0.0, 1.0) * 255.0).round() as u8);
            }
        }
    }
}

/// Two equally sized simulation grids; one is read, the other written.
#[derive(Clone, Debug)]
pub struct GridPair {
    grids: [SimGrid; 2],
    current: usize,
}

impl GridPair {
    pub fn new(size: GridSize) -> Self {
        Self {
            grids: [SimGrid::zeroed(size), SimGrid::zeroed(size)],
            current: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> GridSize {
        self.grids[0].size()
    }

    pub fn current(&self) -> &SimGrid {
        &self.grids[self.current]
    }

    /// Borrows `(current, next)` at the same time.
    pub fn split(&mut self) -> (&SimGrid, &mut SimGrid) {
        let (a, b) = self.grids.split_at_mut(1);
        if self.current == 0 {
            (&a[0], &mut b[0])
        } else {
            (&b[0], &mut a[0])
        }
    }

    /// The buffer just written becomes current.
    pub fn swap(&mut self) {
        self.current = 1 - self.current;
    }

    /// Reallocates both grids at `size`; previous contents are discarded.
    pub fn resize(&mut self, size: GridSize) {
        self.grids = [SimGrid::zeroed(size), SimGrid::zeroed(size)];
        self.current = 0;
    }
}
