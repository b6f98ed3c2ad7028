use crate::grid::GridSize;

/// Pointer position in device-pixel grid coordinates (origin top-left).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerState {
    #[default]
    Inactive,
    Active { x: f32, y: f32 },
}

impl PointerState {
    /// Pointer position normalized by the grid resolution.
    pub fn normalized(&self, size: GridSize) -> Option<[f32; 2]> {
        match *self {
            PointerState::Active { x, y } => {
                Some([x / size.width as f32, y / size.height as f32])
            }
            PointerState::Inactive => None,
        }
    }
}
