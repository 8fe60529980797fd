//! # View Flags
//!
//! Presentation state read by the render step each frame. Nothing in the
//! terrain library looks at these except `noclip`, which the walker uses
//! to skip collision and ground clamping.
//!
//! ## Key Bindings
//!
//! | Key     | Effect                |
//! |---------|-----------------------|
//! | `space` | cursor visibility     |
//! | `1`     | shadows               |
//! | `2`     | day / night           |
//! | `3`     | flashlight            |
//! | `m`     | materials             |
//! | `n`     | noclip                |
//! | `l`     | wireframe             |
//! | `t`     | filled polygons       |
//! | `p`     | points                |

/// Polygon rasterization mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillMode {
    /// Filled triangles.
    #[default]
    Fill,
    /// Edges only.
    Line,
    /// Vertices only.
    Point,
}

/// Toggleable presentation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ViewFlags {
    /// Spotlight attached to the camera.
    pub flashlight: bool,
    /// Free flight: no collision, no ground clamping.
    pub noclip: bool,
    /// Shadow mapping.
    pub shadows: bool,
    /// Per-object materials.
    pub materials: bool,
    /// Day skybox and lighting (night otherwise).
    pub daytime: bool,
    /// OS cursor shown (captured otherwise).
    pub cursor_visible: bool,
    /// Polygon mode.
    pub fill: FillMode,
}

impl Default for ViewFlags {
    fn default() -> Self {
        Self {
            flashlight: true,
            noclip: false,
            shadows: true,
            materials: true,
            daytime: true,
            cursor_visible: true,
            fill: FillMode::Fill,
        }
    }
}

impl ViewFlags {
    /// Flips the flashlight.
    pub fn toggle_flashlight(&mut self) {
        self.flashlight = !self.flashlight;
    }

    /// Flips free flight.
    pub fn toggle_noclip(&mut self) {
        self.noclip = !self.noclip;
        tracing::debug!(noclip = self.noclip, "noclip toggled");
    }

    /// Flips shadows.
    pub fn toggle_shadows(&mut self) {
        self.shadows = !self.shadows;
    }

    /// Flips materials.
    pub fn toggle_materials(&mut self) {
        self.materials = !self.materials;
    }

    /// Flips between day and night.
    pub fn toggle_daytime(&mut self) {
        self.daytime = !self.daytime;
    }

    /// Flips cursor visibility.
    pub fn toggle_cursor(&mut self) {
        self.cursor_visible = !self.cursor_visible;
    }

    /// Applies a key press. Returns false for unbound keys.
    pub fn on_key(&mut self, key: char) -> bool {
        match key.to_ascii_lowercase() {
            ' ' => self.toggle_cursor(),
            '1' => self.toggle_shadows(),
            '2' => self.toggle_daytime(),
            '3' => self.toggle_flashlight(),
            'm' => self.toggle_materials(),
            'n' => self.toggle_noclip(),
            'l' => self.fill = FillMode::Line,
            't' => self.fill = FillMode::Fill,
            'p' => self.fill = FillMode::Point,
            _ => return false,
        }
        true
    }
}
