//! Mouse state for picking operations
//!
//! Converts screen-space cursor positions to Normalized Device Coordinates
//! (NDC) for ray casting and tracks drags.

/// Mouse state for picking operations
#[derive(Debug, Clone)]
pub struct MouseState {
    /// Current screen-space X position (pixels)
    pub screen_x: f64,
    /// Current screen-space Y position (pixels)
    pub screen_y: f64,
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
    /// Drag start position (None if not dragging)
    pub drag_start: Option<(f64, f64)>,
}

impl MouseState {
    /// Create a new mouse state for a window size
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            screen_x: 0.0,
            screen_y: 0.0,
            window_width: window_width.max(1),
            window_height: window_height.max(1),
            drag_start: None,
        }
    }

    /// Convert screen coordinates to Normalized Device Coordinates (NDC)
    ///
    /// NDC range: [-1, 1] where:
    /// - X: -1 = left, +1 = right
    /// - Y: -1 = top, +1 = bottom
    pub fn screen_to_ndc(&self) -> (f32, f32) {
        let ndc_x = (self.screen_x / self.window_width as f64) as f32 * 2.0 - 1.0;
        let ndc_y = (self.screen_y / self.window_height as f64) as f32 * 2.0 - 1.0;
        (ndc_x, ndc_y)
    }

    /// Update mouse position from window events
    pub fn update_position(&mut self, x: f64, y: f64) {
        self.screen_x = x;
        self.screen_y = y;
    }

    /// Update window size (for NDC conversion)
    pub fn update_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width.max(1);
        self.window_height = height.max(1);
    }

    /// Start a drag operation at current mouse position
    pub fn start_drag(&mut self) {
        self.drag_start = Some((self.screen_x, self.screen_y));
    }

    /// End drag operation
    pub fn end_drag(&mut self) {
        self.drag_start = None;
    }

    /// Check if currently dragging (threshold: 5 pixels to distinguish from click)
    pub fn is_dragging(&self) -> bool {
        const DRAG_THRESHOLD: f64 = 5.0;
        self.drag_delta()
            .map(|(dx, dy)| (dx * dx + dy * dy).sqrt() >= DRAG_THRESHOLD)
            .unwrap_or(false)
    }

    /// Pixels moved since the drag started
    pub fn drag_delta(&self) -> Option<(f64, f64)> {
        self.drag_start
            .map(|(start_x, start_y)| (self.screen_x - start_x, self.screen_y - start_y))
    }
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}
