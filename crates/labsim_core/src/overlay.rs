//! Renderer overlay toggles carried in each snapshot

use bitflags::bitflags;

bitflags! {
    /// Optional layers a renderer may draw on top of a demonstration
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Overlays: u8 {
        /// Force arrows on the block
        const FORCES = 1 << 0;
        /// Recent projectile positions
        const TRAIL = 1 << 1;
        /// Ideal parabola computed at launch
        const PREDICTED_PATH = 1 << 2;
        /// Derivative curve next to the function
        const DERIVATIVE = 1 << 3;
        /// Tangent segment at the probe point
        const TANGENT = 1 << 4;
        /// Rise-over-run triangle
        const SLOPE_TRIANGLE = 1 << 5;
        /// Midpoint rectangles
        const RECTANGLES = 1 << 6;
        /// Shaded exact area under the curve
        const EXACT_AREA = 1 << 7;
    }
}
