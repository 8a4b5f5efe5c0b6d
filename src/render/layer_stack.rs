use serde::{Deserialize, Serialize};

/// Draw layers of one chart frame, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Grid,
    Series,
    /// Transparent pointer-capture region over the plot.
    Overlay,
    /// Guide line and point markers.
    Crosshair,
    /// Tooltip label boxes and text.
    Tooltip,
}

impl CanvasLayerKind {
    /// Canonical bottom-to-top order.
    pub const ORDERED: [Self; 6] = [
        Self::Background,
        Self::Grid,
        Self::Series,
        Self::Overlay,
        Self::Crosshair,
        Self::Tooltip,
    ];
}
