//! Shared application-wide constants.
//! Centralizes tweakable values used across drawing, hit-testing and export.

// Vertices
/// Minimum vertex radius in canvas units; labels wider than this grow the circle.
pub const VERTEX_RADIUS: f32 = 30.0;
/// Horizontal padding between a vertex label and the circle outline.
pub const LABEL_PADDING: f32 = 5.0;

// Edges
/// Perpendicular distance within which a click counts as hitting an edge.
pub const EDGE_MARGIN: f32 = 6.0;
/// Distance of an edge label from the line, measured along the segment normal.
pub const EDGE_LABEL_OFFSET: f32 = 14.0;
/// Length of an arrowhead along the edge direction.
pub const ARROW_LENGTH: f32 = 8.0;
/// Half width of an arrowhead across the edge direction.
pub const ARROW_HALF_WIDTH: f32 = 5.0;

// Interaction
/// Axis distance below which a dragged vertex aligns with another vertex.
pub const SNAP_TOLERANCE: f32 = 10.0;

// Text
/// Label font size in canvas units.
pub const FONT_SIZE: f32 = 20.0;
/// Half height of the text caret drawn after a selected label.
pub const CARET_HALF_HEIGHT: f32 = 10.0;

// Export
/// Multiplier applied to canvas coordinates when emitting TikZ.
pub const TIKZ_SCALE: f32 = 0.1;
/// Vertical nudge applied to edge labels anchored above/below in TikZ output.
pub const TIKZ_LABEL_NUDGE: f32 = 10.0;
