/// DOM-facing constants for the mounted surface.
///
/// Simulation tuning lives in `backdrop_core::constants`; this file only
/// holds what the browser binding needs.
// Canvas element layout: fill the container box, never affect flow
pub const CANVAS_LAYOUT_STYLE: &str =
    "position:absolute;inset:0;width:100%;height:100%;display:block";

// Context id passed to `getContext`
pub const CONTEXT_2D: &str = "2d";

// Event names
pub const POINTER_MOVE_EVENT: &str = "pointermove";
pub const RESIZE_EVENT: &str = "resize";
