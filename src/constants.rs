/// Page integration and GPU presentation constants.
///
/// Kept free of web-sys types so host-side tests can include this file.
// Element the backdrop canvas is appended to
pub const MOUNT_ELEMENT_ID: &str = "cosmic-background";

// Full-viewport black layer behind page content that never takes input
pub const CANVAS_STYLE: &str = "position:fixed;inset:0;width:100vw;height:100vh;\
z-index:-50;pointer-events:none;display:block;background:#000";

// Multisample count for the color target (resolved into the swapchain)
pub const MSAA_SAMPLE_COUNT: u32 = 4;

// Two triangles covering a unit quad centered on the star
pub const STAR_QUAD_CORNERS: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];
