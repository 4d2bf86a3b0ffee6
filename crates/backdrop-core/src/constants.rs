// Tuning constants for the backdrop scene. `SceneParams::default()` is built from these.

// Star field
pub const STAR_COUNT: usize = 5000;
pub const STAR_HALF_EXTENT: f32 = 10.0; // stars fill a cube of side 20 centered at the origin
pub const STAR_SIZE: f32 = 0.02; // world-space point size before perspective attenuation
pub const STAR_OPACITY: f32 = 0.8;

// Nebulae
pub const NEBULA_TINTS: [u32; 3] = [
    0x8B5CF6, // violet
    0xC084FC, // light violet
    0xF472B6, // pink
];
pub const NEBULA_BASE_RADIUS: f32 = 2.0;
pub const NEBULA_RADIUS_JITTER: f32 = 1.0;
pub const NEBULA_OPACITY_MIN: f32 = 0.1;
pub const NEBULA_OPACITY_JITTER: f32 = 0.1;
pub const NEBULA_HALF_EXTENT: f32 = 4.0;
pub const NEBULA_SCALE_JITTER: f32 = 0.5;
pub const NEBULA_SEGMENTS: u32 = 32;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Per-frame motion (radians per frame, not per second)
pub const SCENE_SPIN_PER_FRAME: f32 = 0.001;
pub const NEBULA_SPIN_PER_FRAME: [f32; 3] = [0.0005, 0.0003, 0.0007]; // x, y, z; scaled by index + 1

// Twinkle: y += sin(clock + flat_index) * amplitude
pub const TWINKLE_AMPLITUDE: f32 = 0.01;

// Ripple: offset = sin(clock * freq) * amplitude, added to x, y and z
pub const RIPPLE_FREQUENCY: f64 = 10.0;
pub const RIPPLE_AMPLITUDE: f32 = 0.1;

// Point picking distance from the ray, in world units
pub const PICK_THRESHOLD: f32 = 1.0;

// Host page
pub const MIN_SURFACE_DIMENSION: u32 = 1;
