pub mod backdrop;
pub mod camera;
pub mod color;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod lifecycle;
pub mod pick;
pub mod scene;

pub use backdrop::*;
pub use camera::*;
pub use color::Rgb;
pub use constants::*;
pub use error::BackdropError;
pub use geometry::{uv_sphere, Mesh};
pub use lifecycle::{with_slot, LoopHandle, LoopToken, SlotAccess};
pub use pick::{pick_points, PointHit, PointHits, Ray};
pub use scene::*;

// Shaders bundled as string constants
pub static BACKDROP_WGSL: &str = include_str!("../shaders/backdrop.wgsl");
