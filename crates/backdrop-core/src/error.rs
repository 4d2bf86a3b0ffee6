/// Failures the backdrop can hit. None of them reach the host page; they are logged.
#[derive(Debug, thiserror::Error)]
pub enum BackdropError {
    /// The host could not create or attach a drawing surface.
    #[error("rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// No GPU adapter matched the surface.
    #[error("no compatible GPU adapter found")]
    Adapter,

    /// Device request failed.
    #[error("failed to request GPU device: {0}")]
    Device(String),

    /// A frame could not be drawn.
    #[error("render failed: {0}")]
    Render(String),
}
