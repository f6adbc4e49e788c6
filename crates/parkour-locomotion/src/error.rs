use parkour_core::CurveError;

/// Errors raised when building a locomotion controller.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("wall-run max speed {max} must exceed the trigger threshold {threshold}")]
    WallRunSpeedRange { threshold: f32, max: f32 },

    #[error("shell offset must be within [0, 1), got {0}")]
    ShellOffset(f32),

    #[error("wall probe extension must be at least 1, got {0}")]
    ProbeExtension(f32),

    #[error("invalid capsule: radius {radius}, height {height}")]
    InvalidBody { radius: f32, height: f32 },

    #[error("slope curve: {0}")]
    SlopeCurve(#[from] CurveError),
}
