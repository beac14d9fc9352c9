//! Error types for folio-fx.

use thiserror::Error;

/// Errors produced by simulation, formatting, and navigation operations.
#[derive(Debug, Error)]
pub enum FxError {
    /// Viewport width/height was negative or non-finite, or the device pixel
    /// ratio was non-finite.
    #[error("invalid viewport: {width}x{height} @ {dpr}x")]
    InvalidViewport { width: f64, height: f64, dpr: f64 },

    /// A particle configuration value would make the grid unbuildable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A counter target attribute was not a non-negative integer.
    #[error("invalid counter target: {0}")]
    InvalidTarget(String),

    /// An index did not name a registered nav link or stat element.
    #[error("{kind} index {index} out of range ({len} registered)")]
    OutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    /// A host drawing call failed (e.g. a canvas 2D context method threw).
    #[error("surface error: {0}")]
    Surface(String),

    /// Snapshot or file output failed.
    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_viewport_includes_dimensions() {
        let err = FxError::InvalidViewport {
            width: -3.0,
            height: 480.0,
            dpr: 2.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("-3"), "missing width in: {msg}");
        assert!(msg.contains("480"), "missing height in: {msg}");
    }

    #[test]
    fn invalid_config_includes_message() {
        let err = FxError::InvalidConfig("density_scale must be positive".into());
        let msg = format!("{err}");
        assert!(msg.contains("density_scale"), "missing message in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let err = FxError::InvalidColor("bad hex".into());
        assert!(format!("{err}").contains("bad hex"));
    }

    #[test]
    fn invalid_target_includes_raw_value() {
        let err = FxError::InvalidTarget("12abc".into());
        assert!(format!("{err}").contains("12abc"));
    }

    #[test]
    fn out_of_range_includes_kind_index_and_len() {
        let err = FxError::OutOfRange {
            kind: "link",
            index: 7,
            len: 4,
        };
        let msg = format!("{err}");
        assert!(msg.contains("link"), "missing kind in: {msg}");
        assert!(msg.contains('7'), "missing index in: {msg}");
        assert!(msg.contains('4'), "missing len in: {msg}");
    }

    #[test]
    fn fx_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FxError>();
    }

    #[test]
    fn fx_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FxError>();
    }
}
