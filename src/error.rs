//! Error types for configuration and persistence.
//!
//! The per-frame simulation has no failure modes: out-of-range numbers are
//! clamped in place.  Errors only arise at the I/O edges (reading the config,
//! loading or writing the player save) and are logged there, never fatal.

use thiserror::Error;

/// Top-level error enum for Void Prospector.
#[derive(Debug, Error)]
pub enum ProspectorError {
    /// Reading or writing a file failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A TOML document could not be parsed or did not match the expected shape.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value could not be serialised to TOML.
    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A save document is structurally unusable even after additive migration.
    #[error("save migration failed: {0}")]
    Migration(String),

    /// A configuration constant is outside its safe operating range.
    #[error("constant '{name}' = {value} is outside safe range {safe_range}")]
    UnsafeConstant {
        name: &'static str,
        value: f32,
        safe_range: &'static str,
    },
}

/// Convenience alias: a `Result` using `ProspectorError` as the error type.
pub type ProspectorResult<T> = Result<T, ProspectorError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Friction must be in `(0, 1)`; at 1.0 or above velocity never converges.
pub fn validate_friction(value: f32) -> ProspectorResult<()> {
    if value <= 0.0 || value >= 1.0 {
        Err(ProspectorError::UnsafeConstant {
            name: "FRICTION",
            value,
            safe_range: "(0.0, 1.0)",
        })
    } else {
        Ok(())
    }
}

/// Zoom bounds must be positive and ordered.
pub fn validate_zoom_range(min: f32, max: f32) -> ProspectorResult<()> {
    if min <= 0.0 {
        return Err(ProspectorError::UnsafeConstant {
            name: "ZOOM_MIN",
            value: min,
            safe_range: "(0.0, ZOOM_MAX]",
        });
    }
    if max < min {
        return Err(ProspectorError::UnsafeConstant {
            name: "ZOOM_MAX",
            value: max,
            safe_range: "[ZOOM_MIN, ∞)",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friction_bounds() {
        assert!(validate_friction(0.96).is_ok());
        assert!(validate_friction(0.0).is_err());
        assert!(validate_friction(1.0).is_err());
    }

    #[test]
    fn unsafe_constant_message_names_the_constant() {
        let err = validate_friction(1.5).unwrap_err();
        assert!(err.to_string().contains("FRICTION"));
    }
}
