//! Interaction Settings
//!
//! Tunables for the controller rig and the highlight look.
//!
//! ```rust,ignore
//! use myth_xr::InteractionSettings;
//!
//! // Defaults: two devices, 5 cm selection sphere, cyan highlight
//! let settings = InteractionSettings::default();
//!
//! // Single hand, larger sphere
//! let settings = InteractionSettings::default()
//!     .with_device_count(1)
//!     .with_sphere_radius(0.08);
//!
//! // From a JSON file shipped with the app; missing fields take defaults
//! let settings = InteractionSettings::from_json_str(r#"{ "highlight_opacity": 0.5 }"#)?;
//! ```

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, XrError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Number of tracked input devices (WebXR controller indices `0..n`).
    pub device_count: usize,
    /// Radius of the selection sphere mesh, in meters. Visual only: the
    /// query uses the sphere's centre.
    pub selection_sphere_radius: f32,
    /// Sphere centre in grip space.
    pub selection_sphere_offset: Vec3,
    /// Linear RGBA colour of the shared highlight material.
    pub highlight_color: Vec4,
    pub highlight_opacity: f32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            device_count: 2,
            selection_sphere_radius: 0.05,
            selection_sphere_offset: Vec3::new(0.0, 0.0, -0.05),
            highlight_color: Vec4::new(0.0, 1.0, 1.0, 1.0),
            highlight_opacity: 0.7,
        }
    }
}

impl InteractionSettings {
    #[must_use]
    pub fn with_device_count(mut self, count: usize) -> Self {
        self.device_count = count;
        self
    }

    #[must_use]
    pub fn with_sphere_radius(mut self, radius: f32) -> Self {
        self.selection_sphere_radius = radius;
        self
    }

    #[must_use]
    pub fn with_sphere_offset(mut self, offset: Vec3) -> Self {
        self.selection_sphere_offset = offset;
        self
    }

    #[must_use]
    pub fn with_highlight(mut self, color: Vec4, opacity: f32) -> Self {
        self.highlight_color = color;
        self.highlight_opacity = opacity;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.device_count == 0 {
            return Err(XrError::InvalidSettings("device_count must be at least 1".into()));
        }
        if !(self.selection_sphere_radius.is_finite() && self.selection_sphere_radius > 0.0) {
            return Err(XrError::InvalidSettings(format!(
                "selection_sphere_radius must be positive, got {}",
                self.selection_sphere_radius
            )));
        }
        if !self.selection_sphere_offset.is_finite() {
            return Err(XrError::InvalidSettings("selection_sphere_offset must be finite".into()));
        }
        if !(0.0..=1.0).contains(&self.highlight_opacity) {
            return Err(XrError::InvalidSettings(format!(
                "highlight_opacity must lie in [0, 1], got {}",
                self.highlight_opacity
            )));
        }
        Ok(())
    }

    /// Parses and validates settings from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let settings = InteractionSettings::from_json_str(r#"{ "device_count": 1 }"#).unwrap();
        assert_eq!(settings.device_count, 1);
        assert_eq!(settings.selection_sphere_radius, InteractionSettings::default().selection_sphere_radius);
    }

    #[test]
    fn rejects_zero_devices_and_bad_radius() {
        assert!(matches!(
            InteractionSettings::default().with_device_count(0).validate(),
            Err(XrError::InvalidSettings(_))
        ));
        assert!(matches!(
            InteractionSettings::default().with_sphere_radius(-1.0).validate(),
            Err(XrError::InvalidSettings(_))
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            InteractionSettings::from_json_str("{ device_count: "),
            Err(XrError::JsonError(_))
        ));
    }

    #[test]
    fn json_round_trip_preserves_values() {
        let settings = InteractionSettings::default().with_sphere_radius(0.1);
        let json = settings.to_json_string().unwrap();
        assert_eq!(InteractionSettings::from_json_str(&json).unwrap(), settings);
    }
}
