use serde::Serialize;

/// One reading from the location source.
///
/// When no reading is available the logger falls back to `Fix::default()`,
/// i.e. `0.0 / 0.0` without accuracy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f32>,
}

impl Fix {
    pub fn new(latitude: f64, longitude: f64, accuracy: Option<f32>) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
        }
    }

    /// Build a fix from optional CLI coordinates.
    /// A missing coordinate becomes `0.0`.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>, acc: Option<f32>) -> Self {
        Self::new(lat.unwrap_or(0.0), lon.unwrap_or(0.0), acc)
    }

    /// `false` when any component is `NaN` or infinite.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.accuracy.is_none_or(f32::is_finite)
    }

    pub fn describe(&self) -> String {
        match self.accuracy {
            Some(a) => format!("{:.6}, {:.6} (±{:.0} m)", self.latitude, self.longitude, a),
            None => format!("{:.6}, {:.6}", self.latitude, self.longitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_coordinates_fall_back_to_zero() {
        let fix = Fix::from_parts(Some(45.1), None, None);
        assert_eq!(fix.latitude, 45.1);
        assert_eq!(fix.longitude, 0.0);
        assert_eq!(fix.accuracy, None);
    }

    #[test]
    fn describe_includes_accuracy_when_known() {
        let fix = Fix::new(1.5, -2.25, Some(8.0));
        assert_eq!(fix.describe(), "1.500000, -2.250000 (±8 m)");
    }

    #[test]
    fn nan_or_infinite_components_are_not_finite() {
        assert!(Fix::new(45.0, 7.0, Some(3.0)).is_finite());
        assert!(!Fix::new(f64::NAN, 7.0, None).is_finite());
        assert!(!Fix::new(45.0, f64::NEG_INFINITY, None).is_finite());
        assert!(!Fix::new(45.0, 7.0, Some(f32::NAN)).is_finite());
    }
}
