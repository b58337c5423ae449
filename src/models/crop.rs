use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the EcoCrop reference table.
///
/// The load-bearing tolerance ranges are typed; every other column the
/// dataset carries (taxonomy, life form, soil, light, latitude, ...) lands in
/// `attributes` untouched. Serialized with the dataset's own column names so
/// lookup output looks like the source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecord {
    #[serde(rename = "ScientificName")]
    pub scientific_name: String,
    #[serde(rename = "COMNAME")]
    pub common_name: String,
    /// Absolute minimum temperature (°C)
    #[serde(rename = "TMIN")]
    pub t_min: Option<f64>,
    /// Absolute maximum temperature (°C)
    #[serde(rename = "TMAX")]
    pub t_max: Option<f64>,
    /// Absolute minimum annual rainfall (mm)
    #[serde(rename = "RMIN")]
    pub r_min: Option<f64>,
    /// Absolute maximum annual rainfall (mm)
    #[serde(rename = "RMAX")]
    pub r_max: Option<f64>,
    /// Optimal minimum annual rainfall (mm)
    #[serde(rename = "ROPMN")]
    pub rop_min: Option<f64>,
    /// Optimal maximum annual rainfall (mm)
    #[serde(rename = "ROPMX")]
    pub rop_max: Option<f64>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

impl CropRecord {
    pub fn new(scientific_name: impl Into<String>, common_name: impl Into<String>) -> Self {
        Self {
            scientific_name: scientific_name.into(),
            common_name: common_name.into(),
            t_min: None,
            t_max: None,
            r_min: None,
            r_max: None,
            rop_min: None,
            rop_max: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Both temperature bounds, or `None` if either is missing.
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        Some((self.t_min?, self.t_max?))
    }

    pub fn rainfall_range(&self) -> Option<(f64, f64)> {
        Some((self.r_min?, self.r_max?))
    }

    pub fn optimal_rainfall_range(&self) -> Option<(f64, f64)> {
        Some((self.rop_min?, self.rop_max?))
    }

    pub fn requirements(&self) -> CropRequirements {
        CropRequirements {
            t_min: self.t_min,
            t_max: self.t_max,
            r_min: self.r_min,
            r_max: self.r_max,
            rop_min: self.rop_min,
            rop_max: self.rop_max,
        }
    }
}

#[cfg(test)]
impl CropRecord {
    pub fn with_temperature(mut self, min: f64, max: f64) -> Self {
        self.t_min = Some(min);
        self.t_max = Some(max);
        self
    }

    pub fn with_rainfall(mut self, min: f64, max: f64) -> Self {
        self.r_min = Some(min);
        self.r_max = Some(max);
        self
    }

    pub fn with_optimal_rainfall(mut self, min: f64, max: f64) -> Self {
        self.rop_min = Some(min);
        self.rop_max = Some(max);
        self
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }
}

/// The tolerance fields echoed back alongside a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRequirements {
    #[serde(rename = "TMIN")]
    pub t_min: Option<f64>,
    #[serde(rename = "TMAX")]
    pub t_max: Option<f64>,
    #[serde(rename = "RMIN")]
    pub r_min: Option<f64>,
    #[serde(rename = "RMAX")]
    pub r_max: Option<f64>,
    #[serde(rename = "ROPMN")]
    pub rop_min: Option<f64>,
    #[serde(rename = "ROPMX")]
    pub rop_max: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_require_both_bounds() {
        let mut record = CropRecord::new("abelmoschus esculentus", "okra");
        assert!(record.temperature_range().is_none());

        record.t_min = Some(12.0);
        assert!(record.temperature_range().is_none());

        record.t_max = Some(35.0);
        assert_eq!(record.temperature_range(), Some((12.0, 35.0)));
    }

    #[test]
    fn serializes_with_dataset_column_names() {
        let record = CropRecord::new("Abelmoschus esculentus", "okra, lady's finger")
            .with_temperature(12.0, 35.0)
            .with_attribute("LIFO", "herb");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ScientificName"], "Abelmoschus esculentus");
        assert_eq!(json["COMNAME"], "okra, lady's finger");
        assert_eq!(json["TMIN"], 12.0);
        assert_eq!(json["TMAX"], 35.0);
        assert!(json["RMIN"].is_null());
        assert_eq!(json["LIFO"], "herb");
    }

    #[test]
    fn requirements_mirror_record() {
        let record = CropRecord::new("zea mays", "maize")
            .with_temperature(10.0, 47.0)
            .with_rainfall(400.0, 1800.0)
            .with_optimal_rainfall(600.0, 1200.0);

        let req = record.requirements();
        assert_eq!(req.t_min, Some(10.0));
        assert_eq!(req.r_max, Some(1800.0));
        assert_eq!(req.rop_min, Some(600.0));
    }
}
