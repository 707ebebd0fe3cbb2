//! Office settings model.
//!
//! Exactly one settings document exists; it is created lazily with
//! defaults on first access and only ever mutated by admin updates.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Lower bound for the configurable check-in radius, in meters.
pub const MIN_RADIUS_M: f64 = 10.0;
/// Upper bound for the configurable check-in radius, in meters.
pub const MAX_RADIUS_M: f64 = 5000.0;

/// The singleton office configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfficeSettings {
    /// Company display name.
    pub company_name: String,
    /// Company street address.
    pub company_address: String,
    /// Nominal workday start, as an "HH:MM" string.
    pub work_start: String,
    /// Nominal workday end, as an "HH:MM" string.
    pub work_end: String,
    /// Office latitude in decimal degrees.
    pub office_latitude: f64,
    /// Office longitude in decimal degrees.
    pub office_longitude: f64,
    /// Maximum check-in distance from the office, in meters.
    pub max_radius_m: f64,
}

impl Default for OfficeSettings {
    fn default() -> Self {
        Self {
            company_name: "PT Nusantara Teknologi".to_string(),
            company_address: "Jl. Jend. Sudirman Kav. 52, Jakarta".to_string(),
            work_start: "08:00".to_string(),
            work_end: "17:00".to_string(),
            office_latitude: -6.2,
            office_longitude: 106.816666,
            max_radius_m: 100.0,
        }
    }
}

impl OfficeSettings {
    /// Checks the coordinate and radius ranges.
    pub fn validate(&self) -> EngineResult<()> {
        if !(-90.0..=90.0).contains(&self.office_latitude) {
            return Err(EngineError::validation(
                "Latitude must be between -90 and 90.",
            ));
        }
        if !(-180.0..=180.0).contains(&self.office_longitude) {
            return Err(EngineError::validation(
                "Longitude must be between -180 and 180.",
            ));
        }
        if !(MIN_RADIUS_M..=MAX_RADIUS_M).contains(&self.max_radius_m) {
            return Err(EngineError::validation(
                "Radius must be between 10 and 5000 meters.",
            ));
        }
        Ok(())
    }

    /// Applies a partial update, validating the result.
    ///
    /// Fields absent from the update are left unchanged. The update is
    /// rejected wholesale if the resulting settings are out of range.
    pub fn apply(&mut self, update: SettingsUpdate) -> EngineResult<()> {
        let mut next = self.clone();
        if let Some(company_name) = update.company_name {
            next.company_name = company_name;
        }
        if let Some(company_address) = update.company_address {
            next.company_address = company_address;
        }
        if let Some(work_start) = update.work_start {
            next.work_start = work_start;
        }
        if let Some(work_end) = update.work_end {
            next.work_end = work_end;
        }
        if let Some(office_latitude) = update.office_latitude {
            next.office_latitude = office_latitude;
        }
        if let Some(office_longitude) = update.office_longitude {
            next.office_longitude = office_longitude;
        }
        if let Some(max_radius_m) = update.max_radius_m {
            next.max_radius_m = max_radius_m;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// A partial update to [`OfficeSettings`]. `None` fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    /// New company name, if changing.
    #[serde(default)]
    pub company_name: Option<String>,
    /// New company address, if changing.
    #[serde(default)]
    pub company_address: Option<String>,
    /// New nominal workday start, if changing.
    #[serde(default)]
    pub work_start: Option<String>,
    /// New nominal workday end, if changing.
    #[serde(default)]
    pub work_end: Option<String>,
    /// New office latitude, if changing.
    #[serde(default)]
    pub office_latitude: Option<f64>,
    /// New office longitude, if changing.
    #[serde(default)]
    pub office_longitude: Option<f64>,
    /// New check-in radius, if changing.
    #[serde(default)]
    pub max_radius_m: Option<f64>,
}
