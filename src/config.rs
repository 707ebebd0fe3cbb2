//! Office profile bootstrap.
//!
//! Deployments can ship a YAML office profile (company identity, office
//! coordinates, check-in radius) and seed the settings store with it at
//! startup instead of relying on the built-in defaults. Fields omitted
//! from the file keep their defaults.
//!
//! ```text
//! config/office.yaml
//! ```

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::OfficeSettings;
use crate::store::{SettingsStore, Store};

/// Loads and validates an office profile from a YAML file.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::load_office_profile;
///
/// let settings = load_office_profile("./config/office.yaml")?;
/// println!("geofence radius: {} m", settings.max_radius_m);
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
pub fn load_office_profile<P: AsRef<Path>>(path: P) -> EngineResult<OfficeSettings> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| EngineError::NotFound {
        message: format!("Office profile not found: {}", path_str),
    })?;

    let settings: OfficeSettings =
        serde_yaml::from_str(&content).map_err(|e| EngineError::Validation {
            message: format!("Failed to parse office profile '{}': {}", path_str, e),
        })?;

    settings.validate()?;
    Ok(settings)
}

/// Loads an office profile and saves it as the stored settings.
///
/// Meant for startup wiring; admin updates through the API take over
/// from there.
pub fn seed_settings<P: AsRef<Path>>(store: &dyn Store, path: P) -> EngineResult<OfficeSettings> {
    let settings = load_office_profile(path)?;
    store.save_office_settings(settings.clone())?;
    Ok(settings)
}
