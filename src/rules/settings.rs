//! Office settings operations.

use crate::error::EngineResult;
use crate::models::{OfficeSettings, Principal, SettingsUpdate};
use crate::store::{SettingsStore, Store};

/// Returns the office settings, creating defaults on first access.
///
/// Readable by any authenticated caller; the office location and radius
/// are not secrets, and the check-in screen needs them.
pub fn fetch(store: &dyn Store) -> EngineResult<OfficeSettings> {
    store.office_settings()
}

/// Applies a partial settings update (admin), validating coordinate and
/// radius ranges before anything is persisted.
pub fn update(
    store: &dyn Store,
    principal: &Principal,
    update: SettingsUpdate,
) -> EngineResult<OfficeSettings> {
    principal.require_admin()?;
    let mut settings = store.office_settings()?;
    settings.apply(update)?;
    store.save_office_settings(settings.clone())?;
    Ok(settings)
}
