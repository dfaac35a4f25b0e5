use time::{macros::format_description, OffsetDateTime, UtcOffset};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::store::Device;

/// Shown whenever a device has nothing to recommend.
pub const PLACEHOLDER_RECOMMENDATION: &str = r#"{"title":"Healthy salad","key":"bowl-bright-close-up-248509","missingItems":"carrot,paprika,tomato"}"#;

fn display_offset(st: &AppState) -> UtcOffset {
    let hours = st.config.display_utc_offset_hours;
    UtcOffset::from_hms(hours, 0, 0).unwrap_or_else(|e| {
        warn!(hours, error = %e, "display offset out of range; using UTC");
        UtcOffset::UTC
    })
}

fn format_timestamp(at: OffsetDateTime, offset: UtcOffset) -> String {
    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    at.to_offset(offset).format(&fmt).unwrap_or_else(|e| {
        warn!(error = %e, "timestamp formatting failed");
        String::new()
    })
}

/// Keyed device lookup; a missing device is `Ok(None)`.
#[instrument(skip(st))]
pub async fn resolve_device(st: &AppState, device_id: &str) -> AppResult<Option<Device>> {
    Ok(st.store.get_device(device_id).await?)
}

/// Raw recommendation strings and display timestamp for a device, or the
/// placeholder stamped with the current time. Never returns an empty list.
#[instrument(skip(st))]
pub async fn resolve_recommendations(st: &AppState, device_id: &str) -> (Vec<String>, String) {
    let offset = display_offset(st);

    match resolve_device(st, device_id).await {
        Ok(Some(device)) if !device.recommends.is_empty() => {
            match OffsetDateTime::from_unix_timestamp(device.unixtime) {
                Ok(at) => {
                    debug!(count = device.recommends.len(), "device recommendations");
                    return (device.recommends, format_timestamp(at, offset));
                }
                Err(e) => warn!(unixtime = device.unixtime, error = %e, "device unixtime out of range"),
            }
        }
        Ok(_) => debug!("no recommendations for device"),
        Err(e) => error!(error = %e, "device lookup failed; using placeholder"),
    }

    (
        vec![PLACEHOLDER_RECOMMENDATION.to_string()],
        format_timestamp(OffsetDateTime::now_utc(), offset),
    )
}

/// Device record for the polling front end. Empty id means the default device.
#[instrument(skip(st))]
pub async fn lookup_device(st: &AppState, device_id: &str) -> AppResult<Option<Device>> {
    resolve_device(st, st.config.device_or_default(device_id)).await
}

/// Stores the latest report of a device, replacing the previous one.
#[instrument(skip(st, device), fields(device_id = %device.device_id))]
pub async fn ingest_device(st: &AppState, device: Device) -> AppResult<()> {
    if device.device_id.is_empty() {
        return Err(AppError::Invalid("deviceId is required".into()));
    }
    st.store.put_device(&device).await?;
    info!(
        recommends = device.recommends.len(),
        objects = device.objects.len(),
        "device report stored"
    );
    Ok(())
}
