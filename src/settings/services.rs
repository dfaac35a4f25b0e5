use tracing::{info, instrument};

use crate::config::DEFAULT_DEVICE_ID;
use crate::error::AppResult;
use crate::state::AppState;
use crate::store::{Setting, SETTING_KEY};

pub const DEFAULT_SEASON: &str = "spring";
pub const DEFAULT_PERIOD: &str = "morning";

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

pub fn default_setting(st: &AppState) -> Setting {
    Setting {
        season: DEFAULT_SEASON.into(),
        period: DEFAULT_PERIOD.into(),
        device_id: st.config.default_device_id.clone(),
    }
}

/// Reads the singleton setting, persisting the defaults on first access.
///
/// The read and the initializing write are not atomic: two concurrent first
/// requests both write the same defaults and the last write wins.
#[instrument(skip(st))]
pub async fn get_or_init(st: &AppState) -> AppResult<(Setting, bool)> {
    if let Some(setting) = st.store.get_setting(SETTING_KEY).await? {
        return Ok((setting, false));
    }

    let setting = default_setting(st);
    st.store.put_setting(SETTING_KEY, &setting).await?;
    info!(?setting, "initialized default setting");
    Ok((setting, true))
}

/// Overwrites the whole setting. Empty fields are replaced by the built-in
/// defaults, not the environment-configured device.
#[instrument(skip(st))]
pub async fn update(
    st: &AppState,
    season: &str,
    period: &str,
    device_id: &str,
) -> AppResult<Setting> {
    let setting = Setting {
        season: or_default(season, DEFAULT_SEASON),
        period: or_default(period, DEFAULT_PERIOD),
        device_id: or_default(device_id, DEFAULT_DEVICE_ID),
    };
    st.store.put_setting(SETTING_KEY, &setting).await?;
    info!(?setting, "setting updated");
    Ok(setting)
}

#[cfg(test)]
mod settings_tests {
    use super::*;
    use crate::error::AppError;
    use std::sync::Arc;

    #[tokio::test]
    async fn first_read_persists_defaults() {
        let st = AppState::fake();
        let (setting, is_new) = get_or_init(&st).await.unwrap();
        assert!(is_new);
        assert_eq!(setting.season, "spring");
        assert_eq!(setting.period, "morning");
        assert_eq!(setting.device_id, "picamera01");
        assert_eq!(st.store.get_setting(SETTING_KEY).await.unwrap(), Some(setting));
    }

    #[tokio::test]
    async fn get_or_init_is_idempotent() {
        let st = AppState::fake();
        let (first, _) = get_or_init(&st).await.unwrap();
        let (second, is_new) = get_or_init(&st).await.unwrap();
        assert!(!is_new);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn update_replaces_empty_fields_with_defaults() {
        let st = AppState::fake();
        update(&st, "winter", "evening", "cam9").await.unwrap();

        let setting = update(&st, "", "", "").await.unwrap();
        assert_eq!(setting, default_setting(&st));
        let (stored, _) = get_or_init(&st).await.unwrap();
        assert_eq!(stored, setting);
    }

    #[tokio::test]
    async fn update_keeps_supplied_fields() {
        let st = AppState::fake();
        let setting = update(&st, "autumn", "", "cam1").await.unwrap();
        assert_eq!(setting.season, "autumn");
        assert_eq!(setting.period, "morning");
        assert_eq!(setting.device_id, "cam1");
    }

    #[tokio::test]
    async fn update_ignores_environment_device_default() {
        let mut st = AppState::fake();
        let mut config = (*st.config).clone();
        config.default_device_id = "shelf-east".into();
        st.config = Arc::new(config);

        let setting = update(&st, "", "", "").await.unwrap();
        assert_eq!(setting.device_id, "picamera01");
    }

    #[tokio::test]
    async fn lookup_failure_is_not_treated_as_missing() {
        let st = AppState::fake_unreachable();
        let err = get_or_init(&st).await.unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
        let err = update(&st, "summer", "evening", "cam1").await.unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
    }
}
