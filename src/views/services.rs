use tracing::{info, instrument, warn};

use super::dto::{DisplayView, IndexView, SlideView};
use crate::devices::{
    decoder::{decode_all, loop_flag},
    services::resolve_recommendations,
};
use crate::error::AppResult;
use crate::items::services::{ready_to_go, resolve_missing_items, show_detail};
use crate::settings::services::get_or_init;
use crate::state::AppState;
use crate::storage::annotated_image_key;
use crate::store::Setting;

const IMAGE_URL_TTL_SECS: u64 = 10 * 60;

pub fn build_index_view(
    setting: Setting,
    image_bucket: &str,
    annotated_image_url: Option<String>,
) -> IndexView {
    IndexView {
        setting,
        image_bucket: image_bucket.to_string(),
        annotated_image_url,
    }
}

/// Index page model: current setting (initialized on first use) and the
/// latest annotated capture of the configured device.
#[instrument(skip(st))]
pub async fn index_view(st: &AppState) -> AppResult<IndexView> {
    let (setting, _) = get_or_init(st).await?;
    let key = annotated_image_key(&setting.device_id);
    let url = match st.storage.presign_get(&key, IMAGE_URL_TTL_SECS).await {
        Ok(url) => Some(url),
        Err(e) => {
            warn!(error = %e, %key, "annotated image url unavailable");
            None
        }
    };
    Ok(build_index_view(setting, &st.config.image_bucket, url))
}

/// Display model for a device; an empty id means the default device.
#[instrument(skip(st))]
pub async fn build_display_view(st: &AppState, device_id: &str) -> DisplayView {
    let device_id = st.config.device_or_default(device_id);
    let (items, timestamp) = resolve_recommendations(st, device_id).await;
    info!(device_id, ?items, "recommendations for device");
    DisplayView {
        recommends: decode_all(&items),
        timestamp,
        looping: loop_flag(&items),
    }
}

/// Display model for recommendation strings supplied by the caller.
pub fn build_display_view_from_contents(contents: &[String]) -> DisplayView {
    DisplayView {
        recommends: decode_all(contents),
        timestamp: String::new(),
        looping: loop_flag(contents),
    }
}

#[instrument(skip(st))]
pub async fn build_slide_view(st: &AppState, item: &str, title: &str, missing_csv: &str) -> SlideView {
    SlideView {
        item: item.to_string(),
        title: title.to_string(),
        show_detail: show_detail(missing_csv),
        missing_items: resolve_missing_items(st, missing_csv).await,
        ready_to_go: ready_to_go(missing_csv, item),
    }
}

#[cfg(test)]
mod view_tests {
    use super::*;
    use crate::devices::decoder::Recommendation;
    use crate::devices::services::ingest_device;
    use crate::store::{Device, Item};

    #[tokio::test]
    async fn display_for_reported_device() {
        let st = AppState::fake();
        ingest_device(
            &st,
            Device {
                device_id: "cam1".into(),
                unixtime: 1_700_000_000,
                objects: vec![],
                recommends: vec![r#"{"title":"Pasta","key":"img1","missingItems":"garlic"}"#.into()],
            },
        )
        .await
        .unwrap();

        let view = build_display_view(&st, "cam1").await;
        assert_eq!(
            view,
            DisplayView {
                recommends: vec![Recommendation {
                    title: "Pasta".into(),
                    key: "img1".into(),
                    missing_items: "garlic".into(),
                }],
                timestamp: "2023-11-14 22:13:20".into(),
                looping: false,
            }
        );
    }

    #[tokio::test]
    async fn display_for_unknown_device_is_never_empty() {
        let st = AppState::fake();
        let view = build_display_view(&st, "nobody").await;
        assert_eq!(view.recommends.len(), 1);
        assert_eq!(view.recommends[0].title, "Healthy salad");
        assert_eq!(view.recommends[0].missing_items, "carrot,paprika,tomato");
        assert!(!view.looping);
        assert!(!view.timestamp.is_empty());
    }

    #[test]
    fn display_from_contents_has_no_timestamp() {
        let contents = vec![
            r#"{"title":"A","key":"a","missingItems":""}"#.to_string(),
            "not json".to_string(),
        ];
        let view = build_display_view_from_contents(&contents);
        assert_eq!(view.recommends.len(), 2);
        assert_eq!(view.recommends[1], Recommendation::default());
        assert!(view.looping);
        assert!(view.timestamp.is_empty());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["loop"], true);
    }

    #[tokio::test]
    async fn slide_with_missing_items() {
        let st = AppState::fake();
        st.store
            .put_item(&Item {
                name: "paprika".into(),
                price: "$2.0".into(),
                location: "D4".into(),
            })
            .await
            .unwrap();

        let view = build_slide_view(&st, "salad", "Healthy salad", "carrot,paprika").await;
        assert!(view.show_detail);
        assert!(!view.ready_to_go);
        assert_eq!(view.missing_items.len(), 2);
        assert_eq!(view.missing_items[0].location, "A1");
        assert_eq!(view.missing_items[1].location, "D4");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["readyToGo"], false);
        assert_eq!(json["missingItems"][1]["price"], "$2.0");
    }

    #[tokio::test]
    async fn slide_ready_when_nothing_missing() {
        let st = AppState::fake();
        let view = build_slide_view(&st, "salad", "Healthy salad", "").await;
        assert!(view.ready_to_go);
        assert!(!view.show_detail);
        assert!(view.missing_items.is_empty());

        let trip = build_slide_view(&st, "supermarket", "", "").await;
        assert!(!trip.ready_to_go);
    }

    #[tokio::test]
    async fn index_view_initializes_setting() {
        let st = AppState::fake();
        let view = index_view(&st).await.unwrap();
        assert_eq!(view.setting.device_id, "picamera01");
        assert_eq!(view.image_bucket, "test-bucket");
        assert_eq!(
            view.annotated_image_url.as_deref(),
            Some("https://fake.local/test-bucket/annotated/picamera01/annotated.jpg")
        );
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["setting"]["deviceId"], "picamera01");
    }

    #[tokio::test]
    async fn views_survive_unreachable_store() {
        let st = AppState::fake_unreachable();

        let display = build_display_view(&st, "cam1").await;
        assert_eq!(display.recommends.len(), 1);
        assert_eq!(display.recommends[0].title, "Healthy salad");
        assert!(!display.looping);

        let slide = build_slide_view(&st, "salad", "Healthy salad", "tomato,carrot").await;
        let names: Vec<_> = slide.missing_items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["tomato", "carrot"]);
        assert!(slide.missing_items.iter().all(|i| i.price == "$1.5" && i.location == "A1"));
        assert!(slide.show_detail);
        assert!(!slide.ready_to_go);

        assert!(index_view(&st).await.is_err());
    }
}
