use tracing::{debug, info, instrument, warn};

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::store::Item;

pub const PLACEHOLDER_PRICE: &str = "$1.5";
pub const PLACEHOLDER_LOCATION: &str = "A1";

/// Item label of the generic shopping-trip slide.
pub const GO_TO_SUPERMARKET: &str = "supermarket";

fn placeholder_item(name: &str) -> Item {
    Item {
        name: name.to_string(),
        price: PLACEHOLDER_PRICE.into(),
        location: PLACEHOLDER_LOCATION.into(),
    }
}

/// Catalog detail for each comma-separated name, in input order. Names are
/// not trimmed. Misses and lookup failures yield a placeholder item.
#[instrument(skip(st))]
pub async fn resolve_missing_items(st: &AppState, names_csv: &str) -> Vec<Item> {
    if names_csv.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    for name in names_csv.split(',') {
        let item = match st.store.get_item(name).await {
            Ok(Some(item)) => item,
            Ok(None) => {
                debug!(name, "item not in catalog");
                placeholder_item(name)
            }
            Err(e) => {
                warn!(name, error = %e, "item lookup failed");
                placeholder_item(name)
            }
        };
        out.push(item);
    }
    out
}

pub fn show_detail(names_csv: &str) -> bool {
    !names_csv.is_empty()
}

/// Nothing left to buy, and not the shopping-trip placeholder.
pub fn ready_to_go(names_csv: &str, item_label: &str) -> bool {
    names_csv.is_empty() && item_label != GO_TO_SUPERMARKET
}

/// Upserts catalog entries by name. Returns how many were stored.
#[instrument(skip(st, items), fields(count = items.len()))]
pub async fn import_items(st: &AppState, items: Vec<Item>) -> AppResult<usize> {
    if items.iter().any(|i| i.name.is_empty()) {
        return Err(AppError::Invalid("item name is required".into()));
    }
    for item in &items {
        st.store.put_item(item).await?;
    }
    info!(count = items.len(), "items imported");
    Ok(items.len())
}
