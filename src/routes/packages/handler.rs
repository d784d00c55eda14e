use axum::{Json, extract::State};
use tracing::info;

use crate::{
    AppState,
    error::AppError,
    extract::{RowPolicy, parse_packages},
};

use super::model::PackageList;

/// 缓存命中与否的主流程，/ 和 /now 都走这里
pub async fn get_packages(state: &AppState, use_cache: bool) -> Result<PackageList, AppError> {
    // 整个读改写过程持锁，并发请求不会互相覆盖缓存
    let mut cache = state.cache.lock().await;

    // 超过缓存窗口就刷新时间戳，需要走缓存时顺带作废旧页面
    if cache.is_expired(state.config.cache_window()) {
        cache.touch();
        if use_cache {
            cache.clear_page();
        }
    }

    let cached = if use_cache {
        cache.page().map(str::to_string)
    } else {
        None
    };
    let home = match cached {
        Some(page) => {
            info!("CACHE: CACHE");
            page
        }
        None => {
            info!("CACHE: DIRECT");
            state.portal.login().await?;
            let page = state.portal.fetch_home().await?;
            // /now 也会写缓存，和上游行为保持一致
            cache.store(page.clone());
            page
        }
    };

    if !state.portal.is_logged_in() {
        // 未登录抓到的页面里没有包裹数据，不能留在缓存里挡住后续请求
        cache.clear_page();
        return Ok(PackageList::initial_state());
    }
    drop(cache);

    let policy = if state.config.skip_malformed_rows {
        RowPolicy::Skip
    } else {
        RowPolicy::IncludeEmpty
    };

    Ok(PackageList {
        items: parse_packages(&home, policy),
        logged_in: Some(true),
    })
}

#[axum::debug_handler]
pub async fn list_packages(State(state): State<AppState>) -> Result<Json<PackageList>, AppError> {
    Ok(Json(get_packages(&state, true).await?))
}

#[axum::debug_handler]
pub async fn list_packages_now(
    State(state): State<AppState>,
) -> Result<Json<PackageList>, AppError> {
    Ok(Json(get_packages(&state, false).await?))
}

#[axum::debug_handler]
pub async fn clear_cache(State(state): State<AppState>) -> &'static str {
    state.cache.lock().await.clear_page();
    "OK"
}
