use std::sync::{Arc, Mutex};

use axum::Json;
use axum::extract::State;
use axum::routing::get;

use super::*;
use crate::test_support::{account, region, signed_in_app, spawn_api};

type Regions = Arc<Mutex<Vec<AwsRegion>>>;

fn api(regions: Regions) -> axum::Router {
    axum::Router::new()
        .route("/api/aws-accounts/{id}", get(|| async { Json(account("acct-1")) }))
        .route(
            "/api/aws-accounts/{id}/regions",
            get(|State(r): State<Regions>| async move { Json(r.lock().unwrap().clone()) }).patch(
                |State(r): State<Regions>, Json(body): Json<serde_json::Value>| async move {
                    let codes: Vec<String> = serde_json::from_value(body["enabledRegionCodes"].clone()).unwrap();
                    let mut regions = r.lock().unwrap();
                    for region in regions.iter_mut() {
                        region.enabled = codes.contains(&region.region_code);
                    }
                    Json(regions.clone())
                },
            ),
        )
        .with_state(regions)
}

#[tokio::test]
async fn select_all_save_reload_enables_everything() {
    let regions: Regions = Arc::new(Mutex::new(vec![region("us-east-1", true), region("eu-central-1", false)]));
    let app = signed_in_app(&spawn_api(api(regions)).await);

    let mut selector = load_selector(&app.ctx, "acct-1").await.unwrap();
    selector.select_all();
    let saved = save(&app.ctx, "acct-1", &mut selector).await.unwrap().unwrap();

    assert!(saved.iter().all(|r| r.enabled));
    assert_eq!(selector.selected_codes(), vec!["eu-central-1", "us-east-1"]);
    assert!(!selector.has_changes());
}

#[tokio::test]
async fn empty_selection_is_not_saved() {
    let regions: Regions = Arc::new(Mutex::new(vec![region("us-east-1", true)]));
    let app = signed_in_app(&spawn_api(api(regions.clone())).await);

    let mut selector = load_selector(&app.ctx, "acct-1").await.unwrap();
    selector.deselect_all();
    assert_eq!(save(&app.ctx, "acct-1", &mut selector).await.unwrap(), None);
    assert!(regions.lock().unwrap()[0].enabled);
}

#[tokio::test]
async fn page_shows_selector_and_help() {
    let regions: Regions = Arc::new(Mutex::new(vec![region("us-east-1", true)]));
    let app = signed_in_app(&spawn_api(api(regions)).await);

    let out = render(&app.ctx, "acct-1").await.unwrap();
    assert!(out.contains("Configure scanning for acct-1-alias"));
    assert!(out.contains("1 / 1 enabled"));
    assert!(out.contains("About Regions"));
}
