use std::sync::{Arc, Mutex};

use axum::Json;
use axum::extract::{Path, RawQuery};
use axum::routing::{get, post};
use serde_json::{Value, json};

use super::*;
use crate::net::types::Severity;
use crate::test_support::{policy, signed_in_app, spawn_api};

#[tokio::test]
async fn policy_calls_use_expected_methods_and_bodies() {
    let seen: Arc<Mutex<Vec<String>>> = Arc::default();
    let (q, put) = (seen.clone(), seen.clone());
    let router = axum::Router::new()
        .route(
            "/api/tag-policies",
            get(move |RawQuery(query): RawQuery| {
                let q = q.clone();
                async move {
                    q.lock().unwrap().push(format!("GET ?{}", query.unwrap_or_default()));
                    Json(vec![policy("pol-1", true)])
                }
            })
            .post(|Json(body): Json<CreateTagPolicyRequest>| async move {
                Json(TagPolicy { name: body.name, ..policy("pol-new", body.enabled) })
            }),
        )
        .route("/api/tag-policies/stats", get(|| async { Json(json!({"total": 3, "enabled": 2, "disabled": 1})) }))
        .route(
            "/api/tag-policies/{id}",
            get(|Path(id): Path<String>| async move { Json(policy(&id, true)) })
                .put(move |Path(id): Path<String>, Json(body): Json<Value>| {
                    let put = put.clone();
                    async move {
                        put.lock().unwrap().push(format!("PUT {body}"));
                        Json(policy(&id, true))
                    }
                })
                .delete(|| async { axum::http::StatusCode::NO_CONTENT }),
        )
        .route("/api/tag-policies/{id}/enable", post(|Path(id): Path<String>| async move { Json(policy(&id, true)) }))
        .route("/api/tag-policies/{id}/disable", post(|Path(id): Path<String>| async move { Json(policy(&id, false)) }));
    let app = signed_in_app(&spawn_api(router).await);
    let policies = &app.ctx.services.tag_policies;

    policies.get_all(Some(true)).await.unwrap();
    policies.get_all(None).await.unwrap();
    assert_eq!(policies.get_by_id("pol-2").await.unwrap().id, "pol-2");

    let created = policies
        .create(&CreateTagPolicyRequest {
            name: "Require cost center".into(),
            description: String::new(),
            required_tags: [("CostCenter".to_owned(), Some(vec!["eng".to_owned()]))].into_iter().collect(),
            resource_types: vec!["s3:bucket".into()],
            severity: Severity::Medium,
            enabled: true,
        })
        .await
        .unwrap();
    assert_eq!(created.name, "Require cost center");

    policies.update("pol-1", &UpdateTagPolicyRequest { enabled: Some(false), ..Default::default() }).await.unwrap();
    assert!(policies.enable("pol-1").await.unwrap().enabled);
    assert!(!policies.disable("pol-1").await.unwrap().enabled);
    policies.delete("pol-1").await.unwrap();
    assert_eq!(policies.get_stats().await.unwrap().disabled, 1);

    assert_eq!(*seen.lock().unwrap(), vec!["GET ?enabled=true", "GET ?", r#"PUT {"enabled":false}"#]);
}
