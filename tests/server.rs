//! Web Form Integration Tests
//!
//! Calls the axum handlers directly with a scripted model behind them.

mod common;

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::Form;
use common::{orchestrator, ScriptedModel};
use museum_hunt::server::{generate_handler, health_handler, index_handler, AppState, GenerateForm};

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn state(model: ScriptedModel) -> State<AppState> {
    State(AppState {
        orchestrator: orchestrator(Arc::new(model)),
    })
}

#[tokio::test]
async fn test_index_has_form_fields() {
    let page = index_handler().await.0;

    assert!(page.contains(r#"name="museum_name""#));
    assert!(page.contains(r#"name="num_items" min="5" max="30" step="5" value="5""#));
    assert!(page.contains("Scene Describer"));
}

#[tokio::test]
async fn test_health() {
    assert_eq!(health_handler().await, "ok\n");
}

#[tokio::test]
async fn test_generate_returns_markdown() {
    let response = generate_handler(
        state(ScriptedModel::succeeding(5)),
        Form(GenerateForm {
            museum_name: "Museo Reina Sofia".to_string(),
            num_items: 5,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/markdown; charset=utf-8"
    );

    let body = body_text(response).await;
    assert!(body.starts_with("# Museum Scavenger Hunt: Museo Reina Sofia"));
}

#[tokio::test]
async fn test_generate_reports_model_error_as_text() {
    let response = generate_handler(
        state(ScriptedModel::failing_at(1, "model is loading")),
        Form(GenerateForm {
            museum_name: "El Prado".to_string(),
            num_items: 5,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await,
        "❌ Error: Error generating scavenger hunt: HTTP request failed: model is loading"
    );
}

#[tokio::test]
async fn test_generate_rejects_out_of_range_items() {
    let model = ScriptedModel::succeeding(5);
    let response = generate_handler(
        state(model),
        Form(GenerateForm {
            museum_name: "El Prado".to_string(),
            num_items: 7,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_text(response).await,
        "❌ Error: Number of items must be between 5 and 30 in steps of 5, got 7"
    );
}

#[tokio::test]
async fn test_generate_rejects_blank_museum() {
    let response = generate_handler(
        state(ScriptedModel::succeeding(5)),
        Form(GenerateForm {
            museum_name: "   ".to_string(),
            num_items: 5,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_text(response).await, "❌ Error: Museum name cannot be empty");
}
