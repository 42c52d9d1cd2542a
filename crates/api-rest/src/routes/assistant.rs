//! Assistant endpoints. No model is attached; see `twin_core::assistant`.

use crate::upstream::geocode;
use crate::{ApiError, AppState};
use api_shared::{AiObjectRes, AiQueryRes, DriveAction, ErrorRes};
use axum::{extract::State, Json};
use twin_core::assistant::{classify_object, parse_command, AiObjectReq, AiQueryReq, Command};

#[utoipa::path(
    post,
    path = "/ai_query",
    request_body(content = Object, description = "`{\"message\": ...}` or legacy `{\"query\": ...}`"),
    responses(
        (status = 200, description = "Assistant reply", body = AiQueryRes),
        (status = 400, description = "No message provided", body = ErrorRes),
        (status = 500, description = "Geocoding failed", body = ErrorRes)
    )
)]
/// Send a message to the assistant
///
/// `drive to <place>` geocodes the place; a `lat lon` pair drives straight there. Anything
/// else is echoed back unhandled.
#[axum::debug_handler]
pub async fn ai_query(
    State(state): State<AppState>,
    req: Option<Json<AiQueryReq>>,
) -> Result<Json<AiQueryRes>, ApiError> {
    let message = req
        .as_ref()
        .and_then(|Json(r)| r.text())
        .map(str::to_owned)
        .ok_or_else(|| ApiError::BadRequest("No message provided".into()))?;

    let res = match parse_command(&message) {
        Command::DriveTo { place } => {
            match geocode(&state.http, state.cfg.nominatim_url(), &place).await? {
                Some(hit) => AiQueryRes {
                    message: format!(
                        "Driving to {}",
                        hit.display_name.as_deref().unwrap_or(&place)
                    ),
                    success: true,
                    action: Some(DriveAction::drive(hit.lat, hit.lon)),
                },
                None => AiQueryRes {
                    message: format!("Location not found: {place}"),
                    success: false,
                    action: None,
                },
            }
        }
        Command::Coordinates { lat, lon } => AiQueryRes {
            message,
            success: true,
            action: Some(DriveAction::drive(lat, lon)),
        },
        Command::Unrecognised => AiQueryRes {
            message: format!("AI not configured. Received: {message}"),
            success: false,
            action: None,
        },
    };

    Ok(Json(res))
}

#[utoipa::path(
    post,
    path = "/ai/object",
    request_body(content = Object, description = "`{\"object\": {\"model\": ..., \"type\": ...}}`"),
    responses(
        (status = 200, description = "Classification and suggested actions", body = AiObjectRes),
        (status = 400, description = "No object provided", body = ErrorRes)
    )
)]
/// Classify a scene object and suggest actions
#[axum::debug_handler]
pub async fn ai_object(req: Option<Json<AiObjectReq>>) -> Result<Json<AiObjectRes>, ApiError> {
    let object = req
        .and_then(|Json(r)| r.object)
        .ok_or_else(|| ApiError::BadRequest("No object provided".into()))?;

    Ok(Json(classify_object(&object)))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_message_is_400() {
        let temp = TempDir::new().unwrap();
        for body in ["{}", r#"{"message": ""}"#, "not json"] {
            let res = send(state(&temp), post_json("/ai_query", body)).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(body_json(res).await["error"], "No message provided");
        }
    }

    #[tokio::test]
    async fn coordinates_drive_directly() {
        let temp = TempDir::new().unwrap();
        let res = send(
            state(&temp),
            post_json("/ai_query", r#"{"message": "6.5244 3.3792"}"#),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "6.5244 3.3792");
        assert_eq!(json["action"]["type"], "drive");
        assert_eq!(json["action"]["lat"], 6.5244);
        assert_eq!(json["action"]["lon"], 3.3792);
    }

    #[tokio::test]
    async fn legacy_query_falls_back() {
        let temp = TempDir::new().unwrap();
        let res = send(state(&temp), post_json("/ai_query", r#"{"query": "hello"}"#)).await;

        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "AI not configured. Received: hello");
        assert!(json.get("action").is_none());
    }

    #[tokio::test]
    async fn object_classification() {
        let temp = TempDir::new().unwrap();
        let res = send(
            state(&temp),
            post_json("/ai/object", r#"{"object": {"model": "sedan.glb"}}"#),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["classification"], "car");
        assert!(json["suggestions"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("drive")));
        assert!(json["ai"].is_null());
    }

    #[tokio::test]
    async fn missing_object_is_400() {
        let temp = TempDir::new().unwrap();
        let res = send(state(&temp), post_json("/ai/object", "{}")).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["error"], "No object provided");
    }
}
