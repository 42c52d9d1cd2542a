//! Model upload, listing and serving.

use crate::views::{model_url, render_model_index};
use crate::{ApiError, AppState};
use api_shared::ModelEntryRes;
use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use std::io::Cursor;
use twin_files::IncomingModel;

/// Multipart field carrying the model file.
pub const MODEL_FIELD: &str = "model";

#[utoipa::path(
    post,
    path = "/upload-model",
    request_body(content = Object, content_type = "multipart/form-data", description = "Form with a `model` file part"),
    responses(
        (status = 303, description = "Stored; redirects to the model index"),
        (status = 400, description = "Missing file, empty filename or unsupported type", body = String),
        (status = 503, description = "Model storage unavailable")
    )
)]
/// Upload a 3D model file
///
/// Stores the file under a unique name and redirects to `/models`. Only the first `model`
/// file part is used; plain form fields named `model` are ignored.
#[axum::debug_handler]
pub async fn upload_model(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, ApiError> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some(MODEL_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(String::from) else {
            continue;
        };
        let data = field.bytes().await?;
        upload = Some((filename, data));
        break;
    }

    let store = state.store.clone();
    let stored = tokio::task::spawn_blocking(move || {
        store.ingest(upload.map(|(filename, data)| IncomingModel::new(filename, Cursor::new(data))))
    })
    .await??;

    tracing::debug!("upload complete: {}", stored.stored_name());
    Ok(Redirect::to("/models"))
}

#[utoipa::path(
    get,
    path = "/models",
    responses(
        (status = 200, description = "HTML index of stored models", content_type = "text/html"),
        (status = 503, description = "Model storage unavailable")
    )
)]
/// HTML index of stored models
#[axum::debug_handler]
pub async fn list_models(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let store = state.store.clone();
    let entries = tokio::task::spawn_blocking(move || store.list()).await??;
    Ok(Html(render_model_index(&entries)))
}

#[utoipa::path(
    get,
    path = "/api/models",
    responses(
        (status = 200, description = "Stored models", body = [ModelEntryRes]),
        (status = 503, description = "Model storage unavailable")
    )
)]
/// JSON listing of stored models, in index order
#[axum::debug_handler]
pub async fn list_models_json(
    State(state): State<AppState>,
) -> Result<Json<Vec<ModelEntryRes>>, ApiError> {
    let store = state.store.clone();
    let entries = tokio::task::spawn_blocking(move || store.list()).await??;

    Ok(Json(
        entries
            .into_iter()
            .map(|e| ModelEntryRes {
                url: model_url(&e.stored_name),
                stored_name: e.stored_name,
                display_name: e.display_name,
                size_bytes: e.size_bytes,
            })
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/models/{filename}",
    params(("filename" = String, Path, description = "Stored name of the model")),
    responses(
        (status = 200, description = "Model bytes"),
        (status = 404, description = "No such model in the upload folder")
    )
)]
/// Serve one stored model
///
/// The name is sanitised and confined to the upload folder. Anything that does not resolve
/// to a regular file directly inside it is 404.
#[axum::debug_handler]
pub async fn serve_model(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let store = state.store.clone();
    let served = tokio::task::spawn_blocking(move || store.serve(&filename)).await??;

    Ok((
        [
            (header::CONTENT_TYPE, served.content_type),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            (header::CONTENT_DISPOSITION, "inline"),
        ],
        served.bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::{header, StatusCode};
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn upload_redirects_and_lists() {
        let temp = TempDir::new().unwrap();
        let state = state(&temp);

        let res = send(state.clone(), upload("model", Some("arm.gltf"), b"{\"asset\":{}}")).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/models");

        let html = body_text(send(state.clone(), get("/models")).await).await;
        assert!(html.contains(">arm.gltf</a>"));
        assert!(!html.contains("No model files uploaded yet."));

        let json = body_json(send(state, get("/api/models")).await).await;
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["display_name"], "arm.gltf");
        assert_eq!(entries[0]["size_bytes"], 12);
        let stored = entries[0]["stored_name"].as_str().unwrap();
        assert_eq!(entries[0]["url"], format!("/models/{stored}"));
    }

    #[tokio::test]
    async fn empty_folder_shows_empty_state() {
        let temp = TempDir::new().unwrap();
        let res = send(state(&temp), get("/models")).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert!(body_text(res).await.contains("No model files uploaded yet."));
    }

    #[tokio::test]
    async fn unsupported_type_is_400_and_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let res = send(state(&temp), upload("model", Some("notes.txt"), b"hello")).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let text = body_text(res).await;
        assert!(text.starts_with("Unsupported file type. Allowed: "));
        assert!(text.contains(".gltf"));

        let models = temp.path().join("models");
        assert!(!models.exists() || fs::read_dir(&models).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn missing_part_and_empty_filename() {
        let temp = TempDir::new().unwrap();

        let res = send(state(&temp), upload("other", Some("arm.gltf"), b"x")).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(res).await, "No file part 'model' in request");

        let res = send(state(&temp), upload("model", None, b"x")).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(res).await, "No file part 'model' in request");

        let res = send(state(&temp), upload("model", Some(""), b"")).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(res).await, "No selected file");
    }

    #[tokio::test]
    async fn same_name_twice_keeps_both() {
        let temp = TempDir::new().unwrap();
        let state = state(&temp);

        send(state.clone(), upload("model", Some("arm.gltf"), b"first")).await;
        send(state.clone(), upload("model", Some("arm.gltf"), b"second")).await;

        let json = body_json(send(state.clone(), get("/api/models")).await).await;
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e["display_name"] == "arm.gltf"));

        let mut bodies = Vec::new();
        for e in entries {
            let res = send(state.clone(), get(e["url"].as_str().unwrap())).await;
            assert_eq!(res.status(), StatusCode::OK);
            bodies.push(body_bytes(res).await);
        }
        bodies.sort();
        assert_eq!(bodies, vec![b"first".to_vec(), b"second".to_vec()]);
    }

    #[tokio::test]
    async fn served_model_headers() {
        let temp = TempDir::new().unwrap();
        let state = state(&temp);
        send(state.clone(), upload("model", Some("part.glb"), b"glTF\x02\x00\x00\x00")).await;

        let json = body_json(send(state.clone(), get("/api/models")).await).await;
        let url = json[0]["url"].as_str().unwrap().to_owned();
        let res = send(state, get(&url)).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "model/gltf-binary");
        assert_eq!(res.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(res.headers()[header::CONTENT_DISPOSITION], "inline");
        assert_eq!(body_bytes(res).await, b"glTF\x02\x00\x00\x00");
    }

    #[tokio::test]
    async fn traversal_payloads_are_404() {
        let temp = TempDir::new().unwrap();
        let state = state(&temp);
        send(state.clone(), upload("model", Some("arm.gltf"), b"x")).await;
        fs::write(temp.path().join("secret.gltf"), b"secret").unwrap();
        let before: Vec<_> = fs::read_dir(temp.path().join("models"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();

        for uri in [
            "/models/..%2f..%2fetc%2fpasswd",
            "/models/..%2fsecret.gltf",
            "/models/%2Fetc%2Fpasswd",
            "/models/..%5Csecret.gltf",
            "/models/missing.gltf",
        ] {
            let res = send(state.clone(), get(uri)).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body_text(res).await, "Not Found");
        }

        let after: Vec<_> = fs::read_dir(temp.path().join("models"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(before, after);
    }
}
