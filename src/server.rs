use crate::api::OpenAiClient;
use crate::error::Result;
use crate::frame::{self, FrameStore};
use crate::scene;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Shared state for the frame-generation endpoint.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<OpenAiClient>,
    pub store: FrameStore,
    pub image_size: String,
}

#[derive(Debug, Deserialize)]
pub struct StoryRequest {
    pub story: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub num_scenes: usize,
    pub frames_folder: String,
}

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/generate-video-frames", post(generate_video_frames))
        .with_state(state)
}

/// Run the HTTP service until the listener is shut down externally.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

async fn generate_video_frames(
    State(state): State<AppState>,
    Json(request): Json<StoryRequest>,
) -> std::result::Result<Json<GenerationResponse>, (StatusCode, String)> {
    let scenes = scene::break_story_into_scenes(&request.story, state.client.as_ref())
        .await
        .map_err(internal_error)?;

    for (idx, scene_text) in scenes.iter().enumerate() {
        frame::render_frame(
            scene_text,
            Some(idx + 1),
            &state.image_size,
            state.client.as_ref(),
            &state.store,
        )
        .await
        .map_err(internal_error)?;
    }

    Ok(Json(GenerationResponse {
        num_scenes: scenes.len(),
        frames_folder: format!("{}/", state.store.dir().display()),
    }))
}

fn internal_error(err: crate::error::FrameError) -> (StatusCode, String) {
    error!("Frame generation failed: {}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
