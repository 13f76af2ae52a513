use crate::entity::external;
use crate::entity::helpers;
use crate::error::ModelError;
use crate::repository::{
    self, BioAttributes, EventAttributes, SessionAttributes, SpeakerAttributes,
};
use anyhow::Context;
use axum::extract::Path;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};
use log::{debug, error, info};
use sea_orm::DatabaseConnection;

type Rejection = (StatusCode, String);

#[derive(Clone)]
pub struct ServerConfig {
    pub database_connection: DatabaseConnection,
}

pub fn router(database_connection: DatabaseConnection) -> Router {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).patch(update_event).delete(delete_event),
        )
        .route("/events/{id}/sessions", get(list_event_sessions))
        .route("/sessions", get(list_sessions).post(create_session))
        .route(
            "/sessions/{id}",
            get(get_session).patch(update_session).delete(delete_session),
        )
        .route("/sessions/{id}/speakers", get(list_session_speakers))
        .route(
            "/sessions/{id}/speakers/{speaker_id}",
            put(link_speaker).delete(unlink_speaker),
        )
        .route("/speakers", get(list_speakers).post(create_speaker))
        .route(
            "/speakers/{id}",
            get(get_speaker).patch(update_speaker).delete(delete_speaker),
        )
        .route("/speakers/{id}/sessions", get(list_speaker_sessions))
        .route("/bios", post(create_bio))
        .route(
            "/bios/{id}",
            get(get_bio).patch(update_bio).delete(delete_bio),
        )
        .with_state(ServerConfig {
            database_connection,
        })
}

pub async fn run(database_connection: DatabaseConnection, port: u16) -> anyhow::Result<()> {
    debug!("Starting server on port {}", port);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(database_connection).into_make_service())
        .await
        .context("server stopped")?;
    Ok(())
}

fn reject(err: ModelError) -> Rejection {
    let status = match &err {
        ModelError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ModelError::NotFound { .. } => StatusCode::NOT_FOUND,
        ModelError::Integrity { .. } => StatusCode::CONFLICT,
        ModelError::Database(_) => {
            error!("{err}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}

async fn list_events(
    State(state): State<ServerConfig>,
) -> Result<Json<Vec<external::Event>>, Rejection> {
    let events = repository::events::list(&state.database_connection)
        .await
        .map_err(reject)?;
    Ok(Json(events.iter().map(|e| e.to_external()).collect()))
}

async fn create_event(
    State(state): State<ServerConfig>,
    Json(payload): Json<EventAttributes>,
) -> Result<(StatusCode, Json<external::Event>), Rejection> {
    let event = repository::events::create(&state.database_connection, payload)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(event.to_external())))
}

async fn get_event(
    State(state): State<ServerConfig>,
    Path(id): Path<i32>,
) -> Result<Json<external::Event>, Rejection> {
    let event = repository::events::read(&state.database_connection, id)
        .await
        .map_err(reject)?;
    Ok(Json(event.to_external()))
}

async fn update_event(
    State(state): State<ServerConfig>,
    Path(id): Path<i32>,
    Json(payload): Json<EventAttributes>,
) -> Result<Json<external::Event>, Rejection> {
    let event = repository::events::update(&state.database_connection, id, payload)
        .await
        .map_err(reject)?;
    Ok(Json(event.to_external()))
}

async fn delete_event(
    State(state): State<ServerConfig>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Rejection> {
    repository::events::delete(&state.database_connection, id)
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_event_sessions(
    State(state): State<ServerConfig>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<external::Session>>, Rejection> {
    let sessions = helpers::sessions_of_event(&state.database_connection, id)
        .await
        .map_err(reject)?;
    Ok(Json(sessions.iter().map(|s| s.to_external()).collect()))
}

async fn list_sessions(
    State(state): State<ServerConfig>,
) -> Result<Json<Vec<external::Session>>, Rejection> {
    let sessions = repository::sessions::list(&state.database_connection)
        .await
        .map_err(reject)?;
    Ok(Json(sessions.iter().map(|s| s.to_external()).collect()))
}

async fn create_session(
    State(state): State<ServerConfig>,
    Json(payload): Json<SessionAttributes>,
) -> Result<(StatusCode, Json<external::Session>), Rejection> {
    let session = repository::sessions::create(&state.database_connection, payload)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(session.to_external())))
}

async fn get_session(
    State(state): State<ServerConfig>,
    Path(id): Path<i32>,
) -> Result<Json<external::Session>, Rejection> {
    let session = repository::sessions::read(&state.database_connection, id)
        .await
        .map_err(reject)?;
    Ok(Json(session.to_external()))
}

async fn update_session(
    State(state): State<ServerConfig>,
    Path(id): Path<i32>,
    Json(payload): Json<SessionAttributes>,
) -> Result<Json<external::Session>, Rejection> {
    let session = repository::sessions::update(&state.database_connection, id, payload)
        .await
        .map_err(reject)?;
    Ok(Json(session.to_external()))
}

async fn delete_session(
    State(state): State<ServerConfig>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Rejection> {
    repository::sessions::delete(&state.database_connection, id)
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_session_speakers(
    State(state): State<ServerConfig>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<external::Speaker>>, Rejection> {
    let db = &state.database_connection;
    let speakers = helpers::speakers_of_session(db, id).await.map_err(reject)?;

    let mut out = Vec::with_capacity(speakers.len());
    for speaker in speakers {
        let bio = helpers::bio_of_speaker(db, speaker.id)
            .await
            .map_err(reject)?;
        out.push(speaker.to_external(bio.as_ref()));
    }
    Ok(Json(out))
}

async fn link_speaker(
    State(state): State<ServerConfig>,
    Path((id, speaker_id)): Path<(i32, i32)>,
) -> Result<StatusCode, Rejection> {
    helpers::link_speaker(&state.database_connection, id, speaker_id)
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn unlink_speaker(
    State(state): State<ServerConfig>,
    Path((id, speaker_id)): Path<(i32, i32)>,
) -> Result<StatusCode, Rejection> {
    helpers::unlink_speaker(&state.database_connection, id, speaker_id)
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_speakers(
    State(state): State<ServerConfig>,
) -> Result<Json<Vec<external::Speaker>>, Rejection> {
    let speakers = repository::speakers::list_external(&state.database_connection)
        .await
        .map_err(reject)?;
    Ok(Json(speakers))
}

async fn create_speaker(
    State(state): State<ServerConfig>,
    Json(payload): Json<SpeakerAttributes>,
) -> Result<(StatusCode, Json<external::Speaker>), Rejection> {
    let speaker = repository::speakers::create(&state.database_connection, payload)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(speaker.to_external(None))))
}

async fn get_speaker(
    State(state): State<ServerConfig>,
    Path(id): Path<i32>,
) -> Result<Json<external::Speaker>, Rejection> {
    let speaker = repository::speakers::read_external(&state.database_connection, id)
        .await
        .map_err(reject)?;
    Ok(Json(speaker))
}

async fn update_speaker(
    State(state): State<ServerConfig>,
    Path(id): Path<i32>,
    Json(payload): Json<SpeakerAttributes>,
) -> Result<Json<external::Speaker>, Rejection> {
    let speaker = repository::speakers::update_external(&state.database_connection, id, payload)
        .await
        .map_err(reject)?;
    Ok(Json(speaker))
}

async fn delete_speaker(
    State(state): State<ServerConfig>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Rejection> {
    repository::speakers::delete(&state.database_connection, id)
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_speaker_sessions(
    State(state): State<ServerConfig>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<external::Session>>, Rejection> {
    let sessions = helpers::sessions_of_speaker(&state.database_connection, id)
        .await
        .map_err(reject)?;
    Ok(Json(sessions.iter().map(|s| s.to_external()).collect()))
}

async fn create_bio(
    State(state): State<ServerConfig>,
    Json(payload): Json<BioAttributes>,
) -> Result<(StatusCode, Json<external::Bio>), Rejection> {
    let bio = repository::bios::create(&state.database_connection, payload)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(bio.to_external())))
}

async fn get_bio(
    State(state): State<ServerConfig>,
    Path(id): Path<i32>,
) -> Result<Json<external::Bio>, Rejection> {
    let bio = repository::bios::read(&state.database_connection, id)
        .await
        .map_err(reject)?;
    Ok(Json(bio.to_external()))
}

async fn update_bio(
    State(state): State<ServerConfig>,
    Path(id): Path<i32>,
    Json(payload): Json<BioAttributes>,
) -> Result<Json<external::Bio>, Rejection> {
    let bio = repository::bios::update(&state.database_connection, id, payload)
        .await
        .map_err(reject)?;
    Ok(Json(bio.to_external()))
}

async fn delete_bio(
    State(state): State<ServerConfig>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Rejection> {
    repository::bios::delete(&state.database_connection, id)
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}
