use std::convert::Infallible;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{error, info};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use cn_app::usecases::NotesService;
use cn_core::ports::NotesError;

use super::response::{self, JsonReply};

/// Body of `POST /notes`. Missing fields deserialize as empty and are
/// rejected by the handler with a 400.
#[derive(Debug, Default, Deserialize)]
pub struct SaveNoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// 笔记路由
pub fn route(
    notes: Arc<NotesService>,
    max_body_bytes: u64,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let list = warp::path!("notes")
        .and(warp::get())
        .and(with_notes(notes.clone()))
        .and_then(list_notes);

    let read = warp::path!("notes" / String)
        .and(warp::get())
        .and(with_notes(notes.clone()))
        .and_then(read_note);

    let save = warp::path!("notes")
        .and(warp::post())
        .and(warp::body::content_length_limit(max_body_bytes))
        .and(warp::body::json())
        .and(with_notes(notes.clone()))
        .and_then(save_note);

    let delete = warp::path!("notes" / String)
        .and(warp::delete())
        .and(with_notes(notes))
        .and_then(delete_note);

    list.or(read).or(save).or(delete)
}

/// 注入笔记服务
fn with_notes(
    notes: Arc<NotesService>,
) -> impl Filter<Extract = (Arc<NotesService>,), Error = Infallible> + Clone {
    warp::any().map(move || notes.clone())
}

/// Path segments arrive percent-encoded.
fn decode_title(raw: &str) -> Result<String, JsonReply> {
    urlencoding::decode(raw)
        .map(|title| title.into_owned())
        .map_err(|_| response::error(StatusCode::BAD_REQUEST, "Title is not valid UTF-8"))
}

fn failure(err: NotesError) -> JsonReply {
    if matches!(err, NotesError::Storage(_)) {
        error!(error = %err, "notes request failed");
    }
    response::notes_error(&err)
}

async fn list_notes(notes: Arc<NotesService>) -> Result<JsonReply, Rejection> {
    Ok(match notes.list().await {
        Ok(titles) => response::ok(&titles),
        Err(e) => failure(e),
    })
}

async fn read_note(raw_title: String, notes: Arc<NotesService>) -> Result<JsonReply, Rejection> {
    let title = match decode_title(&raw_title) {
        Ok(title) => title,
        Err(reply) => return Ok(reply),
    };

    Ok(match notes.read(&title).await {
        Ok(note) => response::ok(&note),
        Err(e) => failure(e),
    })
}

async fn save_note(
    request: SaveNoteRequest,
    notes: Arc<NotesService>,
) -> Result<JsonReply, Rejection> {
    let title = request.title.unwrap_or_default();
    let content = request.content.unwrap_or_default();
    if title.is_empty() || content.is_empty() {
        return Ok(response::error(
            StatusCode::BAD_REQUEST,
            "Title and content are required",
        ));
    }

    Ok(match notes.write(&title, &content).await {
        Ok(()) => {
            info!(title = %title, "note saved over http");
            response::message("Note saved successfully")
        }
        Err(e) => failure(e),
    })
}

async fn delete_note(raw_title: String, notes: Arc<NotesService>) -> Result<JsonReply, Rejection> {
    let title = match decode_title(&raw_title) {
        Ok(title) => title,
        Err(reply) => return Ok(reply),
    };

    Ok(match notes.delete(&title).await {
        Ok(()) => response::message(format!("Note '{title}' deleted successfully")),
        Err(e) => failure(e),
    })
}
