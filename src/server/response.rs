use serde::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use cn_core::ports::NotesError;

/// Reply type shared by every handler.
pub type JsonReply = WithStatus<Json>;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageBody {
    pub message: String,
}

pub fn ok<T: Serialize>(body: &T) -> JsonReply {
    warp::reply::with_status(warp::reply::json(body), StatusCode::OK)
}

pub fn message(message: impl Into<String>) -> JsonReply {
    ok(&MessageBody {
        message: message.into(),
    })
}

pub fn error(status: StatusCode, error: impl Into<String>) -> JsonReply {
    warp::reply::with_status(
        warp::reply::json(&ErrorBody {
            error: error.into(),
        }),
        status,
    )
}

/// Map a notes failure onto its HTTP status.
pub fn notes_error(err: &NotesError) -> JsonReply {
    match err {
        NotesError::NotFound(_) => error(StatusCode::NOT_FOUND, "Note not found"),
        NotesError::Validation(reason) => error(StatusCode::BAD_REQUEST, reason.clone()),
        NotesError::RemoteUnavailable(reason) => {
            error(StatusCode::SERVICE_UNAVAILABLE, reason.clone())
        }
        NotesError::Storage(_) => error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to access notes"),
    }
}
