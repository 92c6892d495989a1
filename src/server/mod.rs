//! Notes HTTP server
//!
//! 笔记 HTTP 服务：以 REST 方式暴露本地笔记目录。
//!
//! | Method | Path             | Success                    | Failure            |
//! |--------|------------------|----------------------------|--------------------|
//! | GET    | `/notes`         | `200 ["title", ..]`        |                    |
//! | GET    | `/notes/<title>` | `200 {"title","content"}`  | `404 {"error"}`    |
//! | POST   | `/notes`         | `200 {"message"}`          | `400 {"error"}`    |
//! | DELETE | `/notes/<title>` | `200 {"message"}`          | `404 {"error"}`    |

mod notes;
mod response;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use cn_app::usecases::NotesService;

pub use notes::SaveNoteRequest;
pub use response::{ErrorBody, MessageBody};

/// Largest accepted request body.
const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// All notes routes, with rejections turned into JSON errors.
pub fn routes(
    notes: Arc<NotesService>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    notes::route(notes, MAX_BODY_BYTES)
        .recover(handle_rejection)
        .with(warp::trace::request())
}

/// Serve `notes` on `127.0.0.1:<port>` until `shutdown` is cancelled.
pub async fn serve(
    notes: Arc<NotesService>,
    port: u16,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let (bound, server) = warp::serve(routes(notes))
        .try_bind_with_graceful_shutdown(addr, async move { shutdown.cancelled().await })
        .with_context(|| format!("Failed to bind notes server on {addr}"))?;

    info!(addr = %bound, "notes server listening");
    server.await;
    info!("notes server stopped");
    Ok(())
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid JSON body: {e}"))
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected a JSON body".to_string(),
        )
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        warn!(rejection = ?err, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    Ok(response::error(status, message))
}
