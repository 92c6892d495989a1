use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use cn_core::notes::NoteTitle;
use cn_core::ports::{NotesError, NotesRepositoryPort, RemoteNotesPort};

#[derive(Debug, Clone)]
pub struct HttpNotesConfig {
    /// Base URL of the notes service, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
    /// Timeout of every request.
    pub timeout: Duration,
    /// Timeout of the reachability probe.
    pub probe_timeout: Duration,
}

impl HttpNotesConfig {
    pub fn new(base_url: impl Into<String>, probe_timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
            probe_timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NoteBody {
    #[allow(dead_code)]
    title: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct SaveNoteBody<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the REST notes service.
///
/// | operation | request                 |
/// |-----------|-------------------------|
/// | list      | `GET /notes`            |
/// | read      | `GET /notes/<title>`    |
/// | write     | `POST /notes`           |
/// | delete    | `DELETE /notes/<title>` |
pub struct HttpNotesRepository {
    client: reqwest::Client,
    base_url: Url,
    probe_timeout: Duration,
}

impl HttpNotesRepository {
    pub fn new(config: HttpNotesConfig) -> Result<Self, NotesError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            NotesError::Validation(format!("invalid remote url '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(NotesError::Validation(format!(
                "remote url '{}' cannot be used as a base",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NotesError::RemoteUnavailable(format!("build http client failed: {e}")))?;

        Ok(Self {
            client,
            base_url,
            probe_timeout: config.probe_timeout,
        })
    }

    fn notes_url(&self, title: Option<&NoteTitle>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("notes");
            if let Some(title) = title {
                segments.push(title.as_str());
            }
        }
        url
    }

    /// Map a response with a non-success status to a notes error.
    async fn error_from_response(response: reqwest::Response, title: Option<&NoteTitle>) -> NotesError {
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|b| b.error)
            .unwrap_or_else(|_| status.to_string());

        match status {
            StatusCode::NOT_FOUND => NotesError::NotFound(
                title.map(ToString::to_string).unwrap_or(message),
            ),
            StatusCode::BAD_REQUEST => NotesError::Validation(message),
            s if s.is_server_error() => {
                NotesError::RemoteUnavailable(format!("server error {s}: {message}"))
            }
            s => NotesError::Storage(format!("unexpected status {s}: {message}")),
        }
    }
}

/// Connection failures and timeouts make the remote unavailable; anything
/// else is a malformed exchange.
fn map_transport_error(err: reqwest::Error) -> NotesError {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        NotesError::RemoteUnavailable(err.to_string())
    } else {
        NotesError::Storage(format!("remote exchange failed: {err}"))
    }
}

#[async_trait]
impl NotesRepositoryPort for HttpNotesRepository {
    async fn list(&self) -> Result<Vec<NoteTitle>, NotesError> {
        let response = self
            .client
            .get(self.notes_url(None))
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, None).await);
        }

        let raw: Vec<String> = response.json().await.map_err(map_transport_error)?;
        let mut titles = Vec::with_capacity(raw.len());
        for title in raw {
            match NoteTitle::parse(title) {
                Ok(t) => titles.push(t),
                Err(e) => warn!(error = %e, "remote returned an unusable note title"),
            }
        }
        titles.sort();
        Ok(titles)
    }

    async fn read(&self, title: &NoteTitle) -> Result<String, NotesError> {
        let response = self
            .client
            .get(self.notes_url(Some(title)))
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, Some(title)).await);
        }

        let body: NoteBody = response.json().await.map_err(map_transport_error)?;
        Ok(body.content)
    }

    async fn write(&self, title: &NoteTitle, content: &str) -> Result<(), NotesError> {
        let response = self
            .client
            .post(self.notes_url(None))
            .json(&SaveNoteBody {
                title: title.as_str(),
                content,
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, Some(title)).await);
        }
        debug!(title = %title, "note saved on remote");
        Ok(())
    }

    async fn delete(&self, title: &NoteTitle) -> Result<(), NotesError> {
        let response = self
            .client
            .delete(self.notes_url(Some(title)))
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, Some(title)).await);
        }
        debug!(title = %title, "note deleted on remote");
        Ok(())
    }
}

#[async_trait]
impl RemoteNotesPort for HttpNotesRepository {
    async fn probe(&self) -> Result<(), NotesError> {
        let response = self
            .client
            .get(self.notes_url(None))
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(NotesError::RemoteUnavailable(format!(
                "probe answered {}",
                response.status()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(base: &str) -> HttpNotesRepository {
        HttpNotesRepository::new(HttpNotesConfig::new(base, Duration::from_millis(200))).unwrap()
    }

    #[test]
    fn notes_url_appends_segments() {
        let repo = repo("http://localhost:5000");
        assert_eq!(repo.notes_url(None).as_str(), "http://localhost:5000/notes");
    }

    #[test]
    fn notes_url_escapes_title() {
        let repo = repo("http://localhost:5000/api/");
        let title = NoteTitle::parse("shopping list?").unwrap();
        assert_eq!(
            repo.notes_url(Some(&title)).as_str(),
            "http://localhost:5000/api/notes/shopping%20list%3F"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = HttpNotesRepository::new(HttpNotesConfig::new(
            "not a url",
            Duration::from_millis(200),
        ));
        assert!(matches!(result, Err(NotesError::Validation(_))));
    }
}
