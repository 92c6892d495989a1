use std::future::Future;
use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use cn_core::network::{Connectivity, ConnectivityEvent};
use cn_core::notes::{Note, NoteTitle};
use cn_core::ports::{NotesError, NotesRepositoryPort, RemoteNotesPort};

/// A remote notes repository together with its reachability probe.
#[derive(Clone)]
pub struct RemoteMirror {
    repo: Arc<dyn NotesRepositoryPort>,
    probe: Arc<dyn RemoteNotesPort>,
}

impl RemoteMirror {
    pub fn new<R>(remote: Arc<R>) -> Self
    where
        R: RemoteNotesPort + 'static,
    {
        Self {
            repo: remote.clone(),
            probe: remote,
        }
    }
}

/// Notes backed by the local notes directory, optionally mirrored remotely.
///
/// 笔记服务：本地目录为底，可选远端镜像。
///
/// # Connectivity / 连接状态
///
/// With a remote configured the session starts `Online`; [`NotesService::connect`]
/// probes the remote once. While `Online` every operation goes to the remote.
/// The first probe failure or [`NotesError::RemoteUnavailable`] moves the
/// session to `Offline` and the failed operation is replayed against the
/// local directory. There is no way back to `Online`.
pub struct NotesService {
    local: Arc<dyn NotesRepositoryPort>,
    remote: Option<RemoteMirror>,
    connectivity: RwLock<Connectivity>,
}

impl NotesService {
    pub fn new(
        local: Arc<dyn NotesRepositoryPort>,
        remote: Option<RemoteMirror>,
    ) -> Self {
        let connectivity = if remote.is_some() {
            Connectivity::Online
        } else {
            Connectivity::Offline
        };
        Self {
            local,
            remote,
            connectivity: RwLock::new(connectivity),
        }
    }

    pub fn local_only(local: Arc<dyn NotesRepositoryPort>) -> Self {
        Self::new(local, None)
    }

    /// Probe the remote once and settle the session state.
    #[tracing::instrument(name = "usecase.notes.connect", skip(self))]
    pub async fn connect(&self) -> Connectivity {
        let Some(remote) = self.remote_if_online() else {
            return self.connectivity();
        };

        match remote.probe.probe().await {
            Ok(()) => {
                info!("remote notes mirror reachable");
                self.apply(ConnectivityEvent::ProbeSucceeded)
            }
            Err(e) => {
                warn!(error = %e, "remote notes mirror unreachable, using local notes");
                self.apply(ConnectivityEvent::ProbeFailed)
            }
        }
    }

    pub fn connectivity(&self) -> Connectivity {
        match self.connectivity.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn apply(&self, event: ConnectivityEvent) -> Connectivity {
        let mut guard = match self.connectivity.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let next = guard.transition(event);
        if *guard != next {
            info!(from = ?*guard, to = ?next, "notes connectivity changed");
        }
        *guard = next;
        next
    }

    fn remote_if_online(&self) -> Option<&RemoteMirror> {
        self.remote
            .as_ref()
            .filter(|_| self.connectivity().is_online())
    }

    /// Run `op` on the remote while online, falling back to the local
    /// directory once when the remote is unreachable.
    async fn dispatch<'a, T, F, Fut>(&'a self, op: F) -> Result<T, NotesError>
    where
        F: Fn(&'a dyn NotesRepositoryPort) -> Fut,
        Fut: Future<Output = Result<T, NotesError>> + 'a,
    {
        if let Some(remote) = self.remote_if_online() {
            match op(remote.repo.as_ref()).await {
                Err(e) if e.is_remote_unavailable() => {
                    warn!(error = %e, "remote notes call failed, switching to local notes");
                    self.apply(ConnectivityEvent::RemoteCallFailed);
                }
                other => return other,
            }
        }
        op(self.local.as_ref()).await
    }

    /// Titles of all notes, sorted.
    #[tracing::instrument(name = "usecase.notes.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<NoteTitle>, NotesError> {
        self.dispatch(|repo| repo.list()).await
    }

    #[tracing::instrument(name = "usecase.notes.read", skip(self))]
    pub async fn read(&self, title: &str) -> Result<Note, NotesError> {
        let title = NoteTitle::parse(title)?;
        let content = self.dispatch(|repo| repo.read(&title)).await?;
        Ok(Note::new(title, content))
    }

    /// Create or overwrite a note. Empty titles and empty content are rejected.
    #[tracing::instrument(name = "usecase.notes.write", skip(self, content), fields(len = content.len()))]
    pub async fn write(&self, title: &str, content: &str) -> Result<(), NotesError> {
        let title = NoteTitle::parse(title)?;
        Note::validate_content(content)?;
        self.dispatch(|repo| repo.write(&title, content)).await?;
        info!(title = %title, "note saved");
        Ok(())
    }

    #[tracing::instrument(name = "usecase.notes.delete", skip(self))]
    pub async fn delete(&self, title: &str) -> Result<(), NotesError> {
        let title = NoteTitle::parse(title)?;
        self.dispatch(|repo| repo.delete(&title)).await?;
        info!(title = %title, "note deleted");
        Ok(())
    }
}
