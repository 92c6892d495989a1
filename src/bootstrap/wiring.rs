//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Resolve the data root and the config file / 解析数据根目录与配置文件
//! - ✅ Create infra implementations (JSON files, notes directory, HTTP mirror) / 创建 infra 层具体实现
//! - ✅ Create platform implementations (clipboard, runtime) / 创建 platform 层具体实现
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! - Do not decide whether the remote mirror is reachable
//! - 不判断远端笔记服务是否可达（由 `NotesService::connect` 负责）
//!
//! > **This is the only place allowed to depend on cn-infra + cn-platform + cn-app simultaneously.**
//! > **这是唯一允许同时依赖 cn-infra、cn-platform 和 cn-app 的地方。**

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use cn_app::usecases::{
    CaptureClipboardUseCase, ClipboardHistoryService, NotesService, PinnedItemsService,
    RemoteMirror,
};
use cn_app::AppPaths;
use cn_core::app_dirs::AppDirs;
use cn_core::config::AppConfig;
use cn_core::ports::*;
use cn_infra::{FsNotesRepository, HttpNotesConfig, HttpNotesRepository, JsonListFile};
use cn_platform::adapters::InMemoryWatcherControl;
use cn_platform::app_dirs::LocalDataDirs;
use cn_platform::clipboard::LocalClipboard;
use cn_platform::runtime::event_bus::{self, PlatformCommandSender, PlatformEventObserver};
use cn_platform::runtime::runtime::PlatformRuntime;

use super::config::load_config_or_default;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Data directory resolution failed: {0}")]
    DataDir(#[from] AppDirsError),

    #[error("Config loading failed: {0}")]
    Config(String),

    #[error("Clipboard history initialization failed: {0}")]
    History(#[from] HistoryError),

    #[error("Notes initialization failed: {0}")]
    Notes(#[from] NotesError),
}

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub remote_url: Option<String>,
}

/// Configuration and paths after every override has been applied.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub config: AppConfig,
    pub paths: AppPaths,
}

/// Resolve the config file and the data root.
///
/// 解析顺序 / Resolution order:
/// 1. `--data-dir`
/// 2. `[storage] data_dir` from the config file
/// 3. the platform local data directory (`clipnote` or `clipnote-<profile>`)
///
/// The config file itself is read from `--config`, or from `config.toml`
/// under the root chosen without the config file (1 or 3).
pub fn resolve_settings(overrides: &Overrides) -> WiringResult<ResolvedSettings> {
    let bootstrap_root = match &overrides.data_dir {
        Some(dir) => dir.clone(),
        None => LocalDataDirs::from_env().get_app_dirs()?.app_data_root,
    };
    let config_path = overrides
        .config_path
        .clone()
        .unwrap_or_else(|| AppPaths::from_app_dirs(&AppDirs::new(&bootstrap_root)).config_path);

    let mut config =
        load_config_or_default(&config_path).map_err(|e| WiringError::Config(format!("{e:#}")))?;

    if let Some(url) = &overrides.remote_url {
        config.remote_url = url.clone();
    }

    let root = select_data_root(overrides.data_dir.as_deref(), &config, bootstrap_root);
    let mut paths = AppPaths::from_app_dirs(&AppDirs::new(root));
    paths.config_path = config_path;

    Ok(ResolvedSettings { config, paths })
}

fn select_data_root(flag: Option<&Path>, config: &AppConfig, fallback: PathBuf) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if !config.data_dir.as_os_str().is_empty() {
        return config.data_dir.clone();
    }
    fallback
}

/// Assembled services shared by the CLI commands and the server.
pub struct AppContext {
    pub config: AppConfig,
    pub paths: AppPaths,
    pub history: Arc<ClipboardHistoryService>,
    pub pinned: Arc<PinnedItemsService>,
    pub notes: Arc<NotesService>,
    pub local_notes: Arc<dyn NotesRepositoryPort>,
    pub clipboard: Arc<dyn SystemClipboardPort>,
}

impl AppContext {
    /// Notes service over the local notes directory only, ignoring any mirror.
    pub fn local_notes_service(&self) -> Arc<NotesService> {
        Arc::new(NotesService::local_only(self.local_notes.clone()))
    }
}

/// Wire every service from resolved settings.
///
/// Loads the clipboard history and the pinned items from disk; a malformed
/// file fails here rather than being silently replaced.
pub async fn wire_dependencies(settings: ResolvedSettings) -> WiringResult<AppContext> {
    let ResolvedSettings { config, paths } = settings;

    let history_store: Arc<dyn HistoryStorePort> =
        Arc::new(JsonListFile::new(&paths.history_path));
    let history = Arc::new(ClipboardHistoryService::load(history_store).await?);

    let pinned_store: Arc<dyn HistoryStorePort> = Arc::new(JsonListFile::new(&paths.pinned_path));
    let pinned = Arc::new(PinnedItemsService::load(pinned_store).await?);

    let local_notes: Arc<dyn NotesRepositoryPort> =
        Arc::new(FsNotesRepository::new(&paths.notes_dir));
    let remote = build_remote_mirror(&config)?;
    let notes = Arc::new(NotesService::new(local_notes.clone(), remote));

    let clipboard: Arc<dyn SystemClipboardPort> = Arc::new(LocalClipboard::new());

    info!(history = %paths.history_path.display(), "dependencies wired");

    Ok(AppContext {
        config,
        paths,
        history,
        pinned,
        notes,
        local_notes,
        clipboard,
    })
}

fn build_remote_mirror(config: &AppConfig) -> WiringResult<Option<RemoteMirror>> {
    if !config.has_remote() {
        debug!("no remote notes mirror configured");
        return Ok(None);
    }

    let repo = HttpNotesRepository::new(HttpNotesConfig::new(
        config.remote_url.trim(),
        Duration::from_millis(config.probe_timeout_ms),
    ))?;
    info!(url = %config.remote_url, "remote notes mirror configured");
    Ok(Some(RemoteMirror::new(Arc::new(repo))))
}

/// Handles to a running [`PlatformRuntime`].
pub struct ClipboardRuntime {
    pub watcher_control: Arc<dyn WatcherControlPort>,
    pub observer: PlatformEventObserver,
    pub command_tx: PlatformCommandSender,
    pub shutdown: CancellationToken,
    pub join: JoinHandle<()>,
}

/// Spawn the platform runtime with clipboard changes recorded into the history.
///
/// The poller is not started; send it through `watcher_control`.
pub fn spawn_clipboard_runtime(ctx: &AppContext) -> ClipboardRuntime {
    let ((event_tx, event_rx), (command_tx, command_rx)) = event_bus::channels();

    let handler: Arc<dyn ClipboardChangeHandler> =
        Arc::new(CaptureClipboardUseCase::new(ctx.history.clone()));
    let runtime = PlatformRuntime::new(
        ctx.clipboard.clone(),
        event_tx,
        event_rx,
        command_rx,
        Some(handler),
    );

    let observer = runtime.subscribe();
    let shutdown = runtime.shutdown_token();
    let join = tokio::spawn(runtime.start());

    ClipboardRuntime {
        watcher_control: Arc::new(InMemoryWatcherControl::new(command_tx.clone())),
        observer,
        command_tx,
        shutdown,
        join,
    }
}
