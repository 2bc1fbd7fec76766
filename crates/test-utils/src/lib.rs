pub mod builders;
pub mod fake_executor;
pub mod log_capture;

use std::path::PathBuf;
use std::sync::{Arc, Once};

use exechook::config::{ConfigFile, Persistence, TomlPersistence};
use exechook::engine::{ExecutePlugin, Host};
use exechook::exec::Pipeline;
use exechook::fs::mock::MockFileSystem;
use exechook::host::{LocalEventBus, MemoryItemRegistry};
use tracing_subscriber::{fmt, EnvFilter};

use crate::fake_executor::FakeExecutor;

pub use crate::log_capture::LogCapture;

static INIT: Once = Once::new();

/// Install a per-test capturing subscriber once per test binary.
///
/// Output only shows for failing tests (or with `--nocapture`); the level
/// comes from `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Fail the test if `f` takes longer than five seconds.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}

/// Where the harness keeps its store inside the mock filesystem.
pub const STORE_PATH: &str = "/config/execute.toml";

/// An enabled plugin wired to in-memory collaborators and a fake executor.
pub struct Harness {
    pub plugin: ExecutePlugin,
    pub bus: Arc<LocalEventBus>,
    pub registry: Arc<MemoryItemRegistry>,
    pub executor: FakeExecutor,
    pub fs: MockFileSystem,
    pub persistence: Arc<TomlPersistence>,
}

impl Harness {
    /// Seed the store with `config`, mark `executables` as runnable files and
    /// enable the plugin.
    pub async fn start(config: ConfigFile, executables: &[&str]) -> Self {
        let fs = MockFileSystem::new();
        for exe in executables {
            fs.add_executable(exe);
        }

        let persistence = Arc::new(TomlPersistence::new(
            PathBuf::from(STORE_PATH),
            Arc::new(fs.clone()),
        ));
        persistence.save(&config).expect("seeding store");

        let bus = Arc::new(LocalEventBus::new());
        let registry = Arc::new(MemoryItemRegistry::new());
        let executor = FakeExecutor::new();
        let pipeline = Pipeline::new(Arc::new(executor.clone()), Arc::new(fs.clone()));

        let host = Host {
            bus: bus.clone(),
            registry: registry.clone(),
        };
        let plugin = ExecutePlugin::enable(persistence.clone(), host, pipeline)
            .await
            .expect("enabling plugin");

        Self {
            plugin,
            bus,
            registry,
            executor,
            fs,
            persistence,
        }
    }

    /// Harness with an empty store.
    pub async fn empty() -> Self {
        Self::start(ConfigFile::default(), &[]).await
    }

    /// Contents of the store as persisted right now.
    pub fn persisted(&self) -> ConfigFile {
        self.persistence.load().expect("loading persisted store")
    }
}
