//! Application state wiring all services together.
//!
//! AppState holds the shared read-only pieces (catalog, intent router, user
//! directory, assistant gateway) plus the session registry. Used by both CLI
//! commands and REST API handlers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use absher_core::catalog::ServiceCatalog;
use absher_core::directory::UserDirectory;
use absher_core::intent::IntentRouter;
use absher_core::llm::gateway::AssistantGateway;
use absher_core::otp::VerificationMode;
use absher_core::session::PortalSession;
use absher_infra::config::{load_portal_config, resolve_data_dir, resolve_dataset_path};
use absher_infra::dataset::load_users_or_empty;
use absher_infra::llm::hosted::HostedInferenceProvider;
use absher_types::config::PortalConfig;

/// Gateway pinned to the hosted HTTP provider.
pub type ConcreteGateway = AssistantGateway<HostedInferenceProvider>;

/// Handle to one session. The lock is per session, so independent sessions
/// never contend.
pub type SessionHandle = Arc<Mutex<PortalSession>>;

/// Registry slot: the session plus when it was last looked up.
pub struct SessionEntry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ServiceCatalog>,
    pub router: Arc<IntentRouter>,
    pub directory: Arc<UserDirectory>,
    pub gateway: Arc<ConcreteGateway>,
    pub sessions: Arc<DashMap<Uuid, SessionEntry>>,
    pub config: Arc<PortalConfig>,
    pub data_dir: PathBuf,
    /// Cancelled on server shutdown; in-flight assistant calls derive
    /// child tokens from it.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Initialize the application state: load config and dataset, wire
    /// the gateway.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_portal_config(&data_dir).await;
        let dataset_path = resolve_dataset_path(&config, &data_dir);
        let users = load_users_or_empty(&dataset_path).await;

        let provider = HostedInferenceProvider::from_config(&config.llm)?;

        Ok(Self::from_parts(
            config,
            data_dir,
            UserDirectory::new(users),
            provider,
        ))
    }

    /// Assemble state from already-loaded parts.
    pub fn from_parts(
        config: PortalConfig,
        data_dir: PathBuf,
        directory: UserDirectory,
        provider: HostedInferenceProvider,
    ) -> Self {
        let gateway = AssistantGateway::new(provider, &config.llm);
        Self {
            catalog: Arc::new(ServiceCatalog::standard()),
            router: Arc::new(IntentRouter::standard()),
            directory: Arc::new(directory),
            gateway: Arc::new(gateway),
            sessions: Arc::new(DashMap::new()),
            config: Arc::new(config),
            data_dir,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn verification_mode(&self) -> VerificationMode {
        VerificationMode::from_demo_flag(self.config.verification.demo_mode)
    }

    /// A fresh, unregistered session.
    pub fn new_session(&self) -> PortalSession {
        PortalSession::new(
            self.catalog.clone(),
            self.router.clone(),
            self.verification_mode(),
        )
    }

    /// Create and register a session.
    pub fn create_session(&self) -> (Uuid, SessionHandle) {
        let session = self.new_session();
        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        self.sessions.insert(
            id,
            SessionEntry {
                handle: handle.clone(),
                last_seen: Instant::now(),
            },
        );
        tracing::info!(session_id = %id, "Session created");
        (id, handle)
    }

    /// Look a session up and mark it as active.
    pub fn session(&self, id: &Uuid) -> Option<SessionHandle> {
        self.sessions.get_mut(id).map(|mut entry| {
            entry.last_seen = Instant::now();
            entry.handle.clone()
        })
    }

    pub fn remove_session(&self, id: &Uuid) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session removed");
        }
        removed
    }

    /// Drop sessions not looked up within `max_idle`. Returns how many
    /// were removed. Requests already holding a handle finish normally.
    pub fn sweep_idle(&self, max_idle: Duration) -> usize {
        let mut removed = 0;
        self.sessions.retain(|id, entry| {
            let keep = entry.last_seen.elapsed() < max_idle;
            if !keep {
                tracing::debug!(session_id = %id, "Session expired");
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Run [`AppState::sweep_idle`] every `every` until shutdown.
    pub fn spawn_session_sweeper(
        &self,
        every: Duration,
        max_idle: Duration,
    ) -> tokio::task::JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = state.shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        let removed = state.sweep_idle(max_idle);
                        if removed > 0 {
                            tracing::info!(removed, remaining = state.sessions.len(), "Expired idle sessions");
                        }
                    }
                }
            }
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::time::Duration;

    use absher_types::user::UserRecord;
    use serde_json::json;

    /// State over a small in-memory dataset and a provider without a token.
    pub fn test_state(demo_mode: bool) -> AppState {
        let users: Vec<UserRecord> = serde_json::from_value(json!([
            {"service_type": "IQAMA_RENEWAL", "name_en": "Ravi Kumar", "iqama_id": "2345678901",
             "residency_id": "R-100", "employer_name": "Acme", "occupation": "Engineer",
             "email": "ravi@example.com", "phone": "0501111111", "status": "active"},
            {"service_type": "NATIONAL_ID", "name_en": "Ahmed", "name_ar": "أحمد",
             "national_id": "1122334455", "birth_date": "1990-01-01", "region": "Riyadh",
             "status": "active"},
            {"service_type": "VEHICLE_REGISTRATION", "name_en": "Sara", "national_id": "1099887766",
             "vehicle_plate": "ABC 123", "vehicle_type": "Sedan", "status": "active"}
        ]))
        .unwrap();

        let mut config = PortalConfig::default();
        config.verification.demo_mode = demo_mode;

        let provider = HostedInferenceProvider::new(
            "http://127.0.0.1:9/generate",
            None,
            "HF_API_TOKEN",
            Duration::from_secs(1),
        )
        .unwrap();

        AppState::from_parts(
            config,
            std::env::temp_dir(),
            UserDirectory::new(users),
            provider,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::testing::test_state;
    use super::*;

    #[test]
    fn sweep_removes_only_idle_sessions() {
        let state = test_state(false);
        let (a, _) = state.create_session();
        let (b, _) = state.create_session();

        assert_eq!(state.sweep_idle(Duration::from_secs(3600)), 0);
        assert_eq!(state.sessions.len(), 2);

        assert_eq!(state.sweep_idle(Duration::ZERO), 2);
        assert!(state.session(&a).is_none());
        assert!(state.session(&b).is_none());
    }

    #[test]
    fn lookup_refreshes_activity() {
        let state = test_state(false);
        let (id, _) = state.create_session();
        std::thread::sleep(Duration::from_millis(30));

        assert!(state.session(&id).is_some());
        assert_eq!(state.sweep_idle(Duration::from_millis(20)), 0);
    }

    #[tokio::test]
    async fn sweeper_expires_sessions_and_stops_on_shutdown() {
        let state = test_state(false);
        let (id, handle) = state.create_session();
        let sweeper = state.spawn_session_sweeper(Duration::from_millis(10), Duration::ZERO);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(state.session(&id).is_none());
        // A handle taken before expiry stays usable.
        assert!(handle.lock().await.conversation.turns().is_empty());

        state.shutdown.cancel();
        sweeper.await.unwrap();
    }
}
