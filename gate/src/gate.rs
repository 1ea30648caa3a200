//! The gate: owns the shared components and the background sweeper.

use std::sync::Arc;
use std::time::Duration;

use atk_capabilities::{spawn_sweeper, CapabilityGuard, InterfaceCache, InterfaceProbe};
use atk_dispatch::{
    BatchItem, BatchPrecheck, BatchProgress, BatchReport, DispatchError, Mutation,
    MutationDispatcher, NoPrecheck, TransactionService,
};
use atk_portal::{IndexerClient, PortalClient};
use atk_types::{Clock, SystemClock, TxHash, UserSession, VerificationRequest};
use atk_verification::{ChallengeExchange, ChallengeService};
use tokio::task::JoinHandle;

use crate::config::GateConfig;
use crate::error::GateError;
use crate::metrics::GateMetrics;
use crate::shutdown::ShutdownController;

/// How long [`Gate::shutdown`] waits for background tasks.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// The external collaborators a gate is built from.
#[derive(Clone)]
pub struct GateServices {
    pub challenges: Arc<dyn ChallengeService>,
    pub transactions: Arc<dyn TransactionService>,
    pub probe: Arc<dyn InterfaceProbe>,
    pub precheck: Arc<dyn BatchPrecheck>,
    pub clock: Arc<dyn Clock>,
}

pub struct Gate {
    config: GateConfig,
    dispatcher: MutationDispatcher,
    cache: Arc<InterfaceCache>,
    precheck: Arc<dyn BatchPrecheck>,
    metrics: GateMetrics,
    shutdown: ShutdownController,
    task_handles: Vec<JoinHandle<()>>,
}

impl Gate {
    /// Build a gate talking to the Portal (and indexer, if configured).
    pub fn new(config: GateConfig) -> Result<Self, GateError> {
        config.validate()?;
        let portal = Arc::new(PortalClient::new(
            config.portal_url.clone(),
            config.portal_access_token.clone(),
            config.request_timeout(),
        )?);
        let precheck: Arc<dyn BatchPrecheck> = match &config.indexer_url {
            Some(url) => Arc::new(IndexerClient::new(
                url.clone(),
                config.portal_access_token.clone(),
                config.request_timeout(),
            )?),
            None => Arc::new(NoPrecheck),
        };
        let services = GateServices {
            challenges: portal.clone(),
            transactions: portal.clone(),
            probe: portal,
            precheck,
            clock: Arc::new(SystemClock),
        };
        Self::with_services(config, services)
    }

    /// Build a gate from arbitrary service implementations.
    pub fn with_services(config: GateConfig, services: GateServices) -> Result<Self, GateError> {
        config.validate()?;
        let metrics = GateMetrics::new()?;
        let cache = Arc::new(InterfaceCache::new(
            config.capability_cache_ttl(),
            services.clock,
        ));

        let mut dispatcher = MutationDispatcher::new(
            ChallengeExchange::new(services.challenges),
            services.transactions,
        )
        .with_metrics(metrics.dispatch.clone());
        if config.check_capabilities {
            dispatcher = dispatcher.with_guard(CapabilityGuard::new(
                cache.clone(),
                services.probe,
                config.interface_registry(),
            ));
        }

        Ok(Self {
            config,
            dispatcher,
            cache,
            precheck: services.precheck,
            metrics,
            shutdown: ShutdownController::new(),
            task_handles: Vec::new(),
        })
    }

    /// Spawn background tasks. Must be called inside a tokio runtime.
    /// Calling it again while tasks are running does nothing.
    pub fn start(&mut self) {
        if !self.task_handles.is_empty() {
            tracing::debug!("verification gate already started");
            return;
        }
        tracing::info!(
            portal = %self.config.portal_url,
            capability_checks = self.config.check_capabilities,
            "starting verification gate"
        );
        let handle = spawn_sweeper(
            self.cache.clone(),
            self.config.capability_sweep_interval(),
            self.shutdown.subscribe(),
        );
        self.task_handles.push(handle);
    }

    /// Signal background tasks to stop and wait for every one of them.
    /// Returns the first failure seen.
    pub async fn shutdown(&mut self) -> Result<(), GateError> {
        self.shutdown.shutdown();
        let mut first_error = None;
        for handle in self.task_handles.drain(..) {
            let result = match tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => GateError::Task(e.to_string()),
                Err(_) => GateError::ShutdownTimeout,
            };
            tracing::warn!("background task did not stop cleanly: {result}");
            first_error.get_or_insert(result);
        }
        match first_error {
            Some(e) => Err(e),
            None => {
                tracing::info!("verification gate stopped");
                Ok(())
            }
        }
    }

    /// Number of background tasks currently owned by the gate.
    pub fn running_tasks(&self) -> usize {
        self.task_handles.len()
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &MutationDispatcher {
        &self.dispatcher
    }

    /// The gate's capability cache, for callers that probe on their own.
    pub fn capability_cache(&self) -> &Arc<InterfaceCache> {
        &self.cache
    }

    pub fn metrics(&self) -> &GateMetrics {
        &self.metrics
    }

    pub async fn dispatch(
        &self,
        session: &UserSession,
        mutation: &Mutation,
        verification: &VerificationRequest,
    ) -> Result<TxHash, DispatchError> {
        self.dispatcher.dispatch(session, mutation, verification).await
    }

    /// Dispatch `items` sequentially using the configured pre-check.
    pub async fn dispatch_batch(
        &self,
        session: &UserSession,
        items: &[BatchItem],
        verification: &VerificationRequest,
        on_progress: impl FnMut(BatchProgress<'_>) + Send,
    ) -> BatchReport {
        self.dispatcher
            .dispatch_batch(session, items, verification, self.precheck.as_ref(), on_progress)
            .await
    }

    /// Prometheus text exposition of every gate metric.
    pub fn encode_metrics(&self) -> Result<String, GateError> {
        self.metrics.observe_cache(self.cache.stats());
        self.metrics.encode()
    }
}
