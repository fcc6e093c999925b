// View coordinator - owns the telemetry window and both request channels
use crate::application::insight_service::InsightService;
use crate::application::plan_service::PlanService;
use crate::application::telemetry_store::TelemetryStore;
use crate::domain::dashboard::{ChannelState, ChannelView};
use crate::domain::insight::Insight;
use crate::domain::telemetry::{ForecastPoint, Window};
use std::sync::Arc;
use std::time::Duration;
use parking_lot::RwLock;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

#[derive(Debug, Clone)]
pub struct CoordinatorSettings {
    pub tick_interval: Duration,
    /// Delay between mount and the first insight request
    pub startup_delay: Duration,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(5000),
            startup_delay: Duration::from_millis(1000),
        }
    }
}

/// Decides when telemetry ticks and when each AI request fires.
///
/// The window is published through a watch channel so every reader, including
/// a delayed insight request, sees the latest ticked value. Insight and plan
/// requests keep separate state and never block ticking.
#[derive(Clone)]
pub struct ViewCoordinator {
    store: Arc<Mutex<TelemetryStore>>,
    window: Arc<watch::Sender<Window>>,
    insights: Arc<RwLock<ChannelState<Vec<Insight>>>>,
    plan: Arc<RwLock<ChannelState<String>>>,
    insight_service: InsightService,
    plan_service: PlanService,
    settings: CoordinatorSettings,
}

impl ViewCoordinator {
    pub fn new(
        store: TelemetryStore,
        insight_service: InsightService,
        plan_service: PlanService,
        settings: CoordinatorSettings,
    ) -> Self {
        let (window, _) = watch::channel(Window::default());
        Self {
            store: Arc::new(Mutex::new(store)),
            window: Arc::new(window),
            insights: Arc::new(RwLock::new(ChannelState::default())),
            plan: Arc::new(RwLock::new(ChannelState::default())),
            insight_service,
            plan_service,
            settings,
        }
    }

    /// Seed the window, then start the recurring tick and the one-shot
    /// startup insight request. Dropping the returned guard stops both.
    pub async fn mount(&self) -> MountGuard {
        self.seed().await;

        let ticker = tokio::spawn(self.clone().run_ticker());

        let startup = {
            let coordinator = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(coordinator.settings.startup_delay).await;
                coordinator.refresh_insights().await;
            })
        };

        tracing::info!(
            "Mounted dashboard: tick every {:?}, first insights after {:?}",
            self.settings.tick_interval,
            self.settings.startup_delay
        );

        MountGuard {
            tasks: vec![ticker, startup],
        }
    }

    pub async fn seed(&self) {
        let seeded = self.store.lock().await.initialize();
        tracing::debug!("Seeded telemetry window with {} samples", seeded.len());
        self.window.send_replace(seeded);
    }

    async fn run_ticker(self) {
        let period = self.settings.tick_interval;
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            self.tick().await;
        }
    }

    pub async fn tick(&self) {
        let mut store = self.store.lock().await;
        self.window.send_modify(|window| store.tick(window));
        tracing::trace!("Telemetry tick {}", self.window.borrow().generation());
    }

    pub fn window_snapshot(&self) -> Window {
        self.window.borrow().clone()
    }

    /// Receiver notified after every tick
    pub fn subscribe(&self) -> watch::Receiver<Window> {
        self.window.subscribe()
    }

    pub async fn forecast(&self) -> Vec<ForecastPoint> {
        let window = self.window_snapshot();
        self.store.lock().await.forecast(&window)
    }

    /// Request insights for the current window. A quota failure is shown as
    /// an error and keeps the previously displayed insights.
    pub async fn refresh_insights(&self) -> ChannelView<Vec<Insight>> {
        let window = self.window_snapshot();
        if window.is_empty() {
            return self.insights_view();
        }

        let pending = PendingRequest::begin(&self.insights);
        match self.insight_service.fetch(&window).await {
            Ok(fresh) => pending.succeed(fresh),
            Err(e) => pending.fail(e.to_string()),
        }
    }

    pub async fn generate_plan(&self, situation: &str) -> ChannelView<String> {
        let pending = PendingRequest::begin(&self.plan);
        match self.plan_service.fetch(situation).await {
            Ok(text) => pending.succeed(text),
            Err(e) => pending.fail(format!("Optimization plan failed: {e}")),
        }
    }

    pub fn insights_view(&self) -> ChannelView<Vec<Insight>> {
        self.insights.read().view()
    }

    pub fn plan_view(&self) -> ChannelView<String> {
        self.plan.read().view()
    }
}

/// One outstanding request on a channel. Dropping it unsettled (the caller
/// was cancelled mid-fetch) releases its slot without touching the outcome.
struct PendingRequest<T> {
    slot: Arc<RwLock<ChannelState<T>>>,
    settled: bool,
}

impl<T: Clone> PendingRequest<T> {
    fn begin(slot: &Arc<RwLock<ChannelState<T>>>) -> Self {
        slot.write().begin();
        Self {
            slot: slot.clone(),
            settled: false,
        }
    }

    fn succeed(mut self, value: T) -> ChannelView<T> {
        self.settled = true;
        let mut state = self.slot.write();
        state.succeed(value);
        state.view()
    }

    fn fail(mut self, message: String) -> ChannelView<T> {
        self.settled = true;
        let mut state = self.slot.write();
        state.fail(message);
        state.view()
    }
}

impl<T> Drop for PendingRequest<T> {
    fn drop(&mut self) {
        if !self.settled {
            self.slot.write().abandon();
            tracing::debug!("Request cancelled before it settled");
        }
    }
}

/// Timers started by [`ViewCoordinator::mount`]; aborted on drop.
#[must_use = "dropping the guard stops the telemetry tick"]
pub struct MountGuard {
    tasks: Vec<JoinHandle<()>>,
}

impl MountGuard {
    pub fn teardown(self) {}
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
        tracing::debug!("Dashboard timers cancelled");
    }
}
