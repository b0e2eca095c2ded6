//! Shared handler state and the store wiring behind it.

use crate::assistant::{ports::CompletionClient, services::AiGateway, services::InsightsService};
use crate::context::{
    adapters::{memory::InMemoryContextRepository, postgres::PostgresContextRepository},
    ports::ContextRepository,
    services::ContextJournalService,
};
use crate::database::PgPool;
use crate::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::TaskRepository,
    services::TaskLifecycleService,
};
use crate::user::{
    adapters::{memory::InMemoryUserRepository, postgres::PostgresUserRepository},
    ports::UserRepository,
    services::UserDirectoryService,
};
use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Type-erased clock so one state type serves both production and tests.
#[derive(Clone)]
pub struct SharedClock(Arc<dyn Clock + Send + Sync>);

impl SharedClock {
    /// Wraps a clock implementation.
    #[must_use]
    pub const fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self(clock)
    }
}

impl Clock for SharedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.local()
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0.utc()
    }
}

/// Repository handles for the three stored entities.
#[derive(Clone)]
pub struct Stores {
    /// User store.
    pub users: Arc<dyn UserRepository>,
    /// Task store.
    pub tasks: Arc<dyn TaskRepository>,
    /// Context entry store.
    pub context: Arc<dyn ContextRepository>,
}

impl Stores {
    /// Process-local stores; contents are lost on exit.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
            context: Arc::new(InMemoryContextRepository::new()),
        }
    }

    /// `PostgreSQL` stores sharing one pool.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
            context: Arc::new(PostgresContextRepository::new(pool.clone())),
        }
    }
}

/// User service as wired into the HTTP layer.
pub type Users = UserDirectoryService<dyn UserRepository, SharedClock>;
/// Task service as wired into the HTTP layer.
pub type Tasks = TaskLifecycleService<
    dyn TaskRepository,
    dyn ContextRepository,
    dyn CompletionClient,
    SharedClock,
>;
/// Context service as wired into the HTTP layer.
pub type Journal = ContextJournalService<dyn ContextRepository, SharedClock>;
/// Insights service as wired into the HTTP layer.
pub type Insights =
    InsightsService<dyn TaskRepository, dyn ContextRepository, dyn CompletionClient, SharedClock>;

/// Services shared by every request handler.
///
/// Handlers hold no other state; each request reads and writes the stores
/// through these services only.
#[derive(Clone)]
pub struct AppState {
    /// User provisioning and lookup.
    pub users: Users,
    /// Task workflows.
    pub tasks: Tasks,
    /// Context capture and listing.
    pub journal: Journal,
    /// Recommendations and workload analysis.
    pub insights: Insights,
    /// Clock used for derived response fields such as `isOverdue`.
    pub clock: Arc<SharedClock>,
}

impl AppState {
    /// Wires every service over the given stores, completion client and
    /// clock.
    #[must_use]
    pub fn new(
        stores: Stores,
        completion: Arc<dyn CompletionClient>,
        time_source: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        let Stores {
            users,
            tasks,
            context,
        } = stores;
        let clock = Arc::new(SharedClock::new(time_source));
        let gateway = AiGateway::new(completion, Arc::clone(&clock));

        Self {
            users: UserDirectoryService::new(users, Arc::clone(&clock)),
            tasks: TaskLifecycleService::new(
                Arc::clone(&tasks),
                Arc::clone(&context),
                gateway.clone(),
                Arc::clone(&clock),
            ),
            journal: ContextJournalService::new(Arc::clone(&context), Arc::clone(&clock)),
            insights: InsightsService::new(tasks, context, gateway, Arc::clone(&clock)),
            clock,
        }
    }
}
