//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangesetRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        ContextTags, NewTask, PersistedTaskData, Priority, Task, TaskChange, TaskId, TaskStatus,
        TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: NewTask) -> TaskRepositoryResult<Task> {
        let user_id = task.user_id();
        let new_row = to_new_row(&task)?;

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::UnknownUser(user_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            row_to_task(row)
        })
        .await
    }

    async fn modify(
        &self,
        id: TaskId,
        change: TaskChange,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let row = tasks::table
                    .filter(tasks::id.eq(id.value()))
                    .select(TaskRow::as_select())
                    .for_update()
                    .first::<TaskRow>(tx)
                    .optional()?
                    .ok_or(TaskRepositoryError::NotFound(id))?;

                let mut task = row_to_task(row)?;
                task.apply_change(change, now);
                diesel::update(tasks::table.filter(tasks::id.eq(id.value())))
                    .set(&to_changeset(&task))
                    .execute(tx)?;
                Ok(task)
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_for_user(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let query = diesel::sql_query(concat!(
                "SELECT id, user_id, title, description, priority, status, deadline, ",
                "ai_suggested_priority, ai_suggested_deadline, ai_reasoning, context_tags, ",
                "created_at, updated_at, completed_at FROM tasks ",
                "WHERE user_id = $1 ",
                "ORDER BY (status = 'completed') ASC, priority ASC, ",
                "deadline ASC NULLS LAST, created_at DESC, id DESC",
            ))
            .bind::<diesel::sql_types::Int8, _>(user_id.value());

            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.value())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

fn to_new_row(task: &NewTask) -> TaskRepositoryResult<NewTaskRow> {
    let context_tags =
        serde_json::to_value(task.context_tags()).map_err(TaskRepositoryError::persistence)?;
    let suggestion = task.ai_suggestion();

    Ok(NewTaskRow {
        user_id: task.user_id().value(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        priority: task.priority().level(),
        status: TaskStatus::Pending.as_str().to_owned(),
        deadline: task.deadline(),
        ai_suggested_priority: suggestion.map(|s| s.priority.level()),
        ai_suggested_deadline: suggestion.and_then(|s| s.deadline),
        ai_reasoning: suggestion.and_then(|s| s.reasoning.clone()),
        context_tags,
        created_at: task.created_at(),
        updated_at: task.created_at(),
    })
}

fn to_changeset(task: &Task) -> TaskChangesetRow {
    TaskChangesetRow {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        priority: task.priority().level(),
        status: task.status().as_str().to_owned(),
        deadline: task.deadline(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        user_id,
        title,
        description,
        priority,
        status,
        deadline,
        ai_suggested_priority: raw_suggested_priority,
        ai_suggested_deadline,
        ai_reasoning,
        context_tags: raw_context_tags,
        created_at,
        updated_at,
        completed_at,
    } = row;

    let context_tags = serde_json::from_value::<ContextTags>(raw_context_tags)
        .map_err(TaskRepositoryError::persistence)?;
    let ai_suggested_priority = raw_suggested_priority
        .map(Priority::try_from)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::new(id).map_err(TaskRepositoryError::persistence)?,
        user_id: UserId::new(user_id).map_err(TaskRepositoryError::persistence)?,
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description,
        priority: Priority::try_from(priority).map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        deadline,
        ai_suggested_priority,
        ai_suggested_deadline,
        ai_reasoning,
        context_tags,
        created_at,
        updated_at,
        completed_at,
    };
    Ok(Task::from_persisted(data))
}
