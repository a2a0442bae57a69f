use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use super::{Store, StoreResult};
use crate::models::{Project, ProjectUpdate, Task, TaskUpdate, User};

const PROJECT_COLUMNS: &str = "id, name, creator, created_at";
const TASK_COLUMNS: &str = "id, name, state, project, creator, created_at";

/// PostgreSQL-backed store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and applies pending migrations.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        log::info!("database migrations applied");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let stored = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, name, email, password, created_at",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn list_projects(&self, creator: Uuid) -> StoreResult<Vec<Project>> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE creator = $1 ORDER BY created_at, id"
        );
        let projects = sqlx::query_as::<_, Project>(&sql)
            .bind(creator)
            .fetch_all(&self.pool)
            .await?;
        Ok(projects)
    }

    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        let project = sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    async fn insert_project(&self, project: Project) -> StoreResult<Project> {
        let sql = format!(
            "INSERT INTO projects ({PROJECT_COLUMNS}) VALUES ($1, $2, $3, $4)
             RETURNING {PROJECT_COLUMNS}"
        );
        let stored = sqlx::query_as::<_, Project>(&sql)
            .bind(project.id)
            .bind(&project.name)
            .bind(project.creator)
            .bind(project.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn update_project(
        &self,
        id: Uuid,
        changes: &ProjectUpdate,
    ) -> StoreResult<Option<Project>> {
        let sql = format!(
            "UPDATE projects SET name = COALESCE($2, name)
             WHERE id = $1
             RETURNING {PROJECT_COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .bind(&changes.name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    async fn delete_project(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_tasks(&self, creator: Uuid, project: Uuid) -> StoreResult<Vec<Task>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE creator = $1 AND project = $2
             ORDER BY created_at, id"
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(creator)
            .bind(project)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1");
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn insert_task(&self, task: Task) -> StoreResult<Task> {
        let sql = format!(
            "INSERT INTO tasks ({TASK_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {TASK_COLUMNS}"
        );
        let stored = sqlx::query_as::<_, Task>(&sql)
            .bind(task.id)
            .bind(&task.name)
            .bind(task.state)
            .bind(task.project)
            .bind(task.creator)
            .bind(task.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn update_task(
        &self,
        id: Uuid,
        changes: &TaskUpdate,
        state: bool,
    ) -> StoreResult<Option<Task>> {
        let sql = format!(
            "UPDATE tasks
             SET name = COALESCE($2, name), project = COALESCE($3, project), state = $4
             WHERE id = $1
             RETURNING {TASK_COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(changes.project)
            .bind(state)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
