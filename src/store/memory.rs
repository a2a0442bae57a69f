use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreResult};
use crate::error::AppError;
use crate::models::{Project, ProjectUpdate, Task, TaskUpdate, User};

/// In-process store backed by insertion-ordered vectors.
///
/// Nothing is persisted across restarts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    projects: RwLock<Vec<Project>>,
    tasks: RwLock<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(AppError::DuplicateUser);
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn list_projects(&self, creator: Uuid) -> StoreResult<Vec<Project>> {
        let projects = self.projects.read().await;
        Ok(projects
            .iter()
            .filter(|project| project.creator == creator)
            .cloned()
            .collect())
    }

    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        let projects = self.projects.read().await;
        Ok(projects.iter().find(|project| project.id == id).cloned())
    }

    async fn insert_project(&self, project: Project) -> StoreResult<Project> {
        self.projects.write().await.push(project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: Uuid,
        changes: &ProjectUpdate,
    ) -> StoreResult<Option<Project>> {
        let mut projects = self.projects.write().await;
        Ok(projects
            .iter_mut()
            .find(|project| project.id == id)
            .map(|project| {
                changes.apply(project);
                project.clone()
            }))
    }

    async fn delete_project(&self, id: Uuid) -> StoreResult<bool> {
        let mut projects = self.projects.write().await;
        let before = projects.len();
        projects.retain(|project| project.id != id);
        Ok(projects.len() != before)
    }

    async fn list_tasks(&self, creator: Uuid, project: Uuid) -> StoreResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .filter(|task| task.creator == creator && task.project == project)
            .cloned()
            .collect())
    }

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|task| task.id == id).cloned())
    }

    async fn insert_task(&self, task: Task) -> StoreResult<Task> {
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn update_task(
        &self,
        id: Uuid,
        changes: &TaskUpdate,
        state: bool,
    ) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.iter_mut().find(|task| task.id == id).map(|task| {
            changes.apply(task, state);
            task.clone()
        }))
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        Ok(tasks.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewProject, NewTask, NewUser};
    use pretty_assertions::assert_eq;

    fn project(name: &str, creator: Uuid) -> Project {
        Project::new(
            NewProject {
                name: name.to_string(),
            },
            creator,
        )
    }

    #[actix_rt::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        let input = NewUser {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "password123".to_string(),
        };
        store
            .insert_user(User::new(input.clone(), "hash".to_string()))
            .await
            .unwrap();

        let second = store.insert_user(User::new(input, "hash".to_string())).await;
        assert!(matches!(second, Err(AppError::DuplicateUser)));
    }

    #[actix_rt::test]
    async fn test_projects_listed_in_insertion_order() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let first = store.insert_project(project("b", owner)).await.unwrap();
        store
            .insert_project(project("other", Uuid::new_v4()))
            .await
            .unwrap();
        let second = store.insert_project(project("a", owner)).await.unwrap();

        let listed = store.list_projects(owner).await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[actix_rt::test]
    async fn test_update_and_delete_missing_ids() {
        let store = MemoryStore::new();
        let missing = Uuid::new_v4();

        assert!(store
            .update_project(missing, &ProjectUpdate::default())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_project(missing).await.unwrap());
        assert!(store
            .update_task(missing, &TaskUpdate::default(), true)
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_task(missing).await.unwrap());
    }

    #[actix_rt::test]
    async fn test_tasks_filtered_by_creator_and_project() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let project_a = Uuid::new_v4();
        let project_b = Uuid::new_v4();

        let mine = store
            .insert_task(Task::new(
                NewTask {
                    name: "mine".to_string(),
                    project: project_a,
                },
                owner,
            ))
            .await
            .unwrap();
        store
            .insert_task(Task::new(
                NewTask {
                    name: "other project".to_string(),
                    project: project_b,
                },
                owner,
            ))
            .await
            .unwrap();
        store
            .insert_task(Task::new(
                NewTask {
                    name: "other user".to_string(),
                    project: project_a,
                },
                Uuid::new_v4(),
            ))
            .await
            .unwrap();

        assert_eq!(store.list_tasks(owner, project_a).await.unwrap(), vec![mine]);
    }
}
