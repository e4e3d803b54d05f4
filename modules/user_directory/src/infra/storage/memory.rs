use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::contract::model::User;
use crate::domain::store::UserStore;

/// In-memory store backed by a sharded concurrent map. Per-id operations are
/// atomic under the shard lock; distinct ids never block each other.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: DashMap<Uuid, User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(users)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, u: User) -> anyhow::Result<User> {
        self.users.insert(u.id, u.clone());
        Ok(u)
    }

    async fn update(&self, u: User) -> anyhow::Result<bool> {
        // The shard lock held by get_mut makes the existence check and the
        // replacement one atomic step.
        match self.users.get_mut(&u.id) {
            Some(mut entry) => {
                *entry = u;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.users.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;

    fn user(first: &str, last: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            department: "Eng".to_string(),
            title: None,
            phone: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn list_all_is_sorted_by_last_then_first_name() {
        let store = InMemoryUserStore::new();
        store.insert(user("Carol", "Young")).await.unwrap();
        store.insert(user("Bob", "Adams")).await.unwrap();
        store.insert(user("Ann", "Young")).await.unwrap();

        let users = store.list_all().await.unwrap();
        let names: Vec<(String, String)> = users
            .into_iter()
            .map(|u| (u.last_name, u.first_name))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Adams".to_string(), "Bob".to_string()),
                ("Young".to_string(), "Ann".to_string()),
                ("Young".to_string(), "Carol".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn list_all_returns_a_snapshot() {
        let store = InMemoryUserStore::new();
        let u = user("Ann", "Lee");
        store.insert(u.clone()).await.unwrap();

        let snapshot = store.list_all().await.unwrap();
        store.delete(u.id).await.unwrap();

        // The earlier snapshot is unaffected by the later delete.
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.list_all().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn update_fails_for_missing_record() {
        let store = InMemoryUserStore::new();
        let u = user("Ann", "Lee");
        assert!(!store.update(u.clone()).await.unwrap());

        store.insert(u.clone()).await.unwrap();
        let mut changed = u.clone();
        changed.department = "Sales".to_string();
        assert!(store.update(changed).await.unwrap());
        assert_eq!(
            store.get(u.id).await.unwrap().unwrap().department,
            "Sales"
        );
    }

    #[tokio::test]
    async fn delete_is_true_once_then_false() {
        let store = InMemoryUserStore::new();
        let u = user("Ann", "Lee");
        store.insert(u.clone()).await.unwrap();

        assert!(store.delete(u.id).await.unwrap());
        assert!(!store.delete(u.id).await.unwrap());
        assert!(store.get(u.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_writers_on_distinct_ids() {
        let store = Arc::new(InMemoryUserStore::new());

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let u = user(&format!("User{i}"), "Load");
                let id = u.id;
                store.insert(u).await.unwrap();
                store.get(id).await.unwrap().unwrap();
                store.delete(id).await.unwrap()
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert!(store.is_empty());
    }
}
