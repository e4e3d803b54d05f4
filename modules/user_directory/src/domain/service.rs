use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{NewUser, User, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::store::UserStore;
use crate::domain::validate::{validate_create, validate_patch};

/// Domain service with the directory's business rules.
/// Depends only on the store port, not on infra types.
#[derive(Clone)]
pub struct Service {
    store: Arc<dyn UserStore>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 50,
            max_page_size: 200,
        }
    }
}

/// One page of the directory listing. `total` counts the whole store, not
/// the slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPage {
    pub items: Vec<User>,
    pub total: usize,
    pub skip: i64,
    pub take: i64,
}

impl Service {
    pub fn new(store: Arc<dyn UserStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// List a page of users. `skip` is floored at 0; `take` is clamped to
    /// `[1, max_page_size]` and defaults to `default_page_size`.
    #[instrument(name = "user_directory.service.list_users", skip(self))]
    pub async fn list_users(
        &self,
        skip: Option<i64>,
        take: Option<i64>,
    ) -> Result<UserPage, DomainError> {
        let skip = skip.unwrap_or(0).max(0);
        let take = take
            .unwrap_or(self.config.default_page_size)
            .clamp(1, self.config.max_page_size);

        let all = self
            .store
            .list_all()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        let total = all.len();
        let items: Vec<User> = all
            .into_iter()
            .skip(skip as usize)
            .take(take as usize)
            .collect();

        debug!(total, returned = items.len(), "Listed users");
        Ok(UserPage {
            items,
            total,
            skip,
            take,
        })
    }

    #[instrument(name = "user_directory.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        debug!("Getting user by id");

        self.store
            .get(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::not_found(id))
    }

    #[instrument(name = "user_directory.service.create_user", skip(self, new_user))]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        let valid = validate_create(&new_user).map_err(DomainError::validation)?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            first_name: valid.first_name,
            last_name: valid.last_name,
            email: valid.email,
            department: valid.department,
            title: valid.title,
            phone: valid.phone,
            is_active: valid.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        let stored = self
            .store
            .insert(user)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        info!(user_id = %stored.id, "Successfully created user");
        Ok(stored)
    }

    #[instrument(
        name = "user_directory.service.update_user",
        skip(self, patch),
        fields(user_id = %id)
    )]
    pub async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, DomainError> {
        let valid = validate_patch(&patch).map_err(DomainError::validation)?;

        // Load current
        let mut current = self
            .store
            .get(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::not_found(id))?;

        // Overlay only the supplied fields
        if let Some(first_name) = valid.first_name {
            current.first_name = first_name;
        }
        if let Some(last_name) = valid.last_name {
            current.last_name = last_name;
        }
        if let Some(email) = valid.email {
            current.email = email;
        }
        if let Some(department) = valid.department {
            current.department = department;
        }
        if let Some(title) = valid.title {
            current.title = Some(title);
        }
        if let Some(phone) = valid.phone {
            current.phone = Some(phone);
        }
        if let Some(is_active) = valid.is_active {
            current.is_active = is_active;
        }
        current.updated_at = Utc::now();

        // The record may have been deleted between the lookup and this write;
        // the store's own return value is authoritative, not the stale read.
        let replaced = self
            .store
            .update(current.clone())
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        if !replaced {
            return Err(DomainError::not_found(id));
        }

        info!("Successfully updated user");
        Ok(current)
    }

    #[instrument(name = "user_directory.service.delete_user", skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: Uuid) -> Result<(), DomainError> {
        let deleted = self
            .store
            .delete(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        if !deleted {
            return Err(DomainError::not_found(id));
        }

        info!("Successfully deleted user");
        Ok(())
    }
}
