//! In-memory activity store
//!
//! Single synchronized access point for the roster. Every check-then-mutate
//! sequence runs under one write lock, so concurrent signups for the same
//! activity cannot interleave.

use tokio::sync::RwLock;

use super::error::ActivityError;
use super::model::{Activity, ActivityCatalog};
use super::seed::seed_activities;

pub struct ActivityStore {
    activities: RwLock<Vec<Activity>>,
}

impl ActivityStore {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self {
            activities: RwLock::new(activities),
        }
    }

    /// Store holding the built-in seed activities
    pub fn seeded() -> Self {
        Self::new(seed_activities())
    }

    /// Copy of every activity in store order
    pub async fn snapshot(&self) -> ActivityCatalog {
        ActivityCatalog::new(self.activities.read().await.clone())
    }

    #[cfg(test)]
    pub(crate) async fn participants(&self, activity: &str) -> Option<Vec<String>> {
        self.activities
            .read()
            .await
            .iter()
            .find(|a| a.name == activity)
            .map(|a| a.participants.clone())
    }

    /// Append `email` to the roster of `activity`
    pub async fn add_participant(&self, activity: &str, email: &str) -> Result<(), ActivityError> {
        let mut activities = self.activities.write().await;
        let record = activities
            .iter_mut()
            .find(|a| a.name == activity)
            .ok_or(ActivityError::ActivityNotFound)?;

        if record.has_participant(email) {
            return Err(ActivityError::AlreadyRegistered);
        }
        record.participants.push(email.to_string());
        Ok(())
    }

    /// Remove `email` from the roster of `activity`
    pub async fn remove_participant(
        &self,
        activity: &str,
        email: &str,
    ) -> Result<(), ActivityError> {
        let mut activities = self.activities.write().await;
        let record = activities
            .iter_mut()
            .find(|a| a.name == activity)
            .ok_or(ActivityError::ActivityNotFound)?;

        let position = record
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or(ActivityError::NotRegistered)?;
        record.participants.remove(position);
        Ok(())
    }
}

impl Default for ActivityStore {
    fn default() -> Self {
        Self::seeded()
    }
}
