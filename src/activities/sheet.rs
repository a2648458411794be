//! Signup sheet operations
//!
//! Validates requests, applies them to the store, then forwards them to the
//! mirror. A mirror failure is reported after the in-memory change has been
//! committed; the change is not rolled back.

use super::email::is_student_email;
use super::error::ActivityError;
use super::model::ActivityCatalog;
use super::store::ActivityStore;
use crate::logger;
use crate::mirror::SharedMirror;

pub struct SignupSheet {
    store: ActivityStore,
    mirror: SharedMirror,
}

impl SignupSheet {
    pub const fn new(store: ActivityStore, mirror: SharedMirror) -> Self {
        Self { store, mirror }
    }

    /// Build a sheet whose initial roster comes from the mirror, or from the
    /// seed data when the mirror holds none
    pub async fn from_mirror(mirror: SharedMirror) -> Result<Self, crate::mirror::MirrorError> {
        let store = match mirror.load_activities().await? {
            Some(activities) => ActivityStore::new(activities),
            None => ActivityStore::seeded(),
        };
        logger::log_info(&format!(
            "[Mirror:{}] Roster initialized with {} activities",
            mirror.name(),
            store.snapshot().await.len()
        ));
        Ok(Self::new(store, mirror))
    }

    #[cfg(test)]
    pub(crate) const fn store(&self) -> &ActivityStore {
        &self.store
    }

    pub async fn list(&self) -> ActivityCatalog {
        self.store.snapshot().await
    }

    /// Sign `email` up for `activity`, returning the confirmation message
    pub async fn sign_up(&self, activity: &str, email: &str) -> Result<String, ActivityError> {
        if !is_student_email(email) {
            return Err(ActivityError::InvalidEmailDomain);
        }
        self.store.add_participant(activity, email).await?;

        if let Err(e) = self.mirror.push_participant(activity, email).await {
            logger::log_error(&format!(
                "[Mirror:{}] push of {email} to '{activity}' failed: {e}",
                self.mirror.name()
            ));
            return Err(e.into());
        }

        logger::log_debug(&format!("Signed up {email} for {activity}"));
        Ok(format!("Signed up {email} for {activity}"))
    }

    /// Remove `email` from `activity`, returning the confirmation message
    pub async fn unregister(&self, activity: &str, email: &str) -> Result<String, ActivityError> {
        if !is_student_email(email) {
            return Err(ActivityError::InvalidEmailDomain);
        }
        self.store.remove_participant(activity, email).await?;

        if let Err(e) = self.mirror.pull_participant(activity, email).await {
            logger::log_error(&format!(
                "[Mirror:{}] pull of {email} from '{activity}' failed: {e}",
                self.mirror.name()
            ));
            return Err(e.into());
        }

        logger::log_debug(&format!("Unregistered {email} from {activity}"));
        Ok(format!("Unregistered {email} from {activity}"))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::activities::{seed_activities, Activity};
    use crate::mirror::{DocumentMirror, Mirror, MirrorError, NoopMirror};
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Mirror whose writes always fail
    pub struct FailingMirror;

    #[async_trait]
    impl Mirror for FailingMirror {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn load_activities(&self) -> Result<Option<Vec<Activity>>, MirrorError> {
            Ok(None)
        }

        async fn push_participant(&self, _: &str, _: &str) -> Result<(), MirrorError> {
            Err(std::io::Error::other("connection refused").into())
        }

        async fn pull_participant(&self, _: &str, _: &str) -> Result<(), MirrorError> {
            Err(std::io::Error::other("connection refused").into())
        }
    }

    fn sheet() -> SignupSheet {
        SignupSheet::new(ActivityStore::seeded(), Arc::new(NoopMirror))
    }

    #[tokio::test]
    async fn test_invalid_domain_checked_first() {
        let sheet = sheet();
        for activity in ["Chess Club", "Chess Clubb"] {
            let err = sheet.sign_up(activity, "bob@other.org").await.unwrap_err();
            assert!(matches!(err, ActivityError::InvalidEmailDomain));
            let err = sheet
                .unregister(activity, "bob@other.org")
                .await
                .unwrap_err();
            assert!(matches!(err, ActivityError::InvalidEmailDomain));
        }
    }

    #[tokio::test]
    async fn test_signup_then_unregister_restores_roster() {
        let sheet = sheet();
        let original = sheet.store().participants("Math Club").await.unwrap();

        let message = sheet
            .sign_up("Math Club", "zack@mergington.edu")
            .await
            .unwrap();
        assert_eq!(message, "Signed up zack@mergington.edu for Math Club");

        let message = sheet
            .unregister("Math Club", "zack@mergington.edu")
            .await
            .unwrap();
        assert_eq!(message, "Unregistered zack@mergington.edu from Math Club");
        assert_eq!(sheet.store().participants("Math Club").await.unwrap(), original);
    }

    #[tokio::test]
    async fn test_repeated_failures_are_stable() {
        let sheet = sheet();
        for _ in 0..3 {
            let err = sheet
                .sign_up("Chess Club", "michael@mergington.edu")
                .await
                .unwrap_err();
            assert!(matches!(err, ActivityError::AlreadyRegistered));
            let err = sheet
                .unregister("Chess Club", "nobody@mergington.edu")
                .await
                .unwrap_err();
            assert!(matches!(err, ActivityError::NotRegistered));
        }
    }

    #[tokio::test]
    async fn test_mirror_failure_keeps_memory_change() {
        let sheet = SignupSheet::new(ActivityStore::seeded(), Arc::new(FailingMirror));

        let err = sheet
            .sign_up("Chess Club", "zack@mergington.edu")
            .await
            .unwrap_err();
        assert!(matches!(err, ActivityError::Mirror(_)));
        let participants = sheet.store().participants("Chess Club").await.unwrap();
        assert!(participants.contains(&"zack@mergington.edu".to_string()));

        let err = sheet
            .unregister("Chess Club", "zack@mergington.edu")
            .await
            .unwrap_err();
        assert!(matches!(err, ActivityError::Mirror(_)));
        let participants = sheet.store().participants("Chess Club").await.unwrap();
        assert!(!participants.contains(&"zack@mergington.edu".to_string()));
    }

    #[tokio::test]
    async fn test_from_mirror_falls_back_to_seed() {
        let sheet = SignupSheet::from_mirror(Arc::new(NoopMirror)).await.unwrap();
        assert_eq!(sheet.list().await.len(), 15);
    }

    #[tokio::test]
    async fn test_document_roster_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activities.toml");

        let mirror = DocumentMirror::open(&path, &seed_activities()).await.unwrap();
        let sheet = SignupSheet::from_mirror(Arc::new(mirror)).await.unwrap();
        sheet
            .sign_up("Math Club", "zack@mergington.edu")
            .await
            .unwrap();
        sheet
            .unregister("Math Club", "elijah@mergington.edu")
            .await
            .unwrap();
        drop(sheet);

        // Empty seed: the roster can only come from the document
        let reopened = DocumentMirror::open(&path, &[]).await.unwrap();
        let sheet = SignupSheet::from_mirror(Arc::new(reopened)).await.unwrap();
        assert_eq!(sheet.list().await.len(), 15);
        assert_eq!(
            sheet.store().participants("Math Club").await.unwrap(),
            vec!["james@mergington.edu", "zack@mergington.edu"]
        );
    }
}
