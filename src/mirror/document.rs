// Document mirror module
// Keeps a copy of every activity in a TOML document on disk

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use super::{Mirror, MirrorError};
use crate::activities::Activity;
use crate::logger;

/// On-disk layout: one `[[activities]]` table per record
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
struct MirrorDocument {
    #[serde(default)]
    activities: Vec<Activity>,
}

impl MirrorDocument {
    fn record_mut(&mut self, name: &str) -> Option<&mut Activity> {
        self.activities.iter_mut().find(|a| a.name == name)
    }
}

/// Mirror backed by a TOML document file
pub struct DocumentMirror {
    path: PathBuf,
    /// Cached copy of the document; the lock also serializes file writes
    document: Mutex<MirrorDocument>,
}

impl DocumentMirror {
    /// Open the document at `path`, creating it from `seed` when absent
    pub async fn open(path: impl AsRef<Path>, seed: &[Activity]) -> Result<Self, MirrorError> {
        let path = path.as_ref().to_path_buf();

        let document = if fs::try_exists(&path).await? {
            let content = fs::read_to_string(&path).await?;
            let document: MirrorDocument = toml::from_str(&content)?;
            logger::log_info(&format!(
                "[Mirror] Loaded {} activities from {}",
                document.activities.len(),
                path.display()
            ));
            document
        } else {
            let document = MirrorDocument {
                activities: seed.to_vec(),
            };
            write_document(&path, &document).await?;
            logger::log_info(&format!(
                "[Mirror] Created {} from seed data",
                path.display()
            ));
            document
        };

        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    #[allow(clippy::missing_const_for_fn)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `update` to the named record and persist the result.
    ///
    /// An activity missing from the document matches nothing; the update is
    /// skipped and reported as a warning.
    async fn update_record<F>(&self, activity: &str, update: F) -> Result<(), MirrorError>
    where
        F: FnOnce(&mut Activity),
    {
        let mut document = self.document.lock().await;
        let Some(record) = document.record_mut(activity) else {
            logger::log_warning(&format!(
                "[Mirror] No document for activity '{activity}', update skipped"
            ));
            return Ok(());
        };
        update(record);
        write_document(&self.path, &document).await
    }
}

#[async_trait]
impl Mirror for DocumentMirror {
    fn name(&self) -> &'static str {
        "document"
    }

    async fn load_activities(&self) -> Result<Option<Vec<Activity>>, MirrorError> {
        Ok(Some(self.document.lock().await.activities.clone()))
    }

    async fn push_participant(&self, activity: &str, email: &str) -> Result<(), MirrorError> {
        self.update_record(activity, |record| {
            record.participants.push(email.to_string());
        })
        .await
    }

    async fn pull_participant(&self, activity: &str, email: &str) -> Result<(), MirrorError> {
        self.update_record(activity, |record| {
            record.participants.retain(|p| p != email);
        })
        .await
    }
}

/// Write the document next to its destination, then rename it into place
async fn write_document(path: &Path, document: &MirrorDocument) -> Result<(), MirrorError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let content = toml::to_string_pretty(document)?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, content).await?;
    fs::rename(&tmp_path, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activities::seed_activities;

    async fn open_temp() -> (tempfile::TempDir, DocumentMirror) {
        let dir = tempfile::tempdir().unwrap();
        let mirror = DocumentMirror::open(dir.path().join("activities.toml"), &seed_activities())
            .await
            .unwrap();
        (dir, mirror)
    }

    #[tokio::test]
    async fn test_push_is_persisted() {
        let (dir, mirror) = open_temp().await;
        mirror
            .push_participant("Chess Club", "zack@mergington.edu")
            .await
            .unwrap();

        let reopened = DocumentMirror::open(dir.path().join("activities.toml"), &[])
            .await
            .unwrap();
        let activities = reopened.load_activities().await.unwrap().unwrap();
        let chess = activities.iter().find(|a| a.name == "Chess Club").unwrap();
        assert_eq!(chess.participants.last().unwrap(), "zack@mergington.edu");
    }

    #[tokio::test]
    async fn test_pull_removes_every_occurrence() {
        let (_dir, mirror) = open_temp().await;
        mirror
            .push_participant("Math Club", "elijah@mergington.edu")
            .await
            .unwrap();
        mirror
            .pull_participant("Math Club", "elijah@mergington.edu")
            .await
            .unwrap();

        let activities = mirror.load_activities().await.unwrap().unwrap();
        let math = activities.iter().find(|a| a.name == "Math Club").unwrap();
        assert_eq!(math.participants, vec!["james@mergington.edu"]);
    }

    #[tokio::test]
    async fn test_unknown_activity_is_skipped() {
        let (_dir, mirror) = open_temp().await;
        mirror
            .push_participant("Chess Clubb", "zack@mergington.edu")
            .await
            .unwrap();
        let activities = mirror.load_activities().await.unwrap().unwrap();
        assert!(activities.iter().all(|a| a.name != "Chess Clubb"));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activities.toml");
        std::fs::write(&path, "activities = \"not a table\"").unwrap();

        let result = DocumentMirror::open(&path, &seed_activities()).await;
        assert!(matches!(result, Err(MirrorError::Decode(_))));
    }
}
