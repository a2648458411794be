//! Activity records and the ordered catalog returned by the listing endpoint.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A named extracurricular offering with its roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    /// Student emails in signup order, no duplicates
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }
}

/// Listing value: an activity without its name, which becomes the map key
#[derive(Serialize)]
struct ActivityDetails<'a> {
    description: &'a str,
    schedule: &'a str,
    max_participants: u32,
    participants: &'a [String],
}

impl<'a> From<&'a Activity> for ActivityDetails<'a> {
    fn from(activity: &'a Activity) -> Self {
        Self {
            description: &activity.description,
            schedule: &activity.schedule,
            max_participants: activity.max_participants,
            participants: &activity.participants,
        }
    }
}

/// Point-in-time copy of every activity, kept in store order.
///
/// Serializes as a JSON object keyed by activity name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityCatalog(Vec<Activity>);

impl ActivityCatalog {
    pub const fn new(activities: Vec<Activity>) -> Self {
        Self(activities)
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&Activity> {
        self.0.iter().find(|a| a.name == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ActivityCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for activity in &self.0 {
            map.serialize_entry(&activity.name, &ActivityDetails::from(activity))?;
        }
        map.end()
    }
}
