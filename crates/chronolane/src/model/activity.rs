//! Activities and the participations linking them to individuals.

use serde::Deserialize;

use chronolane_core::identifier::Id;

use super::Interval;

/// A reference from an activity to an individual.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Participation {
    pub individual_id: Id,
    #[serde(default)]
    pub role: Option<String>,
    /// When set, the participation concerns the individual while installed
    /// under this installation, and is drawn on the matching installation rows.
    #[serde(default)]
    pub installation_id: Option<Id>,
}

impl Participation {
    pub fn new(individual_id: &str) -> Self {
        Self {
            individual_id: Id::new(individual_id),
            role: None,
            installation_id: None,
        }
    }

    /// Targets an installation of the individual rather than its plain row.
    pub fn in_installation(mut self, installation_id: &str) -> Self {
        self.installation_id = Some(Id::new(installation_id));
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }
}

/// A named time interval during which a set of individuals participate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Activity {
    pub id: Id,
    pub name: String,
    pub beginning: f64,
    pub ending: f64,
    #[serde(default)]
    pub parent_id: Option<Id>,
    #[serde(default)]
    pub participations: Vec<Participation>,
}

impl Activity {
    pub fn new(id: &str, name: &str, beginning: f64, ending: f64) -> Self {
        Self {
            id: Id::new(id),
            name: name.to_string(),
            beginning,
            ending,
            parent_id: None,
            participations: Vec::new(),
        }
    }

    pub fn with_participation(mut self, participation: Participation) -> Self {
        self.participations.push(participation);
        self
    }

    /// Shorthand for a role-less participation of `individual_id`.
    pub fn with_participant(self, individual_id: &str) -> Self {
        self.with_participation(Participation::new(individual_id))
    }

    pub fn with_parent(mut self, parent_id: &str) -> Self {
        self.parent_id = Some(Id::new(parent_id));
        self
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.beginning, self.ending)
    }
}
