//! In-memory model snapshot consumed by the layout engine.
//!
//! A [`Model`] holds individuals and activities keyed by id, in the order the
//! caller supplied them. That order is significant: rows are assigned in
//! individual order and label collisions are resolved first-seen-wins.
//!
//! Snapshots are immutable for the duration of a layout call. They can be
//! built in code or deserialized, e.g. from TOML:
//!
//! ```
//! # use chronolane::model::Model;
//! let source = r#"
//!     [[individual]]
//!     id = "crane"
//!     name = "Crane"
//!
//!     [[activity]]
//!     id = "lift"
//!     name = "Lift"
//!     beginning = 0.0
//!     ending = 4.0
//!     participations = [{ individual_id = "crane" }]
//! "#;
//! let model: Model = toml::from_str(source).unwrap();
//! assert_eq!(model.individuals().len(), 1);
//! assert_eq!(model.activities().len(), 1);
//! ```

mod activity;
mod individual;
mod interval;

pub use activity::{Activity, Participation};
pub use individual::{BEFORE_TIME, END_OF_TIME, Individual, IndividualRole, Installation};
pub use interval::Interval;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use chronolane_core::identifier::Id;

use crate::ChronolaneError;

/// Serialized shape of a model: arrays of individuals and activities.
#[derive(Debug, Default, Deserialize)]
struct ModelFile {
    #[serde(default)]
    individual: Vec<Individual>,
    #[serde(default)]
    activity: Vec<Activity>,
}

/// An immutable snapshot of individuals and activities.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "ModelFile")]
pub struct Model {
    individuals: IndexMap<Id, Individual>,
    activities: IndexMap<Id, Activity>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an individual, replacing any earlier one with the same id in place.
    pub fn add_individual(&mut self, individual: Individual) {
        if let Some(previous) = self.individuals.insert(individual.id, individual) {
            debug!(id:% = previous.id; "Replaced individual with duplicate id");
        }
    }

    /// Adds an activity, replacing any earlier one with the same id in place.
    pub fn add_activity(&mut self, activity: Activity) {
        if let Some(previous) = self.activities.insert(activity.id, activity) {
            debug!(id:% = previous.id; "Replaced activity with duplicate id");
        }
    }

    /// Builder-style [`Model::add_individual`].
    pub fn with_individual(mut self, individual: Individual) -> Self {
        self.add_individual(individual);
        self
    }

    /// Builder-style [`Model::add_activity`].
    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.add_activity(activity);
        self
    }

    pub fn individuals(&self) -> &IndexMap<Id, Individual> {
        &self.individuals
    }

    pub fn activities(&self) -> &IndexMap<Id, Activity> {
        &self.activities
    }

    pub fn individual(&self, id: Id) -> Option<&Individual> {
        self.individuals.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty() && self.activities.is_empty()
    }

    /// Parses a model snapshot from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ChronolaneError::Parse`] with the offending span when the
    /// source is not valid TOML or does not match the model shape.
    pub fn from_toml(source: &str) -> Result<Self, ChronolaneError> {
        toml::from_str(source)
            .map_err(|err| ChronolaneError::new_parse_error(err.message(), err.span(), source))
    }
}

impl From<ModelFile> for Model {
    fn from(file: ModelFile) -> Self {
        let mut model = Model::new();
        for individual in file.individual {
            model.add_individual(individual);
        }
        for activity in file.activity {
            model.add_activity(activity);
        }
        model
    }
}
