//! Individuals (entities drawn as rows) and their installations.

use serde::Deserialize;

use chronolane_core::identifier::Id;

use super::Interval;

/// Sentinel for "existed before time began". Any negative beginning is unbounded.
pub const BEFORE_TIME: f64 = -1.0;

/// Sentinel for "lasts until the end of time". Any ending at or past it is unbounded.
pub const END_OF_TIME: f64 = 9_007_199_254_740_991.0;

fn before_time() -> f64 {
    BEFORE_TIME
}

fn end_of_time() -> f64 {
    END_OF_TIME
}

/// The part an individual plays in an installation hierarchy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndividualRole {
    #[default]
    Plain,
    /// A host that components are installed into.
    System,
    /// A slot inside a System; itself a target for installed components.
    SystemComponent,
    /// A physical component installed into a SystemComponent.
    InstalledComponent,
}

impl IndividualRole {
    /// Whether other individuals can be installed into this one.
    pub fn is_installation_target(self) -> bool {
        matches!(self, Self::System | Self::SystemComponent)
    }
}

/// A time-bounded placement of one individual inside a target.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Installation {
    pub id: Id,
    pub target_id: Id,
    pub beginning: f64,
    /// `None` inherits the target's ending.
    #[serde(default)]
    pub ending: Option<f64>,
    /// Which System the target lives in, when the target is a SystemComponent
    /// installed in more than one System.
    #[serde(default)]
    pub system_context_id: Option<Id>,
}

impl Installation {
    pub fn new(id: &str, target_id: &str, beginning: f64, ending: Option<f64>) -> Self {
        Self {
            id: Id::new(id),
            target_id: Id::new(target_id),
            beginning,
            ending,
            system_context_id: None,
        }
    }

    /// Restricts the installation to one System context (builder style).
    pub fn with_system_context(mut self, system_id: &str) -> Self {
        self.system_context_id = Some(Id::new(system_id));
        self
    }

    /// The installation period. An absent ending is left open so that the
    /// target's own ending applies after intersection.
    pub fn interval(&self) -> Interval {
        Interval::new(self.beginning, self.ending.unwrap_or(f64::INFINITY))
    }
}

/// A modeled thing with a name and temporal extent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Individual {
    pub id: Id,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default = "before_time")]
    pub beginning: f64,
    #[serde(default = "end_of_time")]
    pub ending: f64,
    /// Let the extent start with the earliest participation instead of
    /// constraining participations.
    #[serde(default)]
    pub begins_with_participant: bool,
    /// Let the extent end with the latest participation.
    #[serde(default)]
    pub ends_with_participant: bool,
    #[serde(default)]
    pub role: IndividualRole,
    #[serde(default)]
    pub installations: Vec<Installation>,
}

impl Individual {
    /// Creates a plain individual existing for all of time.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: Id::new(id),
            name: name.to_string(),
            kind: None,
            beginning: BEFORE_TIME,
            ending: END_OF_TIME,
            begins_with_participant: false,
            ends_with_participant: false,
            role: IndividualRole::Plain,
            installations: Vec::new(),
        }
    }

    /// Sets the declared extent (builder style).
    pub fn with_extent(mut self, beginning: f64, ending: f64) -> Self {
        self.beginning = beginning;
        self.ending = ending;
        self
    }

    pub fn with_role(mut self, role: IndividualRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_installation(mut self, installation: Installation) -> Self {
        self.installations.push(installation);
        self
    }

    pub fn with_participant_bounds(mut self, begins: bool, ends: bool) -> Self {
        self.begins_with_participant = begins;
        self.ends_with_participant = ends;
        self
    }

    pub fn has_open_beginning(&self) -> bool {
        self.beginning < 0.0
    }

    pub fn has_open_ending(&self) -> bool {
        self.ending >= END_OF_TIME
    }

    /// The declared extent with sentinels mapped to infinities.
    pub fn extent(&self) -> Interval {
        let start = if self.has_open_beginning() {
            f64::NEG_INFINITY
        } else {
            self.beginning
        };
        let end = if self.has_open_ending() {
            f64::INFINITY
        } else {
            self.ending
        };
        Interval::new(start, end)
    }
}
