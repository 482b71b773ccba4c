use serde::{Deserialize, Serialize};

use splitledger_core::{Entity, PersonId};

/// A member of a ledger.
///
/// `phone` is carried through import and export untouched; nothing here
/// reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Person {
    /// New person with a freshly minted id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PersonId::generate(),
            name: name.into(),
            phone: None,
        }
    }

    pub fn with_id(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: None,
        }
    }
}

impl Entity for Person {
    type Id = PersonId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
