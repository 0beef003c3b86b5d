use serde::{Deserialize, Serialize};

use crate::model::ids::CardId;

/// The card the backend has scheduled for review right now.
///
/// Only the two display fields matter to the client. The backend names the
/// prompt term `korean` and the definition `english` on the wire; everything
/// else it attaches to a card is opaque to the study loop and ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueCard {
    pub id: CardId,
    #[serde(rename = "korean")]
    pub term: String,
    #[serde(rename = "english")]
    pub definition: String,
}

impl DueCard {
    #[must_use]
    pub fn new(id: CardId, term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id,
            term: term.into(),
            definition: definition.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_backend_field_names() {
        let json = r#"{"id":"card-1","korean":"사과","english":"apple"}"#;
        let card: DueCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.id, CardId::new("card-1"));
        assert_eq!(card.term, "사과");
        assert_eq!(card.definition, "apple");
    }

    #[test]
    fn ignores_extra_backend_fields() {
        let json = r#"{"id":"card-2","korean":"물","english":"water","stability":3.2}"#;
        let card: DueCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.term, "물");
    }
}
