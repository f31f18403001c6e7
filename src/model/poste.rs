use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// Job classification of a position.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, EnumIter, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TypePoste {
    Cadre,
    AgentMaitrise,
    Technicien,
    Employe,
    Ouvrier,
}

impl TypePoste {
    /// Label shown in forms and lists.
    pub fn label(&self) -> &'static str {
        match self {
            TypePoste::Cadre => "Cadre",
            TypePoste::AgentMaitrise => "Agent de maîtrise",
            TypePoste::Technicien => "Technicien",
            TypePoste::Employe => "Employé",
            TypePoste::Ouvrier => "Ouvrier",
        }
    }
}

// column is a VARCHAR, decoded through the strum name
impl TryFrom<String> for TypePoste {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "6f1c2f0e-8a7b-4c43-9d5e-0b8f6f0c1a2b",
        "label": "Ingénieur",
        "kind": "CADRE"
    })
)]
pub struct Poste {
    pub id: Uuid,

    #[schema(example = "Ingénieur")]
    pub label: String,

    #[sqlx(try_from = "String")]
    pub kind: TypePoste,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn type_poste_round_trips_through_its_column_name() {
        assert_eq!(TypePoste::AgentMaitrise.to_string(), "AGENT_MAITRISE");
        assert_eq!(
            TypePoste::try_from("CADRE".to_string()).unwrap(),
            TypePoste::Cadre
        );
        assert!(TypePoste::try_from("cadre supérieur".to_string()).is_err());
    }

    #[test]
    fn every_type_poste_has_a_label() {
        assert_eq!(TypePoste::iter().count(), 5);
        assert!(TypePoste::iter().all(|t| !t.label().is_empty()));
    }

    #[test]
    fn serde_uses_the_same_names_as_the_store() {
        let json = serde_json::to_string(&TypePoste::Technicien).unwrap();
        assert_eq!(json, "\"TECHNICIEN\"");
    }
}
