use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Departement {
    pub id: Uuid,

    #[schema(example = "Ressources humaines")]
    pub label: String,
}
