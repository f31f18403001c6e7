use actix_web::{HttpResponse, Responder, web};
use uuid::Uuid;

use super::respond;
use crate::service::{EmployeService, PosteService};

/// List Postes
#[utoipa::path(
    get,
    path = "/api/postes",
    responses(
        (status = 200, description = "All positions ordered by label", body = [crate::model::poste::Poste]),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Something went wrong, Contact with system admin"
        }))
    ),
    tag = "Poste"
)]
pub async fn list_postes(postes: web::Data<PosteService>) -> impl Responder {
    respond(postes.get_all().await)
}

/// Get Poste by ID
#[utoipa::path(
    get,
    path = "/api/postes/{poste_id}",
    params(
        ("poste_id" = Uuid, Path, description = "Poste ID")
    ),
    responses(
        (status = 200, description = "Poste found", body = crate::model::poste::Poste),
        (status = 404, description = "Poste not found", body = Object, example = json!({
            "message": "Poste non trouvé"
        }))
    ),
    tag = "Poste"
)]
pub async fn get_poste(
    postes: web::Data<PosteService>,
    path: web::Path<Uuid>,
) -> impl Responder {
    respond(postes.get_by_id(path.into_inner()).await)
}

/// Employees holding a Poste
#[utoipa::path(
    get,
    path = "/api/postes/{poste_id}/employes",
    params(
        ("poste_id" = Uuid, Path, description = "Poste ID")
    ),
    responses(
        (status = 200, description = "Employees holding the position", body = [crate::models::EmployeDto]),
        (status = 404, description = "Poste not found", body = Object, example = json!({
            "message": "Poste non trouvé"
        }))
    ),
    tag = "Poste"
)]
pub async fn list_poste_employes(
    postes: web::Data<PosteService>,
    employes: web::Data<EmployeService>,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let poste_id = path.into_inner();
    if let Err(e) = postes.get_by_id(poste_id).await {
        return super::json_error(e);
    }
    respond(employes.get_all_by_poste(poste_id).await)
}
