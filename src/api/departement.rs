use actix_web::{HttpResponse, Responder, web};
use uuid::Uuid;

use super::respond;
use crate::service::{DepartementService, EmployeService};

/// List Departements
#[utoipa::path(
    get,
    path = "/api/departements",
    responses(
        (status = 200, description = "All departments ordered by label", body = [crate::model::departement::Departement]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Departement"
)]
pub async fn list_departements(departements: web::Data<DepartementService>) -> impl Responder {
    respond(departements.get_all().await)
}

/// Get Departement by ID
#[utoipa::path(
    get,
    path = "/api/departements/{departement_id}",
    params(
        ("departement_id" = Uuid, Path, description = "Departement ID")
    ),
    responses(
        (status = 200, description = "Departement found", body = crate::model::departement::Departement),
        (status = 404, description = "Departement not found", body = Object, example = json!({
            "message": "Département non trouvé"
        }))
    ),
    tag = "Departement"
)]
pub async fn get_departement(
    departements: web::Data<DepartementService>,
    path: web::Path<Uuid>,
) -> impl Responder {
    respond(departements.get_by_id(path.into_inner()).await)
}

/// Employees of a Departement
#[utoipa::path(
    get,
    path = "/api/departements/{departement_id}/employes",
    params(
        ("departement_id" = Uuid, Path, description = "Departement ID")
    ),
    responses(
        (status = 200, description = "Employees of the department", body = [crate::models::EmployeDto]),
        (status = 404, description = "Departement not found")
    ),
    tag = "Departement"
)]
pub async fn list_departement_employes(
    departements: web::Data<DepartementService>,
    employes: web::Data<EmployeService>,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let departement_id = path.into_inner();
    if let Err(e) = departements.get_by_id(departement_id).await {
        return super::json_error(e);
    }
    respond(employes.get_all_by_departement(departement_id).await)
}
