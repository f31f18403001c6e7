use actix_web::{Responder, web};
use uuid::Uuid;

use super::respond;
use crate::service::EmployeService;

/// List Employes
#[utoipa::path(
    get,
    path = "/api/employes",
    responses(
        (status = 200, description = "All employees with seniority and labels", body = [crate::models::EmployeDto]),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Something went wrong, Contact with system admin"
        }))
    ),
    tag = "Employe"
)]
pub async fn list_employes(employes: web::Data<EmployeService>) -> impl Responder {
    respond(employes.get_all().await)
}

/// Get Employe by ID
#[utoipa::path(
    get,
    path = "/api/employes/{employe_id}",
    params(
        ("employe_id" = Uuid, Path, description = "Employe ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = crate::models::EmployeDto),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employé non trouvé !"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employe"
)]
pub async fn get_employe(
    employes: web::Data<EmployeService>,
    path: web::Path<Uuid>,
) -> impl Responder {
    respond(employes.get_by_id(path.into_inner()).await)
}

#[cfg(test)]
mod tests {
    use crate::model::poste::TypePoste;
    use crate::models::{DepartementCommand, EmployeCommand, PosteCommand};
    use crate::routes::{self, AppState};
    use actix_web::{App, http::StatusCode, test};
    use chrono::NaiveDate;
    use serde_json::Value;

    #[actix_web::test]
    async fn employes_are_served_as_dtos() {
        let state = AppState::in_memory().unwrap();
        let services = &state.services;
        let poste = services
            .postes
            .add(PosteCommand {
                label: "Analyste".into(),
                kind: TypePoste::Cadre,
            })
            .await
            .unwrap();
        let departement = services
            .departements
            .add(DepartementCommand {
                label: "Finance".into(),
            })
            .await
            .unwrap();
        let employe = services
            .employes
            .add(EmployeCommand {
                name: "Hugo Petit".into(),
                email: "hugo.petit@entreprise.fr".into(),
                hire_date: NaiveDate::from_ymd_opt(2018, 2, 1).unwrap(),
                salary: 47000.0,
                poste_id: poste.id,
                departement_id: departement.id,
            })
            .await
            .unwrap();

        let app =
            test::init_service(App::new().configure(|cfg| routes::configure(cfg, state.clone())))
                .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/employes/{}", employe.id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["name"], "Hugo Petit");
        assert_eq!(body["poste"], "Analyste");
        assert_eq!(body["departement"], "Finance");
        assert!(body["seniority"].as_u64().unwrap() >= 8);

        let req = test::TestRequest::get()
            .uri(&format!("/api/postes/{}/employes", poste.id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn unknown_ids_are_json_404() {
        let state = AppState::in_memory().unwrap();
        let app =
            test::init_service(App::new().configure(|cfg| routes::configure(cfg, state.clone())))
                .await;

        for uri in ["/api/employes", "/api/postes", "/api/departements/{}/employes"] {
            let uri = if uri.contains("{}") {
                uri.replace("{}", &uuid::Uuid::new_v4().to_string())
            } else {
                format!("{uri}/{}", uuid::Uuid::new_v4())
            };
            let req = test::TestRequest::get().uri(&uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");

            let body: Value = test::read_body_json(resp).await;
            assert!(body["message"].is_string());
        }
    }
}
