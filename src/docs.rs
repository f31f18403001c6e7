use crate::model::departement::Departement;
use crate::model::poste::{Poste, TypePoste};
use crate::models::EmployeDto;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Store API",
        version = "1.0.0",
        description = r#"
## Human Resource Records

Read-only JSON view over the records managed by the HTML forms:

- **Postes**: job positions with their classification (`TypePoste`)
- **Départements**: organisational units
- **Employés**: employees with seniority in whole years and the labels of their poste and département

Write operations go through the form pages (`/poste`, `/departement`, `/employe`).
"#,
    ),
    paths(
        crate::api::poste::list_postes,
        crate::api::poste::get_poste,
        crate::api::poste::list_poste_employes,

        crate::api::departement::list_departements,
        crate::api::departement::get_departement,
        crate::api::departement::list_departement_employes,

        crate::api::employe::list_employes,
        crate::api::employe::get_employe
    ),
    components(
        schemas(
            Poste,
            TypePoste,
            Departement,
            EmployeDto
        )
    ),
    tags(
        (name = "Poste", description = "Job positions"),
        (name = "Departement", description = "Departments"),
        (name = "Employe", description = "Employees"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_read_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/postes",
            "/api/postes/{poste_id}",
            "/api/postes/{poste_id}/employes",
            "/api/departements",
            "/api/departements/{departement_id}",
            "/api/departements/{departement_id}/employes",
            "/api/employes",
            "/api/employes/{employe_id}",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "{expected}");
        }
    }
}
