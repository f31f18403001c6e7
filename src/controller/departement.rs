use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::flash::{self, Flash, IncomingFlash};
use crate::models::DepartementForm;
use crate::service::{DepartementService, EmployeService};
use crate::validation::{FORM, FieldErrors};
use crate::view::Views;

const LIST: &str = "/departement";

fn render_form(
    views: &Views,
    title: &str,
    action: &str,
    form: &DepartementForm,
    errors: &FieldErrors,
) -> AppResult<HttpResponse> {
    views.render(
        "departement/form",
        &json!({
            "title": title,
            "action": action,
            "form": form,
            "errors": errors.to_context(),
        }),
    )
}

pub async fn list_departements(
    departements: web::Data<DepartementService>,
    views: web::Data<Views>,
    IncomingFlash(flash): IncomingFlash,
) -> AppResult<HttpResponse> {
    let departements = departements.get_all().await?;
    views.render_with_flash(
        "departement/list",
        json!({ "title": "Départements", "departements": departements }),
        flash,
    )
}

pub async fn new_departement(views: web::Data<Views>) -> AppResult<HttpResponse> {
    render_form(
        &views,
        "Nouveau département",
        "/departement/save",
        &DepartementForm::default(),
        &FieldErrors::new(),
    )
}

pub async fn save_departement(
    departements: web::Data<DepartementService>,
    views: web::Data<Views>,
    form: web::Form<DepartementForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let render = |errors: &FieldErrors| {
        debug!(%errors, "Departement form rejected");
        render_form(&views, "Nouveau département", "/departement/save", &form, errors)
    };

    let cmd = match form.check() {
        Ok(cmd) => cmd,
        Err(errors) => return render(&errors),
    };

    match departements.add(cmd).await {
        Ok(departement) => Ok(flash::redirect(
            LIST,
            Flash::success(format!(
                "Le département {} a été créé avec succès !",
                departement.label
            )),
        )),
        Err(AppError::Validation(errors)) => render(&errors),
        Err(e) => Err(e),
    }
}

pub async fn list_employes_by_departement(
    path: web::Path<Uuid>,
    departements: web::Data<DepartementService>,
    employes: web::Data<EmployeService>,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let departement = departements.get_by_id(id).await?;
    let employes = employes.get_all_by_departement(id).await?;

    views.render(
        "employe/group",
        &json!({
            "title": departement.label,
            "heading": format!("Employés du département {}", departement.label),
            "employes": employes,
            "back": LIST,
        }),
    )
}

pub async fn edit_departement(
    path: web::Path<Uuid>,
    departements: web::Data<DepartementService>,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let departement = departements.get_by_id(id).await?;

    render_form(
        &views,
        "Modifier le département",
        &format!("/departement/update/{id}"),
        &DepartementForm::from(&departement),
        &FieldErrors::new(),
    )
}

pub async fn update_departement(
    path: web::Path<Uuid>,
    departements: web::Data<DepartementService>,
    views: web::Data<Views>,
    form: web::Form<DepartementForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();
    let action = format!("/departement/update/{id}");
    let render = |errors: &FieldErrors| {
        debug!(%errors, departement_id = %id, "Departement form rejected");
        render_form(&views, "Modifier le département", &action, &form, errors)
    };

    let cmd = match form.check() {
        Ok(cmd) => cmd,
        Err(errors) => return render(&errors),
    };

    match departements.update(id, cmd).await {
        Ok(departement) => Ok(flash::redirect(
            LIST,
            Flash::success(format!(
                "Le département {} a été mis à jour avec succès !",
                departement.label
            )),
        )),
        Err(AppError::Validation(errors)) => render(&errors),
        Err(AppError::NotFound(message)) => render(&FieldErrors::single(FORM, message)),
        Err(e) => Err(e),
    }
}

pub async fn delete_departement(
    path: web::Path<Uuid>,
    departements: web::Data<DepartementService>,
) -> AppResult<HttpResponse> {
    match departements.delete(path.into_inner()).await {
        Ok(()) => Ok(flash::redirect(
            LIST,
            Flash::success("Le département a été supprimé avec succès !"),
        )),
        Err(AppError::NotFound(message) | AppError::InUse(message)) => {
            Ok(flash::redirect(LIST, Flash::error(message)))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use crate::routes::{self, AppState};
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn update_of_a_vanished_departement_keeps_the_form() {
        let state = AppState::in_memory().unwrap();
        let app =
            test::init_service(App::new().configure(|cfg| routes::configure(cfg, state.clone())))
                .await;

        let req = test::TestRequest::post()
            .uri(&format!("/departement/update/{}", uuid::Uuid::new_v4()))
            .set_form([("label", "Juridique")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("Département non trouvé"));
        assert!(html.contains(r#"value="Juridique""#));
    }

    #[actix_web::test]
    async fn created_departement_is_listed() {
        let state = AppState::in_memory().unwrap();
        let app =
            test::init_service(App::new().configure(|cfg| routes::configure(cfg, state.clone())))
                .await;

        let req = test::TestRequest::post()
            .uri("/departement/save")
            .set_form([("label", "Marketing")])
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FOUND);

        let req = test::TestRequest::get().uri("/departement").to_request();
        let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
        assert!(html.contains("<td>Marketing</td>"));
    }

    #[actix_web::test]
    async fn delete_of_an_occupied_departement_is_refused_with_an_error_flash() {
        use crate::model::poste::TypePoste;
        use crate::models::{DepartementCommand, EmployeCommand, PosteCommand};

        let state = AppState::in_memory().unwrap();
        let services = &state.services;
        let poste = services
            .postes
            .add(PosteCommand {
                label: "Vendeur".into(),
                kind: TypePoste::Employe,
            })
            .await
            .unwrap();
        let departement = services
            .departements
            .add(DepartementCommand {
                label: "Commercial".into(),
            })
            .await
            .unwrap();
        services
            .employes
            .add(EmployeCommand {
                name: "Paul Girard".into(),
                email: "paul.girard@entreprise.fr".into(),
                hire_date: chrono::NaiveDate::from_ymd_opt(2022, 5, 2).unwrap(),
                salary: 28000.0,
                poste_id: poste.id,
                departement_id: departement.id,
            })
            .await
            .unwrap();

        let app =
            test::init_service(App::new().configure(|cfg| routes::configure(cfg, state.clone())))
                .await;
        let req = test::TestRequest::post()
            .uri(&format!("/departement/delete/{}", departement.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);

        let flash = resp
            .response()
            .cookies()
            .find(|c| c.name() == "flash")
            .expect("flash cookie set");
        assert!(flash.value().starts_with("e:"));
        assert!(urlencoding::decode(flash.value()).unwrap().contains("encore des employés"));
        assert_eq!(services.departements.get_all().await.unwrap().len(), 1);
    }
}

