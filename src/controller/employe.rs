use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::flash::{self, Flash, IncomingFlash};
use crate::models::EmployeForm;
use crate::service::{DepartementService, EmployeService, PosteService, employe::today};
use crate::validation::{FORM, FieldErrors};
use crate::view::{Views, choices};

const LIST: &str = "/employe";

/// Services the employee form pages need besides the employee service.
struct FormPage<'a> {
    views: &'a Views,
    postes: &'a PosteService,
    departements: &'a DepartementService,
}

impl FormPage<'_> {
    async fn render(
        &self,
        title: &str,
        action: &str,
        form: &EmployeForm,
        errors: &FieldErrors,
    ) -> AppResult<HttpResponse> {
        let postes = self.postes.get_all().await?;
        let departements = self.departements.get_all().await?;

        self.views.render(
            "employe/form",
            &json!({
                "title": title,
                "action": action,
                "form": form,
                "errors": errors.to_context(),
                "postes": choices(
                    postes.iter().map(|p| (p.id.to_string(), p.label.as_str())),
                    &form.poste_id,
                ),
                "departements": choices(
                    departements.iter().map(|d| (d.id.to_string(), d.label.as_str())),
                    &form.departement_id,
                ),
            }),
        )
    }
}

pub async fn list_employes(
    employes: web::Data<EmployeService>,
    views: web::Data<Views>,
    IncomingFlash(flash): IncomingFlash,
) -> AppResult<HttpResponse> {
    let employes = employes.get_all().await?;
    views.render_with_flash(
        "employe/list",
        json!({ "title": "Employés", "employes": employes }),
        flash,
    )
}

pub async fn show_employe(
    path: web::Path<Uuid>,
    employes: web::Data<EmployeService>,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    let employe = employes.get_by_id(path.into_inner()).await?;
    views.render(
        "employe/show",
        &json!({ "title": employe.name, "employe": employe }),
    )
}

pub async fn new_employe(
    postes: web::Data<PosteService>,
    departements: web::Data<DepartementService>,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    let page = FormPage {
        views: &views,
        postes: &postes,
        departements: &departements,
    };
    page.render(
        "Nouvel employé",
        "/employe/save",
        &EmployeForm::default(),
        &FieldErrors::new(),
    )
    .await
}

pub async fn save_employe(
    employes: web::Data<EmployeService>,
    postes: web::Data<PosteService>,
    departements: web::Data<DepartementService>,
    views: web::Data<Views>,
    form: web::Form<EmployeForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let page = FormPage {
        views: &views,
        postes: &postes,
        departements: &departements,
    };
    let (title, action) = ("Nouvel employé", "/employe/save");

    let cmd = match form.check(today()) {
        Ok(cmd) => cmd,
        Err(errors) => {
            debug!(%errors, "Employe form rejected");
            return page.render(title, action, &form, &errors).await;
        }
    };

    match employes.add(cmd).await {
        Ok(employe) => Ok(flash::redirect(
            LIST,
            Flash::success(format!(
                "L'employé {} a été créé avec succès !",
                employe.name
            )),
        )),
        Err(AppError::Validation(errors)) => page.render(title, action, &form, &errors).await,
        Err(e) => Err(e),
    }
}

pub async fn edit_employe(
    path: web::Path<Uuid>,
    employes: web::Data<EmployeService>,
    postes: web::Data<PosteService>,
    departements: web::Data<DepartementService>,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let employe = employes
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employé non trouvé !".into()))?;

    let page = FormPage {
        views: &views,
        postes: &postes,
        departements: &departements,
    };
    page.render(
        "Modifier l'employé",
        &format!("/employe/update/{id}"),
        &EmployeForm::from(&employe),
        &FieldErrors::new(),
    )
    .await
}

pub async fn update_employe(
    path: web::Path<Uuid>,
    employes: web::Data<EmployeService>,
    postes: web::Data<PosteService>,
    departements: web::Data<DepartementService>,
    views: web::Data<Views>,
    form: web::Form<EmployeForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();
    let page = FormPage {
        views: &views,
        postes: &postes,
        departements: &departements,
    };
    let title = "Modifier l'employé";
    let action = format!("/employe/update/{id}");

    let cmd = match form.check(today()) {
        Ok(cmd) => cmd,
        Err(errors) => {
            debug!(%errors, employe_id = %id, "Employe form rejected");
            return page.render(title, &action, &form, &errors).await;
        }
    };

    match employes.update(id, cmd).await {
        Ok(employe) => Ok(flash::redirect(
            LIST,
            Flash::success(format!(
                "L'employé {} a été mis à jour avec succès !",
                employe.name
            )),
        )),
        Err(AppError::Validation(errors)) => page.render(title, &action, &form, &errors).await,
        Err(AppError::NotFound(message)) => {
            page.render(title, &action, &form, &FieldErrors::single(FORM, message))
                .await
        }
        Err(e) => Err(e),
    }
}

pub async fn delete_employe(
    path: web::Path<Uuid>,
    employes: web::Data<EmployeService>,
) -> AppResult<HttpResponse> {
    match employes.delete(path.into_inner()).await {
        Ok(()) => Ok(flash::redirect(
            LIST,
            Flash::success("L'employé a été supprimé avec succès !"),
        )),
        Err(AppError::NotFound(message)) => Ok(flash::redirect(LIST, Flash::error(message))),
        Err(e) => Err(e),
    }
}
