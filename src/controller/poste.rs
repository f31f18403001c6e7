use actix_web::{HttpResponse, web};
use serde_json::{Value, json};
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::flash::{self, Flash, IncomingFlash};
use crate::model::poste::Poste;
use crate::models::PosteForm;
use crate::service::{EmployeService, PosteService};
use crate::validation::{FORM, FieldErrors};
use crate::view::{Views, type_choices};

const LIST: &str = "/poste";

fn rows(postes: &[Poste]) -> Vec<Value> {
    postes
        .iter()
        .map(|p| json!({ "id": p.id, "label": p.label, "kind_label": p.kind.label() }))
        .collect()
}

fn render_form(
    views: &Views,
    title: &str,
    action: &str,
    form: &PosteForm,
    errors: &FieldErrors,
) -> AppResult<HttpResponse> {
    views.render(
        "poste/form",
        &json!({
            "title": title,
            "action": action,
            "form": form,
            "errors": errors.to_context(),
            "types": type_choices(&form.kind),
        }),
    )
}

pub async fn list_postes(
    postes: web::Data<PosteService>,
    views: web::Data<Views>,
    IncomingFlash(flash): IncomingFlash,
) -> AppResult<HttpResponse> {
    let postes = postes.get_all().await?;
    views.render_with_flash(
        "poste/list",
        json!({ "title": "Postes", "postes": rows(&postes) }),
        flash,
    )
}

pub async fn new_poste(views: web::Data<Views>) -> AppResult<HttpResponse> {
    render_form(
        &views,
        "Nouveau poste",
        "/poste/save",
        &PosteForm::default(),
        &FieldErrors::new(),
    )
}

pub async fn save_poste(
    postes: web::Data<PosteService>,
    views: web::Data<Views>,
    form: web::Form<PosteForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let render = |errors: &FieldErrors| {
        debug!(%errors, "Poste form rejected");
        render_form(&views, "Nouveau poste", "/poste/save", &form, errors)
    };

    let cmd = match form.check() {
        Ok(cmd) => cmd,
        Err(errors) => return render(&errors),
    };

    match postes.add(cmd).await {
        Ok(poste) => Ok(flash::redirect(
            LIST,
            Flash::success(format!("Le poste {} a été créé avec succès !", poste.label)),
        )),
        Err(AppError::Validation(errors)) => render(&errors),
        Err(e) => Err(e),
    }
}

pub async fn list_employes_by_poste(
    path: web::Path<Uuid>,
    postes: web::Data<PosteService>,
    employes: web::Data<EmployeService>,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let poste = postes
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poste non existant !".into()))?;
    let employes = employes.get_all_by_poste(id).await?;

    views.render(
        "employe/group",
        &json!({
            "title": poste.label,
            "heading": format!("Employés au poste {}", poste.label),
            "employes": employes,
            "back": LIST,
        }),
    )
}

pub async fn edit_poste(
    path: web::Path<Uuid>,
    postes: web::Data<PosteService>,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let poste = postes.get_by_id(id).await?;

    render_form(
        &views,
        "Modifier le poste",
        &format!("/poste/update/{id}"),
        &PosteForm::from(&poste),
        &FieldErrors::new(),
    )
}

pub async fn update_poste(
    path: web::Path<Uuid>,
    postes: web::Data<PosteService>,
    views: web::Data<Views>,
    form: web::Form<PosteForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = form.into_inner();
    let action = format!("/poste/update/{id}");
    let render = |errors: &FieldErrors| {
        debug!(%errors, poste_id = %id, "Poste form rejected");
        render_form(&views, "Modifier le poste", &action, &form, errors)
    };

    let cmd = match form.check() {
        Ok(cmd) => cmd,
        Err(errors) => return render(&errors),
    };

    match postes.update(id, cmd).await {
        Ok(poste) => Ok(flash::redirect(
            LIST,
            Flash::success(format!(
                "Le poste {} a été mis à jour avec succès !",
                poste.label
            )),
        )),
        Err(AppError::Validation(errors)) => render(&errors),
        Err(AppError::NotFound(message)) => render(&FieldErrors::single(FORM, message)),
        Err(e) => Err(e),
    }
}

pub async fn delete_poste(
    path: web::Path<Uuid>,
    postes: web::Data<PosteService>,
) -> AppResult<HttpResponse> {
    match postes.delete(path.into_inner()).await {
        Ok(()) => Ok(flash::redirect(
            LIST,
            Flash::success("Le poste a été supprimé avec succès !"),
        )),
        Err(AppError::NotFound(message) | AppError::InUse(message)) => {
            Ok(flash::redirect(LIST, Flash::error(message)))
        }
        Err(e) => Err(e),
    }
}
