use crate::{
    api,
    controller::{departement, employe, poste},
    repository::Repositories,
    service::Services,
    view::Views,
};
use actix_web::{HttpResponse, http::header, web};

/// Shared handles registered as `web::Data` on every worker.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub views: web::Data<Views>,
    pub api_prefix: String,
}

impl AppState {
    pub fn new(repos: &Repositories, api_prefix: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            services: Services::new(repos),
            views: web::Data::new(Views::new()?),
            api_prefix: api_prefix.into(),
        })
    }

    /// State over a fresh in-memory store, with the JSON API under `/api`.
    #[cfg(test)]
    pub fn in_memory() -> anyhow::Result<Self> {
        Self::new(&Repositories::in_memory(), "/api")
    }
}

async fn index() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/employe"))
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig, state: AppState) {
    let AppState {
        services,
        views,
        api_prefix,
    } = state;

    cfg.app_data(web::Data::new(services.postes))
        .app_data(web::Data::new(services.departements))
        .app_data(web::Data::new(services.employes))
        .app_data(views);

    cfg.route("/", web::get().to(index));

    cfg.service(
        web::scope("/poste")
            // /poste
            .service(web::resource("").route(web::get().to(poste::list_postes)))
            .service(web::resource("/new").route(web::get().to(poste::new_poste)))
            .service(web::resource("/save").route(web::post().to(poste::save_poste)))
            .service(
                web::resource("/employes/{id}").route(web::get().to(poste::list_employes_by_poste)),
            )
            .service(web::resource("/edit/{id}").route(web::get().to(poste::edit_poste)))
            .service(web::resource("/update/{id}").route(web::post().to(poste::update_poste)))
            .service(web::resource("/delete/{id}").route(web::post().to(poste::delete_poste))),
    );

    cfg.service(
        web::scope("/departement")
            // /departement
            .service(web::resource("").route(web::get().to(departement::list_departements)))
            .service(web::resource("/new").route(web::get().to(departement::new_departement)))
            .service(web::resource("/save").route(web::post().to(departement::save_departement)))
            .service(
                web::resource("/employes/{id}")
                    .route(web::get().to(departement::list_employes_by_departement)),
            )
            .service(web::resource("/edit/{id}").route(web::get().to(departement::edit_departement)))
            .service(
                web::resource("/update/{id}").route(web::post().to(departement::update_departement)),
            )
            .service(
                web::resource("/delete/{id}").route(web::post().to(departement::delete_departement)),
            ),
    );

    cfg.service(
        web::scope("/employe")
            // /employe
            .service(web::resource("").route(web::get().to(employe::list_employes)))
            // registered before /{id} so "new" is not parsed as an id
            .service(web::resource("/new").route(web::get().to(employe::new_employe)))
            .service(web::resource("/save").route(web::post().to(employe::save_employe)))
            .service(web::resource("/edit/{id}").route(web::get().to(employe::edit_employe)))
            .service(web::resource("/update/{id}").route(web::post().to(employe::update_employe)))
            .service(web::resource("/delete/{id}").route(web::post().to(employe::delete_employe)))
            // /employe/{id}
            .service(web::resource("/{id}").route(web::get().to(employe::show_employe))),
    );

    // Read-only JSON API
    cfg.service(
        web::scope(&api_prefix)
            .service(
                web::scope("/postes")
                    .service(web::resource("").route(web::get().to(api::poste::list_postes)))
                    .service(web::resource("/{id}").route(web::get().to(api::poste::get_poste)))
                    .service(
                        web::resource("/{id}/employes")
                            .route(web::get().to(api::poste::list_poste_employes)),
                    ),
            )
            .service(
                web::scope("/departements")
                    .service(
                        web::resource("").route(web::get().to(api::departement::list_departements)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(api::departement::get_departement)),
                    )
                    .service(
                        web::resource("/{id}/employes")
                            .route(web::get().to(api::departement::list_departement_employes)),
                    ),
            )
            .service(
                web::scope("/employes")
                    .service(web::resource("").route(web::get().to(api::employe::list_employes)))
                    .service(web::resource("/{id}").route(web::get().to(api::employe::get_employe))),
            ),
    );
}
