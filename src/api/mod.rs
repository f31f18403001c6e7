pub mod departement;
pub mod employe;
pub mod poste;

use actix_web::HttpResponse;
use serde_json::json;
use tracing::error;

use crate::error::AppError;

/// JSON body for an error escaping an API handler.
fn json_error(err: AppError) -> HttpResponse {
    match err {
        AppError::NotFound(message) => HttpResponse::NotFound().json(json!({ "message": message })),
        other => {
            error!(error = %other, "API request failed");
            HttpResponse::InternalServerError().json(json!({
                "message": "Something went wrong, Contact with system admin"
            }))
        }
    }
}

fn respond<T: serde::Serialize>(result: Result<T, AppError>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => json_error(e),
    }
}
