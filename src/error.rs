use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};
use thiserror::Error;

use crate::repository::RepoError;
use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Formulaire invalide: {0}")]
    Validation(FieldErrors),

    /// Delete refused while employees still reference the row
    #[error("{0}")]
    InUse(String),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error("Template error: {0}")]
    Render(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<handlebars::RenderError> for AppError {
    fn from(err: handlebars::RenderError) -> Self {
        AppError::Render(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InUse(_) => StatusCode::CONFLICT,
            AppError::Repository(_) | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match self {
            AppError::Repository(_) | AppError::Render(_) => {
                tracing::error!(error = %self, "Request failed");
                "Une erreur est survenue, contactez l'administrateur".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(error_page(status, &message))
    }
}

// Plain page so that an error in the template registry can still be reported.
fn error_page(status: StatusCode, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head><meta charset="utf-8"><title>Erreur {code}</title></head>
<body>
<h1>Erreur {code}</h1>
<p>{message}</p>
<p><a href="/">Retour à l'accueil</a></p>
</body>
</html>"#,
        code = status.as_u16(),
        message = handlebars::html_escape(message),
    )
}
