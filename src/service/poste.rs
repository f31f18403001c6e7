use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::model::poste::Poste;
use crate::models::PosteCommand;
use crate::repository::{PosteRepository, RepoError};
use crate::validation::FieldErrors;

#[derive(Clone)]
pub struct PosteService {
    repo: Arc<dyn PosteRepository>,
}

impl PosteService {
    pub fn new(repo: Arc<dyn PosteRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Poste>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Poste>> {
        Ok(self.repo.find_by_id(id).await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Poste> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Poste non trouvé".into()))
    }

    #[instrument(name = "poste_add", skip(self, cmd), fields(label = %cmd.label))]
    pub async fn add(&self, cmd: PosteCommand) -> AppResult<Poste> {
        self.ensure_label_free(&cmd.label, None).await?;

        let poste = Poste {
            id: Uuid::new_v4(),
            label: cmd.label,
            kind: cmd.kind,
        };
        let saved = self.repo.save(&poste).await.map_err(duplicate_label)?;
        info!(poste_id = %saved.id, "Poste created");
        Ok(saved)
    }

    #[instrument(name = "poste_update", skip(self, cmd), fields(label = %cmd.label))]
    pub async fn update(&self, id: Uuid, cmd: PosteCommand) -> AppResult<Poste> {
        let mut poste = self.get_by_id(id).await?;
        self.ensure_label_free(&cmd.label, Some(id)).await?;

        poste.label = cmd.label;
        poste.kind = cmd.kind;
        let saved = self.repo.save(&poste).await.map_err(duplicate_label)?;
        info!("Poste updated");
        Ok(saved)
    }

    #[instrument(name = "poste_delete", skip(self))]
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repo.exists_by_id(id).await? {
            return Err(AppError::NotFound(format!("Le poste avec l'ID {id} n'existe pas !")));
        }
        self.repo.delete_by_id(id).await.map_err(|e| match e {
            RepoError::Referenced(_) => {
                AppError::InUse("Ce poste est encore occupé par des employés".into())
            }
            other => other.into(),
        })?;
        info!("Poste deleted");
        Ok(())
    }

    async fn ensure_label_free(&self, label: &str, current: Option<Uuid>) -> AppResult<()> {
        match self.repo.find_by_label(label).await? {
            Some(existing) if Some(existing.id) != current => Err(label_taken(label)),
            _ => Ok(()),
        }
    }
}

fn label_taken(label: &str) -> AppError {
    AppError::Validation(FieldErrors::single(
        "label",
        format!("Le poste {label} existe déjà !"),
    ))
}

// a concurrent insert can still hit the unique index after the lookup
fn duplicate_label(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::Validation(FieldErrors::single(
            "label",
            "Ce libellé de poste existe déjà !",
        )),
        other => other.into(),
    }
}
