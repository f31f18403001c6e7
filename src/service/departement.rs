use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::model::departement::Departement;
use crate::models::DepartementCommand;
use crate::repository::{DepartementRepository, RepoError};
use crate::validation::FieldErrors;

#[derive(Clone)]
pub struct DepartementService {
    repo: Arc<dyn DepartementRepository>,
}

impl DepartementService {
    pub fn new(repo: Arc<dyn DepartementRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Departement>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Departement> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Département non trouvé".into()))
    }

    #[instrument(name = "departement_add", skip(self, cmd), fields(label = %cmd.label))]
    pub async fn add(&self, cmd: DepartementCommand) -> AppResult<Departement> {
        self.ensure_label_free(&cmd.label, None).await?;

        let departement = Departement {
            id: Uuid::new_v4(),
            label: cmd.label,
        };
        let saved = self.repo.save(&departement).await.map_err(duplicate_label)?;
        info!(departement_id = %saved.id, "Departement created");
        Ok(saved)
    }

    #[instrument(name = "departement_update", skip(self, cmd), fields(label = %cmd.label))]
    pub async fn update(&self, id: Uuid, cmd: DepartementCommand) -> AppResult<Departement> {
        let mut departement = self.get_by_id(id).await?;
        self.ensure_label_free(&cmd.label, Some(id)).await?;

        departement.label = cmd.label;
        let saved = self.repo.save(&departement).await.map_err(duplicate_label)?;
        info!("Departement updated");
        Ok(saved)
    }

    #[instrument(name = "departement_delete", skip(self))]
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repo.exists_by_id(id).await? {
            return Err(AppError::NotFound(format!(
                "Le département avec l'ID {id} n'existe pas !"
            )));
        }
        self.repo.delete_by_id(id).await.map_err(|e| match e {
            RepoError::Referenced(_) => {
                AppError::InUse("Ce département compte encore des employés".into())
            }
            other => other.into(),
        })?;
        info!("Departement deleted");
        Ok(())
    }

    async fn ensure_label_free(&self, label: &str, current: Option<Uuid>) -> AppResult<()> {
        match self.repo.find_by_label(label).await? {
            Some(existing) if Some(existing.id) != current => {
                Err(AppError::Validation(FieldErrors::single(
                    "label",
                    format!("Le département {label} existe déjà !"),
                )))
            }
            _ => Ok(()),
        }
    }
}

fn duplicate_label(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::Validation(FieldErrors::single(
            "label",
            "Ce libellé de département existe déjà !",
        )),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repositories;

    fn cmd(label: &str) -> DepartementCommand {
        DepartementCommand {
            label: label.to_string(),
        }
    }

    #[actix_web::test]
    async fn labels_are_unique() {
        let service = DepartementService::new(Repositories::in_memory().departements);
        service.add(cmd("Finance")).await.unwrap();

        assert!(matches!(
            service.add(cmd("Finance")).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(service.get_all().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn update_and_delete_require_an_existing_id() {
        let service = DepartementService::new(Repositories::in_memory().departements);
        let created = service.add(cmd("Achats")).await.unwrap();

        let renamed = service.update(created.id, cmd("Approvisionnement")).await.unwrap();
        assert_eq!(renamed.id, created.id);
        assert_eq!(renamed.label, "Approvisionnement");

        assert!(matches!(
            service.update(Uuid::new_v4(), cmd("X")).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));

        service.delete(created.id).await.unwrap();
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn departement_with_employees_is_in_use() {
        use crate::model::poste::TypePoste;
        use crate::models::{EmployeCommand, PosteCommand};
        use crate::service::Services;
        use chrono::NaiveDate;

        let services = Services::new(&Repositories::in_memory());
        let poste = services
            .postes
            .add(PosteCommand {
                label: "Juriste".into(),
                kind: TypePoste::Cadre,
            })
            .await
            .unwrap();
        let departement = services.departements.add(cmd("Juridique")).await.unwrap();
        let employe = services
            .employes
            .add(EmployeCommand {
                name: "Léa Martin".into(),
                email: "lea.martin@entreprise.fr".into(),
                hire_date: NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
                salary: 51000.0,
                poste_id: poste.id,
                departement_id: departement.id,
            })
            .await
            .unwrap();

        assert!(matches!(
            services.departements.delete(departement.id).await,
            Err(AppError::InUse(_))
        ));
        assert!(services.departements.get_by_id(departement.id).await.is_ok());
        assert_eq!(services.departements.get_all().await.unwrap().len(), 1);

        services.employes.delete(employe.id).await.unwrap();
        services.departements.delete(departement.id).await.unwrap();
        assert!(services.departements.get_all().await.unwrap().is_empty());
    }
}
