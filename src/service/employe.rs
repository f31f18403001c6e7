use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::model::employe::{Employe, EmployeRecord};
use crate::models::{EmployeCommand, EmployeDto};
use crate::repository::{
    DepartementRepository, EmployeRepository, PosteRepository, RepoError, Repositories,
};
use crate::validation::FieldErrors;

#[derive(Clone)]
pub struct EmployeService {
    employes: Arc<dyn EmployeRepository>,
    postes: Arc<dyn PosteRepository>,
    departements: Arc<dyn DepartementRepository>,
}

/// Local calendar date used for seniority.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole years between `hire_date` and `today`; 0 when hired today or later.
pub fn seniority_years(hire_date: NaiveDate, today: NaiveDate) -> u32 {
    today.years_since(hire_date).unwrap_or(0)
}

pub fn map_to_dto(record: EmployeRecord, today: NaiveDate) -> EmployeDto {
    let EmployeRecord {
        employe,
        poste_label,
        departement_label,
    } = record;

    EmployeDto {
        id: employe.id,
        seniority: seniority_years(employe.hire_date, today),
        name: employe.name,
        email: employe.email,
        salary: employe.salary,
        poste: poste_label,
        departement: departement_label,
    }
}

impl EmployeService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            employes: repos.employes.clone(),
            postes: repos.postes.clone(),
            departements: repos.departements.clone(),
        }
    }

    #[instrument(name = "employe_add", skip(self, cmd), fields(name = %cmd.name))]
    pub async fn add(&self, cmd: EmployeCommand) -> AppResult<Employe> {
        self.ensure_references(&cmd).await?;

        let employe = Employe {
            id: Uuid::new_v4(),
            name: cmd.name,
            email: cmd.email,
            hire_date: cmd.hire_date,
            salary: cmd.salary,
            poste_id: cmd.poste_id,
            departement_id: cmd.departement_id,
        };
        let saved = self.employes.save(&employe).await.map_err(missing_reference)?;
        info!(employe_id = %saved.id, "Employe created");
        Ok(saved)
    }

    pub async fn get_all(&self) -> AppResult<Vec<EmployeDto>> {
        let today = today();
        Ok(self
            .employes
            .find_all()
            .await?
            .into_iter()
            .map(|r| map_to_dto(r, today))
            .collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<EmployeDto> {
        self.employes
            .find_by_id(id)
            .await?
            .map(|r| map_to_dto(r, today()))
            .ok_or_else(|| AppError::NotFound("Employé non trouvé !".into()))
    }

    /// The stored entity, used to pre-fill the edit form.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Employe>> {
        Ok(self.employes.find_by_id(id).await?.map(|r| r.employe))
    }

    pub async fn get_all_by_poste(&self, poste_id: Uuid) -> AppResult<Vec<EmployeDto>> {
        let today = today();
        Ok(self
            .employes
            .find_by_poste(poste_id)
            .await?
            .into_iter()
            .map(|r| map_to_dto(r, today))
            .collect())
    }

    pub async fn get_all_by_departement(&self, departement_id: Uuid) -> AppResult<Vec<EmployeDto>> {
        let today = today();
        Ok(self
            .employes
            .find_by_departement(departement_id)
            .await?
            .into_iter()
            .map(|r| map_to_dto(r, today))
            .collect())
    }

    /// Overwrites every mutable field of the stored employee.
    #[instrument(name = "employe_update", skip(self, cmd))]
    pub async fn update(&self, id: Uuid, cmd: EmployeCommand) -> AppResult<Employe> {
        let mut employe = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Employé non trouvé !".into()))?;
        self.ensure_references(&cmd).await?;

        employe.name = cmd.name;
        employe.email = cmd.email;
        employe.hire_date = cmd.hire_date;
        employe.salary = cmd.salary;
        employe.poste_id = cmd.poste_id;
        employe.departement_id = cmd.departement_id;

        let saved = self.employes.save(&employe).await.map_err(missing_reference)?;
        info!("Employe updated");
        Ok(saved)
    }

    #[instrument(name = "employe_delete", skip(self))]
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.employes.exists_by_id(id).await? {
            return Err(AppError::NotFound(format!(
                "L'employé avec l'ID {id} n'existe pas !"
            )));
        }
        self.employes.delete_by_id(id).await?;
        info!("Employe deleted");
        Ok(())
    }

    async fn ensure_references(&self, cmd: &EmployeCommand) -> AppResult<()> {
        let mut errors = FieldErrors::new();
        if !self.postes.exists_by_id(cmd.poste_id).await? {
            errors.add("poste_id", "Poste non existant !");
        }
        if !self.departements.exists_by_id(cmd.departement_id).await? {
            errors.add("departement_id", "Département non existant !");
        }
        errors.into_result(()).map_err(AppError::Validation)
    }
}

// the poste or departement vanished between the check and the write
fn missing_reference(err: RepoError) -> AppError {
    match err {
        RepoError::Referenced(_) => AppError::Validation(FieldErrors::single(
            crate::validation::FORM,
            "Le poste ou le département n'existe plus",
        )),
        other => other.into(),
    }
}
