pub mod departement;
pub mod employe;
pub mod poste;

pub use departement::DepartementService;
pub use employe::EmployeService;
pub use poste::PosteService;

use crate::repository::Repositories;

#[derive(Clone)]
pub struct Services {
    pub postes: PosteService,
    pub departements: DepartementService,
    pub employes: EmployeService,
}

impl Services {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            postes: PosteService::new(repos.postes.clone()),
            departements: DepartementService::new(repos.departements.clone()),
            employes: EmployeService::new(repos),
        }
    }
}
