pub mod departement;
pub mod employe;
pub mod poste;
