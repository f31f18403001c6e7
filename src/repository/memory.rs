use super::{DepartementRepository, EmployeRepository, PosteRepository, RepoError, RepoResult};
use crate::model::{
    departement::Departement,
    employe::{Employe, EmployeRecord},
    poste::Poste,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// Process-local store with the same unique and foreign-key rules as the
/// MySQL schema. Locks are always taken in the order postes, departements,
/// employes.
#[derive(Default)]
pub struct MemoryStore {
    postes: RwLock<HashMap<Uuid, Poste>>,
    departements: RwLock<HashMap<Uuid, Departement>>,
    employes: RwLock<HashMap<Uuid, Employe>>,
}

impl MemoryStore {
    fn records<F>(&self, keep: F) -> Vec<EmployeRecord>
    where
        F: Fn(&Employe) -> bool,
    {
        let postes = self.postes.read();
        let departements = self.departements.read();
        let employes = self.employes.read();

        let mut records: Vec<EmployeRecord> = employes
            .values()
            .filter(|e| keep(*e))
            .filter_map(|e| {
                let poste = postes.get(&e.poste_id)?;
                let departement = departements.get(&e.departement_id)?;
                Some(EmployeRecord {
                    employe: e.clone(),
                    poste_label: poste.label.clone(),
                    departement_label: departement.label.clone(),
                })
            })
            .collect();
        records.sort_by(|a, b| a.employe.name.cmp(&b.employe.name));
        records
    }
}

#[async_trait]
impl PosteRepository for MemoryStore {
    async fn find_all(&self) -> RepoResult<Vec<Poste>> {
        let mut postes: Vec<Poste> = self.postes.read().values().cloned().collect();
        postes.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(postes)
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Poste>> {
        Ok(self.postes.read().get(&id).cloned())
    }

    async fn find_by_label(&self, label: &str) -> RepoResult<Option<Poste>> {
        Ok(self.postes.read().values().find(|p| p.label == label).cloned())
    }

    async fn save(&self, poste: &Poste) -> RepoResult<Poste> {
        let mut postes = self.postes.write();
        if postes.values().any(|p| p.label == poste.label && p.id != poste.id) {
            return Err(RepoError::Duplicate(format!(
                "Duplicate entry '{}' for key 'postes.label'",
                poste.label
            )));
        }
        postes.insert(poste.id, poste.clone());
        Ok(poste.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        let mut postes = self.postes.write();
        let employes = self.employes.read();
        if employes.values().any(|e| e.poste_id == id) {
            return Err(RepoError::Referenced(format!(
                "poste {id} is referenced by employes.poste_id"
            )));
        }
        postes.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.postes.read().contains_key(&id))
    }
}

#[async_trait]
impl DepartementRepository for MemoryStore {
    async fn find_all(&self) -> RepoResult<Vec<Departement>> {
        let mut departements: Vec<Departement> =
            self.departements.read().values().cloned().collect();
        departements.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(departements)
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Departement>> {
        Ok(self.departements.read().get(&id).cloned())
    }

    async fn find_by_label(&self, label: &str) -> RepoResult<Option<Departement>> {
        Ok(self
            .departements
            .read()
            .values()
            .find(|d| d.label == label)
            .cloned())
    }

    async fn save(&self, departement: &Departement) -> RepoResult<Departement> {
        let mut departements = self.departements.write();
        if departements
            .values()
            .any(|d| d.label == departement.label && d.id != departement.id)
        {
            return Err(RepoError::Duplicate(format!(
                "Duplicate entry '{}' for key 'departements.label'",
                departement.label
            )));
        }
        departements.insert(departement.id, departement.clone());
        Ok(departement.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        let mut departements = self.departements.write();
        let employes = self.employes.read();
        if employes.values().any(|e| e.departement_id == id) {
            return Err(RepoError::Referenced(format!(
                "departement {id} is referenced by employes.departement_id"
            )));
        }
        departements.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.departements.read().contains_key(&id))
    }
}

#[async_trait]
impl EmployeRepository for MemoryStore {
    async fn find_all(&self) -> RepoResult<Vec<EmployeRecord>> {
        Ok(self.records(|_| true))
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<EmployeRecord>> {
        Ok(self.records(|e| e.id == id).into_iter().next())
    }

    async fn find_by_poste(&self, poste_id: Uuid) -> RepoResult<Vec<EmployeRecord>> {
        Ok(self.records(|e| e.poste_id == poste_id))
    }

    async fn find_by_departement(&self, departement_id: Uuid) -> RepoResult<Vec<EmployeRecord>> {
        Ok(self.records(|e| e.departement_id == departement_id))
    }

    async fn save(&self, employe: &Employe) -> RepoResult<Employe> {
        let postes = self.postes.read();
        let departements = self.departements.read();
        let mut employes = self.employes.write();

        if !postes.contains_key(&employe.poste_id) {
            return Err(RepoError::Referenced(format!(
                "poste {} does not exist",
                employe.poste_id
            )));
        }
        if !departements.contains_key(&employe.departement_id) {
            return Err(RepoError::Referenced(format!(
                "departement {} does not exist",
                employe.departement_id
            )));
        }
        employes.insert(employe.id, employe.clone());
        Ok(employe.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        self.employes.write().remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.employes.read().contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::poste::TypePoste;
    use chrono::NaiveDate;

    fn poste(label: &str) -> Poste {
        Poste {
            id: Uuid::new_v4(),
            label: label.to_string(),
            kind: TypePoste::Technicien,
        }
    }

    fn departement(label: &str) -> Departement {
        Departement {
            id: Uuid::new_v4(),
            label: label.to_string(),
        }
    }

    fn employe(name: &str, poste_id: Uuid, departement_id: Uuid) -> Employe {
        Employe {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@entreprise.fr", name.to_lowercase()),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
            salary: 30000.0,
            poste_id,
            departement_id,
        }
    }

    #[actix_web::test]
    async fn poste_labels_are_unique_across_rows() {
        let store = MemoryStore::default();
        let first = poste("Comptable");
        PosteRepository::save(&store, &first).await.unwrap();

        let err = PosteRepository::save(&store, &poste("Comptable")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        // saving the same row again is an update, not a duplicate
        PosteRepository::save(&store, &first).await.unwrap();
        assert_eq!(PosteRepository::find_all(&store).await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn employes_are_joined_with_their_labels_and_sorted_by_name() {
        let store = MemoryStore::default();
        let p = poste("Soudeur");
        let d = departement("Atelier");
        PosteRepository::save(&store, &p).await.unwrap();
        DepartementRepository::save(&store, &d).await.unwrap();
        EmployeRepository::save(&store, &employe("Zoé", p.id, d.id)).await.unwrap();
        EmployeRepository::save(&store, &employe("Bastien", p.id, d.id)).await.unwrap();

        let records = store.find_by_poste(p.id).await.unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.employe.name.as_str()).collect();
        assert_eq!(names, vec!["Bastien", "Zoé"]);
        assert!(records.iter().all(|r| r.poste_label == "Soudeur"));
        assert!(records.iter().all(|r| r.departement_label == "Atelier"));
        assert!(store.find_by_poste(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn foreign_keys_are_enforced_both_ways() {
        let store = MemoryStore::default();
        let p = poste("Magasinier");
        let d = departement("Logistique");
        PosteRepository::save(&store, &p).await.unwrap();
        DepartementRepository::save(&store, &d).await.unwrap();

        let orphan = employe("Nina", Uuid::new_v4(), d.id);
        assert!(matches!(
            EmployeRepository::save(&store, &orphan).await,
            Err(RepoError::Referenced(_))
        ));

        EmployeRepository::save(&store, &employe("Nina", p.id, d.id)).await.unwrap();
        assert!(matches!(
            PosteRepository::delete_by_id(&store, p.id).await,
            Err(RepoError::Referenced(_))
        ));
        assert!(matches!(
            DepartementRepository::delete_by_id(&store, d.id).await,
            Err(RepoError::Referenced(_))
        ));
        assert!(PosteRepository::exists_by_id(&store, p.id).await.unwrap());
    }
}
