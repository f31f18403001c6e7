use super::RepoResult;
use crate::model::departement::Departement;
use async_trait::async_trait;
use sqlx::MySqlPool;
use uuid::Uuid;

#[async_trait]
pub trait DepartementRepository: Send + Sync {
    async fn find_all(&self) -> RepoResult<Vec<Departement>>;
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Departement>>;
    async fn find_by_label(&self, label: &str) -> RepoResult<Option<Departement>>;
    async fn save(&self, departement: &Departement) -> RepoResult<Departement>;
    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()>;
    async fn exists_by_id(&self, id: Uuid) -> RepoResult<bool>;
}

#[derive(Clone)]
pub struct MySqlDepartementRepository {
    pool: MySqlPool,
}

impl MySqlDepartementRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartementRepository for MySqlDepartementRepository {
    async fn find_all(&self) -> RepoResult<Vec<Departement>> {
        let departements =
            sqlx::query_as::<_, Departement>("SELECT id, label FROM departements ORDER BY label")
                .fetch_all(&self.pool)
                .await?;
        Ok(departements)
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Departement>> {
        let departement =
            sqlx::query_as::<_, Departement>("SELECT id, label FROM departements WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(departement)
    }

    async fn find_by_label(&self, label: &str) -> RepoResult<Option<Departement>> {
        let departement = sqlx::query_as::<_, Departement>(
            "SELECT id, label FROM departements WHERE label = ? LIMIT 1",
        )
        .bind(label)
        .fetch_optional(&self.pool)
        .await?;
        Ok(departement)
    }

    async fn save(&self, departement: &Departement) -> RepoResult<Departement> {
        let updated = sqlx::query("UPDATE departements SET label = ? WHERE id = ?")
            .bind(&departement.label)
            .bind(departement.id)
            .execute(&self.pool)
            .await?;

        if updated.rows_affected() == 0 && !self.exists_by_id(departement.id).await? {
            sqlx::query("INSERT INTO departements (id, label) VALUES (?, ?)")
                .bind(departement.id)
                .bind(&departement.label)
                .execute(&self.pool)
                .await?;
        }
        Ok(departement.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query("DELETE FROM departements WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: Uuid) -> RepoResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM departements WHERE id = ?)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
