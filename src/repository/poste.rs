use super::RepoResult;
use crate::model::poste::Poste;
use async_trait::async_trait;
use sqlx::MySqlPool;
use uuid::Uuid;

#[async_trait]
pub trait PosteRepository: Send + Sync {
    async fn find_all(&self) -> RepoResult<Vec<Poste>>;
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Poste>>;
    async fn find_by_label(&self, label: &str) -> RepoResult<Option<Poste>>;
    /// Inserts a new poste or overwrites the existing row with the same id.
    async fn save(&self, poste: &Poste) -> RepoResult<Poste>;
    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()>;
    async fn exists_by_id(&self, id: Uuid) -> RepoResult<bool>;
}

#[derive(Clone)]
pub struct MySqlPosteRepository {
    pool: MySqlPool,
}

impl MySqlPosteRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PosteRepository for MySqlPosteRepository {
    async fn find_all(&self) -> RepoResult<Vec<Poste>> {
        let postes = sqlx::query_as::<_, Poste>("SELECT id, label, kind FROM postes ORDER BY label")
            .fetch_all(&self.pool)
            .await?;
        Ok(postes)
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Poste>> {
        let poste = sqlx::query_as::<_, Poste>("SELECT id, label, kind FROM postes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(poste)
    }

    async fn find_by_label(&self, label: &str) -> RepoResult<Option<Poste>> {
        let poste =
            sqlx::query_as::<_, Poste>("SELECT id, label, kind FROM postes WHERE label = ? LIMIT 1")
                .bind(label)
                .fetch_optional(&self.pool)
                .await?;
        Ok(poste)
    }

    async fn save(&self, poste: &Poste) -> RepoResult<Poste> {
        let updated = sqlx::query("UPDATE postes SET label = ?, kind = ? WHERE id = ?")
            .bind(&poste.label)
            .bind(poste.kind.to_string())
            .bind(poste.id)
            .execute(&self.pool)
            .await?;

        // MySQL reports 0 affected rows for an update that changes nothing
        if updated.rows_affected() == 0 && !self.exists_by_id(poste.id).await? {
            sqlx::query("INSERT INTO postes (id, label, kind) VALUES (?, ?, ?)")
                .bind(poste.id)
                .bind(&poste.label)
                .bind(poste.kind.to_string())
                .execute(&self.pool)
                .await?;
        }
        Ok(poste.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query("DELETE FROM postes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: Uuid) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM postes WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}
