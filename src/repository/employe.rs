use super::RepoResult;
use crate::model::employe::{Employe, EmployeRecord};
use async_trait::async_trait;
use sqlx::MySqlPool;
use uuid::Uuid;

/// Employee finders return the entity joined with its poste and departement labels.
#[async_trait]
pub trait EmployeRepository: Send + Sync {
    async fn find_all(&self) -> RepoResult<Vec<EmployeRecord>>;
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<EmployeRecord>>;
    async fn find_by_poste(&self, poste_id: Uuid) -> RepoResult<Vec<EmployeRecord>>;
    async fn find_by_departement(&self, departement_id: Uuid) -> RepoResult<Vec<EmployeRecord>>;
    async fn save(&self, employe: &Employe) -> RepoResult<Employe>;
    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()>;
    async fn exists_by_id(&self, id: Uuid) -> RepoResult<bool>;
}

const SELECT_RECORD: &str = r#"
    SELECT
        e.id,
        e.name,
        e.email,
        e.hire_date,
        e.salary,
        e.poste_id,
        e.departement_id,
        p.label AS poste_label,
        d.label AS departement_label
    FROM employes e
    INNER JOIN postes p ON p.id = e.poste_id
    INNER JOIN departements d ON d.id = e.departement_id
"#;

#[derive(Clone)]
pub struct MySqlEmployeRepository {
    pool: MySqlPool,
}

impl MySqlEmployeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn find_where(&self, condition: &str, id: Uuid) -> RepoResult<Vec<EmployeRecord>> {
        let sql = format!("{SELECT_RECORD} WHERE {condition} = ? ORDER BY e.name");
        let records = sqlx::query_as::<_, EmployeRecord>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }
}

#[async_trait]
impl EmployeRepository for MySqlEmployeRepository {
    async fn find_all(&self) -> RepoResult<Vec<EmployeRecord>> {
        let sql = format!("{SELECT_RECORD} ORDER BY e.name");
        let records = sqlx::query_as::<_, EmployeRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<EmployeRecord>> {
        let sql = format!("{SELECT_RECORD} WHERE e.id = ?");
        let record = sqlx::query_as::<_, EmployeRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_by_poste(&self, poste_id: Uuid) -> RepoResult<Vec<EmployeRecord>> {
        self.find_where("e.poste_id", poste_id).await
    }

    async fn find_by_departement(&self, departement_id: Uuid) -> RepoResult<Vec<EmployeRecord>> {
        self.find_where("e.departement_id", departement_id).await
    }

    async fn save(&self, employe: &Employe) -> RepoResult<Employe> {
        let updated = sqlx::query(
            r#"
            UPDATE employes
            SET name = ?, email = ?, hire_date = ?, salary = ?, poste_id = ?, departement_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&employe.name)
        .bind(&employe.email)
        .bind(employe.hire_date)
        .bind(employe.salary)
        .bind(employe.poste_id)
        .bind(employe.departement_id)
        .bind(employe.id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 && !self.exists_by_id(employe.id).await? {
            sqlx::query(
                r#"
                INSERT INTO employes
                (id, name, email, hire_date, salary, poste_id, departement_id)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(employe.id)
            .bind(&employe.name)
            .bind(&employe.email)
            .bind(employe.hire_date)
            .bind(employe.salary)
            .bind(employe.poste_id)
            .bind(employe.departement_id)
            .execute(&self.pool)
            .await?;
        }
        Ok(employe.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query("DELETE FROM employes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: Uuid) -> RepoResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employes WHERE id = ?)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
