use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employe {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub hire_date: NaiveDate,
    pub salary: f64,
    pub poste_id: Uuid,
    pub departement_id: Uuid,
}

/// An employee joined with the labels of its position and department.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct EmployeRecord {
    #[sqlx(flatten)]
    pub employe: Employe,
    pub poste_label: String,
    pub departement_label: String,
}
