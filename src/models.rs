use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::model::{departement::Departement, employe::Employe, poste::{Poste, TypePoste}};
use crate::validation::FieldErrors;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read projection of an employee. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(
    example = json!({
        "id": "0d7e5a4c-2b1f-4e8a-9c3d-6a5b4c3d2e1f",
        "name": "Awa Diallo",
        "email": "awa.diallo@entreprise.fr",
        "seniority": 4,
        "salary": 42000.0,
        "poste": "Ingénieur",
        "departement": "Informatique"
    })
)]
pub struct EmployeDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Whole years since the hire date
    pub seniority: u32,
    pub salary: f64,
    /// Label of the position
    pub poste: String,
    /// Label of the department
    pub departement: String,
}

// -------------------- Poste --------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PosteForm {
    #[validate(length(max = 100, message = "Le libellé ne doit pas dépasser 100 caractères"))]
    pub label: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PosteCommand {
    pub label: String,
    pub kind: TypePoste,
}

impl PosteForm {
    pub fn check(&self) -> Result<PosteCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let label = self.label.trim();
        if label.is_empty() {
            errors.add("label", "Le libellé du poste est obligatoire");
        }
        let trimmed = PosteForm {
            label: label.to_string(),
            kind: self.kind.clone(),
        };
        merge(&mut errors, trimmed.validate());

        let kind = if self.kind.trim().is_empty() {
            errors.add("kind", "Veuillez choisir un type de poste");
            None
        } else {
            match self.kind.trim().parse::<TypePoste>() {
                Ok(kind) => Some(kind),
                Err(_) => {
                    errors.add("kind", "Type de poste inconnu");
                    None
                }
            }
        };

        match kind {
            Some(kind) if errors.is_empty() => Ok(PosteCommand {
                label: label.to_string(),
                kind,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&Poste> for PosteForm {
    fn from(poste: &Poste) -> Self {
        Self {
            label: poste.label.clone(),
            kind: poste.kind.to_string(),
        }
    }
}

// -------------------- Departement --------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DepartementForm {
    #[validate(length(max = 100, message = "Le libellé ne doit pas dépasser 100 caractères"))]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartementCommand {
    pub label: String,
}

impl DepartementForm {
    pub fn check(&self) -> Result<DepartementCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let label = self.label.trim();
        if label.is_empty() {
            errors.add("label", "Le libellé du département est obligatoire");
        }
        let trimmed = DepartementForm {
            label: label.to_string(),
        };
        merge(&mut errors, trimmed.validate());

        errors.into_result(DepartementCommand {
            label: label.to_string(),
        })
    }
}

impl From<&Departement> for DepartementForm {
    fn from(departement: &Departement) -> Self {
        Self {
            label: departement.label.clone(),
        }
    }
}

// -------------------- Employe --------------------

/// Raw employee form; every field is bound as text so each one can be reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EmployeForm {
    #[validate(length(max = 100, message = "Le nom ne doit pas dépasser 100 caractères"))]
    pub name: String,
    #[validate(
        email(message = "Adresse email invalide"),
        length(max = 150, message = "L'adresse email ne doit pas dépasser 150 caractères")
    )]
    pub email: String,
    pub hire_date: String,
    pub salary: String,
    pub poste_id: String,
    pub departement_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeCommand {
    pub name: String,
    pub email: String,
    pub hire_date: NaiveDate,
    pub salary: f64,
    pub poste_id: Uuid,
    pub departement_id: Uuid,
}

impl EmployeForm {
    /// Validates the form against `today` (hire dates cannot be in the future).
    pub fn check(&self, today: NaiveDate) -> Result<EmployeCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "Le nom est obligatoire");
        }
        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "L'adresse email est obligatoire");
        }
        let trimmed = EmployeForm {
            name: name.to_string(),
            email: email.to_string(),
            ..self.clone()
        };
        merge(&mut errors, trimmed.validate());

        let hire_date = match NaiveDate::parse_from_str(self.hire_date.trim(), DATE_FORMAT) {
            Ok(date) if date > today => {
                errors.add("hire_date", "La date d'embauche ne peut pas être dans le futur");
                None
            }
            Ok(date) => Some(date),
            Err(_) if self.hire_date.trim().is_empty() => {
                errors.add("hire_date", "La date d'embauche est obligatoire");
                None
            }
            Err(_) => {
                errors.add("hire_date", "Date invalide (format attendu AAAA-MM-JJ)");
                None
            }
        };

        let salary = match self.salary.trim().replace(',', ".").parse::<f64>() {
            Ok(s) if s.is_finite() && s >= 0.0 => Some(s),
            Ok(_) => {
                errors.add("salary", "Le salaire doit être un montant positif");
                None
            }
            Err(_) => {
                errors.add("salary", "Le salaire doit être un nombre");
                None
            }
        };

        let poste_id = parse_reference(&self.poste_id, "poste_id", "Veuillez choisir un poste", &mut errors);
        let departement_id = parse_reference(
            &self.departement_id,
            "departement_id",
            "Veuillez choisir un département",
            &mut errors,
        );

        match (hire_date, salary, poste_id, departement_id) {
            (Some(hire_date), Some(salary), Some(poste_id), Some(departement_id))
                if errors.is_empty() =>
            {
                Ok(EmployeCommand {
                    name: name.to_string(),
                    email: email.to_string(),
                    hire_date,
                    salary,
                    poste_id,
                    departement_id,
                })
            }
            _ => Err(errors),
        }
    }
}

// declarative rules are checked on the trimmed values that get stored
fn merge(errors: &mut FieldErrors, result: Result<(), ValidationErrors>) {
    if let Err(e) = result {
        for err in FieldErrors::from(e).iter() {
            errors.add(&err.field, err.message.clone());
        }
    }
}

fn parse_reference(raw: &str, field: &str, missing: &str, errors: &mut FieldErrors) -> Option<Uuid> {
    match Uuid::parse_str(raw.trim()) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.add(field, missing);
            None
        }
    }
}

impl From<&Employe> for EmployeForm {
    fn from(employe: &Employe) -> Self {
        Self {
            name: employe.name.clone(),
            email: employe.email.clone(),
            hire_date: employe.hire_date.format(DATE_FORMAT).to_string(),
            salary: employe.salary.to_string(),
            poste_id: employe.poste_id.to_string(),
            departement_id: employe.departement_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    fn valid_employe_form() -> EmployeForm {
        EmployeForm {
            name: "  Awa Diallo ".into(),
            email: "awa.diallo@entreprise.fr".into(),
            hire_date: "2021-09-01".into(),
            salary: "42000,50".into(),
            poste_id: Uuid::new_v4().to_string(),
            departement_id: Uuid::new_v4().to_string(),
        }
    }

    #[test]
    fn poste_form_trims_and_parses_the_type() {
        let form = PosteForm {
            label: "  Ingénieur ".into(),
            kind: "CADRE".into(),
        };
        let cmd = form.check().unwrap();
        assert_eq!(cmd.label, "Ingénieur");
        assert_eq!(cmd.kind, TypePoste::Cadre);
    }

    #[test]
    fn poste_form_reports_blank_label_and_missing_type() {
        let errors = PosteForm {
            label: "   ".into(),
            kind: "".into(),
        }
        .check()
        .unwrap_err();

        assert_eq!(errors.get("label"), Some("Le libellé du poste est obligatoire"));
        assert_eq!(errors.get("kind"), Some("Veuillez choisir un type de poste"));
    }

    #[test]
    fn poste_form_rejects_unknown_type_and_long_label() {
        let errors = PosteForm {
            label: "x".repeat(101),
            kind: "DIRECTEUR".into(),
        }
        .check()
        .unwrap_err();

        assert_eq!(
            errors.get("label"),
            Some("Le libellé ne doit pas dépasser 100 caractères")
        );
        assert_eq!(errors.get("kind"), Some("Type de poste inconnu"));
    }

    #[test]
    fn label_length_is_measured_after_trimming() {
        let label = format!("  {}  ", "é".repeat(100));
        let cmd = DepartementForm { label: label.clone() }.check().unwrap();
        assert_eq!(cmd.label.chars().count(), 100);

        let cmd = PosteForm {
            label,
            kind: "OUVRIER".into(),
        }
        .check()
        .unwrap();
        assert_eq!(cmd.kind, TypePoste::Ouvrier);
    }

    #[test]
    fn departement_form_requires_a_label() {
        assert!(DepartementForm { label: "".into() }.check().is_err());
        assert_eq!(
            DepartementForm { label: " Finance ".into() }.check().unwrap().label,
            "Finance"
        );
    }

    #[test]
    fn employe_form_builds_a_command() {
        let form = valid_employe_form();
        let cmd = form.check(today()).unwrap();

        assert_eq!(cmd.name, "Awa Diallo");
        assert_eq!(cmd.hire_date, NaiveDate::from_ymd_opt(2021, 9, 1).unwrap());
        assert_eq!(cmd.salary, 42000.5);
        assert_eq!(cmd.poste_id.to_string(), form.poste_id);
    }

    #[test]
    fn employe_form_reports_every_bad_field() {
        let form = EmployeForm {
            name: "".into(),
            email: "pas-un-email".into(),
            hire_date: "15/03/2020".into(),
            salary: "beaucoup".into(),
            poste_id: "".into(),
            departement_id: "nope".into(),
        };
        let errors = form.check(today()).unwrap_err();

        assert_eq!(errors.len(), 6);
        assert_eq!(errors.get("email"), Some("Adresse email invalide"));
        assert_eq!(
            errors.get("hire_date"),
            Some("Date invalide (format attendu AAAA-MM-JJ)")
        );
        assert_eq!(errors.get("salary"), Some("Le salaire doit être un nombre"));
        assert_eq!(errors.get("poste_id"), Some("Veuillez choisir un poste"));
    }

    #[test]
    fn employe_form_rejects_future_hire_date_and_negative_salary() {
        let form = EmployeForm {
            hire_date: "2026-03-16".into(),
            salary: "-1".into(),
            ..valid_employe_form()
        };
        let errors = form.check(today()).unwrap_err();

        assert_eq!(
            errors.get("hire_date"),
            Some("La date d'embauche ne peut pas être dans le futur")
        );
        assert_eq!(errors.get("salary"), Some("Le salaire doit être un montant positif"));
    }

    #[test]
    fn employe_form_rejects_an_email_longer_than_the_column() {
        let email = format!("{}@{}.{}.fr", "a".repeat(60), "b".repeat(60), "c".repeat(40));
        assert!(email.len() > 150);

        let form = EmployeForm {
            email,
            ..valid_employe_form()
        };
        let errors = form.check(today()).unwrap_err();
        assert_eq!(
            errors.get("email"),
            Some("L'adresse email ne doit pas dépasser 150 caractères")
        );
    }

    #[test]
    fn employe_form_trims_email_and_bounds_the_name() {
        let form = EmployeForm {
            email: "  awa.diallo@entreprise.fr ".into(),
            ..valid_employe_form()
        };
        assert_eq!(form.check(today()).unwrap().email, "awa.diallo@entreprise.fr");

        let form = EmployeForm {
            name: "n".repeat(101),
            ..valid_employe_form()
        };
        assert_eq!(
            form.check(today()).unwrap_err().get("name"),
            Some("Le nom ne doit pas dépasser 100 caractères")
        );
    }

    #[test]
    fn employe_form_accepts_a_hire_date_of_today() {
        let form = EmployeForm {
            hire_date: "2026-03-15".into(),
            ..valid_employe_form()
        };
        assert!(form.check(today()).is_ok());
    }
}
