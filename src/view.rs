use actix_web::{HttpResponse, http::header::ContentType};
use anyhow::Context;
use handlebars::Handlebars;
use serde_json::{Value, json};
use strum::IntoEnumIterator;

use crate::error::AppResult;
use crate::flash::{self, Flash};
use crate::model::poste::TypePoste;

/// Templates compiled into the binary: (registry name, source).
const TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("../templates/layout.hbs")),
    ("employe_table", include_str!("../templates/employe/table.hbs")),
    ("poste/list", include_str!("../templates/poste/list.hbs")),
    ("poste/form", include_str!("../templates/poste/form.hbs")),
    ("departement/list", include_str!("../templates/departement/list.hbs")),
    ("departement/form", include_str!("../templates/departement/form.hbs")),
    ("employe/list", include_str!("../templates/employe/list.hbs")),
    ("employe/form", include_str!("../templates/employe/form.hbs")),
    ("employe/show", include_str!("../templates/employe/show.hbs")),
    ("employe/group", include_str!("../templates/employe/group.hbs")),
];

pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> anyhow::Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);

        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, *source)
                .with_context(|| format!("Failed to register template {name}"))?;
        }
        Ok(Self { registry })
    }

    pub fn render(&self, template: &str, ctx: &Value) -> AppResult<HttpResponse> {
        let body = self.registry.render(template, ctx)?;
        Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(body))
    }

    /// Renders a list page, showing and then clearing the pending flash message.
    pub fn render_with_flash(
        &self,
        template: &str,
        mut ctx: Value,
        incoming: Option<Flash>,
    ) -> AppResult<HttpResponse> {
        let had_flash = incoming.is_some();
        if let (Some(flash), Value::Object(map)) = (incoming, &mut ctx) {
            map.insert("flash".into(), json!(flash));
        }

        let mut resp = self.render(template, &ctx)?;
        if had_flash {
            flash::consume(&mut resp);
        }
        Ok(resp)
    }
}

/// `TypePoste` choices for the poste form, with `selected` set on the current one.
pub fn type_choices(selected: &str) -> Value {
    TypePoste::iter()
        .map(|t| {
            let value = t.to_string();
            json!({
                "value": value,
                "label": t.label(),
                "selected": value == selected,
            })
        })
        .collect()
}

/// `{value, label, selected}` choices for a select box.
pub fn choices<'a, I>(items: I, selected: &str) -> Value
where
    I: IntoIterator<Item = (String, &'a str)>,
{
    items
        .into_iter()
        .map(|(value, label)| {
            let is_selected = value == selected;
            json!({ "value": value, "label": label, "selected": is_selected })
        })
        .collect()
}
