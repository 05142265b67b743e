use crate::error::{Result as ServerErrorResult, ServerError};
use crate::pages::views::{DashboardView, ListView, LoginView};

use std::sync::Arc;

use serde::Serialize;
use tera::{Context, Tera};

const BASE: &str = include_str!("../../templates/base.html");
const LANDING: &str = include_str!("../../templates/landing.html");
const LOGIN: &str = include_str!("../../templates/login.html");
const DASHBOARD: &str = include_str!("../../templates/dashboard.html");
const BOOKMARK_LIST: &str = include_str!("../../templates/bookmark_list.html");

/// Compiled page templates, embedded in the binary.
#[derive(Clone)]
pub struct Pages {
    tera: Arc<Tera>,
}

impl Pages {
    #[track_caller]
    pub fn new() -> ServerErrorResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", BASE),
            ("landing.html", LANDING),
            ("login.html", LOGIN),
            ("dashboard.html", DASHBOARD),
            ("bookmark_list.html", BOOKMARK_LIST),
        ])
        .map_err(ServerError::templates)?;

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    pub fn landing(&self) -> tera::Result<String> {
        self.tera.render("landing.html", &Context::new())
    }

    pub fn login(&self, view: &LoginView) -> tera::Result<String> {
        self.render("login.html", view)
    }

    pub fn dashboard(&self, view: &DashboardView) -> tera::Result<String> {
        self.render("dashboard.html", view)
    }

    /// The `#bookmark-list` fragment swapped in by live snapshots.
    pub fn bookmark_list(&self, view: &ListView) -> tera::Result<String> {
        self.render("bookmark_list.html", view)
    }

    fn render<T: Serialize>(&self, template: &str, view: &T) -> tera::Result<String> {
        let context = Context::from_serialize(view)?;
        self.tera.render(template, &context)
    }
}
