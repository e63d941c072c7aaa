use std::fmt;

use minijinja::{Environment, context};

const INDEX_NAME: &str = "index.html";

/// Page templates compiled once at startup.
///
/// Templates named `*.html` are auto-escaped by minijinja.
pub struct PageTemplates {
    env: Environment<'static>,
}

impl PageTemplates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX_NAME, include_str!("index.html"))?;
        Ok(Self { env })
    }

    /// Chat page with `model` shown in the header badge.
    pub fn render_index(&self, model: &str) -> Result<String, minijinja::Error> {
        self.env
            .get_template(INDEX_NAME)?
            .render(context! { model_name => model })
    }
}

impl fmt::Debug for PageTemplates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageTemplates")
            .field("templates", &[INDEX_NAME])
            .finish()
    }
}
