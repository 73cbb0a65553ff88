//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::path::Path;

impl PipelineConfig {
    /// Load configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

impl ConnectionDetail {
    /// Build the ODBC connection string for the source database.
    pub fn connection_string(&self) -> String {
        build_connection_string(
            &self.driver,
            &self.url,
            self.username.as_deref(),
            self.password.as_deref(),
            self.data_source_properties.as_deref(),
        )
    }
}

impl ExportConfig {
    /// Build the ODBC connection string for the target database.
    pub fn connection_string(&self, application: &str) -> String {
        build_connection_string(
            &self.driver,
            &self.export_url(application),
            self.username.as_deref(),
            self.password.as_deref(),
            self.data_source_properties.as_deref(),
        )
    }
}

fn build_connection_string(
    driver: &str,
    url: &str,
    username: Option<&str>,
    password: Option<&str>,
    properties: Option<&[DataSourceProperty]>,
) -> String {
    let mut out = format!("Driver={{{}}};", driver);

    push_fragment(&mut out, url);

    if let Some(user) = username {
        push_fragment(&mut out, &format!("UID={}", user));
    }
    if let Some(pass) = password {
        push_fragment(&mut out, &format!("PWD={}", pass));
    }

    if let Some(props) = properties {
        for prop in props {
            push_fragment(&mut out, &format!("{}={}", prop.property, prop.value));
        }
    }

    out
}

fn push_fragment(out: &mut String, fragment: &str) {
    if fragment.is_empty() {
        return;
    }
    out.push_str(fragment);
    if !fragment.ends_with(';') {
        out.push(';');
    }
}
