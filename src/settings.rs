use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::{error::Result, outside::HttpOptions};

/// Prefix of the environment variables overriding the settings file
pub const ENV_PREFIX: &str = "YTW";

/// Persistent settings, read from an optional TOML file then from the
/// `YTW_*` environment variables (e.g. `YTW_PROXY`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub proxy: Option<String>,
    /// Language code requested when none is given on the command line
    pub language: Option<String>,
    pub user_agent: Option<String>,
    pub accept_language: Option<String>,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            proxy: self.proxy.clone(),
            user_agent: self.user_agent.clone(),
            accept_language: self.accept_language.clone(),
        }
    }
}
