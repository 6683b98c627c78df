use config::Config;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    panel: Panel,
}

impl AppConfig {
    pub fn load() -> Self {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::default())
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }
}

#[derive(Debug, Deserialize)]
pub struct Panel {
    url: String,
}

impl Panel {
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                panel: Panel {
                    url: "http://panel.url/".to_string(),
                },
            },
        }
    }

    pub fn panel_url(mut self, url: String) -> Self {
        self.config.panel.url = url;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
