// Web app environment injected into the static entry page
use serde::Serialize;

/// Token in the entry HTML replaced by the serialized environment
pub const ENV_PLACEHOLDER: &str = "__CERES_VIZ_ENV__";

/// Topic paths the web app hides from display. Only lines starting with '/' count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList(Vec<String>);

impl IgnoreList {
    pub fn parse(text: &str) -> Self {
        let paths = text
            .lines()
            .filter(|line| line.starts_with('/'))
            .map(str::to_string)
            .collect();
        Self(paths)
    }

    pub fn paths(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebAppEnv {
    pub ros_topic_ignore: Vec<String>,
}

impl WebAppEnv {
    pub fn new(ignore_list: &IgnoreList) -> Self {
        Self {
            ros_topic_ignore: ignore_list.paths().to_vec(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Substitute the first placeholder occurrence in `html` with `env_json`
pub fn inject_env(html: &str, env_json: &str) -> String {
    html.replacen(ENV_PLACEHOLDER, env_json, 1)
}
