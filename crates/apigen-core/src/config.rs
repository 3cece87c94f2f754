use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.apigen.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApigenConfig {
    /// Base URL of the API serving the document.
    pub api_url: String,
    /// Path of the document relative to `api_url`.
    pub swagger_path: String,
    /// Local document to read instead of fetching one.
    pub input: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub namespace: String,
    /// Run the formatter over the output.
    pub format: bool,
    pub client: ClientConfig,
}

impl Default for ApigenConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.sprtverse.com".to_string(),
            swagger_path: "/docs?api-docs.json".to_string(),
            input: None,
            output_dir: PathBuf::from("api/generated"),
            namespace: "ApiClient".to_string(),
            format: true,
            client: ClientConfig::default(),
        }
    }
}

impl ApigenConfig {
    /// Full URL of the remote document.
    pub fn document_url(&self) -> String {
        format!("{}{}", self.api_url, self.swagger_path)
    }

    /// Where the document is read from, as written into provenance headers.
    pub fn source(&self) -> String {
        match self.input {
            Some(ref path) => path.display().to_string(),
            None => self.document_url(),
        }
    }

    /// Apply `API_URL`, `SWAGGER_PATH`, `OUTPUT_DIR` and `API_NAMESPACE`
    /// overrides. `lookup` is usually `|k| std::env::var(k).ok()`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(v) = get("API_URL") {
            self.api_url = v;
        }
        if let Some(v) = get("SWAGGER_PATH") {
            self.swagger_path = v;
        }
        if let Some(v) = get("OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = get("API_NAMESPACE") {
            self.namespace = v;
        }
    }
}

/// Options for the generated client code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Module the HTTP client is default-imported from, relative to `api.ts`.
    pub http_client_import: String,
    /// Local name of the imported HTTP client.
    pub http_client_name: String,
    /// Module name of the declarations file, without extension.
    pub types_module: String,
    pub no_jsdoc: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http_client_import: "../axios".to_string(),
            http_client_name: "axios".to_string(),
            types_module: "interfaces".to_string(),
            no_jsdoc: false,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".apigen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ApigenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# apigen configuration
api_url: https://api.sprtverse.com
swagger_path: /docs?api-docs.json
# input: openapi.json       # read a local document instead of fetching
output_dir: api/generated
namespace: ApiClient
format: true                # run prettier over the output

client:
  http_client_import: ../axios
  http_client_name: axios
  types_module: interfaces
  no_jsdoc: false
"#
}
