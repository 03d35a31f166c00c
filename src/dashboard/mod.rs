//! Static single page dashboard for a REST surface.
//!
//! Generation is a pure function of its inputs: the same device name, base URL,
//! endpoints and flavor always produce the same bytes.

use serde::{Deserialize, Serialize};

use crate::{error::Result, surface::RestEndpoint};

pub mod api_client;
pub mod html;
pub mod manifest;

/// Language of the generated API client. The flavor changes type strictness,
/// never runtime behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    #[default]
    #[serde(alias = "js")]
    JavaScript,
    #[serde(alias = "ts")]
    TypeScript,
}

impl Flavor {
    pub fn extension(&self) -> &'static str {
        match self {
            Flavor::JavaScript => "js",
            Flavor::TypeScript => "ts",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub contents: String,
}

impl GeneratedFile {
    fn new(name: impl Into<String>, contents: String) -> Self {
        Self {
            name: name.into(),
            contents,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardAsset {
    pub files: Vec<GeneratedFile>,
}

impl DashboardAsset {
    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|file| file.name == name)
            .map(|file| file.contents.as_str())
    }

    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|file| file.name.as_str()).collect()
    }
}

pub fn generate(
    base_url: &str,
    device_name: &str,
    endpoints: &[RestEndpoint],
    flavor: Flavor,
) -> Result<DashboardAsset> {
    let mut files = vec![
        GeneratedFile::new(
            format!("api.{}", flavor.extension()),
            api_client::render(base_url, flavor)?,
        ),
        GeneratedFile::new("index.html", html::render(device_name, endpoints)?),
        GeneratedFile::new("package.json", manifest::package_json(device_name, flavor)?),
    ];
    if flavor == Flavor::TypeScript {
        files.push(GeneratedFile::new("tsconfig.json", manifest::tsconfig_json()?));
    }

    let asset = DashboardAsset { files };
    log::debug!(
        "Generated {:?} for {} endpoints",
        asset.names(),
        endpoints.len()
    );
    Ok(asset)
}

#[cfg(test)]
mod test {
    use crate::surface::{synthesize, Entity, RestEndpoint};

    use super::{generate, Flavor};

    fn endpoints() -> Vec<RestEndpoint> {
        synthesize(&[
            Entity::new(1, "SwitchInfo", "Pool Pump", "pool_pump"),
            Entity::new(2, "BinarySensorInfo", "Door", "door"),
            Entity::new(3, "SelectInfo", "Mode", "mode").with_options(vec!["a".into()]),
        ])
        .endpoints
    }

    #[test]
    fn test_javascript_bundle() {
        let asset =
            generate("http://pool.local", "Pool", &endpoints(), Flavor::JavaScript).unwrap();
        assert_eq!(asset.names(), vec!["api.js", "index.html", "package.json"]);
        assert!(asset.get("api.js").unwrap().contains("getEntity"));
        assert!(asset.get("tsconfig.json").is_none());
    }

    #[test]
    fn test_typescript_bundle() {
        let asset =
            generate("http://pool.local", "Pool", &endpoints(), Flavor::TypeScript).unwrap();
        assert_eq!(
            asset.names(),
            vec!["api.ts", "index.html", "package.json", "tsconfig.json"]
        );
        // The page always loads the compiled module
        assert!(asset.get("index.html").unwrap().contains("from './api.js'"));
    }

    #[test]
    fn test_idempotent() {
        for flavor in [Flavor::JavaScript, Flavor::TypeScript] {
            let first = generate("http://pool.local", "Pool", &endpoints(), flavor).unwrap();
            let second = generate("http://pool.local", "Pool", &endpoints(), flavor).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_html_is_flavor_independent() {
        let js =
            generate("http://pool.local", "Pool", &endpoints(), Flavor::JavaScript).unwrap();
        let ts =
            generate("http://pool.local", "Pool", &endpoints(), Flavor::TypeScript).unwrap();
        assert_eq!(js.get("index.html"), ts.get("index.html"));
    }

    #[test]
    fn test_flavor_deserialize() {
        let tests = vec![
            ("\"javascript\"", Flavor::JavaScript),
            ("\"js\"", Flavor::JavaScript),
            ("\"typescript\"", Flavor::TypeScript),
            ("\"ts\"", Flavor::TypeScript),
        ];
        for (value, expected) in tests {
            assert_eq!(serde_json::from_str::<Flavor>(value).unwrap(), expected);
        }
        assert_eq!(Flavor::TypeScript.extension(), "ts");
    }
}
