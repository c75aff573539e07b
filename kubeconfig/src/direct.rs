//! The kubeconfig file format exactly as it is laid out on disk: lists of
//! named entries rather than maps. See [`crate::clean`] for the keyed form.

use std::{fs, path::Path};

use anyhow::Context as _;
use serde::*;
use serde_yaml::Value as YamlValue;

// region: Context
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ContextSpec {
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub cluster: String,
}
#[derive(Serialize, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Context {
    pub name: String,
    pub context: ContextSpec,
}
// endregion

// region: Cluster
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ClusterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_authority_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure_skip_tls_verify: Option<bool>,
    pub server: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Cluster {
    pub name: String,
    pub cluster: ClusterSpec,
}
// endregion

// region: User
/// A single auth entry. Only one of token or username/password is expected
/// to be populated; client certificate material may accompany either.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct UserSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_certificate_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_key_data: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct User {
    pub name: String,
    pub user: UserSpec,
}
// endregion

// region: Common
#[derive(Serialize, Deserialize, Debug)]
pub enum ApiVersion {
    #[serde(rename = "v1")]
    V1,
}
#[derive(Serialize, Deserialize, Debug)]
pub enum Kind {
    Config,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct KubeConfig {
    pub kind: Kind,
    #[serde(rename = "apiVersion")]
    pub api_version: ApiVersion,
    pub contexts: Vec<Context>,
    pub current_context: String,
    pub clusters: Vec<Cluster>,
    pub preferences: YamlValue,
    pub users: Vec<User>,
}

pub fn write_config(kc: &KubeConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("Creating kubeconfig directory")?;
    }

    let file = fs::File::create(path).context("Opening kubeconfig for writing")?;

    Ok(serde_yaml::to_writer(file, kc)?)
}
// endregion

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(namespace: Option<&str>, insecure: bool) -> KubeConfig {
        KubeConfig {
            kind: Kind::Config,
            api_version: ApiVersion::V1,
            contexts: vec![Context {
                name: "target".into(),
                context: ContextSpec {
                    user: "admin".into(),
                    namespace: namespace.map(String::from),
                    cluster: "target".into(),
                },
            }],
            current_context: "target".into(),
            clusters: vec![Cluster {
                name: "target".into(),
                cluster: ClusterSpec {
                    certificate_authority_data: None,
                    insecure_skip_tls_verify: insecure.then_some(true),
                    server: "https://cluster.example:6443".into(),
                },
            }],
            preferences: YamlValue::Mapping(serde_yaml::Mapping::new()),
            users: vec![User {
                name: "admin".into(),
                user: UserSpec {
                    username: Some("admin".into()),
                    password: Some("sekret".into()),
                    ..UserSpec::default()
                },
            }],
        }
    }

    #[test]
    fn header_fields_match_client_expectations() {
        let yaml = serde_yaml::to_string(&sample(None, false)).unwrap();

        assert!(yaml.contains("kind: Config"));
        assert!(yaml.contains("apiVersion: v1"));
        assert!(yaml.contains("current-context: target"));
        assert!(yaml.contains("preferences: {}"));
    }

    #[test]
    fn empty_optionals_leave_no_keys_behind() {
        let yaml = serde_yaml::to_string(&sample(None, false)).unwrap();

        assert!(!yaml.contains("namespace"));
        assert!(!yaml.contains("insecure-skip-tls-verify"));
        assert!(!yaml.contains("certificate-authority-data"));
        assert!(!yaml.contains("token"));
    }

    #[test]
    fn populated_optionals_serialize_in_kebab_case() {
        let yaml = serde_yaml::to_string(&sample(Some("team-a"), true)).unwrap();

        assert!(yaml.contains("namespace: team-a"));
        assert!(yaml.contains("insecure-skip-tls-verify: true"));
    }
}
