use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::error::Error;

/// Declares that a descriptor field was populated from a key of an external
/// secret before this process ran. Secret resolution happens upstream; the
/// writer only sees the final field values.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SecretParam {
    pub field_name: String,
    pub secret_key: String,
    pub secret_name: String,
}

/// Connection parameters for a single cluster, handed to the writer as a
/// JSON string on the command line.
///
/// Unknown keys are tolerated so that older descriptors carrying fields
/// this tool never reads (`type`, `revision`) still parse.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ClusterDescriptor {
    /// Used as the cluster key, the context key, and the current-context.
    #[serde(default)]
    pub name: String,
    /// Server endpoint, e.g. `https://10.0.0.1:6443`.
    #[serde(default)]
    pub url: String,
    /// Basic authentication. Not emitted when a token is present.
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Bearer authentication. Wins over username/password.
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub namespace: String,
    /// Skip TLS verification when talking to the server. `Insecure` is the
    /// key the original encoder produced; accept it alongside `insecure`.
    #[serde(default, alias = "Insecure")]
    pub insecure: bool,
    /// PEM bundle for the cluster certificate authority.
    #[serde(default, rename = "cadata", deserialize_with = "base64_field")]
    pub ca_data: Option<Vec<u8>>,
    #[serde(default, rename = "clientKeyData", deserialize_with = "base64_field")]
    pub client_key_data: Option<Vec<u8>>,
    #[serde(
        default,
        rename = "clientCertificateData",
        deserialize_with = "base64_field"
    )]
    pub client_certificate_data: Option<Vec<u8>>,
    #[serde(default)]
    pub secrets: Vec<SecretParam>,
}

impl ClusterDescriptor {
    /// Parses the descriptor from its command-line JSON form.
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let descriptor: ClusterDescriptor = serde_json::from_str(raw)?;

        if descriptor.name.is_empty() {
            return Err(Error::InvalidConfig(de::Error::custom(
                "cluster name must not be empty",
            )));
        }

        Ok(descriptor)
    }
}

/// Binary fields travel base64-encoded in the JSON descriptor. An empty or
/// missing string means the field is unset.
fn base64_field<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = Option::<String>::deserialize(deserializer)?;

    match encoded.as_deref() {
        None | Some("") => Ok(None),
        Some(encoded) => STANDARD.decode(encoded).map(Some).map_err(de::Error::custom),
    }
}
