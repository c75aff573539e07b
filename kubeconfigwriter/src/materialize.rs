use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use kubeconfig::{ClusterSpec, ContextSpec, KubeConfig, UserSpec};
use tracing::debug;

use crate::descriptor::ClusterDescriptor;
use crate::error::Error;
use crate::overrides::EnvOverrides;

/// Root under which per-cluster output directories live.
pub const WORKSPACE_ROOT: &str = "/workspace";

/// The kubeconfig for a cluster lands at `<root>/<name>/kubeconfig`.
pub fn destination(root: &Path, name: &str) -> PathBuf {
    root.join(name).join("kubeconfig")
}

/// Builds the single-entry kubeconfig for a resolved descriptor.
///
/// A user entry may carry only one of token or username/password, so basic
/// auth is dropped when a token is present. Client certificate material
/// rides along either way. The user entry and the context's user reference
/// are both keyed by the descriptor's username, so they always pair up.
pub fn kubeconfig_for(resource: &ClusterDescriptor) -> KubeConfig {
    let cluster = ClusterSpec {
        server: resource.url.clone(),
        insecure_skip_tls_verify: resource.insecure.then_some(true),
        certificate_authority_data: resource.ca_data.as_deref().map(|ca| STANDARD.encode(ca)),
    };

    let has_token = !resource.token.is_empty();
    let user = UserSpec {
        token: filled(&resource.token),
        username: if has_token {
            None
        } else {
            filled(&resource.username)
        },
        password: if has_token {
            None
        } else {
            filled(&resource.password)
        },
        client_certificate_data: resource
            .client_certificate_data
            .as_deref()
            .map(|data| STANDARD.encode(data)),
        client_key_data: resource
            .client_key_data
            .as_deref()
            .map(|data| STANDARD.encode(data)),
    };

    let context = ContextSpec {
        user: resource.username.clone(),
        namespace: filled(&resource.namespace),
        cluster: resource.name.clone(),
    };

    KubeConfig::single_entry(&resource.name, cluster, &resource.username, user, context)
}

/// Parses the descriptor, resolves overrides, and writes the kubeconfig
/// under `root`. Returns the path of the written file.
pub fn run(raw: &str, overrides: &EnvOverrides, root: &Path) -> Result<PathBuf, Error> {
    let mut resource = ClusterDescriptor::from_json(raw)?;

    for secret in &resource.secrets {
        debug!(
            field = %secret.field_name,
            secret = %secret.secret_name,
            key = %secret.secret_key,
            "field expects externally resolved secret material",
        );
    }

    overrides.apply(&mut resource);

    let path = destination(root, &resource.name);
    kubeconfig::write_config(kubeconfig_for(&resource), &path).map_err(|cause| {
        Error::WriteFailed {
            path: path.clone(),
            cause,
        }
    })?;

    Ok(path)
}

fn filled(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
