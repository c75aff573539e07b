use std::{collections::BTreeMap, path::Path};

use crate::direct;
pub use crate::direct::{Cluster, ClusterSpec, Context, ContextSpec, Kind, User, UserSpec};

#[derive(Debug, Clone)]
pub struct KubeConfig {
    pub contexts: BTreeMap<String, ContextSpec>,
    pub current_context: String,
    pub clusters: BTreeMap<String, ClusterSpec>,
    pub preferences: serde_yaml::Value,
    pub users: BTreeMap<String, UserSpec>,
}

impl KubeConfig {
    /// A config holding exactly one cluster/user/context triple, with the
    /// context marked current. The cluster and context share `name`; the
    /// user entry is keyed separately since auth entries are keyed by
    /// username rather than cluster.
    pub fn single_entry(
        name: &str,
        cluster: ClusterSpec,
        user_name: &str,
        user: UserSpec,
        context: ContextSpec,
    ) -> Self {
        Self {
            contexts: BTreeMap::from([(name.to_string(), context)]),
            current_context: name.to_string(),
            clusters: BTreeMap::from([(name.to_string(), cluster)]),
            preferences: serde_yaml::Value::Mapping(serde_yaml::Mapping::new()),
            users: BTreeMap::from([(user_name.to_string(), user)]),
        }
    }
}

impl From<direct::KubeConfig> for KubeConfig {
    fn from(kc: direct::KubeConfig) -> Self {
        Self {
            current_context: kc.current_context,
            preferences: kc.preferences,
            contexts: kc
                .contexts
                .into_iter()
                .map(|ctx| (ctx.name, ctx.context))
                .collect(),
            clusters: kc
                .clusters
                .into_iter()
                .map(|cls| (cls.name, cls.cluster))
                .collect(),
            users: kc
                .users
                .into_iter()
                .map(|usr| (usr.name, usr.user))
                .collect(),
        }
    }
}

impl From<KubeConfig> for direct::KubeConfig {
    fn from(kc: KubeConfig) -> Self {
        direct::KubeConfig {
            kind: Kind::Config,
            api_version: direct::ApiVersion::V1,
            preferences: kc.preferences,
            current_context: kc.current_context,

            clusters: kc
                .clusters
                .into_iter()
                .map(|(name, cluster)| Cluster { name, cluster })
                .collect(),
            contexts: kc
                .contexts
                .into_iter()
                .map(|(name, context)| Context { name, context })
                .collect(),
            users: kc
                .users
                .into_iter()
                .map(|(name, user)| User { name, user })
                .collect(),
        }
    }
}

pub fn write_config(kc: KubeConfig, path: &Path) -> anyhow::Result<()> {
    direct::write_config(&kc.into(), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KubeConfig {
        KubeConfig::single_entry(
            "target",
            ClusterSpec {
                certificate_authority_data: None,
                insecure_skip_tls_verify: None,
                server: "https://cluster.example:6443".into(),
            },
            "admin",
            UserSpec {
                token: Some("deadbeef".into()),
                ..UserSpec::default()
            },
            ContextSpec {
                user: "admin".into(),
                namespace: None,
                cluster: "target".into(),
            },
        )
    }

    #[test]
    fn single_entry_keys_everything_consistently() {
        let kc = sample();

        assert_eq!(kc.current_context, "target");
        assert!(kc.clusters.contains_key("target"));
        assert!(kc.contexts.contains_key("target"));
        assert!(kc.users.contains_key("admin"));
        assert_eq!(kc.contexts["target"].cluster, "target");
        assert_eq!(kc.contexts["target"].user, "admin");
    }

    #[test]
    fn conversion_to_direct_form_preserves_names() {
        let kc: direct::KubeConfig = sample().into();

        assert_eq!(kc.clusters.len(), 1);
        assert_eq!(kc.clusters[0].name, "target");
        assert_eq!(kc.users.len(), 1);
        assert_eq!(kc.users[0].name, "admin");
        assert_eq!(kc.contexts.len(), 1);
        assert_eq!(kc.contexts[0].name, "target");
        assert_eq!(kc.current_context, "target");
    }
}
