use std::env;

use crate::descriptor::ClusterDescriptor;

pub const CADATA_VAR: &str = "CADATA";
pub const TOKEN_VAR: &str = "TOKEN";
pub const USERNAME_VAR: &str = "USERNAME";
pub const PASSWORD_VAR: &str = "PASSWORD";

/// Credential overrides captured from the process environment. Secret
/// material mounted into the step surfaces here; a set, non-empty variable
/// wins over the same field in the descriptor.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub ca_data: Option<String>,
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl EnvOverrides {
    /// Reads the override variables once, at startup. Empty values count
    /// as unset.
    pub fn from_env() -> Self {
        Self {
            ca_data: non_empty(CADATA_VAR),
            token: non_empty(TOKEN_VAR),
            username: non_empty(USERNAME_VAR),
            password: non_empty(PASSWORD_VAR),
        }
    }

    /// Applies the overrides to a parsed descriptor, before the
    /// token/basic-auth exclusion is decided.
    ///
    /// Tokens coming from secret mounts routinely pick up an injected
    /// trailing newline, so the token override is right-trimmed of CR/LF.
    /// The CA override carries the variable's raw bytes, not base64.
    pub fn apply(&self, resource: &mut ClusterDescriptor) {
        if let Some(ca) = &self.ca_data {
            resource.ca_data = Some(ca.clone().into_bytes());
        }
        if let Some(token) = &self.token {
            resource.token = token.trim_end_matches(['\r', '\n']).to_string();
        }
        if let Some(username) = &self.username {
            resource.username = username.clone();
        }
        if let Some(password) = &self.password {
            resource.password = password.clone();
        }
    }
}

fn non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.is_empty())
}
