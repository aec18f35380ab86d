//! iLO credential resolution.
//!
//! Every operation resolves exactly one [`Credentials`] set from one of three
//! sources, first match wins:
//!
//! 1. explicit `login`, `password` and `hostname` arguments (all three required)
//! 2. a named profile from the configuration
//! 3. the `hpilo.login` / `hpilo.password` / `hpilo.hostname` defaults
//!
//! Fields are never mixed across sources.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::types::{ConfigOptions, DEFAULTS_SECTION};
use crate::error::CredentialError;

/// Connection arguments accepted by every operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionArgs {
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Defer connecting until the first request
    #[serde(default)]
    pub delay: bool,
}

impl ConnectionArgs {
    pub fn profile(name: impl Into<String>) -> Self {
        Self {
            profile: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn explicit(
        hostname: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            hostname: Some(hostname.into()),
            login: Some(login.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }
}

/// Where a credential set came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Explicit,
    Profile(String),
    Defaults,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Explicit => write!(f, "explicit arguments"),
            CredentialSource::Profile(name) => write!(f, "profile '{}'", name),
            CredentialSource::Defaults => write!(f, "'{}' defaults", DEFAULTS_SECTION),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
    pub hostname: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"********")
            .field("hostname", &self.hostname)
            .finish()
    }
}

/// Pick the credential source for these arguments.
pub fn select_source(args: &ConnectionArgs) -> CredentialSource {
    if args.login.is_some() && args.password.is_some() && args.hostname.is_some() {
        CredentialSource::Explicit
    } else if let Some(profile) = &args.profile {
        CredentialSource::Profile(profile.clone())
    } else {
        CredentialSource::Defaults
    }
}

pub fn resolve(args: &ConnectionArgs, options: &ConfigOptions) -> Result<Credentials, CredentialError> {
    let source = select_source(args);
    debug!("Resolving iLO credentials from {}", source);

    match &source {
        CredentialSource::Explicit => Ok(Credentials {
            login: required(args.login.as_deref(), &source, "login")?,
            password: required(args.password.as_deref(), &source, "password")?,
            hostname: required(args.hostname.as_deref(), &source, "hostname")?,
        }),
        CredentialSource::Profile(name) => {
            let profile = options
                .option(name)
                .and_then(Value::as_object)
                .ok_or_else(|| CredentialError::ProfileNotFound(name.clone()))?;
            let field = |key: &'static str| {
                required(profile.get(key).and_then(Value::as_str), &source, key)
            };
            Ok(Credentials {
                login: field("login")?,
                password: field("password")?,
                hostname: field("hostname")?,
            })
        }
        CredentialSource::Defaults => {
            let field = |key: &'static str| {
                let dotted = format!("{}.{}", DEFAULTS_SECTION, key);
                required(options.option_str(&dotted), &source, key)
            };
            Ok(Credentials {
                login: field("login")?,
                password: field("password")?,
                hostname: field("hostname")?,
            })
        }
    }
}

fn required(
    value: Option<&str>,
    source: &CredentialSource,
    field: &'static str,
) -> Result<String, CredentialError> {
    value
        .map(str::to_string)
        .ok_or_else(|| CredentialError::MissingField {
            origin: source.clone(),
            field,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options() -> ConfigOptions {
        serde_json::from_value(json!({
            "hpilo": {
                "login": "default-login",
                "password": "default-password",
                "hostname": "default-ilo"
            },
            "server1-ilo": {
                "login": "profile-login",
                "password": "profile-password",
                "hostname": "server1-ilo.oob.local"
            },
            "broken-ilo": {
                "login": "profile-login",
                "hostname": "broken-ilo.oob.local"
            },
            "numeric-ilo": {
                "login": "profile-login",
                "password": 123,
                "hostname": "numeric-ilo.oob.local"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_explicit_credentials_come_from_arguments() {
        let args = ConnectionArgs {
            profile: Some("server1-ilo".to_string()),
            ..ConnectionArgs::explicit("arg-ilo", "arg-login", "arg-password")
        };

        let creds = resolve(&args, &options()).unwrap();
        assert_eq!(
            creds,
            Credentials {
                login: "arg-login".to_string(),
                password: "arg-password".to_string(),
                hostname: "arg-ilo".to_string(),
            }
        );
    }

    #[test]
    fn test_profile_credentials() {
        let creds = resolve(&ConnectionArgs::profile("server1-ilo"), &options()).unwrap();
        assert_eq!(creds.login, "profile-login");
        assert_eq!(creds.password, "profile-password");
        assert_eq!(creds.hostname, "server1-ilo.oob.local");
    }

    #[test]
    fn test_default_credentials() {
        let creds = resolve(&ConnectionArgs::default(), &options()).unwrap();
        assert_eq!(creds.login, "default-login");
        assert_eq!(creds.password, "default-password");
        assert_eq!(creds.hostname, "default-ilo");
    }

    #[test]
    fn test_partial_explicit_does_not_mix_sources() {
        // hostname alone is not an explicit set; the profile is used untouched
        let args = ConnectionArgs {
            hostname: Some("arg-ilo".to_string()),
            ..ConnectionArgs::profile("server1-ilo")
        };
        assert_eq!(select_source(&args), CredentialSource::Profile("server1-ilo".to_string()));
        let creds = resolve(&args, &options()).unwrap();
        assert_eq!(creds.hostname, "server1-ilo.oob.local");

        // and without a profile the defaults are used untouched
        let args = ConnectionArgs {
            login: Some("arg-login".to_string()),
            password: Some("arg-password".to_string()),
            ..ConnectionArgs::default()
        };
        let creds = resolve(&args, &options()).unwrap();
        assert_eq!(creds.login, "default-login");
        assert_eq!(creds.password, "default-password");
    }

    #[test]
    fn test_incomplete_profile_is_an_error() {
        let err = resolve(&ConnectionArgs::profile("broken-ilo"), &options()).unwrap_err();
        assert!(matches!(
            err,
            CredentialError::MissingField { field: "password", origin: CredentialSource::Profile(ref p) } if p == "broken-ilo"
        ));

        // a non-string value counts as missing
        let err = resolve(&ConnectionArgs::profile("numeric-ilo"), &options()).unwrap_err();
        assert!(matches!(
            err,
            CredentialError::MissingField { field: "password", origin: CredentialSource::Profile(ref p) } if p == "numeric-ilo"
        ));
    }

    #[test]
    fn test_unknown_profile_is_an_error() {
        let err = resolve(&ConnectionArgs::profile("nope"), &options()).unwrap_err();
        assert!(matches!(err, CredentialError::ProfileNotFound(ref p) if p == "nope"));
    }

    #[test]
    fn test_missing_defaults_is_an_error() {
        let err = resolve(&ConnectionArgs::default(), &ConfigOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            CredentialError::MissingField { field: "login", origin: CredentialSource::Defaults }
        ));
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = resolve(&ConnectionArgs::default(), &options()).unwrap();
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("default-password"));
        assert!(printed.contains("default-ilo"));
    }
}
