use serde::Deserialize;
use token_gate::roles;

/// Request body for `POST /token`.
///
/// - `sub`: subject the token is minted for
/// - `roles`: role names, case-sensitive, from the shared vocabulary
/// - `ttl_seconds`: optional shorter lifetime; never longer than the server's
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub ttl_seconds: Option<u64>,
}

impl TokenRequest {
    pub fn validate(&self, max_ttl_seconds: u64) -> Result<(), String> {
        if self.sub.trim().is_empty() {
            return Err("sub is required".into());
        }
        if let Some(role) = self.roles.iter().find(|r| !roles::ALL.contains(&r.as_str())) {
            return Err(format!("unknown role '{role}'"));
        }
        match self.ttl_seconds {
            Some(0) => Err("ttl_seconds must be positive".into()),
            Some(ttl) if ttl > max_ttl_seconds => {
                Err(format!("ttl_seconds must be <= {max_ttl_seconds}"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(sub: &str, roles: &[&str], ttl: Option<u64>) -> TokenRequest {
        TokenRequest {
            sub: sub.into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            ttl_seconds: ttl,
        }
    }

    #[test]
    fn accepts_known_roles_within_ttl() {
        assert!(req("user-1", &["Manager", "Staff"], Some(600)).validate(3600).is_ok());
        assert!(req("user-1", &[], None).validate(3600).is_ok());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(req(" ", &[], None).validate(3600).is_err());
        assert_eq!(
            req("user-1", &["manager"], None).validate(3600),
            Err("unknown role 'manager'".to_string())
        );
        assert!(req("user-1", &[], Some(0)).validate(3600).is_err());
        assert!(req("user-1", &[], Some(7200)).validate(3600).is_err());
    }
}
