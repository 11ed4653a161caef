//! Verified claim set.
//!
//! `iss`, `aud`, `sub` and `exp` are required. `role` carries zero or more
//! role names and may be encoded either as a single string or as an array.
//! Anything else in the payload is kept in `extra` so a verified claim set is
//! equal to what was signed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AuthError;

pub const ISSUER: &str = "iss";
pub const AUDIENCE: &str = "aud";
pub const SUBJECT: &str = "sub";
pub const EXPIRATION: &str = "exp";
pub const ROLE: &str = "role";

/// `aud` may be a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    /// Equals (single value) or contains (list) the expected audience.
    pub fn accepts(&self, expected: &str) -> bool {
        match self {
            Audience::One(aud) => aud == expected,
            Audience::Many(auds) => auds.iter().any(|aud| aud == expected),
        }
    }
}

impl From<&str> for Audience {
    fn from(value: &str) -> Self {
        Audience::One(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claims {
    pub iss: String,
    pub aud: Audience,
    pub sub: String,
    pub exp: i64,
    #[serde(rename = "role", skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn new(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        subject: impl Into<String>,
        expires_at: i64,
    ) -> Self {
        Self {
            iss: issuer.into(),
            aud: Audience::One(audience.into()),
            sub: subject.into(),
            exp: expires_at,
            roles: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Build a claim set from a decoded payload.
    ///
    /// Required claims that are absent, empty or of the wrong JSON type are
    /// reported as `MissingClaim`, and so is a `role` claim that is neither a
    /// string nor an array of strings. A payload that is not a JSON object is
    /// `MalformedToken`.
    pub fn from_payload(payload: Value) -> Result<Self, AuthError> {
        let Value::Object(mut map) = payload else {
            return Err(AuthError::MalformedToken);
        };

        let iss = take_string(&mut map, ISSUER)?;
        let aud = take_audience(&mut map)?;
        let sub = take_string(&mut map, SUBJECT)?;
        let exp = take_numeric_date(&mut map, EXPIRATION)?;
        let roles = take_roles(&mut map)?;

        Ok(Self {
            iss,
            aud,
            sub,
            exp,
            roles,
            extra: map,
        })
    }
}

fn take_string(map: &mut Map<String, Value>, name: &'static str) -> Result<String, AuthError> {
    match map.remove(name) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s),
        _ => Err(AuthError::MissingClaim(name)),
    }
}

/// NumericDate: integer seconds, or a finite non-integer value rounded down.
fn take_numeric_date(map: &mut Map<String, Value>, name: &'static str) -> Result<i64, AuthError> {
    let Some(Value::Number(n)) = map.remove(name) else {
        return Err(AuthError::MissingClaim(name));
    };

    n.as_i64()
        .or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f.floor() as i64)
        })
        .ok_or(AuthError::MissingClaim(name))
}

fn take_audience(map: &mut Map<String, Value>) -> Result<Audience, AuthError> {
    let value = map
        .remove(AUDIENCE)
        .ok_or(AuthError::MissingClaim(AUDIENCE))?;

    match serde_json::from_value::<Audience>(value) {
        Ok(Audience::One(aud)) if !aud.trim().is_empty() => Ok(Audience::One(aud)),
        Ok(Audience::Many(auds)) if auds.iter().any(|a| !a.trim().is_empty()) => {
            Ok(Audience::Many(auds))
        }
        _ => Err(AuthError::MissingClaim(AUDIENCE)),
    }
}

fn take_roles(map: &mut Map<String, Value>) -> Result<Vec<String>, AuthError> {
    match map.remove(ROLE) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(role)) => Ok(vec![role]),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(role) => Ok(role),
                _ => Err(AuthError::MissingClaim(ROLE)),
            })
            .collect(),
        Some(_) => Err(AuthError::MissingClaim(ROLE)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload() -> Value {
        json!({
            "iss": "identity",
            "aud": "scm-services",
            "sub": "user-1",
            "exp": 1_900_000_000,
            "role": ["Manager", "Staff"],
            "jti": "abc",
        })
    }

    #[test]
    fn parses_required_claims_and_keeps_the_rest() {
        let claims = Claims::from_payload(payload()).unwrap();

        assert_eq!(claims.iss, "identity");
        assert_eq!(claims.aud, Audience::One("scm-services".into()));
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.exp, 1_900_000_000);
        assert_eq!(claims.roles, vec!["Manager", "Staff"]);
        assert_eq!(claims.extra.get("jti"), Some(&json!("abc")));
        assert!(claims.has_role("Staff"));
        assert!(!claims.has_role("staff"));
    }

    #[test]
    fn single_string_role_is_one_role() {
        let mut p = payload();
        p["role"] = json!("Admin");
        let claims = Claims::from_payload(p).unwrap();
        assert_eq!(claims.roles, vec!["Admin"]);
    }

    #[test]
    fn absent_role_is_an_empty_set() {
        let mut p = payload();
        p.as_object_mut().unwrap().remove("role");
        let claims = Claims::from_payload(p).unwrap();
        assert!(claims.roles.is_empty());
    }

    #[test]
    fn each_required_claim_is_reported_by_name() {
        for name in [ISSUER, AUDIENCE, SUBJECT, EXPIRATION] {
            let mut p = payload();
            p.as_object_mut().unwrap().remove(name);
            assert_eq!(
                Claims::from_payload(p).unwrap_err(),
                AuthError::MissingClaim(name)
            );
        }
    }

    #[test]
    fn ill_typed_required_claims_are_missing() {
        let mut p = payload();
        p["exp"] = json!("tomorrow");
        assert_eq!(
            Claims::from_payload(p).unwrap_err(),
            AuthError::MissingClaim(EXPIRATION)
        );

        let mut p = payload();
        p["sub"] = json!("");
        assert_eq!(
            Claims::from_payload(p).unwrap_err(),
            AuthError::MissingClaim(SUBJECT)
        );

        let mut p = payload();
        p["aud"] = json!(42);
        assert_eq!(
            Claims::from_payload(p).unwrap_err(),
            AuthError::MissingClaim(AUDIENCE)
        );
    }

    #[test]
    fn fractional_exp_rounds_down() {
        let mut p = payload();
        p["exp"] = json!(1_900_000_000.75);
        assert_eq!(Claims::from_payload(p).unwrap().exp, 1_900_000_000);

        let mut p = payload();
        p["exp"] = json!(1_900_000_000.0);
        assert_eq!(Claims::from_payload(p).unwrap().exp, 1_900_000_000);
    }

    #[test]
    fn out_of_range_exp_is_missing() {
        let mut p = payload();
        p["exp"] = json!(1e300);
        assert_eq!(
            Claims::from_payload(p).unwrap_err(),
            AuthError::MissingClaim(EXPIRATION)
        );
    }

    #[test]
    fn ill_typed_roles_are_a_bad_role_claim() {
        for bad in [json!([1]), json!(["Admin", false]), json!({"r": "Admin"}), json!(7)] {
            let mut p = payload();
            p["role"] = bad;
            assert_eq!(
                Claims::from_payload(p).unwrap_err(),
                AuthError::MissingClaim(ROLE)
            );
        }
    }

    #[test]
    fn non_object_payload_is_malformed() {
        assert_eq!(
            Claims::from_payload(json!(["iss", "aud"])).unwrap_err(),
            AuthError::MalformedToken
        );
    }

    #[test]
    fn audience_list_accepts_any_member() {
        let aud = Audience::Many(vec!["a".into(), "scm-services".into()]);
        assert!(aud.accepts("scm-services"));
        assert!(!aud.accepts("other"));
        assert!(!Audience::from("scm").accepts("scm-services"));
    }

    #[test]
    fn serializes_roles_under_role() {
        let claims = Claims::new("iss", "aud", "sub", 10).with_roles(["Admin"]);
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["role"], json!(["Admin"]));
        assert!(value.get("roles").is_none());
    }
}
