// GitHub API response types.
// Repository and branch records hold the JSON object the API returned, untouched,
// so cached values serialize back to the same document. Typed views are accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// GitHub repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Repository {
    name: String,
    raw: Map<String, Value>,
}

impl Repository {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        str_field(&self.raw, "description")
    }

    pub fn language(&self) -> Option<&str> {
        str_field(&self.raw, "language")
    }

    pub fn stargazers_count(&self) -> Option<u64> {
        self.raw.get("stargazers_count").and_then(Value::as_u64)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        str_field(&self.raw, "updated_at")
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Login of the owning user or organization.
    pub fn owner_login(&self) -> Option<&str> {
        self.raw.get("owner")?.get("login")?.as_str()
    }

    /// Owner kind as GitHub reports it (`User`, `Organization`, ...).
    pub fn owner_type(&self) -> Option<&str> {
        self.raw.get("owner")?.get("type")?.as_str()
    }

    pub fn is_private(&self) -> bool {
        bool_field(&self.raw, "private")
    }

    pub fn is_fork(&self) -> bool {
        bool_field(&self.raw, "fork")
    }

    /// Any field of the response, by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }
}

impl TryFrom<Map<String, Value>> for Repository {
    type Error = String;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        let name = record_name(&raw, "repository")?;
        Ok(Self { name, raw })
    }
}

impl From<Repository> for Map<String, Value> {
    fn from(repo: Repository) -> Self {
        repo.raw
    }
}

/// Branch of a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Branch {
    name: String,
    raw: Map<String, Value>,
}

impl Branch {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full SHA of the commit the branch points at.
    pub fn commit_sha(&self) -> Option<&str> {
        self.raw.get("commit")?.get("sha")?.as_str()
    }

    /// Abbreviated head commit SHA (7 characters), if known.
    pub fn short_sha(&self) -> Option<&str> {
        self.commit_sha().map(|sha| sha.get(..7).unwrap_or(sha))
    }

    pub fn is_protected(&self) -> bool {
        bool_field(&self.raw, "protected")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }
}

impl TryFrom<Map<String, Value>> for Branch {
    type Error = String;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        let name = record_name(&raw, "branch")?;
        Ok(Self { name, raw })
    }
}

impl From<Branch> for Map<String, Value> {
    fn from(branch: Branch) -> Self {
        branch.raw
    }
}

fn record_name(raw: &Map<String, Value>, kind: &str) -> Result<String, String> {
    match raw.get("name") {
        Some(Value::String(name)) => Ok(name.clone()),
        Some(_) => Err(format!("{} name is not a string", kind)),
        None => Err(format!("{} record has no name", kind)),
    }
}

fn str_field<'a>(raw: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    raw.get(key).and_then(Value::as_str)
}

fn bool_field(raw: &Map<String, Value>, key: &str) -> bool {
    raw.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repository_accessors() {
        let body = json!({
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "owner": { "login": "octocat", "id": 1, "type": "User", "site_admin": false },
            "private": false,
            "language": "C",
            "stargazers_count": 80,
            "updated_at": "2011-01-26T19:14:43Z"
        });

        let repo: Repository = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(repo.name(), "Hello-World");
        assert_eq!(repo.owner_login(), Some("octocat"));
        assert_eq!(repo.owner_type(), Some("User"));
        assert_eq!(repo.language(), Some("C"));
        assert_eq!(repo.stargazers_count(), Some(80));
        assert_eq!(
            repo.updated_at().map(|dt| dt.to_rfc3339()),
            Some("2011-01-26T19:14:43+00:00".to_string())
        );
        assert_eq!(repo.get("id"), Some(&json!(1296269)));

        assert_eq!(serde_json::to_value(&repo).unwrap(), body);
    }

    #[test]
    fn test_nulls_and_unfamiliar_values_kept_verbatim() {
        let body = json!([{
            "name": "Hello-World",
            "description": null,
            "language": null,
            "owner": { "login": "octocat", "type": "Enterprise" }
        }]);

        let repos: Vec<Repository> = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(repos[0].description(), None);
        assert_eq!(repos[0].owner_type(), Some("Enterprise"));
        assert_eq!(serde_json::to_value(&repos).unwrap(), body);

        let text = serde_json::to_string(&repos).unwrap();
        assert!(text.contains(r#""description":null"#));
    }

    #[test]
    fn test_minimal_repository() {
        let repo: Repository = serde_json::from_value(json!({ "name": "Hello-World" })).unwrap();
        assert!(!repo.is_private());
        assert!(!repo.is_fork());
        assert_eq!(repo.updated_at(), None);
        assert_eq!(
            serde_json::to_value(&repo).unwrap(),
            json!({ "name": "Hello-World" })
        );
    }

    #[test]
    fn test_record_without_name_rejected() {
        assert!(serde_json::from_value::<Repository>(json!({ "id": 1 })).is_err());
        assert!(serde_json::from_value::<Repository>(json!({ "name": null })).is_err());
        assert!(serde_json::from_value::<Branch>(json!({ "name": 7 })).is_err());
    }

    #[test]
    fn test_branch_short_sha() {
        let body = json!({
            "name": "master",
            "commit": {
                "sha": "c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc",
                "url": "https://api.github.com/repos/octocat/Hello-World/commits/c5b97d5"
            },
            "protected": true
        });
        let branch: Branch = serde_json::from_value(body.clone()).unwrap();

        assert_eq!(branch.name(), "master");
        assert_eq!(branch.short_sha(), Some("c5b97d5"));
        assert!(branch.is_protected());
        assert_eq!(serde_json::to_value(&branch).unwrap(), body);

        let bare: Branch =
            serde_json::from_value(json!({ "name": "dev", "commit": null })).unwrap();
        assert_eq!(bare.short_sha(), None);
        assert!(!bare.is_protected());
    }
}
