//! Cache keys for every query, built from logical resource + filters.
//!
//! Keys are hierarchical: `["violations"]` is a prefix of
//! `["violations","list",{"status":"OPEN"}]`, so invalidating the former
//! marks the latter stale.

#[cfg(test)]
#[path = "keys_test.rs"]
mod keys_test;

use std::fmt;

use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<KeySegment>);

/// A key segment. Filters are stored as canonical JSON text so keys hash.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeySegment {
    Name(String),
    Filters(String),
}

impl QueryKey {
    #[must_use]
    pub fn root(name: &str) -> Self {
        Self(vec![KeySegment::Name(name.to_owned())])
    }

    #[must_use]
    pub fn push(mut self, name: &str) -> Self {
        self.0.push(KeySegment::Name(name.to_owned()));
        self
    }

    /// Append a filter object. `None` and `{}` both encode as `null`.
    #[must_use]
    pub fn filters(mut self, filters: Option<&Value>) -> Self {
        let canonical = match filters {
            None | Some(Value::Null) => Value::Null.to_string(),
            Some(Value::Object(map)) if map.is_empty() => Value::Null.to_string(),
            Some(value) => value.to_string(),
        };
        self.0.push(KeySegment::Filters(canonical));
        self
    }

    #[must_use]
    pub fn segments(&self) -> &[KeySegment] {
        &self.0
    }

    /// True when `prefix` matches the leading segments of this key.
    #[must_use]
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self
            .0
            .iter()
            .map(|s| match s {
                KeySegment::Name(n) => n.as_str(),
                KeySegment::Filters(json) => json.as_str(),
            })
            .collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

// =============================================================================
// KEY FACTORY
// =============================================================================

macro_rules! resource_keys {
    ($module:ident, $root:literal) => {
        pub mod $module {
            use super::QueryKey;
            use serde_json::Value;

            #[must_use]
            pub fn all() -> QueryKey {
                QueryKey::root($root)
            }

            #[must_use]
            pub fn lists() -> QueryKey {
                all().push("list")
            }

            #[must_use]
            pub fn list(filters: Option<&Value>) -> QueryKey {
                lists().filters(filters)
            }

            #[must_use]
            pub fn details() -> QueryKey {
                all().push("detail")
            }

            #[must_use]
            pub fn detail(id: &str) -> QueryKey {
                details().push(id)
            }
        }
    };
}

resource_keys!(aws_accounts, "aws-accounts");
resource_keys!(tag_policies, "tag-policies");
resource_keys!(scans, "scans");
resource_keys!(violations, "violations");
resource_keys!(resources, "resources");

pub mod scan_extra {
    use super::{QueryKey, scans};

    #[must_use]
    pub fn by_account(account_id: &str) -> QueryKey {
        scans::all().push("account").push(account_id)
    }

    #[must_use]
    pub fn latest(account_id: &str) -> QueryKey {
        scans::all().push("latest").push(account_id)
    }
}

pub mod violation_extra {
    use super::{QueryKey, violations};

    #[must_use]
    pub fn by_account(account_id: &str) -> QueryKey {
        violations::all().push("account").push(account_id)
    }

    #[must_use]
    pub fn by_resource(resource_id: &str) -> QueryKey {
        violations::all().push("resource").push(resource_id)
    }

    #[must_use]
    pub fn by_policy(policy_id: &str) -> QueryKey {
        violations::all().push("policy").push(policy_id)
    }

    #[must_use]
    pub fn stats() -> QueryKey {
        violations::all().push("stats")
    }
}

pub mod resource_extra {
    use super::{QueryKey, resources};

    #[must_use]
    pub fn by_account(account_id: &str) -> QueryKey {
        resources::all().push("account").push(account_id)
    }

    #[must_use]
    pub fn stats() -> QueryKey {
        resources::all().push("stats")
    }
}

#[must_use]
pub fn tag_policy_stats() -> QueryKey {
    tag_policies::all().push("stats")
}

#[must_use]
pub fn account_regions(account_id: &str) -> QueryKey {
    QueryKey::root("account-regions").push(account_id)
}

#[must_use]
pub fn resource_type_settings() -> QueryKey {
    QueryKey::root("resource-type-settings")
}

#[must_use]
pub fn compliance_rate() -> QueryKey {
    QueryKey::root("compliance-rate")
}

#[must_use]
pub fn current_user() -> QueryKey {
    QueryKey::root("auth").push("me")
}
