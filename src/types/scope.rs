//! The collection an access belongs to.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Owner of an access rule.
///
/// Group accesses are identified by the group alone; guest accesses by the
/// group and the guest account. Neither part is parsed further.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Group(String),
    Guest { group: String, account: String },
}

/// Which [`Scope`] layout an identifier starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    Group,
    Guest,
}

impl ScopeKind {
    /// Number of identifier fields the scope occupies.
    pub fn arity(&self) -> usize {
        match self {
            ScopeKind::Group => 1,
            ScopeKind::Guest => 2,
        }
    }
}

impl Scope {
    pub fn group(group: impl Into<String>) -> Self {
        Scope::Group(group.into())
    }

    pub fn guest(group: impl Into<String>, account: impl Into<String>) -> Self {
        Scope::Guest {
            group: group.into(),
            account: account.into(),
        }
    }

    pub fn kind(&self) -> ScopeKind {
        match self {
            Scope::Group(_) => ScopeKind::Group,
            Scope::Guest { .. } => ScopeKind::Guest,
        }
    }

    pub fn group_name(&self) -> &str {
        match self {
            Scope::Group(group) | Scope::Guest { group, .. } => group,
        }
    }

    /// The scope's identifier fields, in order.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Scope::Group(group) => vec![group.as_str()],
            Scope::Guest { group, account } => vec![group.as_str(), account.as_str()],
        }
    }

    /// Rebuild a scope from its leading identifier fields.
    pub(crate) fn from_fields(kind: ScopeKind, fields: &[String]) -> Self {
        match kind {
            ScopeKind::Group => Scope::group(fields[0].clone()),
            ScopeKind::Guest => Scope::guest(fields[0].clone(), fields[1].clone()),
        }
    }
}
