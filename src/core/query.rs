//! Group filter and free-text search over an account sequence.

use std::fmt;

use crate::core::models::{Account, Group};

/// Which groups a query keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GroupFilter {
    /// Every group.
    #[default]
    All,
    /// Only accounts whose group equals this one.
    Only(Group),
}

impl GroupFilter {
    /// Exactly `"All"` selects everything; anything else names a group.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == "All" {
            Self::All
        } else {
            Self::Only(Group::from(value))
        }
    }

    #[must_use]
    pub fn matches(&self, group: &Group) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == group,
        }
    }
}

impl fmt::Display for GroupFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(group) => write!(f, "{group}"),
        }
    }
}

/// Case-insensitive substring match on name, email, username or group.
///
/// An empty term matches every account. The password is never searched.
#[must_use]
pub fn matches_search(account: &Account, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    [
        account.name.as_str(),
        account.email.as_str(),
        account.username.as_str(),
        account.group.as_str(),
    ]
    .iter()
    .any(|haystack| haystack.to_lowercase().contains(&needle))
}

/// Accounts passing both the group filter and the search, in input order.
#[must_use]
pub fn filter<'a>(accounts: &'a [Account], group: &GroupFilter, search: &str) -> Vec<&'a Account> {
    accounts
        .iter()
        .filter(|account| group.matches(&account.group) && matches_search(account, search))
        .collect()
}
