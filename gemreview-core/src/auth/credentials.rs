//! Static username to password table

use std::collections::BTreeMap;

/// Username to password mapping used by the login gate
///
/// Passwords are compared as plain strings. The table is immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialTable {
    entries: BTreeMap<String, String>,
}

/// Password check result for a single username
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CredentialCheck {
    UnknownUser,
    Mismatch,
    Match,
}

impl CredentialTable {
    /// Build a table from username/password pairs
    pub fn new<I, U, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(u, p)| (u.into(), p.into()))
                .collect(),
        }
    }

    /// The two accounts shipped with gemreview
    pub fn builtin() -> Self {
        Self::new([("admin", "password123"), ("user", "codeai2024")])
    }

    /// Check whether a username is known
    pub fn contains(&self, username: &str) -> bool {
        self.entries.contains_key(username)
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no account is configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Known usernames in sorted order
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Consume the table, returning the raw entries
    pub fn into_entries(self) -> BTreeMap<String, String> {
        self.entries
    }

    pub(crate) fn check(&self, username: &str, password: &str) -> CredentialCheck {
        match self.entries.get(username) {
            None => CredentialCheck::UnknownUser,
            Some(stored) if stored == password => CredentialCheck::Match,
            Some(_) => CredentialCheck::Mismatch,
        }
    }
}

impl Default for CredentialTable {
    fn default() -> Self {
        Self::builtin()
    }
}

// Passwords stay out of debug output and logs.
impl std::fmt::Debug for CredentialTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialTable")
            .field("usernames", &self.entries.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
