use serde::{Deserialize, Serialize};

/// A user record as served by the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Resource name, e.g. `users/7`
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub nickname: String,
}

impl User {
    pub fn new(name: &str, username: &str, nickname: &str) -> Self {
        User {
            name: name.to_string(),
            username: username.to_string(),
            nickname: nickname.to_string(),
        }
    }
}

/// Read-only projection of a [`User`] that the ranker and the commit step work on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub display_name: String,
    /// Keys the fuzzy matcher searches, in priority order
    pub search_keys: Vec<String>,
    /// The handle shown next to the display name in the dropdown
    pub username: String,
}

impl Candidate {
    /// A candidate whose only search key is its display name.
    pub fn named(display_name: &str) -> Self {
        Candidate {
            id: display_name.to_string(),
            display_name: display_name.to_string(),
            search_keys: vec![display_name.to_string()],
            username: display_name.to_lowercase(),
        }
    }

    /// Dropdown label: `Nickname (@username)`
    pub fn label(&self) -> String {
        format!("{} (@{})", self.display_name, self.username)
    }
}

impl From<&User> for Candidate {
    fn from(user: &User) -> Self {
        let display_name = if user.nickname.is_empty() {
            user.username.clone()
        } else {
            user.nickname.clone()
        };
        let mut search_keys = Vec::with_capacity(2);
        if !user.nickname.is_empty() {
            search_keys.push(user.nickname.clone());
        }
        search_keys.push(user.username.clone());
        Candidate {
            id: user.name.clone(),
            display_name,
            search_keys,
            username: user.username.clone(),
        }
    }
}
