use crate::domain_model::ValidationError;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored user together with the targets of its confirmed outgoing friend edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
    pub friends: HashSet<UserId>,
}

impl User {
    /// Overwrites every scalar field with the draft's values. Friend edges are untouched.
    pub fn apply(&mut self, draft: UserDraft) {
        self.email = draft.email;
        self.login = draft.login;
        self.name = draft.name;
        self.birthday = draft.birthday;
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDraft {
    pub email: String,
    pub login: String,
    #[serde(default)]
    pub name: String,
    pub birthday: NaiveDate,
}

impl UserDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::new("email must not be blank"));
        }
        if !is_email_shaped(&self.email) {
            return Err(ValidationError::new(format!(
                "email '{}' is not a valid address",
                self.email
            )));
        }
        if self.login.trim().is_empty() {
            return Err(ValidationError::new("login must not be blank"));
        }
        if self.login.chars().any(char::is_whitespace) {
            return Err(ValidationError::new("login must not contain whitespace"));
        }
        if self.birthday > Utc::now().date_naive() {
            return Err(ValidationError::new("birthday must not be in the future"));
        }
        Ok(())
    }

    pub fn has_blank_name(&self) -> bool {
        self.name.trim().is_empty()
    }
}

fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft() -> UserDraft {
        UserDraft {
            email: "bob@example.com".to_string(),
            login: "bob".to_string(),
            name: String::new(),
            birthday: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        }
    }

    #[test]
    fn accepts_well_formed_draft() {
        assert!(draft().validate().is_ok());
        assert!(draft().has_blank_name());
    }

    #[test]
    fn rejects_login_with_whitespace() {
        let mut d = draft();
        d.login = "bob smith".to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["", "bob", "@example.com", "bob@", "bob@@example.com", "b ob@x.org"] {
            let mut d = draft();
            d.email = email.to_string();
            assert!(d.validate().is_err(), "{email} should be rejected");
        }
    }

    #[test]
    fn rejects_future_birthday() {
        let mut d = draft();
        d.birthday = Utc::now().date_naive() + Duration::days(1);
        assert!(d.validate().is_err());

        d.birthday = Utc::now().date_naive();
        assert!(d.validate().is_ok());
    }
}
