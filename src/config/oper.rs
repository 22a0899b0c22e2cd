//! Operator block configuration.

use serde::Deserialize;

/// Operator block configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OperBlock {
    /// Operator name (used in OPER command).
    pub name: String,
    /// Password (plaintext or bcrypt hash).
    pub password: String,
}

impl OperBlock {
    /// Verify the provided password against the stored password (plaintext or bcrypt).
    pub fn verify_password(&self, password: &str) -> bool {
        if self.password.starts_with("$2") {
            bcrypt::verify(password, &self.password).unwrap_or(false)
        } else {
            self.password == password
        }
    }
}

/// Find the block named `name` and check `password` against it.
pub fn authenticate<'a>(
    opers: &'a [OperBlock],
    name: &str,
    password: &str,
) -> Option<&'a OperBlock> {
    opers
        .iter()
        .find(|block| block.name == name)
        .filter(|block| block.verify_password(password))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(password: &str) -> OperBlock {
        OperBlock {
            name: "admin".into(),
            password: password.into(),
        }
    }

    #[test]
    fn plaintext_password() {
        assert!(block("admin").verify_password("admin"));
        assert!(!block("admin").verify_password("Admin"));
    }

    #[test]
    fn bcrypt_password() {
        let hash = bcrypt::hash("s3cret", 4).unwrap();
        let oper = block(&hash);
        assert!(oper.verify_password("s3cret"));
        assert!(!oper.verify_password("wrong"));
    }

    #[test]
    fn authenticate_by_name() {
        let opers = vec![block("admin")];
        assert!(authenticate(&opers, "admin", "admin").is_some());
        assert!(authenticate(&opers, "admin", "nope").is_none());
        assert!(authenticate(&opers, "root", "admin").is_none());
    }
}
