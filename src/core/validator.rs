//! Variable-name screening against a blacklist of injection markers.

use super::error::NotationError;

/// Substrings that must never appear in a variable name.
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "__locals__",
    "__globals__",
    "()",
    "eval(",
    "exec(",
    "__import__",
    "__call__",
    "#!/bin/bash",
    "#!/bin/sh",
];

/// An immutable set of forbidden substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blacklist {
    tokens: Vec<String>,
}

impl Blacklist {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// First token contained anywhere in `name`, if any.
    pub fn first_match(&self, name: &str) -> Option<&str> {
        self.tokens
            .iter()
            .find(|token| name.contains(token.as_str()))
            .map(String::as_str)
    }
}

impl Default for Blacklist {
    fn default() -> Self {
        Self::new(DEFAULT_BLACKLIST.iter().copied())
    }
}

/// Rejects variable names that carry a blacklisted token.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    blacklist: Blacklist,
}

impl Validator {
    pub fn new(blacklist: Blacklist) -> Self {
        Self { blacklist }
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    /// Check a single variable name.
    pub fn assert_valid(&self, name: &str) -> Result<(), NotationError> {
        match self.blacklist.first_match(name) {
            Some(token) => Err(NotationError::BlacklistedVariable {
                name: name.to_string(),
                token: token.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Check names in order, failing on the first blacklisted one.
    pub fn assert_all_valid<S: AsRef<str>>(&self, names: &[S]) -> Result<(), NotationError> {
        names
            .iter()
            .try_for_each(|name| self.assert_valid(name.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_rejects_import() {
        let err = Validator::default()
            .assert_all_valid(&["__import__os"])
            .unwrap_err();
        assert_eq!(
            err,
            NotationError::BlacklistedVariable {
                name: "__import__os".into(),
                token: "__import__".into(),
            }
        );
    }

    #[test]
    fn test_validator_substring_anywhere() {
        let v = Validator::default();
        assert!(v.assert_valid("run-eval(x").is_err());
        assert!(v.assert_valid("script #!/bin/sh -c").is_err());
        assert!(v.assert_valid("call()").is_err());
    }

    #[test]
    fn test_validator_accepts_clean_names() {
        let v = Validator::default();
        assert!(v.assert_all_valid(&["Target-Label", "url", "count_2"]).is_ok());
        assert!(v.assert_all_valid::<&str>(&[]).is_ok());
    }

    #[test]
    fn test_validator_first_offender_reported() {
        let err = Validator::default()
            .assert_all_valid(&["ok", "exec(1)", "__call__"])
            .unwrap_err();
        assert!(matches!(err, NotationError::BlacklistedVariable { name, .. } if name == "exec(1)"));
    }

    #[test]
    fn test_validator_custom_blacklist() {
        let v = Validator::new(Blacklist::new(["secret"]));
        assert!(v.assert_valid("__import__").is_ok());
        assert!(v.assert_valid("my_secret_key").is_err());
        assert_eq!(v.blacklist().tokens(), ["secret".to_string()]);
    }
}
