use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating username fields
    /// Must start with letter or underscore and contain only alphanumeric characters and underscores
    /// - Valid: "john_doe", "user123", "_admin", "JohnDoe"
    /// - Invalid: "123user", "-user", "user-name", "user name"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();

    /// Regex for challenge language tags ("python", "c++", "objective-c", "c#")
    pub static ref LANGUAGE_REGEX: Regex = Regex::new(r"^[a-z][a-z0-9+#-]{0,49}$").unwrap();
}
