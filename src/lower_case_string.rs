/// A string that is guaranteed to contain no uppercase characters, used as a
/// case-insensitive search needle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowerCaseString<S>(S);

impl<S: AsRef<str>> LowerCaseString<S> {
    pub fn is_empty(&self) -> bool {
        self.0.as_ref().is_empty()
    }

    /// Checks whether `haystack`, compared without regard to case, contains this string
    pub fn is_found_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(self.0.as_ref())
    }
}

impl From<&str> for LowerCaseString<String> {
    fn from(s: &str) -> Self {
        Self(s.to_lowercase())
    }
}
