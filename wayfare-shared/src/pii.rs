use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps passenger contact data so it never shows up in Debug/Display output.
///
/// Serialization passes the real value through: the booking payload needs it,
/// log macros like `tracing::info!("{:?}", passenger)` must not.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl Masked<String> {
    /// True when the wrapped string is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Masked<String> {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_masked() {
        let email = Masked::from("juan@example.com");
        assert_eq!(format!("{:?}", email), "********");
        assert_eq!(format!("{}", email), "********");
    }

    #[test]
    fn test_serializes_real_value() {
        let phone = Masked::from("+63 917 555 0101");
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"+63 917 555 0101\"");

        let back: Masked<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.expose(), "+63 917 555 0101");
    }

    #[test]
    fn test_blank_detection() {
        assert!(Masked::from("   ").is_blank());
        assert!(!Masked::from("a").is_blank());
    }
}
