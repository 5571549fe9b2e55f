use strum_macros::{Display, EnumString};

/// How long a resolved instance is reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Lifetime {
    /// One instance for the whole container
    Singleton,
    /// One instance per request scope
    Scoped,
    /// A new instance on every resolution
    #[default]
    Transient,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Lifetime::from_str("Scoped").unwrap(), Lifetime::Scoped);
        assert_eq!(Lifetime::from_str("SINGLETON").unwrap(), Lifetime::Singleton);
        assert!(Lifetime::from_str("forever").is_err());
    }

    #[test]
    fn test_display_lowercase() {
        assert_eq!(Lifetime::Transient.to_string(), "transient");
    }
}
