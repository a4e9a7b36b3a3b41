use thiserror::Error;

/// A single `(key, value)` pair from the host's provider configuration.
///
/// Keys are matched case-insensitively; the host makes no guarantees about
/// the casing it hands over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseOption {
    pub key: String,
    pub value: String,
}

impl DatabaseOption {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DatabaseOptionsError {
    #[error("Invalid value '{value}' for option '{key}': {error}")]
    Parse {
        key: String,
        value: String,
        error: String,
    },
}

/// Finds the value for `key`, matching case-insensitively.
///
/// The first matching option wins.
#[must_use]
pub fn get_option<'a>(options: &'a [DatabaseOption], key: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|x| x.key.eq_ignore_ascii_case(key))
        .map(|x| x.value.as_str())
}

/// Finds the value for `key` with a default value.
#[must_use]
pub fn get_option_or(options: &[DatabaseOption], key: &str, default: &str) -> String {
    get_option(options, key).unwrap_or(default).to_string()
}

/// Finds the value for `key` parsed as a specific type, falling back to
/// `default` when the key is absent.
///
/// # Errors
///
/// * If the option is present but cannot be parsed to the target type
pub fn get_option_parse_or<T>(
    options: &[DatabaseOption],
    key: &str,
    default: T,
) -> Result<T, DatabaseOptionsError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_option(options, key).map_or(Ok(default), |value| {
        value.parse::<T>().map_err(|e| DatabaseOptionsError::Parse {
            key: key.to_string(),
            value: value.to_string(),
            error: e.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test_log::test]
    fn get_option_matches_keys_case_insensitively() {
        let options = vec![DatabaseOption::new("HoSt", "db.local")];

        assert_eq!(get_option(&options, "host"), Some("db.local"));
        assert_eq!(get_option(&options, "HOST"), Some("db.local"));
    }

    #[test_log::test]
    fn get_option_first_match_wins() {
        let options = vec![
            DatabaseOption::new("port", "5433"),
            DatabaseOption::new("PORT", "9999"),
        ];

        assert_eq!(get_option(&options, "port"), Some("5433"));
    }

    #[test_log::test]
    fn get_option_or_falls_back_to_default_when_absent() {
        let options = vec![DatabaseOption::new("host", "db.local")];

        assert_eq!(get_option_or(&options, "username", "jellyfin"), "jellyfin");
    }

    #[test_log::test]
    fn get_option_parse_or_parses_present_value() {
        let options = vec![DatabaseOption::new("Port", "5433")];

        assert_eq!(get_option_parse_or(&options, "port", 5432u16).unwrap(), 5433);
    }

    #[test_log::test]
    fn get_option_parse_or_defaults_when_absent() {
        assert_eq!(get_option_parse_or(&[], "port", 5432u16).unwrap(), 5432);
    }

    #[test_log::test]
    fn get_option_parse_or_rejects_unparseable_value() {
        let options = vec![DatabaseOption::new("port", "not-a-port")];

        let err = get_option_parse_or(&options, "port", 5432u16).unwrap_err();

        assert!(matches!(err, DatabaseOptionsError::Parse { .. }));
    }
}
