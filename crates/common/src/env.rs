use std::{env, str::FromStr};

/// Parse an `envvar` as `T`, if it's set and parses.
pub fn parse_env<T: FromStr>(envvar: &str) -> Option<T> {
    env::var(envvar).ok().and_then(|s| T::from_str(s.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_missing() {
        assert_eq!(parse_env::<u32>("ROLLUP_TEST_DEFINITELY_UNSET_VAR"), None);
    }
}
