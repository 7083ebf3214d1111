use std::str::FromStr;

use error_stack::{Report, ResultExt};
use kernel::KernelError;

static SERVER_PORT: &str = "SERVER_PORT";
static BOOK_STRICT_NOT_FOUND: &str = "BOOK_STRICT_NOT_FOUND";

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    port: u16,
    strict_not_found: bool,
}

impl ServerConfig {
    pub fn new(port: u16, strict_not_found: bool) -> Self {
        Self {
            port,
            strict_not_found,
        }
    }

    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        Ok(Self {
            port: parse_or(SERVER_PORT, dotenvy::var(SERVER_PORT).ok(), DEFAULT_PORT)?,
            strict_not_found: parse_or(
                BOOK_STRICT_NOT_FOUND,
                dotenvy::var(BOOK_STRICT_NOT_FOUND).ok(),
                false,
            )?,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// When set, a missing book on `GET /books/:id` answers 404 like edit and delete do.
    pub fn strict_not_found(&self) -> bool {
        self.strict_not_found
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PORT, false)
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> error_stack::Result<T, KernelError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|error| Report::new(error).change_context(KernelError::Internal))
            .attach_printable_lazy(|| format!("Invalid value for {key}: {value}")),
    }
}

#[cfg(test)]
mod test {
    use super::parse_or;

    #[test]
    fn missing_value_falls_back_to_default() {
        assert_eq!(parse_or("SERVER_PORT", None, 8000_u16).unwrap(), 8000);
        assert!(!parse_or("BOOK_STRICT_NOT_FOUND", None, false).unwrap());
    }

    #[test]
    fn parses_present_values() {
        assert_eq!(
            parse_or("SERVER_PORT", Some("8080".to_string()), 8000_u16).unwrap(),
            8080
        );
        assert!(parse_or("BOOK_STRICT_NOT_FOUND", Some(" true ".to_string()), false).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_or("SERVER_PORT", Some("eighty".to_string()), 8000_u16).is_err());
        assert!(parse_or("BOOK_STRICT_NOT_FOUND", Some("yes".to_string()), false).is_err());
    }
}
