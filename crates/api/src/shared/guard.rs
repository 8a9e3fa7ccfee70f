use crate::error::DocbookError;
use docbook_domain::ID;

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub struct Guard {}

impl Guard {
    pub fn against_malformed_id(val: String) -> Result<ID, DocbookError> {
        val.parse()
            .map_err(|e| DocbookError::BadClientData(format!("{}", e)))
    }

    pub fn against_empty(field: &str, val: String) -> Result<String, DocbookError> {
        let val = val.trim();
        if val.is_empty() {
            return Err(DocbookError::BadClientData(format!(
                "The field: {} can not be empty",
                field
            )));
        }
        Ok(val.to_string())
    }

    /// Returns the normalized email
    pub fn against_invalid_email(val: &str) -> Result<String, DocbookError> {
        let email = docbook_utils::normalize_email(val);
        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && domain.contains('.') && !domain.contains('@')
            }
            None => false,
        };
        if !valid || email.chars().any(char::is_whitespace) {
            return Err(DocbookError::BadClientData(format!(
                "The email: {} is not valid",
                val
            )));
        }
        Ok(email)
    }

    pub fn against_weak_password(val: &str) -> Result<(), DocbookError> {
        if val.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DocbookError::BadClientData(format!(
                "The password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_malformed_ids() {
        assert!(Guard::against_malformed_id("abc".into()).is_err());
        assert!(Guard::against_malformed_id("".into()).is_err());
        let id = ID::new();
        assert_eq!(Guard::against_malformed_id(id.to_string()).unwrap(), id);
    }

    #[test]
    fn validates_emails() {
        assert_eq!(
            Guard::against_invalid_email(" Jane@Example.com ").unwrap(),
            "jane@example.com"
        );
        assert!(Guard::against_invalid_email("jane").is_err());
        assert!(Guard::against_invalid_email("@example.com").is_err());
        assert!(Guard::against_invalid_email("jane@localhost").is_err());
        assert!(Guard::against_invalid_email("ja ne@example.com").is_err());
        assert!(Guard::against_invalid_email("a@b@example.com").is_err());
    }

    #[test]
    fn validates_passwords_and_required_fields() {
        assert!(Guard::against_weak_password("short").is_err());
        assert!(Guard::against_weak_password("long enough").is_ok());
        assert!(Guard::against_empty("name", "  ".into()).is_err());
        assert_eq!(Guard::against_empty("name", " Dr. X ".into()).unwrap(), "Dr. X");
    }
}
