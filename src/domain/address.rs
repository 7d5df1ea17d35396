use super::errors::DomainError;
use super::state::StateCode;

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub postal_code: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: StateCode,
}

/// Strips formatting from a CEP ("01310-100" -> "01310100"). Anything that is
/// not exactly eight digits afterwards is rejected.
pub fn normalize_postal_code(raw: &str) -> Result<String, DomainError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 8 {
        return Err(DomainError::validation("cep"));
    }
    Ok(digits)
}
