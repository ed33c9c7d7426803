use validator::ValidationError;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Rejects strings made only of whitespace
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "must not be blank"));
    }
    Ok(())
}

/// CPF: exactly 11 digits, punctuation not accepted
pub fn validate_cpf(cpf: &str) -> Result<(), ValidationError> {
    if cpf.len() != 11 || !cpf.chars().all(|c| c.is_ascii_digit()) {
        return Err(error("cpf", "must contain exactly 11 digits"));
    }
    Ok(())
}

/// CNPJ: exactly 14 digits, punctuation not accepted
pub fn validate_cnpj(cnpj: &str) -> Result<(), ValidationError> {
    if cnpj.len() != 14 || !cnpj.chars().all(|c| c.is_ascii_digit()) {
        return Err(error("cnpj", "must contain exactly 14 digits"));
    }
    Ok(())
}

/// Landline or mobile number with area code: 10 or 11 digits
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().all(|c| c.is_ascii_digit());
    if !digits || !(10..=11).contains(&phone.len()) {
        return Err(error("phone", "must contain 10 or 11 digits"));
    }
    Ok(())
}

/// Two-letter state code
pub fn validate_state(state: &str) -> Result<(), ValidationError> {
    if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(error("state", "must be a two-letter code"));
    }
    Ok(())
}

pub fn validate_postal_code(code: &str) -> Result<(), ValidationError> {
    let allowed = code.chars().all(|c| c.is_ascii_digit() || c == '-');
    if !allowed || !(5..=10).contains(&code.len()) {
        return Err(error("postal_code", "must have 5 to 10 digits"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use fake::{faker::name::en::Name, Fake};

    use super::*;

    #[test]
    fn test_validate_not_blank() {
        let name: String = Name().fake();
        assert!(validate_not_blank(&name).is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }

    #[test]
    fn test_validate_cpf() {
        assert!(validate_cpf("12345678901").is_ok());
        assert!(validate_cpf("123.456.789-01").is_err());
        assert!(validate_cpf("1234567890").is_err());
    }

    #[test]
    fn test_validate_cnpj() {
        assert!(validate_cnpj("12345678000199").is_ok());
        assert!(validate_cnpj("12.345.678/0001-99").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("1133334444").is_ok());
        assert!(validate_phone("11999998888").is_ok());
        assert!(validate_phone("999").is_err());
        assert!(validate_phone("11-9999-8888").is_err());
    }

    #[test]
    fn test_validate_state_and_postal_code() {
        assert!(validate_state("SP").is_ok());
        assert!(validate_state("SPX").is_err());
        assert!(validate_postal_code("01310-100").is_ok());
        assert!(validate_postal_code("12").is_err());
    }
}
