//! Random code generation.

use rand::{distr::Alphanumeric, Rng};

/// Generates an uppercase alphanumeric code, e.g. for promo codes.
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::generate_code;

    /// Expect the requested length and uppercase alphanumeric characters
    #[test]
    fn generates_uppercase_alphanumeric() {
        let code = generate_code(10);

        assert_eq!(code.len(), 10);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }
}
