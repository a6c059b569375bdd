//! Random password generation and strength scoring.

use std::fmt;

use rand::Rng;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Character-class toggles for password generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordOptions {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 16,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
        }
    }
}

/// Generate a random password. An option set that disables every character
/// class falls back to lowercase letters.
#[must_use]
pub fn generate_password(options: &PasswordOptions) -> String {
    let mut characters = String::new();
    if options.include_lowercase {
        characters.push_str(LOWERCASE);
    }
    if options.include_uppercase {
        characters.push_str(UPPERCASE);
    }
    if options.include_numbers {
        characters.push_str(NUMBERS);
    }
    if options.include_symbols {
        characters.push_str(SYMBOLS);
    }
    if characters.is_empty() {
        characters.push_str(LOWERCASE);
    }

    let pool: Vec<char> = characters.chars().collect();
    let mut rng = rand::thread_rng();
    (0..options.length)
        .map(|_| pool[rng.gen_range(0..pool.len())])
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        };
        write!(formatter, "{label}")
    }
}

/// Score a password by length and character-class coverage.
#[must_use]
pub fn password_strength(password: &str) -> PasswordStrength {
    if password.len() < 8 {
        return PasswordStrength::Weak;
    }

    let mut score = 0;
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 1;
    }

    if password.len() >= 16 && score >= 3 {
        PasswordStrength::Strong
    } else if score >= 3 {
        PasswordStrength::Medium
    } else {
        PasswordStrength::Weak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_password_has_requested_length() {
        let options = PasswordOptions {
            length: 24,
            ..PasswordOptions::default()
        };
        assert_eq!(generate_password(&options).chars().count(), 24);
    }

    #[test]
    fn generated_password_respects_charset() {
        let options = PasswordOptions {
            length: 64,
            include_uppercase: false,
            include_lowercase: true,
            include_numbers: false,
            include_symbols: false,
        };
        let password = generate_password(&options);
        assert!(password.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn all_classes_disabled_falls_back_to_lowercase() {
        let options = PasswordOptions {
            length: 32,
            include_uppercase: false,
            include_lowercase: false,
            include_numbers: false,
            include_symbols: false,
        };
        let password = generate_password(&options);
        assert!(password.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn strength_scoring_cases() {
        assert_eq!(password_strength("short"), PasswordStrength::Weak);
        assert_eq!(password_strength("alllowercase"), PasswordStrength::Weak);
        assert_eq!(password_strength("Abcdef12"), PasswordStrength::Medium);
        assert_eq!(
            password_strength("Abcdef12!Abcdef1"),
            PasswordStrength::Strong
        );
    }

    #[test]
    fn strength_display_labels() {
        assert_eq!(PasswordStrength::Weak.to_string(), "weak");
        assert_eq!(PasswordStrength::Strong.to_string(), "strong");
    }
}
