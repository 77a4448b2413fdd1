//! Password policy validation and temporary credential generation.
//!
//! The policy is defined once and consumed by the rotation flow and by the
//! temporary credential generator, which always produces compliant values.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

use fd_shared::config::AccessPolicyConfig;

static UPPERCASE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());
static DIGIT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());
static SPECIAL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").unwrap());

const UPPERCASE_CHARS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const LOWERCASE_CHARS: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const DIGIT_CHARS: &[u8] = b"23456789";
const SPECIAL_CHARS: &[u8] = b"!@#$%&*+-_?";

/// A reason why a candidate password failed the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    TooShort,
    MissingUppercase,
    MissingDigit,
    MissingSpecial,
}

/// Password policy checker
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
    require_uppercase: bool,
    require_digit: bool,
    require_special: bool,
}

impl PasswordPolicy {
    /// Build the policy from the shared configuration
    pub fn from_config(config: &AccessPolicyConfig) -> Self {
        Self {
            min_length: config.min_password_length,
            require_uppercase: config.require_uppercase,
            require_digit: config.require_digit,
            require_special: config.require_special,
        }
    }

    /// Collect every violation for a candidate password
    pub fn violations(&self, candidate: &str) -> Vec<PolicyViolation> {
        let mut violations = Vec::new();

        if candidate.chars().count() < self.min_length {
            violations.push(PolicyViolation::TooShort);
        }
        if self.require_uppercase && !UPPERCASE_PATTERN.is_match(candidate) {
            violations.push(PolicyViolation::MissingUppercase);
        }
        if self.require_digit && !DIGIT_PATTERN.is_match(candidate) {
            violations.push(PolicyViolation::MissingDigit);
        }
        if self.require_special && !SPECIAL_PATTERN.is_match(candidate) {
            violations.push(PolicyViolation::MissingSpecial);
        }

        violations
    }

    /// Check whether a candidate password satisfies the policy
    pub fn is_satisfied_by(&self, candidate: &str) -> bool {
        self.violations(candidate).is_empty()
    }

    /// Generate a random temporary credential that satisfies the policy.
    ///
    /// One character from each required class is always included; the rest
    /// is drawn from the full alphabet and the result is shuffled.
    pub fn generate_temporary(&self, length: usize) -> String {
        let mut rng = rand::thread_rng();
        let length = length.max(self.min_length);
        let mut chars: Vec<u8> = Vec::with_capacity(length);

        chars.push(*UPPERCASE_CHARS.choose(&mut rng).unwrap());
        chars.push(*DIGIT_CHARS.choose(&mut rng).unwrap());
        chars.push(*SPECIAL_CHARS.choose(&mut rng).unwrap());
        chars.push(*LOWERCASE_CHARS.choose(&mut rng).unwrap());

        while chars.len() < length {
            let class = rng.gen_range(0..4);
            let pool = match class {
                0 => UPPERCASE_CHARS,
                1 => LOWERCASE_CHARS,
                2 => DIGIT_CHARS,
                _ => SPECIAL_CHARS,
            };
            chars.push(*pool.choose(&mut rng).unwrap());
        }

        chars.shuffle(&mut rng);
        String::from_utf8(chars).expect("generator alphabet is ASCII")
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::from_config(&AccessPolicyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_compliant_password() {
        let policy = PasswordPolicy::default();
        assert!(policy.is_satisfied_by("Str0ng!Pass"));
    }

    #[test]
    fn test_rejects_short_password() {
        let policy = PasswordPolicy::default();
        assert_eq!(policy.violations("S1!a"), vec![PolicyViolation::TooShort]);
    }

    #[test]
    fn test_rejects_missing_classes() {
        let policy = PasswordPolicy::default();
        let violations = policy.violations("alllowercase");
        assert!(violations.contains(&PolicyViolation::MissingUppercase));
        assert!(violations.contains(&PolicyViolation::MissingDigit));
        assert!(violations.contains(&PolicyViolation::MissingSpecial));
    }

    #[test]
    fn test_generated_credentials_satisfy_policy() {
        let policy = PasswordPolicy::default();
        for _ in 0..50 {
            let temp = policy.generate_temporary(12);
            assert_eq!(temp.len(), 12);
            assert!(policy.is_satisfied_by(&temp), "generated: {temp}");
        }
    }

    #[test]
    fn test_generator_respects_minimum_length() {
        let policy = PasswordPolicy::default();
        let temp = policy.generate_temporary(4);
        assert!(temp.len() >= 8);
    }
}
