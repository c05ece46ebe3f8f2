// src/cache/key.rs

use sha2::{Digest, Sha256};

/// Hex characters of the digest kept in a key.
pub const DIGEST_LEN: usize = 12;

/// Stable cache key for a `(text, grade)` pair: `"<digest>_g<grade>"`.
///
/// Only the text and grade participate; page/item ids never do.
pub fn derive_key(text: &str, grade: u8) -> String {
    let digest = hex::encode(Sha256::digest(text.as_bytes()));
    format!("{}_g{}", &digest[..DIGEST_LEN], grade)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_stable() {
        let a = derive_key("The old bridge creaked.", 5);
        let b = derive_key("The old bridge creaked.", 5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_shape() {
        let key = derive_key("hello", 12);
        let (digest, grade) = key.split_once('_').unwrap();
        assert_eq!(digest.len(), DIGEST_LEN);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(grade, "g12");
        // sha256("hello") = 2cf24dba5fb0a30e...
        assert_eq!(key, "2cf24dba5fb0_g12");
    }

    #[test]
    fn test_grade_changes_key() {
        let text = "Rain fell.";
        let keys: Vec<String> = (2..=12).map(|g| derive_key(text, g)).collect();
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_one_character_changes_key() {
        assert_ne!(derive_key("Rain fell.", 3), derive_key("Rain fell!", 3));
        assert_ne!(derive_key("Rain fell.", 3), derive_key("rain fell.", 3));
    }
}
