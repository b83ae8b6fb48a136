//! Shareable external identifier generation.

use rand::RngExt;

/// Number of random bytes per identifier (128 bits).
const ID_BYTES: usize = 16;

/// Generates a fresh opaque external identifier.
///
/// Drawn from a cryptographically secure generator so identifiers are
/// not enumerable and carry no relation to internal keys. Collisions
/// are astronomically unlikely; the upload pipeline still retries with
/// a fresh id if the store reports one.
pub fn generate() -> String {
    let mut bytes = [0u8; ID_BYTES];
    rand::rng().fill(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_are_hex_and_fixed_length() {
        let id = generate();
        assert_eq!(id.len(), ID_BYTES * 2);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| generate()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
