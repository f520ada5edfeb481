//! Password credential digests.
//!
//! Stored form: `hmac-sha256$<salt hex>$<digest hex>`, where the digest is
//! HMAC-SHA256 keyed by a random 16-byte salt over the password bytes.
//! Verification recomputes the MAC and compares in constant time.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::error::{ApiError, ApiResult};

type HmacSha256 = Hmac<Sha256>;

const SCHEME: &str = "hmac-sha256";
const SALT_LEN: usize = 16;

/// Produce a salted digest for `password`.
pub fn hash_password(password: &str) -> ApiResult<String> {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill(&mut salt);

    let digest = mac_for(&salt, password)?.finalize().into_bytes();
    Ok(format!("{}${}${}", SCHEME, hex::encode(salt), hex::encode(digest)))
}

/// Check `password` against a stored digest. Malformed digests never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (Some(scheme), Some(salt_hex), Some(digest_hex)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }

    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(digest_hex)) else {
        return false;
    };

    match mac_for(&salt, password) {
        Ok(mac) => mac.verify_slice(&expected).is_ok(),
        Err(_) => false,
    }
}

fn mac_for(salt: &[u8], password: &str) -> ApiResult<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(salt)
        .map_err(|_| ApiError::internal_error("Failed to initialize HMAC"))?;
    mac.update(password.as_bytes());
    Ok(mac)
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_only_the_original_password_verifies(password in ".{0,40}", other in ".{0,40}") {
            let stored = hash_password(&password).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert!(verify_password(&password, &stored));
            if other != password {
                prop_assert!(!verify_password(&other, &stored));
            }
        }
    }
}
