// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Cryptographic utilities for the credential challenge.
//!
//! The upstream mints a credential only for a request proving knowledge of the
//! shared secret: 32 random bytes plus an HMAC-SHA256 over those bytes.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::TryRngCore;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::core::constants::credential;
use crate::core::errors::CryptoError;

type HmacSha256 = Hmac<Sha256>;

/// Base64-encoded challenge ready to be POSTed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedChallenge {
    pub random: String,
    pub signature: String,
}

pub struct ChallengeSigner {
    secret: SecretString,
}

impl ChallengeSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: SecretString::new(secret.to_string()),
        }
    }

    /// Generate fresh random bytes and sign them.
    pub fn generate(&self) -> Result<SignedChallenge, CryptoError> {
        let mut random = [0u8; credential::CHALLENGE_LENGTH];
        OsRng
            .try_fill_bytes(&mut random)
            .map_err(|_| CryptoError::RandomError)?;
        self.sign(&random)
    }

    /// `random` is base64(bytes); `signature` is base64(hex(hmac_sha256(bytes))).
    pub fn sign(&self, random: &[u8]) -> Result<SignedChallenge, CryptoError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| CryptoError::SigningError(e.to_string()))?;
        mac.update(random);
        let digest_hex = hex::encode(mac.finalize().into_bytes());

        Ok(SignedChallenge {
            random: STANDARD.encode(random),
            signature: STANDARD.encode(digest_hex.as_bytes()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(key: &str) -> ChallengeSigner {
        ChallengeSigner::new(key)
    }

    #[test]
    fn test_sign_known_vector() {
        // RFC 4231 test case 2: key "Jefe", data "what do ya want for nothing?"
        let challenge = signer("Jefe")
            .sign(b"what do ya want for nothing?")
            .unwrap();

        let hex_digest = STANDARD.decode(&challenge.signature).unwrap();
        assert_eq!(
            String::from_utf8(hex_digest).unwrap(),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
        assert_eq!(
            STANDARD.decode(&challenge.random).unwrap(),
            b"what do ya want for nothing?"
        );
    }

    #[test]
    fn test_generate_randomized() {
        let s = signer("secret");
        let c1 = s.generate().unwrap();
        let c2 = s.generate().unwrap();

        assert_ne!(c1.random, c2.random, "Challenges must be randomized per call");
        assert_eq!(
            STANDARD.decode(&c1.random).unwrap().len(),
            credential::CHALLENGE_LENGTH
        );
        // hex digest of SHA-256 is 64 chars
        assert_eq!(STANDARD.decode(&c1.signature).unwrap().len(), 64);
    }

    #[test]
    fn test_signature_depends_on_key() {
        let bytes = [7u8; 32];
        let a = signer("key-a").sign(&bytes).unwrap();
        let b = signer("key-b").sign(&bytes).unwrap();
        assert_eq!(a.random, b.random);
        assert_ne!(a.signature, b.signature);
    }
}
