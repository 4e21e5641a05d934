//! Recoverable secp256k1 signatures.
//!
//! A credential is a 65-byte `r || s || v` signature by the trusted signer over
//! [`credential_message`]. Verification never checks against a stored public key:
//! it recovers the signer's address from the signature and lets the caller compare.
//!
//! The issuing side ([`SignerKey`]) lives here too so that tooling and tests produce
//! byte-identical credentials to what wallets emit.

use allowlist_types::{Hash, Identity};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Serialize};
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::error::SignatureError;
use crate::hashing::{credential_message, keccak256};

/// Offset wallets add to the recovery parity byte.
const LEGACY_V_OFFSET: u8 = 27;

/// A decoded `r || s || v` signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    signature: Signature,
    recovery_id: RecoveryId,
}

impl RecoverableSignature {
    pub const LEN: usize = 65;

    /// Decode 65 bytes. `v` may be 0/1 or the wallet form 27/28.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != Self::LEN {
            return Err(SignatureError::WrongLength {
                actual: bytes.len(),
            });
        }

        let v = bytes[64];
        let parity = match v {
            0 | 1 => v,
            27 | 28 => v - LEGACY_V_OFFSET,
            other => return Err(SignatureError::InvalidRecoveryByte(other)),
        };
        let recovery_id =
            RecoveryId::from_byte(parity).ok_or(SignatureError::InvalidRecoveryByte(v))?;

        let signature =
            Signature::from_slice(&bytes[..64]).map_err(|_| SignatureError::MalformedSignature)?;

        // High-s signatures are accepted the way ecrecover accepts them: flip to
        // the low-s twin and invert the y parity.
        let (signature, recovery_id) = match signature.normalize_s() {
            Some(low_s) => (
                low_s,
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            ),
            None => (signature, recovery_id),
        };

        Ok(Self {
            signature,
            recovery_id,
        })
    }

    /// Encode as `r || s || v` with `v` in 27/28.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[..64].copy_from_slice(self.signature.to_bytes().as_slice());
        out[64] = self.recovery_id.to_byte() + LEGACY_V_OFFSET;
        out
    }

    /// Recover the address that produced this signature over `prehash`.
    pub fn recover(&self, prehash: &Hash) -> Result<Identity, SignatureError> {
        let key =
            VerifyingKey::recover_from_prehash(prehash.as_bytes(), &self.signature, self.recovery_id)
                .map_err(|_| SignatureError::RecoveryFailed)?;
        Ok(identity_from_verifying_key(&key))
    }
}

/// Decode `signature` and recover the signer's address over `prehash`.
pub fn recover_signer(prehash: &Hash, signature: &[u8]) -> Result<Identity, SignatureError> {
    RecoverableSignature::from_bytes(signature)?.recover(prehash)
}

/// Address of a public key: last 20 bytes of keccak256 over the uncompressed point
/// without its 0x04 tag.
pub fn identity_from_verifying_key(key: &VerifyingKey) -> Identity {
    let point = key.as_affine().to_encoded_point(false);
    let digest = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; Identity::LEN];
    address.copy_from_slice(&digest.as_bytes()[12..]);
    Identity::from_bytes(address)
}

/// A signature issued off-band by the trusted signer for one candidate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub candidate: Identity,
    #[serde(with = "hex::serde")]
    pub signature: Vec<u8>,
}

impl Credential {
    pub fn signature_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.signature))
    }
}

/// The trusted signer's private key.
///
/// Zeroized on drop. Only the issuing side holds one; gates only ever see the
/// signer's [`Identity`].
#[derive(ZeroizeOnDrop)]
pub struct SignerKey {
    #[zeroize(skip)] // k256::ecdsa::SigningKey zeroizes itself on drop
    inner: SigningKey,
}

impl SignerKey {
    /// Fresh key from the OS RNG.
    pub fn random() -> Self {
        Self {
            inner: SigningKey::random(&mut rand::rngs::OsRng),
        }
    }

    pub fn from_bytes(secret: &[u8]) -> Result<Self, SignatureError> {
        let inner =
            SigningKey::from_slice(secret).map_err(|e| SignatureError::InvalidKey(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Parse a `0x`-prefixed or bare hex private key.
    pub fn from_hex(secret: &str) -> Result<Self, SignatureError> {
        let trimmed = secret.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let bytes = Zeroizing::new(
            hex::decode(digits).map_err(|e| SignatureError::InvalidKey(e.to_string()))?,
        );
        Self::from_bytes(&bytes)
    }

    /// The address this key signs as.
    pub fn identity(&self) -> Identity {
        identity_from_verifying_key(self.inner.verifying_key())
    }

    /// Sign a 32-byte prehash, producing a low-s `r || s || v` signature.
    pub fn sign_prehash(&self, prehash: &Hash) -> Result<[u8; 65], SignatureError> {
        let (signature, recovery_id) = self
            .inner
            .sign_prehash_recoverable(prehash.as_bytes())
            .map_err(|_| SignatureError::SigningFailed)?;
        Ok(RecoverableSignature {
            signature,
            recovery_id,
        }
        .to_bytes())
    }

    /// Vouch for `candidate`: sign its credential message.
    pub fn issue_credential(&self, candidate: &Identity) -> Result<Credential, SignatureError> {
        let signature = self.sign_prehash(&credential_message(candidate))?;
        Ok(Credential {
            candidate: *candidate,
            signature: signature.to_vec(),
        })
    }
}

impl std::fmt::Debug for SignerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerKey")
            .field("identity", &self.identity())
            .finish_non_exhaustive()
    }
}
