use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

// Peppers mixed into key derivation; changing either breaks old documents.
const HEAD_PEPPER: &[u8] = b"xb-codec/secret/v1";
const TAIL_PEPPER: &[u8] = b"field-confidentiality";

// -----------------------------------------------------------------------------
// SecretBox

/// Field-level confidentiality for properties marked `#[secret]`.
///
/// Key material is derived once from a caller-supplied passphrase: the
/// AES-256 key is a digest over `head ∥ passphrase ∥ tail`, the CBC IV the
/// leading bytes of a digest over `tail ∥ passphrase ∥ head`. Two boxes
/// built from the same passphrase can open each other's output, so documents
/// travel between processes.
///
/// [`seal`] turns a plaintext fragment into a base64 token; [`open`]
/// reverses it. Opening with the wrong passphrase fails — either the padding
/// check or the UTF-8 check catches it.
///
/// [`seal`]: SecretBox::seal
/// [`open`]: SecretBox::open
pub struct SecretBox {
    key: [u8; 32],
    iv: [u8; 16],
}

impl SecretBox {
    /// Derives a box from `passphrase`. An empty passphrase is allowed.
    pub fn derive(passphrase: &str) -> Self {
        let mut forward = Sha256::new();
        forward.update(HEAD_PEPPER);
        forward.update(passphrase.as_bytes());
        forward.update(TAIL_PEPPER);
        let key: [u8; 32] = forward.finalize().into();

        let mut backward = Sha256::new();
        backward.update(TAIL_PEPPER);
        backward.update(passphrase.as_bytes());
        backward.update(HEAD_PEPPER);
        let digest: [u8; 32] = backward.finalize().into();
        let mut iv = [0_u8; 16];
        iv.copy_from_slice(&digest[..16]);

        Self { key, iv }
    }

    /// Encrypts `plaintext` and encodes the ciphertext as base64.
    pub fn seal(&self, plaintext: &str) -> String {
        let cipher = Aes256CbcEnc::new(&self.key.into(), &self.iv.into());
        let sealed = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        STANDARD.encode(sealed)
    }

    /// Decodes and decrypts a token produced by [`seal`].
    ///
    /// [`seal`]: SecretBox::seal
    pub fn open(&self, token: &str) -> Result<String, SecretError> {
        let sealed = STANDARD.decode(token.trim())?;
        let cipher = Aes256CbcDec::new(&self.key.into(), &self.iv.into());
        let plain = cipher
            .decrypt_padded_vec_mut::<Pkcs7>(&sealed)
            .map_err(|_| SecretError::Cipher)?;
        Ok(String::from_utf8(plain)?)
    }
}

/// A confidential token could not be opened.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("confidential token is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("confidential token does not decrypt under this passphrase")]
    Cipher,
    #[error("decrypted confidential data is not text: {0}")]
    Text(#[from] std::string::FromUtf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_then_open_round_trips() {
        let sealed = SecretBox::derive("hunter2").seal("top secret äöü");
        let opened = SecretBox::derive("hunter2").open(&sealed).unwrap();
        assert_eq!(opened, "top secret äöü");
    }

    #[test]
    fn output_is_not_plaintext() {
        let sealed = SecretBox::derive("k").seal("visible words");
        assert!(!sealed.contains("visible"));
    }

    #[test]
    fn wrong_passphrase_fails_to_open() {
        let sealed = SecretBox::derive("right").seal("payload");
        assert!(SecretBox::derive("wrong").open(&sealed).is_err());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let sbox = SecretBox::derive("k");
        assert!(matches!(
            sbox.open("!!not base64!!"),
            Err(SecretError::Encoding(_))
        ));
        // Valid base64 of an off-size block.
        assert!(sbox.open("AAAA").is_err());
    }

    #[test]
    fn empty_passphrase_is_usable() {
        let sbox = SecretBox::derive("");
        assert_eq!(sbox.open(&sbox.seal("x")).unwrap(), "x");
    }
}
