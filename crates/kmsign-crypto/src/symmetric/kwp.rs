//! AES-256 Key Wrap with Padding (RFC 5649)

use aes_kw::KekAes256;

use crate::error::{Error, Result};

/// AES-256 key size in bytes
pub const KEK_SIZE: usize = 32;

/// Length of the Alternative Initial Value prepended by the wrap
pub const AIV_SIZE: usize = 8;

/// Wrap `plaintext` under a 256-bit key encryption key
pub fn wrap_with_padding(kek: &[u8; KEK_SIZE], plaintext: &[u8]) -> Result<Vec<u8>> {
    if plaintext.is_empty() {
        return Err(Error::KeyWrap("cannot wrap empty key material".to_string()));
    }
    let kek = KekAes256::from(*kek);
    kek.wrap_with_padding_vec(plaintext).map_err(Error::key_wrap)
}

/// Unwrap and authenticate a KWP ciphertext
pub fn unwrap_with_padding(kek: &[u8; KEK_SIZE], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let kek = KekAes256::from(*kek);
    kek.unwrap_with_padding_vec(ciphertext)
        .map_err(Error::key_wrap)
}

/// Output length of a KWP wrap of `plaintext_len` bytes
pub fn wrapped_len(plaintext_len: usize) -> usize {
    AIV_SIZE + plaintext_len.next_multiple_of(8)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEK: [u8; 32] = [0x42; 32];

    #[test]
    fn test_round_trip_various_lengths() {
        for len in [1usize, 7, 8, 9, 31, 32, 33, 1192] {
            let plaintext: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let wrapped = wrap_with_padding(&KEK, &plaintext).unwrap();
            assert_eq!(wrapped.len(), wrapped_len(len), "len {len}");
            assert_eq!(unwrap_with_padding(&KEK, &wrapped).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_wrapped_len() {
        assert_eq!(wrapped_len(1), 16);
        assert_eq!(wrapped_len(8), 16);
        assert_eq!(wrapped_len(9), 24);
        assert_eq!(wrapped_len(1218), 1232);
    }

    #[test]
    fn test_wrong_kek_fails() {
        let wrapped = wrap_with_padding(&KEK, b"secret key bytes").unwrap();
        let result = unwrap_with_padding(&[0x24; 32], &wrapped);
        assert!(matches!(result, Err(Error::KeyWrap(_))));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let mut wrapped = wrap_with_padding(&KEK, b"secret key bytes").unwrap();
        wrapped[10] ^= 0x01;
        assert!(unwrap_with_padding(&KEK, &wrapped).is_err());
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(wrap_with_padding(&KEK, &[]).is_err());
    }
}
