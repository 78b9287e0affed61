// ============================================================================
// src/util/keyfile.rs – helpers for reading PEM private key material
// ============================================================================

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;
use std::fs;
use std::path::Path;
use zeroize::Zeroizing;

use crate::error::DecryptFailure;

/// Read the whole key file. The handle is closed before returning and the
/// buffer is wiped on drop.
pub fn read_key_material(path: &Path) -> Result<Zeroizing<Vec<u8>>, DecryptFailure> {
    Ok(Zeroizing::new(fs::read(path)?))
}

/// Parse an unencrypted RSA private key in PKCS#1 (`RSA PRIVATE KEY`) or
/// PKCS#8 (`PRIVATE KEY`) PEM form.
pub fn load_rsa_private_key(pem: &[u8]) -> Result<RsaPrivateKey, DecryptFailure> {
    let text = std::str::from_utf8(pem).map_err(|e| DecryptFailure::KeyFormat {
        pkcs1: e.to_string(),
        pkcs8: e.to_string(),
    })?;
    let text = text.trim();

    let pkcs1 = match RsaPrivateKey::from_pkcs1_pem(text) {
        Ok(key) => return Ok(key),
        Err(e) => e.to_string(),
    };
    match RsaPrivateKey::from_pkcs8_pem(text) {
        Ok(key) => Ok(key),
        Err(e) => Err(DecryptFailure::KeyFormat {
            pkcs1,
            pkcs8: e.to_string(),
        }),
    }
}
