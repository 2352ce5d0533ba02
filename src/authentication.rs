// there is exactly one credential in this app: a shared admin secret. the
// secret doubles as the bearer token (no sessions, no expiry), so all we ever
// need to do is compare a presented string against it, in constant time.

mod middleware;

use anyhow::Context;
use hmac::Hmac;
use hmac::Mac;
use rand::RngCore;
use secrecy::ExposeSecret;
use secrecy::Secret;
use sha2::Sha256;

pub use middleware::reject_unauthorized;

use crate::store::ServiceStore;

type HmacSha256 = Hmac<Sha256>;

/// The admin secret, kept only as an HMAC-SHA256 tag under a per-process
/// random key. Candidates are tagged the same way and compared with
/// `Mac::verify_slice`, which does not short-circuit on the first differing
/// byte.
struct AdminSecret {
    key: [u8; 32],
    tag: Vec<u8>,
}

impl AdminSecret {
    fn new(secret: &Secret<String>) -> Result<Self, anyhow::Error> {
        let mut key = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut key);
        let mut mac = HmacSha256::new_from_slice(&key)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("Failed to key HMAC")?;
        mac.update(secret.expose_secret().as_bytes());
        let tag = mac.finalize().into_bytes().to_vec();
        Ok(Self { key, tag })
    }

    fn verify(
        &self,
        candidate: &str,
    ) -> bool {
        match HmacSha256::new_from_slice(&self.key) {
            Ok(mut mac) => {
                mac.update(candidate.as_bytes());
                mac.verify_slice(&self.tag).is_ok()
            }
            Err(_) => false,
        }
    }
}

/// Everything needed to let an admin in: the secret to check against, and the
/// privileged store to hand over once the check passes. Neither is reachable
/// from outside this module except through `verify`/`authorize`.
pub struct AdminGate {
    secret: AdminSecret,
    store: ServiceStore,
}

impl AdminGate {
    pub fn new(
        secret: &Secret<String>,
        store: ServiceStore,
    ) -> Result<Self, anyhow::Error> {
        Ok(Self {
            secret: AdminSecret::new(secret)?,
            store,
        })
    }

    /// Whether `candidate` equals the admin secret
    pub fn verify(
        &self,
        candidate: &str,
    ) -> bool {
        self.secret.verify(candidate)
    }

    /// The privileged store, if `token` equals the admin secret
    pub fn authorize(
        &self,
        token: &str,
    ) -> Option<ServiceStore> {
        self.verify(token).then(|| self.store.clone())
    }
}
