// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io::Write;
use std::path::Path;

use russh::keys::ssh_key::{Algorithm, LineEnding, PrivateKey};
use tracing::{info, warn};

use crate::error::{Result, ServerError};

/// Loads the OpenSSH host key at `path`, creating an Ed25519 key there when none exists.
///
/// A key that cannot be written is still used for this run.
pub fn load_or_create_host_key(path: &Path) -> Result<PrivateKey> {
    match fs::metadata(path) {
        Ok(_) => {
            let key = russh::keys::load_secret_key(path, None)
                .map_err(|e| ServerError::host_key(path, e))?;
            info!(path = %path.display(), algorithm = %key.algorithm(), "loaded host key");
            Ok(key)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let key = PrivateKey::random(&mut rand::rngs::OsRng, Algorithm::Ed25519)
                .map_err(|e| ServerError::host_key(path, e))?;
            match persist(&key, path) {
                Ok(()) => info!(path = %path.display(), "generated new Ed25519 host key"),
                Err(error) => warn!(
                    path = %path.display(),
                    %error,
                    "could not save generated host key; clients will see a new fingerprint after restart"
                ),
            }
            Ok(key)
        }
        Err(e) => Err(ServerError::host_key(path, e)),
    }
}

fn persist(key: &PrivateKey, path: &Path) -> std::io::Result<()> {
    let encoded = key
        .to_openssh(LineEnding::LF)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(encoded.as_bytes())?;
    file.sync_all()
}
