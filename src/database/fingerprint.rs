//! Change detection for archive images.

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::time::SystemTime;

use memmap2::Mmap;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Published images are a few tens of MB and are streamed through the
/// hasher; only unusually large local builds are mapped.
const MMAP_THRESHOLD: u64 = 256 * 1024 * 1024;

/// Size and modification time of an image file. Equal stamps mean the file
/// was not touched, so it need not be read again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    len: u64,
    modified: Option<SystemTime>,
}

impl Stamp {
    pub fn of(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path)?;
        Ok(Self {
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }

    pub fn size(&self) -> u64 {
        self.len
    }
}

/// SHA-256 of an image file, hex encoded.
pub fn fingerprint(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();

    if file.metadata()?.len() > MMAP_THRESHOLD {
        // Images are replaced by rename, never rewritten in place.
        let mmap = unsafe { Mmap::map(&file)? };
        hasher.update(&mmap[..]);
    } else {
        io::copy(&mut file, &mut hasher)?;
    }

    Ok(hex::encode(hasher.finalize()))
}
