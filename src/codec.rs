//! Path codec: portable text paths <-> platform-native paths.
//!
//! The sync engine hands us UTF-8 text. On Unix the native form is the same
//! bytes; on Windows we additionally keep a NUL-terminated UTF-16 buffer for
//! the Win32 calls. The buffer is released when the `NativePath` is dropped.

use std::path::{Path, PathBuf};

use crate::errors::{FileOpError, Result};

/// A path encoded for the current platform, valid for the duration of one call.
#[derive(Debug, Clone)]
pub struct NativePath {
    path: PathBuf,
    #[cfg(windows)]
    wide: Vec<u16>,
}

impl NativePath {
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// NUL-terminated UTF-16 form for Win32 APIs.
    #[cfg(windows)]
    pub fn as_wide(&self) -> &[u16] {
        &self.wide
    }
}

impl AsRef<Path> for NativePath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Converts between caller text and platform paths.
pub trait PathCodec {
    fn encode(&self, text: &str) -> Result<NativePath>;
    fn decode(&self, native: &Path) -> Result<String>;
}

/// Codec for the platform this crate is built for.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCodec;

impl PathCodec for NativeCodec {
    fn encode(&self, text: &str) -> Result<NativePath> {
        if text.is_empty() {
            return Err(invalid(text, "empty path"));
        }
        if text.contains('\0') {
            return Err(invalid(text, "path contains a NUL byte"));
        }
        let path = PathBuf::from(text);

        #[cfg(windows)]
        {
            use std::iter::once;
            use std::os::windows::ffi::OsStrExt;
            let wide: Vec<u16> = path.as_os_str().encode_wide().chain(once(0)).collect();
            Ok(NativePath { path, wide })
        }
        #[cfg(not(windows))]
        {
            Ok(NativePath { path })
        }
    }

    fn decode(&self, native: &Path) -> Result<String> {
        // Strip `\\?\` verbatim prefixes on Windows; identity elsewhere.
        let simplified = dunce::simplified(native);
        simplified
            .to_str()
            .map(str::to_owned)
            .ok_or_else(|| invalid(&simplified.to_string_lossy(), "path is not valid UTF-8"))
    }
}

fn invalid(text: &str, reason: &'static str) -> FileOpError {
    FileOpError::InvalidPath {
        text: text.to_owned(),
        reason,
    }
}
