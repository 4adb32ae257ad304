//! Path inspection and translation between WSL and native Windows paths.

use std::env;
use std::path::Path;

pub const WSL_DISTRO_ENV: &str = "WSL_DISTRO_NAME";

/// Where this process runs relative to the Linux subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subsystem {
    Native,
    Wsl { distro: String },
}

impl Subsystem {
    pub fn detect() -> Self {
        match env::var(WSL_DISTRO_ENV) {
            Ok(distro) if !distro.is_empty() => Subsystem::Wsl { distro },
            _ => Subsystem::Native,
        }
    }

    pub fn is_wsl(&self) -> bool {
        matches!(self, Subsystem::Wsl { .. })
    }

    /// The path native tools should be given for `path`.
    pub fn native_path(&self, path: &Path) -> String {
        match self {
            Subsystem::Native => path.to_string_lossy().into_owned(),
            Subsystem::Wsl { distro } => to_windows_path(&path.to_string_lossy(), distro),
        }
    }
}

/// Translates an absolute WSL path to the Windows path of the same file.
///
/// Drive mounts (`/mnt/c/...`) map to drive letters; everything else lives
/// under the distribution's `\\wsl.localhost` share.
pub fn to_windows_path(path: &str, distro: &str) -> String {
    if let Some(rest) = path.strip_prefix("/mnt/") {
        let (drive, tail) = rest.split_once('/').unwrap_or((rest, ""));
        if drive.len() == 1 && drive.chars().all(|c| c.is_ascii_alphabetic()) {
            return format!("{}:\\{}", drive.to_ascii_uppercase(), tail.replace('/', "\\"));
        }
    }

    let trimmed = path.trim_start_matches('/');
    format!("\\\\wsl.localhost\\{}\\{}", distro, trimmed.replace('/', "\\"))
}

/// Extension without the leading dot.
///
/// Files without an extension, dotfiles such as `.bashrc` and names ending
/// in a bare `.` have none. Both `/` and `\` separate components so that
/// translated Windows paths inspect the same way.
pub fn extension_name(path: &str) -> Option<&str> {
    let base = base_name(path);
    let dot = base.rfind('.')?;
    if dot == 0 {
        return None;
    }
    Some(&base[dot + 1..]).filter(|ext| !ext.is_empty())
}

pub fn base_name(path: &str) -> &str {
    let path = path.trim_end_matches(['/', '\\']);
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// `file://` URI for a native path, percent-encoding everything outside the
/// unreserved set.
pub fn file_uri(path: &str) -> String {
    let mut normalized = path.replace('\\', "/");
    let bytes = normalized.as_bytes();
    let has_drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    if has_drive {
        normalized.insert(0, '/');
    }

    let mut encoded = String::with_capacity(normalized.len() + 8);
    encoded.push_str("file://");
    if let Some(share) = normalized.strip_prefix("//") {
        // UNC share: host goes into the authority
        let (host, rest) = share.split_once('/').unwrap_or((share, ""));
        encoded.push_str(&percent_encode(host, false));
        encoded.push('/');
        encoded.push_str(&percent_encode(rest, false));
    } else {
        encoded.push_str(&percent_encode(&normalized, true));
    }
    encoded
}

fn percent_encode(input: &str, keep_drive_colon: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, byte) in input.bytes().enumerate() {
        let keep = byte.is_ascii_alphanumeric()
            || matches!(byte, b'-' | b'.' | b'_' | b'~' | b'/')
            || (keep_drive_colon && byte == b':' && i == 2);
        if keep {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}
