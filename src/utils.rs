use std::borrow::Cow;
use std::path::Path;

/// Raw bytes of a path as the platform stores them.
#[cfg(unix)]
pub fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
pub fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    match path.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

/// Removes `root` from the front of `path` as a literal byte prefix.
///
/// This is not path-aware: `/data` stripped from `/data/a` leaves `/a`, and a
/// path that does not start with the root bytes is returned whole.
pub fn strip_root_prefix(path: &Path, root: &Path) -> Vec<u8> {
    let full = path_bytes(path);
    let prefix = path_bytes(root);
    if let Some(rest) = full.strip_prefix(prefix.as_ref()) {
        return rest.to_vec();
    }
    full.into_owned()
}

/// One output line: a root-relative path and the MD5 of the file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumRecord {
    pub path: Vec<u8>,
    pub digest: [u8; 16],
}

impl ChecksumRecord {
    pub fn hex_digest(&self) -> String {
        hex::encode(self.digest)
    }
}

pub fn format_human_elapsed(elapsed: std::time::Duration) -> String {
    let elapsed_secs = elapsed.as_secs();
    let elapsed_subsec_millis = elapsed.subsec_millis();
    if elapsed_secs >= 3600 {
        let hours = elapsed_secs / 3600;
        let minutes = (elapsed_secs % 3600) / 60;
        let seconds = elapsed_secs % 60;
        format!("{hours}:{minutes:02}:{seconds:02}.{elapsed_subsec_millis:03} (h:mm:ss.mmm)")
    } else if elapsed_secs >= 60 {
        let minutes = elapsed_secs / 60;
        let seconds = elapsed_secs % 60;
        format!("{minutes}:{seconds:02}.{elapsed_subsec_millis:03} (m:ss.mmm)")
    } else {
        format!("{}.{:03} seconds", elapsed_secs, elapsed_subsec_millis)
    }
}
