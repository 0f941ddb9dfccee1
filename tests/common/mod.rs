use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use xattr_ops::{SetOptions, XattrError};

/// Linux only lets unprivileged users touch the `user.` namespace
#[cfg(any(target_os = "linux", target_os = "android"))]
pub const NAMESPACE: &str = "user.";
#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub const NAMESPACE: &str = "com.example.";

/// A namespaced attribute name valid for the current platform
#[allow(dead_code)]
pub fn attr_name(name: &str) -> String {
    format!("{NAMESPACE}{name}")
}

/// Route `tracing` output through the test harness
#[allow(dead_code)]
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

/// Whether `error` means "this filesystem does not do xattrs"
#[allow(dead_code)]
pub fn is_unsupported(error: &XattrError) -> bool {
    use nix::errno::Errno;
    match error {
        XattrError::Unsupported(_) => true,
        XattrError::System(errno) => {
            *errno == Errno::ENOTSUP || *errno == Errno::EOPNOTSUPP || *errno == Errno::EPERM
        }
        XattrError::NotFileLocation { .. } => false,
    }
}

/// A temp dir holding one file, or `None` if its filesystem lacks xattrs
#[allow(dead_code)]
pub fn xattr_fixture(file_name: &str) -> Option<(TempDir, PathBuf)> {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join(file_name);
    std::fs::write(&file_path, "test content").unwrap();

    if !supports_xattrs(&file_path) {
        println!("Extended attributes not supported on this filesystem - test skipped");
        return None;
    }
    Some((temp_dir, file_path))
}

fn supports_xattrs(path: &Path) -> bool {
    let attrs = xattr_ops::Attributes::new();
    let probe = attr_name("probe");
    match attrs.set(path, &probe, b"1", SetOptions::default()) {
        Ok(()) => {
            attrs.remove(path, &probe, true).unwrap();
            true
        }
        Err(e) if is_unsupported(&e) => false,
        Err(e) => panic!("unexpected error probing xattr support: {e}"),
    }
}
