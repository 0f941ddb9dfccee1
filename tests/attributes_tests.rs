//! Round-trip tests for get/set/remove/list against real files

mod common;

use common::{attr_name, xattr_fixture};
use nix::errno::Errno;
use std::collections::HashSet;
use xattr_ops::{Attributes, SetOptions, XattrError};

/// Test set followed by get returns the exact bytes
#[test]
fn test_set_get_round_trip() {
    let Some((_temp_dir, path)) = xattr_fixture("round_trip.txt") else {
        return;
    };
    let attrs = Attributes::new();

    let values: [&[u8]; 4] = [
        b"plain text",
        b"",
        &[0x00, 0xff, 0x10, 0x00, 0x80],
        &[0xa5; 2048],
    ];
    for (index, value) in values.iter().enumerate() {
        let name = attr_name(&format!("value{index}"));
        attrs.set(&path, &name, value, SetOptions::default()).unwrap();
        assert_eq!(attrs.get(&path, &name, true).unwrap().as_deref(), Some(*value));
    }
}

/// Test overwriting replaces the whole value, including shrinking it
#[test]
fn test_overwrite_shrinks_value() {
    let Some((_temp_dir, path)) = xattr_fixture("overwrite.txt") else {
        return;
    };
    let name = attr_name("grow_shrink");

    xattr_ops::set(&path, &name, b"a much longer first value").unwrap();
    xattr_ops::set(&path, &name, b"short").unwrap();
    assert_eq!(xattr_ops::get(&path, &name).unwrap(), Some(b"short".to_vec()));
}

/// Test get on a name that was never set
#[test]
fn test_get_missing_returns_none() {
    let Some((_temp_dir, path)) = xattr_fixture("missing.txt") else {
        return;
    };
    assert_eq!(xattr_ops::get(&path, &attr_name("never_set")).unwrap(), None);
}

/// Test remove never fails for a missing name
#[test]
fn test_remove_is_idempotent() {
    let Some((_temp_dir, path)) = xattr_fixture("remove.txt") else {
        return;
    };
    let name = attr_name("doomed");

    xattr_ops::set(&path, &name, b"bye").unwrap();
    xattr_ops::remove(&path, &name).unwrap();
    xattr_ops::remove(&path, &name).unwrap();
    xattr_ops::remove(&path, &attr_name("never_set")).unwrap();

    assert_eq!(xattr_ops::get(&path, &name).unwrap(), None);
}

/// Test list contains exactly the names that were set
#[test]
fn test_list_contains_set_names() {
    let Some((_temp_dir, path)) = xattr_fixture("list.txt") else {
        return;
    };
    let before: HashSet<String> = xattr_ops::list(&path).unwrap().into_iter().collect();

    let names: Vec<String> = (0..5).map(|i| attr_name(&format!("listed{i}"))).collect();
    for name in &names {
        xattr_ops::set(&path, name, b"x").unwrap();
    }

    let after: HashSet<String> = xattr_ops::list(&path).unwrap().into_iter().collect();
    let added: HashSet<String> = after.difference(&before).cloned().collect();
    assert_eq!(added, names.iter().cloned().collect());

    xattr_ops::remove(&path, &names[0]).unwrap();
    assert!(!xattr_ops::list(&path).unwrap().contains(&names[0]));
}

/// Test list on a fresh file has none of our names
#[test]
fn test_list_fresh_file() {
    let Some((_temp_dir, path)) = xattr_fixture("fresh.txt") else {
        return;
    };
    let names = xattr_ops::list(&path).unwrap();
    assert!(names.iter().all(|name| !name.starts_with(&attr_name("listed"))));
}

/// Test create-only and replace-only constraints
#[test]
fn test_existence_constraints() {
    let Some((_temp_dir, path)) = xattr_fixture("constraints.txt") else {
        return;
    };
    let attrs = Attributes::new();
    let name = attr_name("constrained");

    let err = attrs
        .set(&path, &name, b"v", SetOptions::new().fail_if_missing(true))
        .unwrap_err();
    assert_eq!(err.errno(), Some(xattr_native::ATTR_NOT_FOUND));

    attrs
        .set(&path, &name, b"v1", SetOptions::new().fail_if_exists(true))
        .unwrap();
    let err = attrs
        .set(&path, &name, b"v2", SetOptions::new().fail_if_exists(true))
        .unwrap_err();
    assert!(matches!(err, XattrError::System(Errno::EEXIST)));
    assert_eq!(err.raw_os_error(), Some(libc::EEXIST));

    attrs
        .set(&path, &name, b"v3", SetOptions::new().fail_if_missing(true))
        .unwrap();
    assert_eq!(attrs.get(&path, &name, true).unwrap(), Some(b"v3".to_vec()));
}

/// Test values written here are visible to an independent binding
#[test]
fn test_cross_check_with_xattr_crate() {
    let Some((_temp_dir, path)) = xattr_fixture("cross_check.txt") else {
        return;
    };
    let ours = attr_name("ours");
    let theirs = attr_name("theirs");

    xattr_ops::set(&path, &ours, b"written by xattr-ops").unwrap();
    xattr::set(&path, &theirs, b"written by xattr").unwrap();

    assert_eq!(
        xattr::get(&path, &ours).unwrap(),
        Some(b"written by xattr-ops".to_vec())
    );
    assert_eq!(
        xattr_ops::get(&path, &theirs).unwrap(),
        Some(b"written by xattr".to_vec())
    );
}

/// Test a missing file is a system error, not absence
#[test]
fn test_missing_file_is_enoent() {
    common::init_tracing();
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("does_not_exist");

    let err = xattr_ops::get(&path, &attr_name("a")).unwrap_err();
    if common::is_unsupported(&err) {
        return;
    }
    assert_eq!(err.errno(), Some(Errno::ENOENT));

    let err = xattr_ops::remove(&path, &attr_name("a")).unwrap_err();
    assert_eq!(err.errno(), Some(Errno::ENOENT));
}

/// Test `file://` URLs resolve to local paths
#[test]
fn test_file_url_location() {
    let Some((_temp_dir, path)) = xattr_fixture("url target.txt") else {
        return;
    };
    let url = url::Url::from_file_path(&path).unwrap();
    let name = attr_name("via_url");

    xattr_ops::set(url.as_str(), &name, b"ok").unwrap();
    assert_eq!(xattr_ops::get(&path, &name).unwrap(), Some(b"ok".to_vec()));
}

/// Test non-file locators fail without touching anything
#[test]
fn test_remote_locations_rejected() {
    for location in ["https://example.com/file", "sftp://host/home/me/file"] {
        let err = xattr_ops::get(location, "user.a").unwrap_err();
        assert!(matches!(err, XattrError::NotFileLocation { .. }));

        let err = xattr_ops::set(location, "user.a", b"v").unwrap_err();
        assert!(matches!(err, XattrError::NotFileLocation { .. }));

        let err = xattr_ops::remove(location, "user.a").unwrap_err();
        assert!(matches!(err, XattrError::NotFileLocation { .. }));

        let err = xattr_ops::list(location).unwrap_err();
        assert!(matches!(err, XattrError::NotFileLocation { .. }));
    }
}
