use std::cell::RefCell;
use std::io;
use std::time::Duration;

use sync_fileops::{
    FileOpError, FileOpErrorKind, FileOps, NativeCodec, NativePath, PlatformFileOps, RetryPolicy,
};

const BUSY: i32 = 32;

/// Scripted platform: fails `busy_for` times with a sharing violation, then
/// either succeeds or returns `then`.
#[derive(Default)]
struct Scripted {
    busy_for: u32,
    then: Option<io::ErrorKind>,
    calls: RefCell<u32>,
    pauses: RefCell<Vec<Duration>>,
}

impl PlatformFileOps for Scripted {
    fn symlinks_are_files(&self) -> bool {
        false
    }

    fn move_file(&self, _src: &NativePath, _dst: &NativePath) -> io::Result<()> {
        let mut calls = self.calls.borrow_mut();
        *calls += 1;
        if *calls <= self.busy_for {
            return Err(io::Error::from_raw_os_error(BUSY));
        }
        match self.then {
            Some(kind) => Err(io::Error::from(kind)),
            None => Ok(()),
        }
    }

    fn is_transient(&self, err: &io::Error) -> bool {
        err.raw_os_error() == Some(BUSY)
    }

    fn pause(&self, delay: Duration) {
        self.pauses.borrow_mut().push(delay);
    }
}

fn ops(scripted: Scripted) -> FileOps<Scripted, NativeCodec> {
    FileOps::with_parts(scripted, NativeCodec)
}

#[test]
fn persistent_lock_gives_up_after_default_retries() {
    let fo = ops(Scripted {
        busy_for: u32::MAX,
        ..Default::default()
    });
    let err = fo.rename_file("a", "b").unwrap_err();

    assert_eq!(err.kind(), FileOpErrorKind::TransientLock);
    match err {
        FileOpError::TransientLock { code, attempts, .. } => {
            assert_eq!(code, BUSY);
            assert_eq!(attempts, 4);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(*fo.ops().calls.borrow(), 4);
    assert_eq!(
        *fo.ops().pauses.borrow(),
        vec![
            Duration::from_millis(100),
            Duration::from_millis(200),
            Duration::from_millis(300)
        ]
    );
}

#[test]
fn lock_released_midway_succeeds() {
    let fo = ops(Scripted {
        busy_for: 2,
        ..Default::default()
    });
    fo.rename_file("a", "b").unwrap();
    assert_eq!(*fo.ops().calls.borrow(), 3);
    assert_eq!(fo.ops().pauses.borrow().len(), 2);
}

#[test]
fn non_transient_error_is_not_retried() {
    let fo = ops(Scripted {
        then: Some(io::ErrorKind::PermissionDenied),
        ..Default::default()
    });
    let err = fo.rename_file("a", "b").unwrap_err();
    assert_eq!(err.kind(), FileOpErrorKind::Unknown);
    assert_eq!(*fo.ops().calls.borrow(), 1);
    assert!(fo.ops().pauses.borrow().is_empty());
}

#[test]
fn not_found_after_lock_is_classified() {
    let fo = ops(Scripted {
        busy_for: 1,
        then: Some(io::ErrorKind::NotFound),
        ..Default::default()
    });
    let err = fo.rename_file("a", "b").unwrap_err();
    assert_eq!(err.kind(), FileOpErrorKind::NotFound);
    assert_eq!(fo.ops().pauses.borrow().len(), 1);
}

#[test]
fn custom_policy_controls_attempts_and_delays() {
    let fo = ops(Scripted {
        busy_for: u32::MAX,
        ..Default::default()
    })
    .with_retry_policy(RetryPolicy {
        max_retries: 1,
        backoff_unit: Duration::from_millis(5),
    });
    let err = fo.rename_file("a", "b").unwrap_err();
    assert_eq!(err.kind(), FileOpErrorKind::TransientLock);
    assert_eq!(*fo.ops().calls.borrow(), 2);
    assert_eq!(*fo.ops().pauses.borrow(), vec![Duration::from_millis(5)]);
}

#[test]
fn no_retry_policy_fails_on_first_lock() {
    let fo = ops(Scripted {
        busy_for: u32::MAX,
        ..Default::default()
    })
    .with_retry_policy(RetryPolicy::none());
    assert!(fo.rename_file("a", "b").is_err());
    assert_eq!(*fo.ops().calls.borrow(), 1);
    assert!(fo.ops().pauses.borrow().is_empty());
}
