//! A live inotify session feeding the event pump

#![cfg(target_os = "linux")]

use anyhow::Result;
use inwatch_core::WatchMask;
use inwatch_watcher::{EventPump, InotifySession, WatchError};
use std::fs;
use tempfile::TempDir;

fn watch(dir: &TempDir, mask: WatchMask) -> Result<InotifySession> {
    let mut session = InotifySession::open()?;
    session.add_watch(dir.path(), mask)?;
    Ok(session)
}

#[test]
fn test_created_and_deleted_files_are_described() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let session = watch(&temp_dir, WatchMask::CREATE | WatchMask::DELETE)?;

    fs::write(temp_dir.path().join("foo.txt"), b"hello")?;
    fs::remove_file(temp_dir.path().join("foo.txt"))?;

    let target = temp_dir.path().display().to_string();
    let mut pump = EventPump::new(session, target, Vec::new());
    let mut written = 0;
    while written < 2 {
        written += pump.pump_once()?;
    }

    let (_, out) = pump.into_parts();
    let text = String::from_utf8(out)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "foo.txt created in watched directory [foo.txt]",
            "foo.txt deleted from watched directory [foo.txt]",
        ]
    );
    Ok(())
}

#[test]
fn test_events_on_the_target_itself_use_its_path() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file = temp_dir.path().join("watched.txt");
    fs::write(&file, b"")?;

    let mut session = InotifySession::open()?;
    session.add_watch(&file, WatchMask::ATTRIB)?;

    let perms = fs::metadata(&file)?.permissions();
    fs::set_permissions(&file, perms)?;

    let target = file.display().to_string();
    let mut pump = EventPump::new(session, target.clone(), Vec::new());
    assert!(pump.pump_once()? >= 1);

    let (_, out) = pump.into_parts();
    let text = String::from_utf8(out)?;
    assert_eq!(
        text.lines().next(),
        Some(format!("{} Metadata changed []", target).as_str())
    );
    Ok(())
}

#[test]
fn test_removing_the_target_reports_self_delete() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path().join("gone");
    fs::create_dir(&dir)?;

    let mut session = InotifySession::open()?;
    session.add_watch(&dir, WatchMask::DELETE_SELF)?;
    fs::remove_dir(&dir)?;

    let target = dir.display().to_string();
    let mut out = Vec::new();
    let mut pump = EventPump::new(session, target.clone(), &mut out);
    pump.pump_once()?;
    drop(pump);

    let text = String::from_utf8(out)?;
    let lines: Vec<&str> = text.lines().collect();
    // The self-delete is followed by the kernel dropping the watch
    assert_eq!(
        lines.first().copied(),
        Some(format!("{} watched file/directory was itself deleted []", target).as_str())
    );
    assert!(lines.iter().all(|line| line.starts_with(target.as_str())));
    Ok(())
}

#[test]
fn test_unreadable_target_surfaces_as_add_watch_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session = InotifySession::open()?;

    let err = session
        .add_watch(&temp_dir.path().join("missing"), WatchMask::all())
        .unwrap_err();
    assert!(matches!(err, WatchError::AddWatch { .. }));
    assert!(err.to_string().starts_with("failed to watch "));
    Ok(())
}
