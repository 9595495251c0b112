#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::tempdir;

use video_timing_core::{DurationProbe, Error, FfprobeProber};

/// Writes an executable shell script standing in for ffprobe.
fn fake_ffprobe(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-ffprobe");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_reads_duration_from_stdout() {
    let tmp = tempdir().unwrap();
    let program = fake_ffprobe(
        tmp.path(),
        "printf '[FORMAT]\\nduration=59.950000\\n[/FORMAT]\\n'",
    );

    let prober = FfprobeProber::new(program, Duration::from_secs(10));
    let duration = prober
        .probe(&tmp.path().join("12_3_20221104_093000.mp4"))
        .unwrap();
    assert_eq!(duration, 59.95);
}

#[test]
fn test_path_with_spaces_is_one_argument() {
    let tmp = tempdir().unwrap();
    // Echo back the argument count; the video path must arrive intact.
    let program = fake_ffprobe(tmp.path(), "echo \"duration=$#\"");

    let video = tmp.path().join("HD Recorder").join("12_3_20221104_093000.mp4");
    let prober = FfprobeProber::new(program, Duration::from_secs(10));
    assert_eq!(prober.probe(&video).unwrap(), 5.0);
}

#[test]
fn test_non_zero_exit_is_probe_error() {
    let tmp = tempdir().unwrap();
    let program = fake_ffprobe(
        tmp.path(),
        "echo 'Invalid data found when processing input' >&2\nexit 1",
    );

    let prober = FfprobeProber::new(program, Duration::from_secs(10));
    match prober.probe(&tmp.path().join("broken.mp4")).unwrap_err() {
        Error::Probe { file, reason } => {
            assert_eq!(file, "broken.mp4");
            assert!(reason.contains("Invalid data found"));
        }
        other => panic!("expected Probe error, got {:?}", other),
    }
}

#[test]
fn test_hung_probe_is_killed() {
    let tmp = tempdir().unwrap();
    let program = fake_ffprobe(tmp.path(), "exec sleep 30");

    let prober = FfprobeProber::new(program, Duration::from_millis(200));
    let started = Instant::now();
    let err = prober.probe(&tmp.path().join("slow.mp4")).unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(10));
    match err {
        Error::Probe { reason, .. } => assert!(reason.contains("timed out")),
        other => panic!("expected Probe error, got {:?}", other),
    }
}

#[test]
fn test_large_stderr_does_not_stall_the_child() {
    let tmp = tempdir().unwrap();
    // Far more than a pipe buffer holds, then a real ffprobe-style complaint.
    let program = fake_ffprobe(
        tmp.path(),
        "head -c 200000 /dev/zero | tr '\\0' x >&2\n\
         echo >&2\n\
         echo 'moov atom not found' >&2\n\
         exit 1",
    );

    let prober = FfprobeProber::new(program, Duration::from_secs(20));
    let started = Instant::now();
    let err = prober.probe(&tmp.path().join("corrupt.mp4")).unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(15));
    match err {
        Error::Probe { file, reason } => {
            assert_eq!(file, "corrupt.mp4");
            assert!(reason.contains("moov atom not found"), "{}", reason);
            assert!(!reason.contains("timed out"));
        }
        other => panic!("expected Probe error, got {:?}", other),
    }
}

#[test]
fn test_large_stdout_is_read_in_full() {
    let tmp = tempdir().unwrap();
    let program = fake_ffprobe(
        tmp.path(),
        "head -c 100000 /dev/zero | tr '\\0' ' '\n\
         echo 'duration=42.5'",
    );

    let prober = FfprobeProber::new(program, Duration::from_secs(20));
    assert_eq!(prober.probe(&tmp.path().join("padded.mp4")).unwrap(), 42.5);
}
