use crate::error::Error;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(20);
const STDERR_TAIL_BYTES: usize = 1024;

/// Reports the container duration of a clip, in seconds.
pub trait DurationProbe {
    fn probe(&self, path: &Path) -> Result<f64, Error>;
}

/// Runs `ffprobe -v error -show_entries format=duration <path>` once per call.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    program: PathBuf,
    timeout: Duration,
}

impl FfprobeProber {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn wait_with_deadline(&self, child: &mut Child, file: &str) -> Result<bool, Error> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status.success()),
                Ok(None) if Instant::now() >= deadline => {
                    warn!(
                        "Killing {} after {:.1}s on {}",
                        self.program.display(),
                        self.timeout.as_secs_f64(),
                        file
                    );
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(Error::Probe {
                        file: file.to_string(),
                        reason: format!("timed out after {:.1}s", self.timeout.as_secs_f64()),
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(err) => {
                    return Err(Error::Probe {
                        file: file.to_string(),
                        reason: format!("waiting on {} failed: {}", self.program.display(), err),
                    })
                }
            }
        }
    }
}

impl DurationProbe for FfprobeProber {
    fn probe(&self, path: &Path) -> Result<f64, Error> {
        let file = display_name(path);

        let mut child = Command::new(&self.program)
            .args(["-v", "error", "-show_entries", "format=duration"])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| Error::Probe {
                file: file.clone(),
                reason: format!("could not start {}: {}", self.program.display(), err),
            })?;

        // Drain both pipes while polling so a chatty child cannot block on write.
        let stdout_reader = child.stdout.take().map(drain);
        let stderr_reader = child.stderr.take().map(drain);

        let success = self.wait_with_deadline(&mut child, &file)?;

        let stdout = collect(stdout_reader, &file)?;
        let stderr = collect(stderr_reader, &file)?;

        if !success {
            return Err(Error::Probe {
                file,
                reason: format!(
                    "{} exited with an error: {}",
                    self.program.display(),
                    stderr_tail(&stderr)
                ),
            });
        }

        let duration = parse_probe_output(&file, &stdout)?;
        debug!("{}: probed duration {}s", file, duration);
        Ok(duration)
    }
}

/// Drops every character that is not an ASCII digit or '.', then parses
/// what is left. `[FORMAT]\nduration=59.950000\n[/FORMAT]` gives 59.95.
pub fn parse_probe_output(file: &str, raw: &str) -> Result<f64, Error> {
    let numeric: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if numeric.is_empty() {
        return Err(Error::Probe {
            file: file.to_string(),
            reason: format!("no duration in probe output {:?}", raw.trim()),
        });
    }

    numeric.parse::<f64>().map_err(|err| Error::Probe {
        file: file.to_string(),
        reason: format!("could not parse '{}' as seconds: {}", numeric, err),
    })
}

/// Last part of stderr, enough to show ffprobe's final complaint.
fn stderr_tail(stderr: &str) -> &str {
    let trimmed = stderr.trim();
    if trimmed.len() <= STDERR_TAIL_BYTES {
        return trimmed;
    }
    let mut start = trimmed.len() - STDERR_TAIL_BYTES;
    while !trimmed.is_char_boundary(start) {
        start += 1;
    }
    &trimmed[start..]
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn collect(reader: Option<JoinHandle<io::Result<Vec<u8>>>>, file: &str) -> Result<String, Error> {
    let Some(handle) = reader else {
        return Ok(String::new());
    };
    let bytes = handle
        .join()
        .map_err(|_| Error::Probe {
            file: file.to_string(),
            reason: "output reader thread panicked".to_string(),
        })?
        .map_err(|err| Error::Probe {
            file: file.to_string(),
            reason: format!("reading probe output failed: {}", err),
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
