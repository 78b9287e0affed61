// ============================================================================
// src/cmd/base.rs – Plugin process runner (no shell, bounded execution time)
// ============================================================================

use anyhow::{anyhow, Context, Result};
use std::env;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

/// Resolved external program plus the time it is allowed to run.
#[derive(Clone, Debug)]
pub struct Cmd {
    path: PathBuf,
    timeout: Duration,
}

#[derive(Debug)]
pub struct OutputData {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl Cmd {
    /// Use `explicit` when given, otherwise search `PATH` for `program`.
    /// Returns `None` when nothing executable is found.
    pub fn locate(program: &str, explicit: Option<&Path>, timeout: Duration) -> Option<Self> {
        let found = match explicit {
            Some(p) => p.is_file().then(|| p.to_path_buf()),
            None => env::var_os("PATH").and_then(|paths| {
                env::split_paths(&paths)
                    .map(|dir| dir.join(program))
                    .find(|candidate| candidate.is_file())
            }),
        }?;
        let path = std::fs::canonicalize(&found).unwrap_or(found);
        debug!(program, path = %path.display(), "located");
        Some(Self { path, timeout })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run(&self, args: &[&str], stdin_bytes: Option<&[u8]>) -> Result<OutputData> {
        let mut child = Command::new(&self.path)
            .args(args)
            .stdin(if stdin_bytes.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawn {} failed", self.path.display()))?;

        // Both pipes are drained while the child runs; a full pipe would
        // otherwise stall it until the timeout.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        if let Some(bytes) = stdin_bytes {
            // Dropping the handle closes the pipe so the child sees EOF.
            if let Some(mut sin) = child.stdin.take() {
                if let Err(e) = sin.write_all(bytes) {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(e).context("writing stdin");
                }
            }
        }

        let status = self.wait_with_timeout(&mut child)?;
        Ok(OutputData {
            status,
            stdout: collect(stdout).context("reading stdout")?,
            stderr: collect(stderr).context("reading stderr")?,
        })
    }

    fn wait_with_timeout(&self, child: &mut Child) -> Result<i32> {
        let start = Instant::now();
        loop {
            if let Some(status) = child.try_wait().context("try_wait")? {
                return Ok(status.code().unwrap_or(-1));
            }
            if start.elapsed() > self.timeout {
                // Best effort terminate, then kill. Readers are left detached.
                #[cfg(unix)]
                {
                    use nix::sys::signal::{kill, Signal::SIGTERM};
                    use nix::unistd::Pid;
                    let _ = kill(Pid::from_raw(child.id() as i32), SIGTERM);
                }
                thread::sleep(Duration::from_millis(200));
                let _ = child.kill();
                let _ = child.wait();
                return Err(anyhow!(
                    "{} timed out after {:?}",
                    self.path.display(),
                    self.timeout
                ));
            }
            thread::sleep(Duration::from_millis(30));
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn collect(reader: JoinHandle<io::Result<Vec<u8>>>) -> Result<String> {
    let bytes = reader
        .join()
        .map_err(|_| anyhow!("output reader panicked"))??;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
