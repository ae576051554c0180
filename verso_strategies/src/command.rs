use std::env;
use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use verso_strategy_api::{
    ProposedCorrection, StrategyError, StrategyResult, SuggestionContext, SuggestionStrategy,
};
use wait_timeout::ChildExt;

/// Environment variable naming the suggestion program for [`CommandStrategy::from_env`].
pub const COMMAND_ENV: &str = "VERSO_SUGGEST_CMD";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const TIMEOUT_ENV: &str = "VERSO_SUGGEST_TIMEOUT_SECS";
const PASSTHROUGH_ENV_PREFIX: &str = "VERSO_SUGGEST_";

/// Strategy backed by an external program, typically a wrapper around an LLM.
///
/// The program receives the [`SuggestionContext`] as JSON on stdin and must
/// print a JSON object with `correction` and `reason` fields on stdout. It
/// runs with a cleared environment apart from `PATH`, `HOME` and any
/// `VERSO_SUGGEST_*` variables.
#[derive(Debug, Clone)]
pub struct CommandStrategy {
    program: OsString,
    args: Vec<OsString>,
    timeout: Duration,
    path: Option<OsString>,
    home: Option<OsString>,
    passthrough: Vec<(OsString, OsString)>,
}

impl CommandStrategy {
    /// Construct a strategy that runs `program` with `args`.
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        let mut passthrough = Vec::new();
        for (key, value) in env::vars_os() {
            if key.to_string_lossy().starts_with(PASSTHROUGH_ENV_PREFIX) {
                passthrough.push((key, value));
            }
        }

        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            path: env::var_os("PATH"),
            home: env::var_os("HOME"),
            passthrough,
        }
    }

    /// Build a strategy from `VERSO_SUGGEST_CMD`, if set and non-empty.
    ///
    /// `VERSO_SUGGEST_TIMEOUT_SECS` overrides the default timeout.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let program = env::var_os(COMMAND_ENV).filter(|value| !value.is_empty())?;
        let mut strategy = Self::new(program, Vec::<OsString>::new());
        if let Some(seconds) = env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
        {
            strategy = strategy.with_timeout(Duration::from_secs(seconds));
        }
        Some(strategy)
    }

    /// Override the per-invocation timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Program invoked for each suggestion.
    #[must_use]
    pub fn program(&self) -> &OsString {
        &self.program
    }

    /// Per-invocation timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn run(&self, stdin_payload: &str) -> StrategyResult<String> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command.stdin(Stdio::piped());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        self.configure_environment(&mut command);

        let mut child = command.spawn().map_err(|err| {
            StrategyError::message(format!("failed to spawn suggestion command: {err}"))
        })?;

        let stdout_handle = child.stdout.take().map(spawn_reader);
        let stderr_handle = child.stderr.take().map(spawn_reader);
        // The deadline must start even if the child never drains its stdin.
        let stdin_handle = child
            .stdin
            .take()
            .map(|stdin| spawn_writer(stdin, stdin_payload.as_bytes().to_vec()));

        match child.wait_timeout(self.timeout) {
            Ok(Some(_)) => (),
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(
                    program = %self.program.to_string_lossy(),
                    timeout_secs = self.timeout.as_secs(),
                    "suggestion command timed out"
                );
                return Err(StrategyError::Timeout {
                    seconds: self.timeout.as_secs(),
                });
            }
            Err(err) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(StrategyError::message(format!(
                    "failed waiting on suggestion command: {err}"
                )));
            }
        }

        let status = child.wait().map_err(|err| {
            StrategyError::message(format!("failed to reap suggestion command: {err}"))
        })?;

        join_writer(stdin_handle)?;
        let stdout = join_reader(stdout_handle, "stdout")?;
        let stderr = join_reader(stderr_handle, "stderr")?;

        if !status.success() {
            let code = status
                .code()
                .map_or_else(|| "terminated".to_string(), |c| c.to_string());
            return Err(StrategyError::message(format!(
                "suggestion command failed with status {}: {}",
                code,
                stderr.trim()
            )));
        }

        Ok(stdout)
    }

    fn configure_environment(&self, command: &mut Command) {
        command.env_clear();
        if let Some(path) = &self.path {
            command.env("PATH", path);
        }
        if let Some(home) = &self.home {
            command.env("HOME", home);
        }
        for (key, value) in &self.passthrough {
            command.env(key, value);
        }
    }
}

impl SuggestionStrategy for CommandStrategy {
    fn id(&self) -> &'static str {
        "command"
    }

    fn label(&self) -> &'static str {
        "External command"
    }

    fn suggest(&self, context: &SuggestionContext) -> StrategyResult<ProposedCorrection> {
        let payload = serde_json::to_string(context).map_err(|err| {
            StrategyError::message(format!("failed to encode suggestion context: {err}"))
        })?;
        let stdout = self.run(&payload)?;
        parse_proposal(&stdout)
    }
}

fn spawn_reader<R>(mut stream: R) -> thread::JoinHandle<io::Result<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer)?;
        Ok(buffer)
    })
}

fn spawn_writer<W>(mut stream: W, payload: Vec<u8>) -> thread::JoinHandle<io::Result<()>>
where
    W: Write + Send + 'static,
{
    thread::spawn(move || -> io::Result<()> {
        match stream.write_all(&payload) {
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            other => other,
        }
    })
}

fn join_writer(handle: Option<thread::JoinHandle<io::Result<()>>>) -> StrategyResult<()> {
    match handle {
        Some(handle) => handle
            .join()
            .map_err(|_| StrategyError::message("failed to join suggestion stdin writer"))?
            .map_err(|err| {
                StrategyError::message(format!(
                    "failed to write to suggestion command stdin: {err}"
                ))
            }),
        None => Ok(()),
    }
}

fn join_reader(
    handle: Option<thread::JoinHandle<io::Result<Vec<u8>>>>,
    stream: &str,
) -> StrategyResult<String> {
    match handle {
        Some(handle) => {
            let bytes = handle
                .join()
                .map_err(|_| {
                    StrategyError::message(format!("failed to join suggestion {stream} reader"))
                })?
                .map_err(|err| {
                    StrategyError::message(format!("failed to read suggestion {stream}: {err}"))
                })?;
            Ok(String::from_utf8_lossy(&bytes).to_string())
        }
        None => Ok(String::new()),
    }
}

fn parse_proposal(stdout: &str) -> StrategyResult<ProposedCorrection> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Err(StrategyError::MalformedOutput {
            message: "empty output".into(),
        });
    }
    serde_json::from_str(trimmed).map_err(|err| StrategyError::MalformedOutput {
        message: err.to_string(),
    })
}
