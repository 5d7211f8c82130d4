use crate::config::environment::AppConfig;
use crate::module::model_run::schema::{SimulationParameters, SimulationResult};
use crate::service::csv_codec_service::parse_csv;
use crate::service::resample_service::{resample_channels, ChannelSeries};
use async_trait::async_trait;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

const CLASSPATH_ENTRIES: [&str; 6] = [
    "model.jar",
    "lib/*",
    "lib/logging/*",
    "lib/database/*",
    "lib/database/querydsl/*",
    "lib/database/ucanaccess/*",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{0}")]
    ExecutionFailed(String),
    #[error("{0}")]
    ParseFailed(String),
}

impl EngineError {
    pub fn detail(&self) -> &str {
        match self {
            Self::ExecutionFailed(d) | Self::ParseFailed(d) => d,
        }
    }
}

/// What an engine hands back: raw stdout in the CSV contract, or channel
/// series still on the engine's own time axis.
#[derive(Debug, Clone)]
pub enum EngineOutput {
    Csv(Vec<u8>),
    Channels(ChannelSeries),
}

#[async_trait]
pub trait SimulationEngine: Send + Sync + fmt::Debug {
    async fn run(&self, params: &SimulationParameters) -> Result<EngineOutput, EngineError>;
}

/// Runs `engine` once and turns its output into the yearly grid.
pub async fn execute(
    engine: &dyn SimulationEngine,
    params: &SimulationParameters,
) -> Result<Vec<SimulationResult>, EngineError> {
    match engine.run(params).await? {
        EngineOutput::Csv(bytes) => {
            let text = std::str::from_utf8(&bytes)
                .map_err(|e| EngineError::ParseFailed(format!("engine output is not utf-8: {e}")))?;
            Ok(parse_csv(text))
        }
        EngineOutput::Channels(channels) => Ok(resample_channels(&channels, params)),
    }
}

/// Positional arguments of the engine process contract.
pub fn engine_args(params: &SimulationParameters) -> [String; 4] {
    [
        params.scenario.to_string(),
        params.drilling_rate.to_string(),
        format!("{:.2}", params.oil_price),
        format!("{:.2}", params.exchange_rate),
    ]
}

/// Spawns one engine process per run and captures its stdout.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    program: OsString,
    base_args: Vec<OsString>,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl ProcessEngine {
    /// Runs `program` directly with the four positional arguments.
    pub fn command(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
            working_dir: None,
            timeout: None,
        }
    }

    /// `java -cp <model classpath> <main_class>` inside `model_dir`.
    pub fn java(java_bin: &str, model_dir: &Path, main_class: &str) -> Self {
        let mut entries = vec![model_dir.to_path_buf()];
        entries.extend(CLASSPATH_ENTRIES.iter().map(|e| model_dir.join(e)));
        let separator = if cfg!(windows) { ";" } else { ":" };
        let classpath = entries
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(separator);

        Self {
            program: java_bin.into(),
            base_args: vec!["-cp".into(), classpath.into(), main_class.into()],
            working_dir: Some(model_dir.to_path_buf()),
            timeout: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let model_dir = resolve_dir(&config.model_dir);
        let engine = match &config.engine_command {
            Some(program) => Self::command(program).with_working_dir(model_dir),
            None => Self::java(&config.engine_java_bin, &model_dir, &config.engine_main_class),
        };
        let limit = (config.engine_timeout_seconds > 0)
            .then(|| Duration::from_secs(config.engine_timeout_seconds));
        engine.with_timeout(limit)
    }

    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.base_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }
}

#[async_trait]
impl SimulationEngine for ProcessEngine {
    async fn run(&self, params: &SimulationParameters) -> Result<EngineOutput, EngineError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.base_args)
            .args(engine_args(params))
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let child = cmd.output();
        let output = match self.timeout {
            Some(limit) => timeout(limit, child).await.map_err(|_| {
                EngineError::ExecutionFailed(format!("engine timed out after {limit:?}"))
            })?,
            None => child.await,
        }
        .map_err(|e| EngineError::ExecutionFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.trim().is_empty() {
                format!("engine exited with {}", output.status)
            } else {
                stderr.into_owned()
            };
            return Err(EngineError::ExecutionFailed(detail));
        }

        Ok(EngineOutput::Csv(output.stdout))
    }
}

/// In-process engine that replays a fixed response and remembers the
/// parameters it was dispatched with.
#[derive(Debug)]
pub struct CannedEngine {
    response: Result<EngineOutput, EngineError>,
    delay: Option<Duration>,
    calls: Mutex<Vec<SimulationParameters>>,
}

impl CannedEngine {
    pub fn csv(text: impl Into<String>) -> Self {
        Self::with_response(Ok(EngineOutput::Csv(text.into().into_bytes())))
    }

    pub fn raw(bytes: Vec<u8>) -> Self {
        Self::with_response(Ok(EngineOutput::Csv(bytes)))
    }

    pub fn channels(channels: ChannelSeries) -> Self {
        Self::with_response(Ok(EngineOutput::Channels(channels)))
    }

    pub fn failing(detail: impl Into<String>) -> Self {
        Self::with_response(Err(EngineError::ExecutionFailed(detail.into())))
    }

    fn with_response(response: Result<EngineOutput, EngineError>) -> Self {
        Self {
            response,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Holds every run for `delay` before answering, like a slow engine.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<SimulationParameters> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SimulationEngine for CannedEngine {
    async fn run(&self, params: &SimulationParameters) -> Result<EngineOutput, EngineError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(*params);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }
}

fn resolve_dir(config_path: &str) -> PathBuf {
    let path = PathBuf::from(config_path);
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}
