use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// How the batch reacts to a file that cannot be processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Abort on the first failing file, write nothing.
    #[default]
    FailFast,
    /// Log and mark the failing file, keep going, fail at the end.
    SkipInvalid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub video_path: String,
    pub output_path: String,
    pub ffprobe_path: String,
    pub probe_timeout_secs: u64,
    pub ignore_patterns: Vec<String>,
    pub batch_policy: BatchPolicy,
}

impl AppConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub video_path: Option<String>,
    pub output_path: Option<String>,
    pub ffprobe_path: Option<String>,
    pub probe_timeout_secs: Option<u64>,
    pub keep_going: bool,
}

pub fn load_configuration(overrides: &ConfigOverrides) -> Result<AppConfig, ConfigError> {
    build(
        ConfigFile::with_name("Config").required(false),
        overrides,
    )
}

/// Same layering as [`load_configuration`], but reads an explicit file.
pub fn load_configuration_from(
    path: &Path,
    overrides: &ConfigOverrides,
) -> Result<AppConfig, ConfigError> {
    build(ConfigFile::from(path), overrides)
}

fn build<S>(file_source: S, overrides: &ConfigOverrides) -> Result<AppConfig, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let mut builder = Config::builder()
        .set_default("ffprobe_path", "ffprobe")?
        .set_default("probe_timeout_secs", 30)?
        .set_default("ignore_patterns", Vec::<String>::new())?
        .set_default("batch_policy", "fail_fast")?
        .add_source(file_source)
        .add_source(
            Environment::with_prefix("VIDEO_TIMING")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("ignore_patterns"),
        )
        .set_override_option("video_path", overrides.video_path.clone())?
        .set_override_option("output_path", overrides.output_path.clone())?
        .set_override_option("ffprobe_path", overrides.ffprobe_path.clone())?
        .set_override_option("probe_timeout_secs", overrides.probe_timeout_secs)?;

    if overrides.keep_going {
        builder = builder.set_override("batch_policy", "skip_invalid")?;
    }

    let config = builder.build()?.try_deserialize::<AppConfig>()?;
    if config.probe_timeout_secs == 0 {
        return Err(ConfigError::Message(
            "probe_timeout_secs must be at least 1".to_string(),
        ));
    }
    Ok(config)
}
