use config::{Config, ConfigError, Environment, File};
use fibscope_core::config::AppConfig;
use std::path::Path;

/// 未指定 `--config` 时尝试读取的文件 (不存在则跳过)。
pub const DEFAULT_CONFIG_FILE: &str = "fibscope.toml";

/// 环境变量前缀，层级分隔符为 `__`，例如 `FIBSCOPE__MARKET__TICKER`。
pub const ENV_PREFIX: &str = "FIBSCOPE";

/// # Summary
/// 按层加载应用配置。
///
/// # Logic
/// 1. 内置默认值 (`AppConfig` 各字段的 `serde(default)`)。
/// 2. 配置文件：显式给出的路径必须存在，默认文件可缺省。
/// 3. `FIBSCOPE__*` 环境变量。
///
/// 命令行参数在此之后由 `Cli::apply` 覆盖。
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    build_config(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("indicator.ema_spans")
}

fn build_config(path: Option<&Path>, env: Environment) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?
        .try_deserialize()
}
