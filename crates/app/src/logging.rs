use fibscope_core::config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// 日志文件名前缀，按天滚动追加日期后缀。
const LOG_FILE_PREFIX: &str = "fibscope.log";

/// # Summary
/// 初始化全局日志订阅者。
///
/// # Logic
/// 1. `RUST_LOG` 存在时优先，否则使用配置中的级别。
/// 2. 控制台输出写到 stderr，stdout 只留给结果。
/// 3. 配置了 `log.dir` 时追加一个按天滚动的文件输出 (无 ANSI 颜色)。
///
/// # Returns
/// 文件输出的 guard，需持有到进程退出以保证日志落盘。
pub fn init_logging(config: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;
    let console = fmt::layer().with_writer(std::io::stderr);

    match &config.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .try_init()?;
            Ok(None)
        }
    }
}
