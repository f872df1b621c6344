use chrono::Local;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

pub const APP_CODE: &str = "multisig-vault";
pub const DEFAULT_LOG_LEVEL: &str = "info";

static INSTANCE_ID: once_cell::sync::Lazy<std::sync::RwLock<Option<String>>> =
    once_cell::sync::Lazy::new(|| std::sync::RwLock::new(None));

pub fn set_instance_id(id: &str) {
    if let Ok(mut lock) = INSTANCE_ID.write() {
        *lock = Some(id.to_string());
    }
}

pub fn get_instance_id() -> String {
    INSTANCE_ID
        .read()
        .ok()
        .and_then(|lock| lock.clone())
        .unwrap_or_else(|| "local".to_string())
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Safe to call from every test; only the first call installs the subscriber.
pub fn init_test_log() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_LOG_LEVEL))
        .with_test_writer()
        .try_init();
}

pub fn init_log(level: Option<&str>) -> Result<(), crate::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level.unwrap_or(DEFAULT_LOG_LEVEL)))
        .with_target(true)
        .with_level(true)
        .event_format(CustomEventFormat)
        .try_init()
        .map_err(|e| crate::Error::Other(format!("init log: {e}")))
}

// time appcode level os target instance fields
struct CustomEventFormat;

impl<S, N> FormatEvent<S, N> for CustomEventFormat
where
    S: tracing::Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        write!(writer, "{} ", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        write!(writer, "{} ", APP_CODE)?;
        write!(writer, "{} ", meta.level())?;
        write!(writer, "{} ", crate::system_info::get_os_info())?;
        write!(writer, "{} ", meta.target())?;
        write!(writer, "{} ", get_instance_id())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use tracing::info;

    use crate::init_test_log;

    #[test]
    fn test_init_test_log_twice() {
        init_test_log();
        init_test_log();
        info!(vault = "5Grw", "poll cycle finished");
    }

    #[test]
    fn test_instance_id() {
        super::set_instance_id("node-1");
        assert_eq!(super::get_instance_id(), "node-1");
    }
}
