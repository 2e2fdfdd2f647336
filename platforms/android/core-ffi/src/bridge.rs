use anyhow::Context;
use greet_core::BindingConfig;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// 安装成功时记下生效的级别
static LOGGING: OnceCell<Option<String>> = OnceCell::new();

// 壳侧传入的初始化 JSON，所有字段可省略
#[derive(Deserialize, Default)]
struct InitConfigDto {
	#[serde(default)]
	class_name: Option<String>,
	#[serde(default)]
	log_level: Option<String>,
}

pub fn parse_cfg(s: &str) -> anyhow::Result<BindingConfig> {
	let dto: InitConfigDto = if s.trim().is_empty() {
		InitConfigDto::default()
	} else {
		serde_json::from_str(s).context("invalid init json")?
	};

	let def = BindingConfig::default();
	let cfg = BindingConfig {
		class_name: dto.class_name.unwrap_or(def.class_name),
		log_level: dto.log_level.unwrap_or(def.log_level),
	};
	cfg.validate()?;
	Ok(cfg)
}

/// 进程内只装一次 subscriber。返回 `level` 是否为当前生效的级别：
/// 宿主已经装过别的 subscriber，或者先前已用其他级别安装过，都返回 false。
/// RUST_LOG 优先于配置里的 log_level。
pub fn init_logging(level: &str) -> bool {
	let installed = LOGGING.get_or_init(|| {
		let filter = EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| EnvFilter::new(format!("greet_ffi={level},greet_core={level}")));

		tracing_subscriber::registry()
			.with(filter)
			.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
			.try_init()
			.ok()
			.map(|_| level.to_string())
	});
	installed.as_deref() == Some(level)
}
