use std::sync::Arc;

use payment_router::infrastructure::config::settings::Config;
use payment_router::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
		.init();

	let config = Arc::new(Config::load().expect("Failed to load configuration"));

	#[cfg(feature = "perf")]
	let profiler = pprof::ProfilerGuardBuilder::default()
		.frequency(1000)
		.blocklist(&["libc", "libgcc", "pthread", "vdso"])
		.build()
		.map_err(std::io::Error::other)?;

	let result = run(config).await;

	#[cfg(feature = "perf")]
	write_flamegraph(&profiler);

	result
}

#[cfg(feature = "perf")]
fn write_flamegraph(profiler: &pprof::ProfilerGuard<'_>) {
	let written = profiler.report().build().map(|report| {
		std::fs::File::create("flamegraph.svg")
			.map_err(|e| e.to_string())
			.and_then(|file| report.flamegraph(file).map_err(|e| e.to_string()))
	});

	match written {
		Ok(Ok(())) => log::info!("Flamegraph written to flamegraph.svg"),
		Ok(Err(e)) => log::error!("Failed to write flamegraph: {e}"),
		Err(e) => log::error!("Failed to build profiling report: {e}"),
	}
}
