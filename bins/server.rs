use dotenvy::dotenv;
use tracing::{error, info};

fn init_logging() {
    // Load .env early so RUST_LOG and friends take effect.
    dotenv().ok();
    common::utils::logging::init_logging_default();
    info!(service = "concert-catalog", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();

    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // Panic hook so unhandled panics end up in the structured log.
    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "concert-catalog",
            event = "panic",
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    // Thread count comes from config.toml when present, env var otherwise.
    let worker_threads = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg.server.worker_threads,
        Err(_) => std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok()),
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "concert-catalog", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "concert-catalog",
        event = "start",
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "concert catalog service starting"
    );

    rt.block_on(async move {
        let server_task = tokio::spawn(async move {
            if let Err(e) = server::run().await {
                error!(service = "concert-catalog", event = "run_failed", error = %e, "server::run returned error");
                Err(e)
            } else {
                Ok(())
            }
        });

        tokio::select! {
            res = server_task => {
                match res {
                    Ok(Ok(())) => {
                        info!(service = "concert-catalog", event = "stop", pid, "server stopped normally");
                        std::process::ExitCode::SUCCESS
                    }
                    Ok(Err(_)) => std::process::ExitCode::FAILURE,
                    Err(e) => {
                        error!(service = "concert-catalog", event = "task_join_error", error = %e, "server task join error");
                        std::process::ExitCode::FAILURE
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!(service = "concert-catalog", event = "shutdown_signal", pid, "received Ctrl+C, shutting down");
                std::process::ExitCode::SUCCESS
            }
        }
    })
}
