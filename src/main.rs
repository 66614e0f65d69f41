use std::process::ExitCode;

mod browser;
mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> ExitCode {
    let cfg = match config::Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            logger::log_error(&format!("Failed to load configuration: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = match runtime_builder.build() {
        Ok(runtime) => runtime,
        Err(e) => {
            logger::log_error(&format!("Failed to build runtime: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let port = cfg.server.port;
    match runtime.block_on(server::run(cfg)) {
        Ok(()) => {
            logger::log_shutdown();
            ExitCode::SUCCESS
        }
        Err(e) if server::listener::is_addr_in_use(&e) => {
            logger::log_port_in_use(port);
            ExitCode::FAILURE
        }
        Err(e) => {
            logger::log_error(&format!("Server error: {e}"));
            ExitCode::FAILURE
        }
    }
}
