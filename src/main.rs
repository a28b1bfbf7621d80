use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod routing;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load_from("config")?;

    // The single positional startup argument is the greeting sender
    // name; config supplies the fallback.
    let greeting_name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| cfg.greeting.name.clone());

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg, greeting_name))
}

async fn async_main(
    cfg: config::Config,
    greeting_name: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;
    let state = Arc::new(config::AppState::new(&cfg, greeting_name));
    let shutdown = server::install_shutdown_handler();

    logger::log_server_start(&addr, &cfg, &state.greeting_name);

    run_accept_loop(listener, state, &shutdown).await;
    Ok(())
}

/// Accept connections until a shutdown signal arrives.
///
/// Connections already accepted keep running in their spawned tasks;
/// only the accept loop stops.
async fn run_accept_loop(
    listener: tokio::net::TcpListener,
    state: Arc<config::AppState>,
    shutdown: &Arc<tokio::sync::Notify>,
) {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        server::connection::accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &active_connections,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown();
                break;
            }
        }
    }
}
