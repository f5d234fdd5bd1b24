use scrabble::dawg;
use server::{filters, session::Sessions};
use std::{env, net::SocketAddr, process, sync::Arc};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let dawg_path = env::var("DAWG_PATH").unwrap_or_else(|_| "dawg.bin".into());
    let bytes = std::fs::read(&dawg_path).unwrap_or_else(|e| {
        log::error!("failed to read dictionary at {dawg_path}: {e}");
        process::exit(1);
    });
    let dawg = dawg::load(&bytes).unwrap_or_else(|e| {
        log::error!("failed to decode dictionary: {e}");
        process::exit(1);
    });
    log::info!("loaded dictionary: {} nodes", dawg.node_count());

    let sessions = Sessions::new(Arc::new(dawg));

    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3030".into())
        .parse()
        .expect("BIND_ADDR must be a valid socket address");

    let routes = filters::all(sessions).recover(filters::handle_rejection);

    log::info!("listening on {addr}");
    warp::serve(routes).run(addr).await;
}
