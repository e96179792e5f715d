// WebSocket test utilities

use std::net::TcpListener;

use actix_web::{web, App, HttpServer};
use trivia_server::routes;
use trivia_server::state::app_state::AppState;

/// Start a real HTTP server on a random port with the full route table.
///
/// Returns the server handle (to stop it), the bound address and the join
/// handle of the background task.
pub async fn start_test_server(
    state: AppState,
) -> Result<
    (
        actix_web::dev::ServerHandle,
        std::net::SocketAddr,
        tokio::task::JoinHandle<Result<(), std::io::Error>>,
    ),
    Box<dyn std::error::Error>,
> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let state_data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .configure(routes::configure)
    })
    .workers(1)
    .listen(listener)?
    .run();

    let server_handle = server.handle();
    let join = tokio::spawn(server);

    Ok((server_handle, addr, join))
}
