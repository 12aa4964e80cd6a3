use crate::mcp::server::ReviewToolsServer;
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto::Builder,
    service::TowerToHyperService,
};
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use std::future::Future;
use tokio::net::TcpListener;

/// Serve the tools over streamable HTTP on `host:port` until Ctrl-C.
pub async fn run_server(server: ReviewToolsServer, host: &str, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind((host, port)).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    serve(listener, server, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// Accept connections on `listener`, one task per connection, until
/// `shutdown` resolves. Connections already accepted keep running.
pub async fn serve(
    listener: TcpListener,
    server: ReviewToolsServer,
    shutdown: impl Future<Output = ()>,
) -> std::io::Result<()> {
    let service = TowerToHyperService::new(StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    ));

    tokio::pin!(shutdown);

    loop {
        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => accepted?,
            _ = &mut shutdown => {
                log::info!("Shutting down HTTP server");
                return Ok(());
            }
        };

        log::debug!("Accepted connection from {}", peer);
        let io = TokioIo::new(stream);
        let service = service.clone();

        tokio::spawn(async move {
            if let Err(err) = Builder::new(TokioExecutor::default())
                .serve_connection(io, service)
                .await
            {
                log::error!("Error serving connection from {}: {:?}", peer, err);
            }
        });
    }
}
