mod appointment;
mod auth;
mod doctor;
mod error;
mod metrics;
mod shared;
mod status;
mod user;

use actix_cors::Cors;
use actix_web::{
    dev::{Server, Service},
    middleware, web, App, HttpServer,
};
use docbook_infra::DocbookContext;
use error::DocbookError;
use metrics::HttpMetrics;
use std::{net::TcpListener, time::Instant};
use tracing::info;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    appointment::configure_routes(cfg);
    auth::configure_routes(cfg);
    doctor::configure_routes(cfg);
    status::configure_routes(cfg);
    user::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: DocbookContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context).await?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(context: DocbookContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        info!("Listening on port: {}", port);

        let metrics_enabled = context.config.metrics_enabled;
        let http_metrics = web::Data::new(HttpMetrics::new());

        let server = HttpServer::new(move || {
            let ctx = context.clone();
            let recorder = http_metrics.clone();
            // Malformed bodies are client errors with a readable message
            let json_config = web::JsonConfig::default().error_handler(|err, _req| {
                DocbookError::BadClientData(err.to_string()).into()
            });

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .wrap_fn(move |req, srv| {
                    let started = Instant::now();
                    let recorder = recorder.clone();
                    let res = srv.call(req);
                    async move {
                        let res = res.await;
                        let status = match &res {
                            Ok(res) => res.status(),
                            Err(e) => e.as_response_error().status_code(),
                        };
                        recorder.record(status, started.elapsed());
                        res
                    }
                })
                .app_data(web::Data::new(ctx))
                .app_data(http_metrics.clone())
                .app_data(json_config)
                .service(web::scope("/api/v1").configure(configure_server_api))
                .configure(|cfg| {
                    if metrics_enabled {
                        metrics::configure_routes(cfg);
                    }
                })
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
