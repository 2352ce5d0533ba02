use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::web;
use actix_web::App;
use actix_web::HttpServer;
use actix_web_lab::middleware::from_fn;
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::authentication::reject_unauthorized;
use crate::authentication::AdminGate;
use crate::configuration::Settings;
use crate::routes::admin_dashboard;
use crate::routes::admin_login;
use crate::routes::delete_motivation;
use crate::routes::health_check;
use crate::routes::home;
use crate::routes::json_error_handler;
use crate::routes::list_motivations;
use crate::routes::list_subscribers;
use crate::routes::motivation_stats;
use crate::routes::query_error_handler;
use crate::routes::random_motivation;
use crate::routes::submit_motivation;
use crate::routes::subscribe;
use crate::routes::unsubscribe;
use crate::routes::update_motivation;
use crate::store::get_public_store;
use crate::store::get_service_store;
use crate::store::PublicStore;

/// Wrapper for actix's `Server` with access to the bound port. Not to be
/// confused with actix's `App`!
pub struct Application {
    /// Left private; use `get_port` to access
    port: u16,
    server: Server,
}

impl Application {
    /// Bind the listener, set up both db handles (lazily; nothing connects
    /// until the first query), and build the `Server`
    pub async fn build(cfg: Settings) -> Result<Self, anyhow::Error> {
        // env-dependent host; port 0 lets the OS pick (used by tests)
        let addr = format!("{}:{}", cfg.application.host, cfg.application.port);
        let listener = TcpListener::bind(&addr).with_context(|| format!("Failed to bind {addr}"))?;
        let port = listener.local_addr()?.port();

        let public_store = get_public_store(&cfg.database);
        let gate = AdminGate::new(
            &cfg.application.admin_secret,
            get_service_store(&cfg.database),
        )?;

        let server = run(listener, public_store, gate)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 { self.port }

    /// Because this consumes `self`, this should be the final function call (or
    /// passed to `tokio::spawn`)
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> { self.server.await }
}

/// The server is not responsible for binding to an address, it only listens to
/// an already bound address.
///
/// Declares all API endpoints. Note that `ServiceStore` is not registered as
/// app data; it lives inside `AdminGate`, and only `reject_unauthorized` takes
/// it out.
pub fn run(
    listener: TcpListener,
    public_store: PublicStore,
    gate: AdminGate,
) -> Result<Server, anyhow::Error> {
    // `Data` is externally an `Arc` (for sharing/cloning)
    let public_store = web::Data::new(public_store);
    let gate = web::Data::new(gate);

    // one `App` per worker, hence the closure and the clones
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(
                // `curl -d` sends form content type; parse the body regardless
                web::JsonConfig::default()
                    .content_type_required(false)
                    .error_handler(json_error_handler),
            )
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .route("/", web::get().to(home))
            .route("/admin", web::get().to(admin_dashboard))
            .route("/health_check", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .route("/motivations", web::get().to(random_motivation))
                    .route("/motivations", web::post().to(submit_motivation))
                    .route("/subscribe", web::post().to(subscribe))
                    .route("/unsubscribe", web::get().to(unsubscribe))
                    // must come before the guarded scope, which would
                    // otherwise swallow it
                    .route("/admin/auth", web::post().to(admin_login))
                    .service(
                        web::scope("/admin")
                            .wrap(from_fn(reject_unauthorized))
                            .route("/motivations", web::get().to(list_motivations))
                            .route("/motivations", web::patch().to(update_motivation))
                            .route("/motivations", web::delete().to(delete_motivation))
                            .route("/stats", web::get().to(motivation_stats))
                            .route("/subscribers", web::get().to(list_subscribers)),
                    ),
            )
            .app_data(public_store.clone())
            .app_data(gate.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
