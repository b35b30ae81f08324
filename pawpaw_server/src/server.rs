use std::{sync::Arc, time::Duration};

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::info;
use pawpaw_engine::{
    events::{EventHandlers, EventHooks, EventProducers},
    ProfileApi,
    SqliteDatabase,
    SwipeFlowApi,
    WalletApi,
};

use crate::{
    auth::TokenVerifier,
    config::ServerConfig,
    errors::ServerError,
    notifier::{match_found_hook, ConnectionRegistry, InMemoryConnectionRegistry},
    routes::{
        health,
        CreateProfileRoute,
        DeleteProfileRoute,
        DiscoveryFeedRoute,
        GetProfileRoute,
        MyGiftsRoute,
        MyMatchesRoute,
        MyWalletRoute,
        RecordSwipeRoute,
        SendGiftRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let registry: Arc<dyn ConnectionRegistry> = Arc::new(InMemoryConnectionRegistry::default());
    run_server_with_registry(config, db, registry).await
}

/// The registry is injected so that a multi-instance-aware pub/sub can stand in for the in-memory
/// implementation without touching any of the match or gift logic.
pub async fn run_server_with_registry(
    config: ServerConfig,
    db: SqliteDatabase,
    registry: Arc<dyn ConnectionRegistry>,
) -> Result<(), ServerError> {
    let mut hooks = EventHooks::default();
    if config.disable_push_notifications {
        info!("📡️ Match push notifications are disabled by configuration");
    } else {
        hooks.on_match_found(match_found_hook(registry));
    }
    let handlers = EventHandlers::new(config.event_buffer_size, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let swipe_api = SwipeFlowApi::new(db.clone(), producers.clone());
        let profile_api = ProfileApi::new(db.clone());
        let wallet_api = WalletApi::new(db.clone());
        let verifier = TokenVerifier::new(&config.auth);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("pawpaw::access_log"))
            .app_data(web::Data::new(swipe_api))
            .app_data(web::Data::new(profile_api))
            .app_data(web::Data::new(wallet_api))
            .app_data(web::Data::new(verifier))
            .service(health)
            .service(CreateProfileRoute::<SqliteDatabase>::new())
            .service(GetProfileRoute::<SqliteDatabase>::new())
            .service(DeleteProfileRoute::<SqliteDatabase>::new())
            .service(DiscoveryFeedRoute::<SqliteDatabase>::new())
            .service(RecordSwipeRoute::<SqliteDatabase>::new())
            .service(MyMatchesRoute::<SqliteDatabase>::new())
            .service(MyWalletRoute::<SqliteDatabase>::new())
            .service(SendGiftRoute::<SqliteDatabase>::new())
            .service(MyGiftsRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}
