//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::application::services::{
    BotTransport, Classifier, Dispatcher, FallbackShortener, NotificationService, TaskQueue,
};
use crate::config::Settings;
use crate::infrastructure::clients::{
    BitlyClient, CloudTasksClient, OpenAiClient, ShortIoClient, TelegramClient,
};
use crate::presentation::http::routes;

/// Application state shared across handlers.
///
/// Every handle is constructed once at startup and injected; none of them
/// hold per-request mutable state, so the state is safe to clone into
/// concurrent requests and background tasks.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub bot: Arc<dyn BotTransport>,
    pub classifier: Arc<dyn Classifier>,
    pub notifier: Arc<NotificationService>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Wire the production service graph from settings.
    pub fn from_settings(settings: Settings) -> Self {
        let bot: Arc<dyn BotTransport> = Arc::new(TelegramClient::new(&settings.telegram));
        let classifier: Arc<dyn Classifier> = Arc::new(OpenAiClient::new(&settings.classifier));

        // Provider order is priority order: Short.io first, Bitly as the
        // fallback when the first provider runs out of quota.
        let shortener = FallbackShortener::new(vec![
            Arc::new(ShortIoClient::new(&settings.shortener.shortio)),
            Arc::new(BitlyClient::new(&settings.shortener.bitly)),
        ]);
        let notifier = Arc::new(NotificationService::new(Arc::new(shortener)));

        let queue: Arc<dyn TaskQueue> = Arc::new(CloudTasksClient::new(&settings.tasks));
        let dispatcher = Arc::new(Dispatcher::new(queue, &settings.tasks));

        Self {
            settings: Arc::new(settings),
            bot,
            classifier,
            notifier,
            dispatcher,
        }
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let addr: SocketAddr = settings.server_addr().parse()?;

        let state = AppState::from_settings(settings);
        let router = routes::create_router(state).layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
