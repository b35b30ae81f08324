use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{EventHandler, EventProducer, Handler, MatchFoundEvent};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub match_found_producer: Vec<EventProducer<MatchFoundEvent>>,
}

pub struct EventHandlers {
    pub on_match_found: Option<EventHandler<MatchFoundEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_match_found = hooks.on_match_found.map(|f| EventHandler::new(buffer_size, f));
        Self { on_match_found }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_match_found {
            result.match_found_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_match_found {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_match_found: Option<Handler<MatchFoundEvent>>,
}

impl EventHooks {
    pub fn on_match_found<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(MatchFoundEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_match_found = Some(Arc::new(f));
        self
    }
}
