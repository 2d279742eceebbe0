use std::sync::Arc;

use crate::services::store::PurchaseStore;
use crate::services::telegram::TelegramBot;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PurchaseStore>,
    pub bot: Option<Arc<TelegramBot>>,
}

impl AppState {
    pub fn new(store: Arc<dyn PurchaseStore>, bot: Option<TelegramBot>) -> Self {
        Self {
            store,
            bot: bot.map(Arc::new),
        }
    }
}
