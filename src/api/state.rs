use std::sync::Arc;

use crate::auth::TokenValidator;
use crate::domain::repositories::DrinkRepository;

/// Application context shared by every request
///
/// Built once at startup and handed to the router; holds the store handle
/// and the token validator.
#[derive(Clone)]
pub struct AppState {
    pub drinks: Arc<dyn DrinkRepository>,
    pub validator: Arc<TokenValidator>,
}

impl AppState {
    pub fn new(drinks: Arc<dyn DrinkRepository>, validator: Arc<TokenValidator>) -> Self {
        Self { drinks, validator }
    }
}
