use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use skypulse_catalog::{PricingConfig, PricingEngine};
use skypulse_core::app_config::EngineConfig;
use skypulse_offer::{FlightGenerator, MarketSimulator};

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<FlightGenerator>,
    pub market: Arc<MarketSimulator>,
    /// Shared seeded generator; `None` uses the thread-local one
    seeded_rng: Option<Arc<Mutex<StdRng>>>,
}

impl AppState {
    pub fn new(engine: &EngineConfig) -> Self {
        let pricing = PricingEngine::new(PricingConfig::default());
        Self {
            generator: Arc::new(FlightGenerator::new(pricing.clone())),
            market: Arc::new(MarketSimulator::new(pricing)),
            seeded_rng: engine
                .seed
                .map(|seed| Arc::new(Mutex::new(StdRng::seed_from_u64(seed)))),
        }
    }

    /// Run `f` with this state's random source.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
        match &self.seeded_rng {
            Some(shared) => {
                let mut rng = shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                f(&mut *rng)
            }
            None => f(&mut rand::thread_rng()),
        }
    }
}
