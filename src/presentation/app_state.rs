// Application state for HTTP handlers
use crate::application::demo_repository::DemoDataRepository;
use crate::application::poll_service::LiveCharts;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn DemoDataRepository>,
    pub live_charts: HashMap<String, Arc<LiveCharts>>,
}

impl AppState {
    pub fn live_charts(&self, demo: &str) -> Option<Arc<LiveCharts>> {
        self.live_charts.get(demo).cloned()
    }
}
