use std::sync::Arc;

use dishlens_core::application::DishLensService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: DishLensService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: DishLensService) -> Self {
        Self { args, service }
    }

    pub fn root_path(&self) -> String {
        self.args.server.root_path()
    }
}
