use std::{net::SocketAddr, str::FromStr};

use crate::{
    config::Config,
    error, info,
    server::{self, AppState},
    warning,
};

pub async fn serve(addr: Option<String>, open: bool) {
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    if let Some(addr) = addr {
        config.server_addr = match SocketAddr::from_str(&addr) {
            Ok(addr) => addr,
            Err(e) => error!("Failed to parse server address {}: {}", addr, e),
        };
    }

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => error!("Failed to build HTTP client: {}", e),
    };

    if open {
        let url = format!("http://{}/", state.config.server_addr);
        info!("Opening {}", url);
        if webbrowser::open(&url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                url
            )
        }
    }

    if let Err(e) = server::start_api_server(state).await {
        error!("Server stopped: {}", e);
    }
}
