use gallery_common::ServerConfig;
use log::error;

fn main() {
    gallery_server::init_logging();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = gallery_server::run(config) {
        error!("server stopped: {}", e);
        std::process::exit(1);
    }
}
