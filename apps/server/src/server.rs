use std::sync::Arc;
use std::thread;

use gallery_common::{GalleryError, ServerConfig};
use log::{debug, info, warn};
use tiny_http::{Request, Server};

use crate::responses::into_http;
use crate::routes::handle;

/// 多个工作线程共享同一个监听器，请求之间没有共享的可变状态
pub struct GalleryServer {
    server: Arc<Server>,
    config: Arc<ServerConfig>,
}

impl GalleryServer {
    pub fn bind(config: ServerConfig) -> Result<Self, GalleryError> {
        let addr = config.listen_addr();
        let server = Server::http(&addr)
            .map_err(|e| GalleryError::Http(format!("cannot listen on {}: {}", addr, e)))?;
        info!(
            "serving {} on http://{} ({} workers, CORS origin {})",
            config.image_root.display(),
            addr,
            config.workers,
            config.cors_origin
        );
        Ok(Self {
            server: Arc::new(server),
            config: Arc::new(config),
        })
    }

    /// 阻塞直到所有工作线程退出
    pub fn serve(&self) {
        let workers: Vec<_> = (0..self.config.workers.max(1))
            .map(|id| {
                let server = Arc::clone(&self.server);
                let config = Arc::clone(&self.config);
                thread::spawn(move || worker_loop(id, &server, &config))
            })
            .collect();

        for worker in workers {
            if worker.join().is_err() {
                warn!("worker thread panicked");
            }
        }
    }
}

fn worker_loop(id: usize, server: &Server, config: &ServerConfig) {
    loop {
        match server.recv() {
            Ok(request) => respond(request, config),
            Err(e) => {
                debug!("worker {} stopping: {}", id, e);
                break;
            }
        }
    }
}

fn respond(request: Request, config: &ServerConfig) {
    let method = request.method().clone();
    let url = request.url().to_string();
    let response = handle(config, &method, &url);
    info!("{} {} -> {}", method, url, response.status);

    if let Err(e) = request.respond(into_http(response, &config.cors_origin)) {
        warn!("failed to send response for {}: {}", url, e);
    }
}

pub fn run(config: ServerConfig) -> Result<(), GalleryError> {
    GalleryServer::bind(config)?.serve();
    Ok(())
}
