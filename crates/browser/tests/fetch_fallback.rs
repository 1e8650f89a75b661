//! 拉取目录树的集成测试，用一次性的本地 TCP 服务模拟后端。
//!
//!   cargo test -p gallery-browser --test fetch_fallback

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use gallery_browser::{fetch_folder_structure, try_fetch_folder_structure};

/// 接受一个连接并返回固定响应，返回服务地址
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{}", addr)
}

/// 绑定后立即释放的端口，连接会被拒绝
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[tokio::test]
async fn decodes_tree_and_server_time() {
    let base = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"folders":[{"name":"2023","path":"2023","lastModified":100,"content":{"folders":[],"images":[{"name":"a.png","path":"2023/a.png","lastModified":200,"size":10}]}}],"images":[],"serverTime":"2024-06-01T00:00:00Z"}"#,
    );

    let structure = try_fetch_folder_structure(&format!("{}/", base)).await.unwrap();
    assert_eq!(structure.server_time.as_deref(), Some("2024-06-01T00:00:00Z"));
    assert_eq!(structure.tree.folders[0].content.images[0].size, 10);
}

#[tokio::test]
async fn unreachable_server_yields_empty_tree() {
    let tree = fetch_folder_structure(&closed_port_url()).await;
    assert!(tree.is_empty());
}

#[tokio::test]
async fn server_error_yields_empty_tree() {
    let base = serve_once(
        "HTTP/1.1 500 Internal Server Error",
        r#"{"error":"Failed to read folder structure","message":"boom"}"#,
    );
    assert!(try_fetch_folder_structure(&base).await.is_err());

    let base = serve_once(
        "HTTP/1.1 500 Internal Server Error",
        r#"{"error":"Failed to read folder structure"}"#,
    );
    assert!(fetch_folder_structure(&base).await.is_empty());
}

#[tokio::test]
async fn malformed_body_yields_empty_tree() {
    let base = serve_once("HTTP/1.1 200 OK", "not json");
    assert!(fetch_folder_structure(&base).await.is_empty());
}
