//! Minimal HTTP/1.1 server standing in for the extension update endpoint.
//!
//! A request whose query mentions a known extension id is redirected to
//! `/files/<id>.crx`, which serves the registered body. Unknown ids get
//! `204 No Content`, like the real store.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

/// Starts a server in a background thread. Returns the update endpoint URL
/// (e.g. "http://127.0.0.1:12345/service/update2/crx?response=redirect").
/// The server runs until the process exits.
pub fn start(files: HashMap<String, Vec<u8>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let files = Arc::new(files);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let files = Arc::clone(&files);
            thread::spawn(move || handle(stream, &files));
        }
    });
    format!(
        "http://127.0.0.1:{}/service/update2/crx?response=redirect",
        port
    )
}

fn handle(mut stream: std::net::TcpStream, files: &HashMap<String, Vec<u8>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");

    if let Some(name) = target.strip_prefix("/files/") {
        let id = name.trim_end_matches(".crx");
        match files.get(id) {
            Some(body) => respond(&mut stream, "200 OK", "", body),
            None => respond(&mut stream, "404 Not Found", "", b""),
        }
        return;
    }

    match files.keys().find(|id| target.contains(id.as_str())) {
        Some(id) => {
            let location = format!("Location: /files/{}.crx\r\n", id);
            respond(&mut stream, "302 Found", &location, b"");
        }
        None => respond(&mut stream, "204 No Content", "", b""),
    }
}

fn respond(stream: &mut std::net::TcpStream, status: &str, extra_headers: &str, body: &[u8]) {
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n",
        status,
        body.len(),
        extra_headers
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}
