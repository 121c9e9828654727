//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::{
    io::{BufRead, BufReader, Cursor, Write},
    net::{TcpListener, TcpStream},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use image::{ImageFormat, Rgb, RgbImage};

use umlgen::job::DiagramJob;

/// A one-thread HTTP responder on 127.0.0.1 answering every request with the
/// same status and body.
pub struct MockEndpoint {
    base_url: String,
    requests: Arc<AtomicUsize>,
}

impl MockEndpoint {
    pub fn start(status: u16, body: Vec<u8>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock endpoint");
        let addr = listener.local_addr().expect("mock endpoint address");
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                if read_request_head(&stream) {
                    counter.fetch_add(1, Ordering::SeqCst);
                    respond(stream, status, &body);
                }
            }
        });

        Self {
            base_url: format!("http://{addr}/plantuml/img/"),
            requests,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

/// Consumes the request line and headers. Returns false on a dropped connection.
fn read_request_head(stream: &TcpStream) -> bool {
    let Ok(clone) = stream.try_clone() else {
        return false;
    };
    let mut reader = BufReader::new(clone);
    let mut saw_request_line = false;
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => return false,
            Ok(_) if line == "\r\n" || line == "\n" => return saw_request_line,
            Ok(_) => saw_request_line = true,
        }
    }
}

fn respond(mut stream: TcpStream, status: u16, body: &[u8]) {
    let reason = if status == 200 { "OK" } else { "Error" };
    let head = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}

/// A base URL nothing is listening on.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}/plantuml/img/")
}

/// Encodes a small solid-color PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([200, 220, 255]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode PNG");
    bytes
}

/// Eight jobs shaped like the built-in catalog.
pub fn eight_jobs() -> Vec<DiagramJob> {
    [
        "Class Diagram",
        "Sequence Diagram - Interpretation",
        "Sequence Diagram - Execution",
        "Sequence Diagram - Composite",
        "Component Diagram",
        "Use Case Diagram",
        "State Diagram",
        "Activity Diagram",
    ]
    .iter()
    .enumerate()
    .map(|(i, base)| {
        DiagramJob::new(
            format!("diagram-{i}"),
            *base,
            format!("@startuml\nAlice -> Bob : message {i}\n@enduml\n"),
        )
    })
    .collect()
}
