//! TCP transport: the request-issuing client half and the
//! request-accepting server half.
//!
//! Both sides speak one message per connection. The client writes a
//! serialized request and accumulates response bytes until the peer
//! closes; the server reads once, dispatches through the
//! [`Router`](crate::Router), writes the response, and closes.
//!
//! Framing is deliberately single-read on the server side: the bytes
//! returned by the first `read()` are treated as the complete request.
//! Requests whose headers or body span multiple reads are not supported;
//! this is a protocol limitation that handlers and tests rely on, not an
//! implementation shortcut.

use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{HttpotError, Result};
use crate::protocol::{HEADER_END, RequestHeader, ResponseHeader};
use crate::router::{Router, RouterResponse};
use crate::server::ServerConfig;

/// Idle timeout applied when the caller does not supply one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Upper bound on a single server-side read. Anything beyond this cannot
/// be part of the request under single-read framing anyway.
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Issue one request over a fresh TCP connection.
///
/// Connects to `host:port`, writes `request` once, then accumulates
/// response bytes until the peer closes the connection. The timeout is an
/// idle timeout: it bounds the connect and every individual read, and a
/// read that exceeds it drops the socket and fails with
/// [`HttpotError::Timeout`]. Socket errors are returned through the same
/// `Err` channel. An empty `Ok` buffer means the peer closed without
/// sending anything.
///
/// No retries, no pooling, no connection reuse.
pub fn execute(host: &str, port: u16, request: &[u8], timeout: Duration) -> Result<Vec<u8>> {
    let addr = (host, port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| HttpotError::InvalidUrl(format!("no address for {host}:{port}")))?;

    let mut stream = TcpStream::connect_timeout(&addr, timeout).map_err(|e| {
        if e.kind() == ErrorKind::TimedOut {
            HttpotError::Timeout
        } else {
            HttpotError::Io(e)
        }
    })?;
    stream.set_read_timeout(Some(timeout))?;

    stream.write_all(request)?;

    let mut response = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => response.extend_from_slice(&buf[..n]),
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                return Err(HttpotError::Timeout);
            }
            Err(e) => return Err(HttpotError::Io(e)),
        }
    }

    Ok(response)
}

/// Non-blocking TCP accept loop.
///
/// Checks the `running` flag between accepts with a 50ms poll interval
/// so that [`Server::stop`](crate::Server::stop) can terminate it
/// promptly. Each accepted connection is handled on its own thread.
pub(crate) fn accept_loop(
    listener: TcpListener,
    router: Arc<Router>,
    config: Arc<ServerConfig>,
    running: Arc<AtomicBool>,
) {
    while running.load(Ordering::SeqCst) {
        match listener.accept() {
            Ok((stream, _)) => {
                if stream.set_nonblocking(false).is_err() {
                    continue;
                }
                let r = router.clone();
                let c = config.clone();
                thread::spawn(move || {
                    handle_connection(stream, r, c);
                });
            }
            Err(ref e) if e.kind() == ErrorKind::WouldBlock => {
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                if running.load(Ordering::SeqCst) {
                    tracing::warn!(error = %e, "TCP accept error");
                }
            }
        }
    }
    tracing::debug!("accept loop exited");
}

/// Handle exactly one request on an accepted connection.
///
/// Reads once, splits header block from body at the blank line, parses
/// the request header, extracts the body up to the declared
/// `Content-Length`, dispatches, writes the response, logs the exchange,
/// and closes. A handler fault becomes a `500` with an empty body.
fn handle_connection(mut stream: TcpStream, router: Arc<Router>, config: Arc<ServerConfig>) {
    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(e) => {
            tracing::warn!(error = %e, "connection read error");
            return;
        }
    };

    let started = Instant::now();
    let raw = String::from_utf8_lossy(&buf[..n]);
    let (header_block, body_text) = match raw.split_once(HEADER_END) {
        Some((head, body)) => (head, body),
        None => (raw.as_ref(), ""),
    };

    let request = match RequestHeader::parse(header_block) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "request parse error");
            let _ = stream.shutdown(Shutdown::Both);
            return;
        }
    };

    // Body only exists when a numeric Content-Length declares it; the raw
    // body text is truncated to exactly that many bytes.
    let body = request
        .header("Content-Length")
        .and_then(|v| v.parse::<usize>().ok())
        .map(|declared| {
            let bytes = body_text.as_bytes();
            let end = declared.min(bytes.len());
            String::from_utf8_lossy(&bytes[..end]).into_owned()
        });

    let response = router.handle_route(
        request.method(),
        request.protocol(),
        request.path(),
        request.headers().clone(),
        body,
    );

    match response {
        Ok(response) => {
            let _ = stream.write_all(&response.to_wire_bytes());
            log_exchange(&request, &response, started);
        }
        Err(e) => {
            tracing::warn!(error = %e, "handler fault during dispatch");
            let response = RouterResponse {
                header: ResponseHeader::with_agent(&config.server_agent)
                    .set_protocol(request.protocol())
                    .set_status_code(500),
                body: None,
            };
            let _ = stream.write_all(&response.to_wire_bytes());
            log_exchange(&request, &response, started);
        }
    }

    let _ = stream.shutdown(Shutdown::Both);
}

/// One access-log line per exchange:
/// `protocol method path status size elapsed.3fms`.
fn log_exchange(request: &RequestHeader, response: &RouterResponse, started: Instant) {
    let size = match &response.body {
        Some(body) => body.len().to_string(),
        None => "Empty".to_string(),
    };
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    tracing::info!(
        "{} {} {} {} {} {:.3}ms",
        request.protocol(),
        request.method(),
        request.path(),
        response.header.status_code(),
        size,
        elapsed_ms,
    );
}
