//! Single-client TCP command server.
//!
//! Accepts one client at a time; the next client is only accepted after
//! the previous one disconnects. Each request line is decoded, dispatched
//! against the shared [`ShipService`], and answered with a `null` or
//! snapshot line. Malformed JSON is logged and ignored without a
//! response; the connection stays open.
//!
//! Shutdown is cooperative: the `stop` command (or a
//! [`ShutdownHandle`]) raises a flag the accept loop observes. A handle
//! triggered from outside also dials a throwaway local connection so a
//! blocked `accept` wakes up and sees the flag.

pub mod codec;

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{error, info, warn};
use parking_lot::Mutex;

use crate::app::ports::{DisplayMirror, EventSink};
use crate::app::service::{Dispatch, ShipService};

pub struct CommandServer {
    listener: TcpListener,
    service: Arc<Mutex<ShipService>>,
    shutdown: Arc<AtomicBool>,
}

/// Raises the server's shutdown flag from another thread.
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    addr: SocketAddr,
}

impl ShutdownHandle {
    /// Ask the server to stop. The throwaway connection unblocks an
    /// accept call that is already waiting for a client.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
        let _ = TcpStream::connect(self.addr);
    }
}

impl CommandServer {
    /// Bind the listening socket. The server does not accept anything
    /// until [`run`](Self::run).
    pub fn bind(addr: impl ToSocketAddrs, service: Arc<Mutex<ShipService>>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self {
            listener,
            service,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle for stopping the server from outside the accept loop.
    pub fn shutdown_handle(&self) -> std::io::Result<ShutdownHandle> {
        let port = self.listener.local_addr()?.port();
        Ok(ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
            addr: SocketAddr::from(([127, 0, 0, 1], port)),
        })
    }

    /// Serve clients until a `stop` command or a shutdown trigger.
    ///
    /// Connection errors close the current client and return to accept;
    /// only listener-level failures propagate.
    pub fn run(
        &self,
        sink: &mut impl EventSink,
        mirror: &mut impl DisplayMirror,
    ) -> std::io::Result<()> {
        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                break;
            }
            let (stream, peer) = match self.listener.accept() {
                Ok(conn) => conn,
                Err(e) => {
                    if self.shutdown.load(Ordering::SeqCst) {
                        break;
                    }
                    warn!("accept failed: {e}");
                    continue;
                }
            };
            info!("client connected: {peer}");
            match self.serve_client(stream, sink, mirror) {
                Ok(()) => info!("client disconnected: {peer}"),
                Err(e) => warn!("connection to {peer} dropped: {e}"),
            }
        }
        info!("command server stopped");
        Ok(())
    }

    /// Request/response loop for one client. Returns on EOF, connection
    /// error, or shutdown.
    fn serve_client(
        &self,
        stream: TcpStream,
        sink: &mut impl EventSink,
        mirror: &mut impl DisplayMirror,
    ) -> std::io::Result<()> {
        let mut reader = BufReader::new(stream.try_clone()?);
        let mut writer = stream;
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Ok(()); // Clean EOF.
            }

            let request = match codec::decode(&line) {
                Ok(value) => value,
                Err(e) => {
                    // Bad data never closes the connection and gets no reply.
                    warn!("bad data received: {e}");
                    continue;
                }
            };

            let dispatch = self.service.lock().process_command(&request, sink);
            match dispatch {
                Ok(Dispatch::State(snapshot)) => {
                    writer.write_all(codec::encode(Some(&snapshot)).as_bytes())?;
                }
                Ok(Dispatch::Applied) => {
                    writer.write_all(codec::encode(None).as_bytes())?;
                    mirror.render(&self.service.lock().snapshot());
                }
                Ok(Dispatch::Ignored) => {
                    writer.write_all(codec::encode(None).as_bytes())?;
                }
                Ok(Dispatch::Shutdown) => {
                    writer.write_all(codec::encode(None).as_bytes())?;
                    writer.flush()?;
                    mirror.render(&self.service.lock().snapshot());
                    self.shutdown.store(true, Ordering::SeqCst);
                    return Ok(());
                }
                Err(e) => {
                    // Fatal to this request only; the client still gets a line.
                    error!("rejected request: {e}");
                    writer.write_all(codec::encode(None).as_bytes())?;
                }
            }
            writer.flush()?;
        }
    }
}
