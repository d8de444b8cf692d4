use feed_common::Result;
use feed_common::codec::{REQUEST_LEN, Request, decode_request};
use log::{debug, error, info, warn};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::model::feed_book::FeedBook;

/// TCP server that answers fetch-all and resend requests from a `FeedBook`.
///
/// Each accepted connection carries exactly one request. The server answers
/// it and closes the connection; a failure on one connection is logged and
/// never stops the accept loop.
pub struct FeedServer {
    /// The underlying TCP listening socket.
    pub(crate) socket: TcpListener,
    book: Arc<FeedBook>,
}

impl FeedServer {
    /// Bind a new server to the provided `bind_addr` (e.g., `0.0.0.0:3000`).
    pub fn bind(bind_addr: impl ToSocketAddrs, book: FeedBook) -> Result<Self> {
        let socket = TcpListener::bind(bind_addr)?;
        Ok(Self {
            socket,
            book: Arc::new(book),
        })
    }

    /// Address the server is actually listening on.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Blocking loop that accepts TCP connections and answers one request
    /// per connection on its own thread.
    pub fn serve(self) -> Result<()> {
        info!("Feed server is started on {}", self.socket.local_addr()?);

        for stream in self.socket.incoming() {
            match stream {
                Ok(stream) => {
                    let book = Arc::clone(&self.book);
                    thread::spawn(move || {
                        let peer = stream.peer_addr().ok();
                        if let Err(e) = handle_client(stream, &book) {
                            warn!("Client {:?} failed: {}", peer, e);
                        }
                    });
                }
                Err(e) => error!("TCP connection error: {}", e),
            }
        }
        Ok(())
    }

    /// Run [`FeedServer::serve`] on a background thread.
    pub fn spawn(self) -> JoinHandle<Result<()>> {
        thread::spawn(move || self.serve())
    }
}

/// Read one request from `stream`, write the answer, then close.
fn handle_client(mut stream: TcpStream, book: &FeedBook) -> Result<()> {
    let mut buf = [0u8; REQUEST_LEN];
    stream.read_exact(&mut buf)?;

    match decode_request(&buf)? {
        Request::FetchAll => {
            let bytes = book.stream_bytes();
            debug!("Streaming {} bytes to {:?}", bytes.len(), stream.peer_addr());
            stream.write_all(&bytes)?;
        }
        Request::Resend(key) => match book.resend(key) {
            Some(frame) => {
                debug!("Resending record for key {}", key);
                stream.write_all(&frame)?;
            }
            None => debug!("No record to resend for key {}", key),
        },
    }
    stream.flush()?;
    Ok(())
}
