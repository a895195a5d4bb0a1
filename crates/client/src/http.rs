//! Monoio-native HTTPS client
//!
//! One TLS connection per request (`Connection: close`), HTTP/1.1 only.
//! Enough of the protocol for the OptionsHouse endpoints: a POST with a
//! JSON body, a status line, headers, and a plain or chunked body.

use crate::errors::{ClientError, Result};
use monoio::io::{AsyncReadRent, AsyncWriteRentExt};
use monoio::net::TcpStream;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection};
use std::io::{Read, Write};
use std::sync::Arc;
use tracing::trace;

const USER_AGENT: &str = "opthouse-client/0.1";
const READ_CHUNK: usize = 4096;

pub struct MonoioHttpsClient {
    tls_config: Arc<ClientConfig>,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// TLS stream wrapper for monoio
pub struct TlsStream {
    stream: TcpStream,
    tls_conn: ClientConnection,
    write_buf: Vec<u8>,
    handshake_complete: bool,
}

impl MonoioHttpsClient {
    /// Create a client trusting the webpki root set
    pub fn new() -> Result<Self> {
        let mut root_store = rustls::RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let tls_config = ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Ok(Self {
            tls_config: Arc::new(tls_config),
        })
    }

    pub async fn post(&self, url: &str, body: &str, headers: &[(&str, &str)]) -> Result<HttpResponse> {
        self.request("POST", url, Some(body), headers).await
    }

    pub async fn request(
        &self,
        method: &str,
        url: &str,
        body: Option<&str>,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse> {
        let parsed_url = url::Url::parse(url)?;

        let host = parsed_url
            .host_str()
            .ok_or_else(|| ClientError::InvalidUrl("No host in URL".to_string()))?;
        let port = parsed_url.port().unwrap_or(443);
        let mut path_and_query = parsed_url.path().to_string();
        if path_and_query.is_empty() {
            path_and_query.push('/');
        }
        if let Some(query) = parsed_url.query() {
            path_and_query.push('?');
            path_and_query.push_str(query);
        }

        let tcp_stream = TcpStream::connect(format!("{host}:{port}"))
            .await
            .map_err(|e| ClientError::NetworkError(format!("TCP connect failed: {e}")))?;

        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| ClientError::NetworkError(format!("Invalid server name: {e:?}")))?;

        let tls_conn = ClientConnection::new(self.tls_config.clone(), server_name)
            .map_err(|e| ClientError::NetworkError(format!("TLS setup failed: {e}")))?;

        let mut tls_stream = TlsStream::new(tcp_stream, tls_conn);

        let request = build_request(method, host, &path_and_query, body, headers);
        trace!("➡️  {} {}{}", method, host, path_and_query);

        tls_stream.write_all(request.as_bytes()).await?;
        let response_data = tls_stream.read_to_end().await?;

        parse_response(&response_data)
    }
}

fn build_request(
    method: &str,
    host: &str,
    path_and_query: &str,
    body: Option<&str>,
    headers: &[(&str, &str)],
) -> String {
    let content_length = body.map(str::len).unwrap_or(0);
    let mut request = format!(
        "{method} {path_and_query} HTTP/1.1\r\n\
         Host: {host}\r\n\
         User-Agent: {USER_AGENT}\r\n\
         Connection: close\r\n\
         Content-Length: {content_length}\r\n"
    );

    for (key, value) in headers {
        request.push_str(key);
        request.push_str(": ");
        request.push_str(value);
        request.push_str("\r\n");
    }

    request.push_str("\r\n");
    if let Some(body) = body {
        request.push_str(body);
    }
    request
}

/// Parse a raw HTTP/1.1 response
pub fn parse_response(data: &[u8]) -> Result<HttpResponse> {
    let header_end = data
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .ok_or_else(|| ClientError::NetworkError("Invalid HTTP response: no header terminator".to_string()))?;

    let header_part = String::from_utf8_lossy(&data[..header_end]);
    let body_bytes = &data[header_end + 4..];

    let mut lines = header_part.lines();

    let status_line = lines
        .next()
        .ok_or_else(|| ClientError::NetworkError("Empty response".to_string()))?;

    let status = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or_else(|| ClientError::NetworkError(format!("Invalid status line: {status_line}")))?;

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let chunked = headers.iter().any(|(k, v)| {
        k.eq_ignore_ascii_case("transfer-encoding") && v.to_ascii_lowercase().contains("chunked")
    });

    let body = if chunked {
        String::from_utf8_lossy(&decode_chunked(body_bytes)?).into_owned()
    } else {
        String::from_utf8_lossy(body_bytes).into_owned()
    };

    Ok(HttpResponse { status, headers, body })
}

fn decode_chunked(mut data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len());

    loop {
        let line_end = data
            .windows(2)
            .position(|w| w == b"\r\n")
            .ok_or_else(|| ClientError::InvalidResponse("Truncated chunk header".to_string()))?;

        let size_line = String::from_utf8_lossy(&data[..line_end]);
        let size_text = size_line.split(';').next().unwrap_or("").trim();
        let size = usize::from_str_radix(size_text, 16)
            .map_err(|_| ClientError::InvalidResponse(format!("Bad chunk size: {size_text:?}")))?;

        data = &data[line_end + 2..];
        if size == 0 {
            break;
        }
        if data.len() < size {
            return Err(ClientError::InvalidResponse("Truncated chunk body".to_string()));
        }

        out.extend_from_slice(&data[..size]);
        data = data.get(size + 2..).unwrap_or(&[]);
    }

    Ok(out)
}

impl TlsStream {
    pub fn new(stream: TcpStream, tls_conn: ClientConnection) -> Self {
        Self {
            stream,
            tls_conn,
            write_buf: Vec::with_capacity(8192),
            handshake_complete: false,
        }
    }

    async fn flush_tls(&mut self) -> Result<()> {
        while self.tls_conn.wants_write() {
            self.write_buf.clear();

            let tls_bytes = self
                .tls_conn
                .write_tls(&mut self.write_buf)
                .map_err(|e| ClientError::NetworkError(format!("TLS write failed: {e}")))?;

            if tls_bytes > 0 {
                let (result, _) = self.stream.write_all(self.write_buf.clone()).await;
                result.map_err(|e| ClientError::NetworkError(format!("TCP write failed: {e}")))?;
            }
        }
        Ok(())
    }

    /// Feed one TCP read into rustls. Returns false once the peer closed.
    async fn fill_tls(&mut self) -> Result<bool> {
        let (result, buf) = self.stream.read(vec![0u8; READ_CHUNK]).await;
        let bytes_read = result.map_err(|e| ClientError::NetworkError(format!("TCP read failed: {e}")))?;

        if bytes_read == 0 {
            return Ok(false);
        }

        self.tls_conn
            .read_tls(&mut std::io::Cursor::new(&buf[..bytes_read]))
            .map_err(|e| ClientError::NetworkError(format!("TLS read failed: {e}")))?;
        self.tls_conn
            .process_new_packets()
            .map_err(|e| ClientError::NetworkError(format!("TLS process failed: {e}")))?;

        Ok(true)
    }

    pub async fn complete_handshake(&mut self) -> Result<()> {
        if self.handshake_complete {
            return Ok(());
        }

        loop {
            self.flush_tls().await?;

            if !self.tls_conn.is_handshaking() {
                self.handshake_complete = true;
                break;
            }

            if self.tls_conn.wants_read() {
                if !self.fill_tls().await? {
                    return Err(ClientError::NetworkError("Connection closed during handshake".to_string()));
                }
            } else if !self.tls_conn.wants_write() {
                return Err(ClientError::NetworkError("TLS handshake stalled".to_string()));
            }
        }

        Ok(())
    }

    pub async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.complete_handshake().await?;

        self.tls_conn
            .writer()
            .write_all(data)
            .map_err(|e| ClientError::NetworkError(format!("TLS application write failed: {e}")))?;

        self.flush_tls().await
    }

    /// Read until the server closes the connection
    pub async fn read_to_end(&mut self) -> Result<Vec<u8>> {
        self.complete_handshake().await?;

        let mut response_data = Vec::new();
        let mut plain = vec![0u8; READ_CHUNK];

        loop {
            match self.tls_conn.reader().read(&mut plain) {
                Ok(0) => break,
                Ok(n) => {
                    response_data.extend_from_slice(&plain[..n]);
                    continue;
                }
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {}
                // peer closed without close_notify; keep what arrived
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof && !response_data.is_empty() => break,
                Err(e) => {
                    return Err(ClientError::NetworkError(format!("TLS read failed: {e}")));
                }
            }

            if !self.fill_tls().await? {
                break;
            }
        }

        Ok(response_data)
    }
}
