use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::session::TrainingSession;

use super::{HostError, HostRequest, HostResponse, handle_host_request};

/// Request/response channel to the host document.
pub trait HostTransport {
    fn call(&mut self, request: &HostRequest) -> Result<HostResponse, HostError>;
}

/// One JSON object per line in each direction, e.g. over a child's stdio.
pub struct JsonLinesTransport<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> JsonLinesTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> HostTransport for JsonLinesTransport<R, W> {
    fn call(&mut self, request: &HostRequest) -> Result<HostResponse, HostError> {
        let line = serde_json::to_string(request).map_err(HostError::Encode)?;
        writeln!(self.writer, "{line}").map_err(HostError::Io)?;
        self.writer.flush().map_err(HostError::Io)?;
        let mut reply = String::new();
        let read = self.reader.read_line(&mut reply).map_err(HostError::Io)?;
        if read == 0 || reply.trim().is_empty() {
            return Err(HostError::NoResponse);
        }
        serde_json::from_str(reply.trim()).map_err(HostError::Decode)
    }
}

/// Answer host-initiated requests, one JSON line each, until `reader` closes.
pub fn serve_json_lines(
    session: &mut TrainingSession,
    reader: impl BufRead,
    mut writer: impl Write,
) -> Result<(), HostError> {
    for line in reader.lines() {
        let line = line.map_err(HostError::Io)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<HostRequest>(line) {
            Ok(request) => {
                debug!(action = ?request.action, resource = %request.resource, "Host request");
                handle_host_request(session, &request)
            }
            Err(err) => {
                warn!("Malformed host request: {err}");
                HostResponse::failure(format!("Invalid request: {err}"))
            }
        };
        let reply = serde_json::to_string(&response).map_err(HostError::Encode)?;
        writeln!(writer, "{reply}").map_err(HostError::Io)?;
        writer.flush().map_err(HostError::Io)?;
    }
    Ok(())
}
