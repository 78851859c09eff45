//! Record stream reader
//!
//! Decodes the sidecar's delimited record stream from any byte source.
//! Corrupt records are logged and skipped.

use std::io::{self, BufReader, Bytes, Read};

use palmlight_protocol::{HostMessage, RecordDecoder};
use tracing::warn;

pub struct RecordReader<R> {
    bytes: Bytes<BufReader<R>>,
    decoder: RecordDecoder,
}

impl<R: Read> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            decoder: RecordDecoder::new(),
        }
    }

    /// Next message, or None at end of stream
    ///
    /// A partial record at end of stream is dropped.
    pub fn next_message(&mut self) -> io::Result<Option<HostMessage>> {
        for byte in self.bytes.by_ref() {
            match self.decoder.feed(byte?) {
                Ok(Some(message)) => return Ok(Some(message)),
                Ok(None) => {}
                Err(err) => warn!(?err, "dropping bad record"),
            }
        }
        Ok(None)
    }
}
