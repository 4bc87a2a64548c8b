//! Bounded stream copying.

use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;

use crate::AuditError;
use crate::Result;
use crate::error::QuotaResource;

/// I/O buffer size, matching typical filesystem block sizes.
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Copies `reader` into `writer`, failing once more than `limit` bytes have
/// been produced.
///
/// The limit is enforced on the decompressed stream itself, so an entry whose
/// header under-reports its size is still stopped.
///
/// # Errors
///
/// Returns `QuotaExceeded` with [`QuotaResource::FileSize`] when the stream
/// is longer than `limit`, or an I/O error from either side.
pub fn copy_bounded<R: Read, W: Write>(reader: &mut R, writer: &mut W, limit: u64) -> Result<u64> {
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut written: u64 = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(written),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(AuditError::Io(e)),
        };

        written = written.saturating_add(n as u64);
        if written > limit {
            return Err(AuditError::QuotaExceeded {
                resource: QuotaResource::FileSize {
                    size: written,
                    max: limit,
                },
            });
        }

        writer.write_all(&buf[..n])?;
    }
}
