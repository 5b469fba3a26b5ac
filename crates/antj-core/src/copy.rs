//! Chunked stream copy with a reusable buffer.
//!
//! The buffer is owned by whoever extracts and is lent out by `&mut` for
//! each copy, so two copies can never share one buffer.

use std::io;
use std::io::Read;
use std::io::Write;

/// Chunk size for entry copies (8 KiB).
pub const COPY_BUFFER_SIZE: usize = 8 * 1024;

/// Fixed-size buffer for copying entry data.
///
/// # Examples
///
/// ```
/// use antj_core::copy::CopyBuffer;
/// use antj_core::copy::copy_with_buffer;
///
/// let mut buffer = CopyBuffer::new();
/// let mut output = Vec::new();
/// let copied = copy_with_buffer(&mut &b"hello"[..], &mut output, &mut buffer).unwrap();
/// assert_eq!(copied, 5);
/// assert_eq!(output, b"hello");
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a zeroed buffer of [`COPY_BUFFER_SIZE`] bytes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies `reader` to `writer` one buffer-sized chunk at a time.
///
/// Interrupted reads are retried. Returns the number of bytes copied.
///
/// # Errors
///
/// Returns the first read or write error.
pub fn copy_with_buffer<R, W>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut total: u64 = 0;

    loop {
        let n = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buffer.buf[..n])?;
        total += n as u64;
    }

    Ok(total)
}
