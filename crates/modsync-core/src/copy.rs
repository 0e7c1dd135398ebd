//! Buffered copy from archive entries into destination files.
//!
//! One [`CopyBuffer`] is reused for every entry of an extraction run, so the
//! copy loop does not allocate per file.

use std::io;
use std::io::Read;
use std::io::Write;

/// Buffer size for entry copies (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable heap buffer for streaming entry content.
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zeroed copy buffer.
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

/// Copies everything from `reader` into `writer`, returning the byte count.
///
/// Interrupted reads are retried. Decompression errors raised by the reader
/// surface here as I/O errors.
///
/// # Errors
///
/// Returns the first read or write error.
///
/// # Examples
///
/// ```
/// use modsync_core::copy::CopyBuffer;
/// use modsync_core::copy::copy_with_buffer;
///
/// let mut buffer = CopyBuffer::new();
/// let mut output = Vec::new();
/// let copied = copy_with_buffer(&mut &b"X"[..], &mut output, &mut buffer)?;
/// assert_eq!(copied, 1);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn copy_with_buffer<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> io::Result<u64> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;
        total += bytes_read as u64;
    }

    Ok(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_copy_buffer_size() {
        assert_eq!(CopyBuffer::new().size(), 64 * 1024);
        assert_eq!(CopyBuffer::default().size(), 64 * 1024);
    }

    #[test]
    fn test_copy_empty_source() {
        let mut buffer = CopyBuffer::new();
        let mut output = Vec::new();
        let copied = copy_with_buffer(&mut Cursor::new(Vec::<u8>::new()), &mut output, &mut buffer)
            .unwrap();
        assert_eq!(copied, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_copy_multiple_chunks() {
        let mut buffer = CopyBuffer::new();
        let input: Vec<u8> = (0..COPY_BUFFER_SIZE * 3 + 1000)
            .map(|i| (i % 251) as u8)
            .collect();
        let mut output = Vec::new();

        let copied = copy_with_buffer(&mut Cursor::new(&input), &mut output, &mut buffer).unwrap();
        assert_eq!(copied, input.len() as u64);
        assert_eq!(output, input);
    }

    #[test]
    fn test_copy_retries_interrupted_reads() {
        struct Flaky {
            data: Cursor<Vec<u8>>,
            calls: usize,
        }

        impl Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                self.calls += 1;
                if self.calls % 2 == 1 {
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
                }
                self.data.read(buf)
            }
        }

        let mut reader = Flaky {
            data: Cursor::new(b"modpack".to_vec()),
            calls: 0,
        };
        let mut buffer = CopyBuffer::new();
        let mut output = Vec::new();

        copy_with_buffer(&mut reader, &mut output, &mut buffer).unwrap();
        assert_eq!(output, b"modpack");
    }

    #[test]
    fn test_copy_propagates_read_error() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::InvalidData, "bad deflate stream"))
            }
        }

        let mut buffer = CopyBuffer::new();
        let mut output = Vec::new();
        let err = copy_with_buffer(&mut Broken, &mut output, &mut buffer).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
