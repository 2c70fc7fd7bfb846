//! Fixed-endianness, fixed-size wire framing.
//!
//! All integer fields are 64-bit and explicitly little-endian, so two
//! binaries built for different host architectures still agree on the
//! wire. There is no length prefixing: every frame's size is derived from
//! `n`, negotiated once at session start.

use std::io::{Read, Write};

use crate::error::{ProtocolError, Result};

/// Read exactly `buf.len()` bytes, looping over partial reads. Reaching
/// EOF before the buffer is full is a fatal `ShortRead`.
pub fn read_exact<R: Read>(stream: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut total = 0;
    while total < buf.len() {
        let n = stream.read(&mut buf[total..])?;
        if n == 0 {
            return Err(ProtocolError::ShortRead {
                expected: buf.len(),
                actual: total,
            });
        }
        total += n;
    }
    Ok(())
}

pub fn write_all<W: Write>(stream: &mut W, buf: &[u8]) -> Result<()> {
    stream.write_all(buf).map_err(ProtocolError::Io)
}

pub fn write_byte<W: Write>(stream: &mut W, b: u8) -> Result<()> {
    write_all(stream, &[b])
}

pub fn read_byte<R: Read>(stream: &mut R) -> Result<u8> {
    let mut b = [0u8; 1];
    read_exact(stream, &mut b)?;
    Ok(b[0])
}

pub fn write_u64<W: Write>(stream: &mut W, v: u64) -> Result<()> {
    write_all(stream, &v.to_le_bytes())
}

pub fn read_u64<R: Read>(stream: &mut R) -> Result<u64> {
    let mut b = [0u8; 8];
    read_exact(stream, &mut b)?;
    Ok(u64::from_le_bytes(b))
}

/// Write `words` as consecutive little-endian 64-bit words. No length
/// prefix is written; the receiver already knows the count from `n`.
pub fn write_u64_slice<W: Write>(stream: &mut W, words: &[u64]) -> Result<()> {
    for &w in words {
        write_u64(stream, w)?;
    }
    Ok(())
}

pub fn read_u64_vec<R: Read>(stream: &mut R, count: usize) -> Result<Vec<u64>> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(read_u64(stream)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn u64_round_trips_le() {
        let mut buf = Vec::new();
        write_u64(&mut buf, 0x0102030405060708).unwrap();
        assert_eq!(buf, vec![0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
        let mut cur = Cursor::new(buf);
        assert_eq!(read_u64(&mut cur).unwrap(), 0x0102030405060708);
    }

    #[test]
    fn short_read_is_fatal() {
        let data = [1u8, 2, 3];
        let mut cur = Cursor::new(&data[..]);
        let mut dst = [0u8; 8];
        let err = read_exact(&mut cur, &mut dst).unwrap_err();
        match err {
            ProtocolError::ShortRead { expected, actual } => {
                assert_eq!(expected, 8);
                assert_eq!(actual, 3);
            }
            other => panic!("expected ShortRead, got {other:?}"),
        }
    }

    #[test]
    fn word_vec_round_trips() {
        let words = vec![5u64, 9, 1000, u64::MAX];
        let mut buf = Vec::new();
        write_u64_slice(&mut buf, &words).unwrap();
        let mut cur = Cursor::new(buf);
        assert_eq!(read_u64_vec(&mut cur, words.len()).unwrap(), words);
    }
}
