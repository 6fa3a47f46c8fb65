use crate::{Error, Result, EMPTY_LIST_CODE, EMPTY_STRING_CODE};
use bytes::{Buf, BufMut};

/// The header of an RLP item: whether it is a list, and the length of its
/// payload in bytes.
///
/// The header does not include the payload itself; callers encode or decode
/// the payload right after it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Header {
    /// True if the item is a list.
    pub list: bool,
    /// The length of the payload in bytes.
    pub payload_length: usize,
}

impl Header {
    /// Encodes the header into `out` using the short form for payloads under
    /// 56 bytes and the length-of-length form otherwise.
    pub fn encode(&self, out: &mut dyn BufMut) {
        if self.payload_length < 56 {
            let code = if self.list { EMPTY_LIST_CODE } else { EMPTY_STRING_CODE };
            out.put_u8(code + self.payload_length as u8);
        } else {
            let len_be = self.payload_length.to_be_bytes();
            let len_be = &len_be[self.payload_length.leading_zeros() as usize / 8..];
            let code = if self.list { 0xf7 } else { 0xb7 };
            out.put_u8(code + len_be.len() as u8);
            out.put_slice(len_be);
        }
    }

    /// The number of bytes [`Self::encode`] will write.
    #[inline]
    pub const fn length(&self) -> usize {
        length_of_length(self.payload_length)
    }

    /// Decodes a header from the front of `buf`, advancing past it.
    ///
    /// A single byte below [`EMPTY_STRING_CODE`] is its own payload: the
    /// returned header reports a one-byte string and `buf` is *not*
    /// advanced, so the payload read picks up that byte.
    pub fn decode(buf: &mut &[u8]) -> Result<Self> {
        let &first = buf.first().ok_or(Error::InputTooShort)?;

        let (list, payload_length) = match first {
            0x00..=0x7f => return Ok(Self { list: false, payload_length: 1 }),
            0x80..=0xb7 => {
                buf.advance(1);
                (false, (first - EMPTY_STRING_CODE) as usize)
            }
            0xb8..=0xbf => {
                buf.advance(1);
                (false, decode_length(buf, (first - 0xb7) as usize)?)
            }
            0xc0..=0xf7 => {
                buf.advance(1);
                (true, (first - EMPTY_LIST_CODE) as usize)
            }
            0xf8..=0xff => {
                buf.advance(1);
                (true, decode_length(buf, (first - 0xf7) as usize)?)
            }
        };

        if buf.len() < payload_length {
            return Err(Error::InputTooShort);
        }
        Ok(Self { list, payload_length })
    }

    /// Decodes a header and splits off its payload, checking that the item
    /// has the expected kind.
    pub fn decode_bytes<'a>(buf: &mut &'a [u8], list: bool) -> Result<&'a [u8]> {
        let header = Self::decode(buf)?;
        if header.list != list {
            return Err(if list { Error::UnexpectedString } else { Error::UnexpectedList });
        }
        let (payload, rest) = buf.split_at(header.payload_length);
        *buf = rest;
        Ok(payload)
    }
}

/// Reads a big-endian payload length of `len_of_len` bytes.
fn decode_length(buf: &mut &[u8], len_of_len: usize) -> Result<usize> {
    if len_of_len > core::mem::size_of::<usize>() {
        return Err(Error::Overflow);
    }
    if buf.len() < len_of_len {
        return Err(Error::InputTooShort);
    }
    let mut len = 0usize;
    for &byte in &buf[..len_of_len] {
        len = (len << 8) | byte as usize;
    }
    buf.advance(len_of_len);
    Ok(len)
}

/// Returns the number of bytes a [`Header`] with the given payload length
/// occupies: one for the short form, one plus the minimal big-endian length
/// for the long form.
#[inline]
pub const fn length_of_length(payload_length: usize) -> usize {
    if payload_length < 56 {
        1
    } else {
        1 + (core::mem::size_of::<usize>() - payload_length.leading_zeros() as usize / 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_form_boundary() {
        let mut out = Vec::new();
        Header { list: false, payload_length: 55 }.encode(&mut out);
        assert_eq!(out, [0xb7]);

        out.clear();
        Header { list: false, payload_length: 56 }.encode(&mut out);
        assert_eq!(out, [0xb8, 0x38]);

        out.clear();
        Header { list: false, payload_length: 256 }.encode(&mut out);
        assert_eq!(out, [0xb9, 0x01, 0x00]);
    }

    #[test]
    fn decode_inverts_encode() {
        for header in [
            Header { list: false, payload_length: 0 },
            Header { list: true, payload_length: 0 },
            Header { list: false, payload_length: 55 },
            Header { list: true, payload_length: 1024 },
        ] {
            let mut out = Vec::new();
            header.encode(&mut out);
            out.resize(out.len() + header.payload_length, 0);
            let mut buf = out.as_slice();
            assert_eq!(Header::decode(&mut buf).unwrap(), header);
        }
    }

    #[test]
    fn single_byte_is_its_own_payload() {
        let mut buf = &[0x7fu8][..];
        let header = Header::decode(&mut buf).unwrap();
        assert_eq!(header, Header { list: false, payload_length: 1 });
        assert_eq!(buf, [0x7f]);
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let mut buf = &[0x83u8, b'd', b'o'][..];
        assert_eq!(Header::decode(&mut buf), Err(Error::InputTooShort));
    }
}
