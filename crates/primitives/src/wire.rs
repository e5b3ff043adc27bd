//! Big-endian helpers for the fixed-width wire layout.
//!
//! Every value type is written as the concatenation of its fields with no
//! padding or tags.  Integers are big-endian, which is why these exist instead
//! of leaning on borsh's little-endian integer impls.  Variable length parts
//! carry a 4-byte big-endian element count.

use std::io::{self, Read, Write};

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{constants::MAX_DECODE_PREALLOC, field::Fr};

pub fn write_u32<W: Write>(writer: &mut W, v: u32) -> io::Result<()> {
    writer.write_all(&v.to_be_bytes())
}

pub fn read_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

pub fn write_bool<W: Write>(writer: &mut W, v: bool) -> io::Result<()> {
    writer.write_all(&[v as u8])
}

pub fn read_bool<R: Read>(reader: &mut R) -> io::Result<bool> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    match buf[0] {
        0 => Ok(false),
        1 => Ok(true),
        b => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid bool byte {b:#04x}"),
        )),
    }
}

/// Writes a small integer as a full field word.
pub fn write_u32_word<W: Write>(writer: &mut W, v: u32) -> io::Result<()> {
    Fr::from(v).serialize(writer)
}

/// Reads a field word that must hold a value fitting in a `u32`.
pub fn read_u32_word<R: Read>(reader: &mut R) -> io::Result<u32> {
    let fr = Fr::deserialize_reader(reader)?;
    fr.to_u32().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("field word {fr} does not fit in u32"),
        )
    })
}

fn write_len<W: Write>(writer: &mut W, len: usize) -> io::Result<()> {
    let len = u32::try_from(len)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "vector too long to encode"))?;
    write_u32(writer, len)
}

/// Writes a length-prefixed sequence of raw-encoded items.
pub fn write_seq<W: Write, T: BorshSerialize>(writer: &mut W, items: &[T]) -> io::Result<()> {
    write_len(writer, items.len())?;
    for item in items {
        item.serialize(writer)?;
    }
    Ok(())
}

pub fn read_seq<R: Read, T: BorshDeserialize>(reader: &mut R) -> io::Result<Vec<T>> {
    let len = read_u32(reader)? as usize;
    let mut items = Vec::with_capacity(len.min(MAX_DECODE_PREALLOC));
    for _ in 0..len {
        items.push(T::deserialize_reader(reader)?);
    }
    Ok(items)
}

/// Like [`write_seq`] but for big-endian `u32`s.
pub fn write_u32_seq<W: Write>(writer: &mut W, items: &[u32]) -> io::Result<()> {
    write_len(writer, items.len())?;
    for item in items {
        write_u32(writer, *item)?;
    }
    Ok(())
}

pub fn read_u32_seq<R: Read>(reader: &mut R) -> io::Result<Vec<u32>> {
    let len = read_u32(reader)? as usize;
    let mut items = Vec::with_capacity(len.min(MAX_DECODE_PREALLOC));
    for _ in 0..len {
        items.push(read_u32(reader)?);
    }
    Ok(items)
}

/// Length-prefixed opaque byte string.
pub fn write_bytes<W: Write>(writer: &mut W, bytes: &[u8]) -> io::Result<()> {
    write_len(writer, bytes.len())?;
    writer.write_all(bytes)
}

pub fn read_bytes<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let len = read_u32(reader)? as usize;
    let mut bytes = Vec::with_capacity(len.min(MAX_DECODE_PREALLOC));
    reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "truncated byte string",
        ));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_is_big_endian() {
        let mut buf = Vec::new();
        write_u32(&mut buf, 0x01020304).unwrap();
        assert_eq!(buf, vec![1, 2, 3, 4]);
        assert_eq!(read_u32(&mut buf.as_slice()).unwrap(), 0x01020304);
    }

    #[test]
    fn test_bool_rejects_garbage() {
        assert!(read_bool(&mut [2u8].as_slice()).is_err());
        assert!(read_bool(&mut [1u8].as_slice()).unwrap());
    }

    #[test]
    fn test_u32_word_overflow() {
        let big = Fr::from(u32::MAX as u64 + 1);
        let enc = borsh::to_vec(&big).unwrap();
        assert!(read_u32_word(&mut enc.as_slice()).is_err());

        let mut buf = Vec::new();
        write_u32_word(&mut buf, 3).unwrap();
        assert_eq!(buf.len(), 32);
        assert_eq!(read_u32_word(&mut buf.as_slice()).unwrap(), 3);
    }

    #[test]
    fn test_seq_prefix() {
        let items = vec![Fr::from(1u32), Fr::from(2u32)];
        let mut buf = Vec::new();
        write_seq(&mut buf, &items).unwrap();
        assert_eq!(&buf[..4], &[0, 0, 0, 2]);
        assert_eq!(buf.len(), 4 + 64);

        let back: Vec<Fr> = read_seq(&mut buf.as_slice()).unwrap();
        assert_eq!(back, items);
    }

    #[test]
    fn test_bytes_truncated() {
        let mut buf = Vec::new();
        write_u32(&mut buf, 10).unwrap();
        buf.extend_from_slice(&[0u8; 4]);
        assert!(read_bytes(&mut buf.as_slice()).is_err());
    }
}
