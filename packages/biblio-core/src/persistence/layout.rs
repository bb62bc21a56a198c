//! Fixed binary layout for each record type.
//!
//! Every record serializes to a constant-size block: strings are
//! NUL-padded to their reserved width, integers are 4-byte little-endian.
//! Files are flat concatenations of these blocks with no header, count,
//! or checksum; end-of-file is the only terminator.

use crate::model::{Book, Loan, Member};

/// A record with a constant-size binary encoding.
pub trait FixedRecord: Sized {
    /// Encoded size in bytes.
    const RECORD_SIZE: usize;

    /// Encodes the record into `buf`, which must be exactly
    /// [`RECORD_SIZE`](Self::RECORD_SIZE) bytes. Unused bytes are zeroed.
    fn encode_into(&self, buf: &mut [u8]);

    /// Decodes a record from `buf`, which must be exactly
    /// [`RECORD_SIZE`](Self::RECORD_SIZE) bytes.
    fn decode_from(buf: &[u8]) -> Self;
}

/// Copies a string into a NUL-padded field slice. The value is expected
/// to fit; record validation enforces the byte budgets at insert time.
fn write_text(field: &mut [u8], value: &str) {
    let len = value.len().min(field.len().saturating_sub(1));
    field[..len].copy_from_slice(&value.as_bytes()[..len]);
}

/// Reads a NUL-padded field slice back into a string, stopping at the
/// first NUL.
fn read_text(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

impl FixedRecord for Book {
    // Byte offsets:
    //   [0..20)    isbn   (NUL-padded)
    //   [20..120)  title
    //   [120..220) author
    //   [220..224) year   (i32 LE)
    //   [224..228) copies (u32 LE)
    const RECORD_SIZE: usize = 228;

    fn encode_into(&self, buf: &mut [u8]) {
        buf.fill(0);
        write_text(&mut buf[0..20], &self.isbn);
        write_text(&mut buf[20..120], &self.title);
        write_text(&mut buf[120..220], &self.author);
        buf[220..224].copy_from_slice(&self.year.to_le_bytes());
        buf[224..228].copy_from_slice(&self.copies.to_le_bytes());
    }

    fn decode_from(buf: &[u8]) -> Self {
        Self {
            isbn: read_text(&buf[0..20]),
            title: read_text(&buf[20..120]),
            author: read_text(&buf[120..220]),
            year: i32::from_le_bytes(buf[220..224].try_into().unwrap()),
            copies: u32::from_le_bytes(buf[224..228].try_into().unwrap()),
        }
    }
}

impl FixedRecord for Member {
    // Byte offsets:
    //   [0..4)     id      (u32 LE)
    //   [4..104)   name    (NUL-padded)
    //   [104..204) program
    const RECORD_SIZE: usize = 204;

    fn encode_into(&self, buf: &mut [u8]) {
        buf.fill(0);
        buf[0..4].copy_from_slice(&self.id.to_le_bytes());
        write_text(&mut buf[4..104], &self.name);
        write_text(&mut buf[104..204], &self.program);
    }

    fn decode_from(buf: &[u8]) -> Self {
        Self {
            id: u32::from_le_bytes(buf[0..4].try_into().unwrap()),
            name: read_text(&buf[4..104]),
            program: read_text(&buf[104..204]),
        }
    }
}

impl FixedRecord for Loan {
    // Byte offsets:
    //   [0..4)   member_id (u32 LE)
    //   [4..24)  isbn      (NUL-padded)
    //   [24..44) date      (NUL-padded, YYYY-MM-DD)
    const RECORD_SIZE: usize = 44;

    fn encode_into(&self, buf: &mut [u8]) {
        buf.fill(0);
        buf[0..4].copy_from_slice(&self.member_id.to_le_bytes());
        write_text(&mut buf[4..24], &self.isbn);
        write_text(&mut buf[24..44], &self.date);
    }

    fn decode_from(buf: &[u8]) -> Self {
        Self {
            member_id: u32::from_le_bytes(buf[0..4].try_into().unwrap()),
            isbn: read_text(&buf[4..24]),
            date: read_text(&buf[24..44]),
        }
    }
}
