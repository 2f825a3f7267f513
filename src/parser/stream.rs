//! Reading prefixes from a seekable byte stream.

use super::{is_delimiter, parse_token};
use crate::error::{PrefixError, Result};
use crate::models::Prefix;
use std::io::{BufRead, Seek, SeekFrom};

/// Skip leading delimiters and collect the next run of other bytes.
/// The delimiter after the token is left in the stream.
fn read_token<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut token = Vec::new();
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        let mut used = 0;
        let mut done = false;
        for &b in buf {
            if is_delimiter(char::from(b)) {
                if token.is_empty() {
                    used += 1;
                    continue;
                }
                done = true;
                break;
            }
            token.push(b);
            used += 1;
        }
        reader.consume(used);
        if done {
            break;
        }
    }
    if token.is_empty() {
        return Err(PrefixError::invalid_argument("end of input"));
    }
    String::from_utf8(token).map_err(|_| PrefixError::invalid_argument("token is not valid UTF-8"))
}

/// Read one [`Prefix`] token from `reader`.
///
/// On failure the stream is seeked back to where the read started and
/// [`PrefixError::ParseFailure`] is returned. If that seek itself fails the
/// IO error is returned instead and the stream position is unspecified.
pub fn read_prefix<R: BufRead + Seek>(reader: &mut R) -> Result<Prefix> {
    let start = reader.stream_position()?;
    match read_token(reader).and_then(|token| parse_token(&token)) {
        Ok(prefix) => Ok(prefix),
        Err(e) => {
            log::trace!("rollback stream to offset {start}: {e}");
            reader.seek(SeekFrom::Start(start))?;
            Err(PrefixError::parse_failure(start, &e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};

    #[test]
    fn test_read_from_cursor() {
        let mut input = Cursor::new("10.0.0.0/24\n\t\"10.1.0.0/16\" rest".as_bytes());
        let first = read_prefix(&mut input).expect("Error reading prefix");
        assert_eq!(first.to_string(), "10.0.0.0/24");
        assert_eq!(input.position(), 11);
        let second = read_prefix(&mut input).expect("Error reading prefix");
        assert_eq!(second.to_string(), "10.1.0.0/16");

        let mut rest = String::new();
        input.read_to_string(&mut rest).expect("Error reading rest of stream");
        assert_eq!(rest, " rest");
    }

    #[test]
    fn test_stream_rollback() {
        let mut input = Cursor::new("10.0.0.1/33".as_bytes());
        let err = read_prefix(&mut input).expect_err("Read should fail");
        assert!(matches!(err, PrefixError::ParseFailure { offset: 0, .. }));
        assert_eq!(input.position(), 0);

        let mut input = Cursor::new("10.0.0.0/24".as_bytes());
        let ok = read_prefix(&mut input).expect("Error reading prefix");
        assert_eq!(ok.prefix(), 24);
        assert_eq!(ok.addr(), std::net::Ipv4Addr::new(10, 0, 0, 0));
    }

    #[test]
    fn test_stream_rollback_mid_input() {
        let mut input = Cursor::new("10.0.0.0/8   10.1.0.0 x".as_bytes());
        read_prefix(&mut input).expect("Error reading prefix");
        assert_eq!(input.position(), 10);
        assert!(read_prefix(&mut input).is_err());
        assert_eq!(input.position(), 10);
    }

    #[test]
    fn test_buffered_reader_small_capacity() {
        let data = "  192.168.100.0/255.255.255.0  ";
        let mut input = BufReader::with_capacity(3, Cursor::new(data.as_bytes()));
        let net = read_prefix(&mut input).expect("Error reading prefix");
        assert_eq!(net.to_string(), "192.168.100.0/24");
        assert!(read_prefix(&mut input).is_err());
    }
}
