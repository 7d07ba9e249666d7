use base64::engine::general_purpose::STANDARD;
use base64::{DecodeError, Engine};
use flate2::read::GzDecoder;
use flate2::{Decompress, FlushDecompress, Status};
use std::io::Read;

pub const INFLATE_ERROR: &str = "Not a valid gzipped JSON file";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD.decode(encoded.trim())
}

/// Outcome of inflating a payload. `err` is empty on success, in which case
/// `data` holds the text (possibly empty). On failure `data` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inflated {
    pub err: String,
    pub data: String,
}

impl Inflated {
    fn ok(data: String) -> Self {
        Self {
            err: String::new(),
            data,
        }
    }

    fn failed() -> Self {
        Self {
            err: INFLATE_ERROR.to_string(),
            data: String::new(),
        }
    }

    pub fn is_err(&self) -> bool {
        !self.err.is_empty()
    }

    pub fn into_result(self) -> Result<String, String> {
        if self.is_err() {
            Err(self.err)
        } else {
            Ok(self.data)
        }
    }
}

/// Decompresses a gzip or zlib stream into UTF-8 text. Never panics on bad input.
pub fn inflate_payload(bytes: &[u8]) -> Inflated {
    match inflate_text(bytes) {
        Some(text) => Inflated::ok(text),
        None => {
            tracing::debug!("Inflate failed for {} byte payload", bytes.len());
            Inflated::failed()
        }
    }
}

fn inflate_text(bytes: &[u8]) -> Option<String> {
    let raw = if bytes.starts_with(&GZIP_MAGIC) {
        let mut raw = Vec::new();
        GzDecoder::new(bytes).read_to_end(&mut raw).ok()?;
        raw
    } else {
        inflate_zlib(bytes)?
    };
    String::from_utf8(raw).ok()
}

/// Inflates a zlib stream, failing unless the stream's end marker is reached.
fn inflate_zlib(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(bytes.len().saturating_mul(4).max(64));

    loop {
        let consumed = usize::try_from(inflater.total_in()).ok()?;
        let input = bytes.get(consumed..)?;
        match inflater
            .decompress_vec(input, &mut out, FlushDecompress::Finish)
            .ok()?
        {
            Status::StreamEnd => return Some(out),
            Status::Ok | Status::BufError if out.len() == out.capacity() => {
                out.reserve(out.capacity());
            }
            // input exhausted before the end of the stream
            Status::Ok | Status::BufError => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::{GzEncoder, ZlibEncoder};
    use flate2::Compression;
    use std::io::Write;

    fn gzip(text: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    fn zlib(text: &str) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    fn large_text() -> String {
        (0..6000)
            .map(|i| format!("target lvl={} resist=0.1 hp={};\n", i % 100, i * 37))
            .collect()
    }

    fn edge_byte_inputs() -> Vec<Vec<u8>> {
        let mut pseudo_random = Vec::with_capacity(70_000);
        let mut state: u32 = 0x9e37_79b9;
        for _ in 0..70_000 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            pseudo_random.push(state as u8);
        }

        vec![
            Vec::new(),
            vec![0x00],
            vec![0xff],
            (0..=255).collect(),
            pseudo_random,
        ]
    }

    #[test]
    fn test_decode_base64_round_trip() {
        for bytes in edge_byte_inputs() {
            let encoded = STANDARD.encode(&bytes);
            assert_eq!(decode_base64(&encoded).unwrap(), bytes, "length {}", bytes.len());
        }
        assert_eq!(decode_base64("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_base64_rejects_malformed_input() {
        assert!(decode_base64("not base64!").is_err());
        assert!(decode_base64("QUJD=").is_err());
        assert!(decode_base64("QQ=A").is_err());
    }

    #[test]
    fn test_inflate_gzip_and_zlib() {
        let text = r#"{"config_file":{"team":["Bennett"]}}"#;

        let inflated = inflate_payload(&gzip(text));
        assert!(!inflated.is_err());
        assert_eq!(inflated.data, text);

        let inflated = inflate_payload(&zlib(text));
        assert_eq!(inflated.into_result().unwrap(), text);
    }

    #[test]
    fn test_inflate_edge_texts() {
        let all_chars: String = (0u32..=0x2ff).filter_map(char::from_u32).collect();
        let large = large_text();
        assert!(large.len() > 64 * 1024);

        for text in ["", "x", "{}", all_chars.as_str(), large.as_str()] {
            for bytes in [gzip(text), zlib(text)] {
                let inflated = inflate_payload(&bytes);
                assert_eq!(inflated.err, "", "length {}", text.len());
                assert_eq!(inflated.data, text);
            }
        }
    }

    #[test]
    fn test_inflate_empty_text_is_success() {
        let inflated = inflate_payload(&gzip(""));
        assert!(!inflated.is_err());
        assert_eq!(inflated.err, "");
        assert_eq!(inflated.data, "");
    }

    #[test]
    fn test_inflate_short_inputs_never_panic() {
        for a in 0..=255u8 {
            assert!(inflate_payload(&[a]).is_err());
            for b in 0..=255u8 {
                let inflated = inflate_payload(&[a, b]);
                assert!(inflated.is_err(), "bytes {:02x} {:02x}", a, b);
                assert!(inflated.data.is_empty());
            }
        }
    }

    #[test]
    fn test_inflate_truncated_zlib() {
        let bytes = zlib(&large_text());
        for cut in [2, 3, bytes.len() / 2, bytes.len() - 1] {
            assert_eq!(inflate_payload(&bytes[..cut]).err, INFLATE_ERROR, "cut {}", cut);
        }
    }

    #[test]
    fn test_inflate_preserves_unicode() {
        let text = "{\"config_file\":\"胡桃 char lvl=90/90;\"}";
        assert_eq!(inflate_payload(&gzip(text)).data, text);
    }

    #[test]
    fn test_inflate_rejects_garbage() {
        let cases: Vec<Vec<u8>> = vec![
            Vec::new(),
            b"plainly not compressed".to_vec(),
            vec![0x1f, 0x8b, 0x08, 0x00, 0xff],
            gzip("truncated payload")[..10].to_vec(),
            edge_byte_inputs().pop().unwrap(),
        ];

        for bytes in cases {
            let inflated = inflate_payload(&bytes);
            assert_eq!(inflated.err, INFLATE_ERROR);
            assert!(inflated.data.is_empty());
        }
    }

    #[test]
    fn test_inflate_rejects_invalid_utf8() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&[0xff, 0xfe, 0xfd]).unwrap();
        let bytes = encoder.finish().unwrap();

        let inflated = inflate_payload(&bytes);
        assert!(inflated.is_err());
        assert_eq!(inflated.into_result().unwrap_err(), INFLATE_ERROR);
    }
}
