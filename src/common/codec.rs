pub use encode::*;
pub use writer::*;

use crate::common::error::{QRError, QRResult};

// Alphanumeric mode
//------------------------------------------------------------------------------

pub static MODE_INDICATOR: u16 = 0b0010;

pub static ALPHANUMERIC_CHARSET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

pub static PADDING_CODEWORDS: [u16; 2] = [0b1110_1100, 0b0001_0001];

#[inline]
fn alphanumeric_digit(char: u8) -> Option<u16> {
    match char {
        b'0'..=b'9' => Some((char - b'0') as u16),
        b'A'..=b'Z' => Some((char - b'A' + 10) as u16),
        b' ' => Some(36),
        b'$' => Some(37),
        b'%' => Some(38),
        b'*' => Some(39),
        b'+' => Some(40),
        b'-' => Some(41),
        b'.' => Some(42),
        b'/' => Some(43),
        b':' => Some(44),
        _ => None,
    }
}

// Pairs pack into 11 bits as 45 * first + second, a trailing single into 6 bits
fn encode_chunk(chunk: &[u8]) -> QRResult<u16> {
    chunk.iter().try_fold(0, |acc, &b| {
        let digit = alphanumeric_digit(b).ok_or(QRError::InvalidChar(b as char))?;
        Ok(acc * 45 + digit)
    })
}

// Uppercases ascii letters and rejects anything outside the 45 char set
pub fn normalize(data: &str) -> QRResult<Vec<u8>> {
    data.chars()
        .map(|ch| {
            let up = ch.to_ascii_uppercase();
            match u8::try_from(up) {
                Ok(b) if alphanumeric_digit(b).is_some() => Ok(b),
                _ => Err(QRError::InvalidChar(ch)),
            }
        })
        .collect()
}


// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use tracing::debug;

    use super::normalize;
    use super::writer::{
        pad_remaining_capacity, push_alphanumeric_data, push_header, push_terminator,
    };
    use crate::common::bitstream::BitStream;
    use crate::common::error::{QRError, QRResult};
    use crate::common::metadata::{ECLevel, Version};

    pub fn encode(data: &str, ecl: ECLevel) -> QRResult<(BitStream, Version)> {
        let data = normalize(data)?;
        let ver = find_version(data.len(), ecl)?;
        debug!(version = *ver, ecl = ?ecl, chars = data.len(), "Selected smallest fitting version");
        Ok((write_data(&data, ver, ecl)?, ver))
    }

    pub fn encode_with_version(data: &str, ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
        let data = normalize(data)?;
        if data.len() > ver.char_capacity(ecl) {
            return Err(QRError::DataTooLong);
        }
        write_data(&data, ver, ecl)
    }

    pub fn find_version(char_cnt: usize, ecl: ECLevel) -> QRResult<Version> {
        Version::all().find(|v| char_cnt <= v.char_capacity(ecl)).ok_or(QRError::DataTooLong)
    }

    fn write_data(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
        let mut bs = BitStream::new(ver.data_bit_capacity(ecl));
        push_header(data.len(), ver, &mut bs);
        push_alphanumeric_data(data, &mut bs)?;
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);
        Ok(bs)
    }

}

// Writer
//------------------------------------------------------------------------------

pub mod writer {
    use super::{encode_chunk, MODE_INDICATOR, PADDING_CODEWORDS};
    use crate::common::bitstream::BitStream;
    use crate::common::error::QRResult;
    use crate::common::metadata::Version;

    pub fn push_header(char_cnt: usize, ver: Version, out: &mut BitStream) {
        let len_bits = ver.char_cnt_bits();
        debug_assert!(
            char_cnt < (1 << len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
        );

        out.push_bits(MODE_INDICATOR, ver.mode_bits());
        out.push_bits(char_cnt as u16, len_bits);
    }

    // Expects normalized data
    pub fn push_alphanumeric_data(data: &[u8], out: &mut BitStream) -> QRResult<()> {
        for chunk in data.chunks(2) {
            let len = (chunk.len() * 11 + 1) / 2;
            out.push_bits(encode_chunk(chunk)?, len);
        }
        Ok(())
    }

    pub fn push_terminator(out: &mut BitStream) {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(offset == 0, "Bit offset should be zero before padding codewords: {offset}");

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

    #[cfg(test)]
    mod writer_tests {
        use super::{
            push_alphanumeric_data, push_header, push_padding_bits, push_padding_codewords,
            push_terminator, PADDING_CODEWORDS,
        };
        use crate::common::bitstream::BitStream;
        use crate::common::error::QRError;
        use crate::common::metadata::{ECLevel, Version};

        #[test]
        fn test_push_header_v1() {
            let ver = Version::new(1).unwrap();
            let mut bs = BitStream::new(ver.data_bit_capacity(ECLevel::L));
            push_header(511, ver, &mut bs);
            assert_eq!(bs.data(), [0b00101111, 0b11111000]);
        }

        #[test]
        fn test_push_header_v10() {
            let ver = Version::new(10).unwrap();
            let mut bs = BitStream::new(ver.data_bit_capacity(ECLevel::L));
            push_header(2047, ver, &mut bs);
            assert_eq!(bs.data(), [0b00101111, 0b11111110]);
        }

        #[test]
        fn test_push_alphanumeric_data() {
            let ver = Version::new(1).unwrap();
            let mut bs = BitStream::new(ver.data_bit_capacity(ECLevel::L));
            push_alphanumeric_data(b"AC-42", &mut bs).unwrap();
            assert_eq!(bs.data(), [0b00111001, 0b11011100, 0b11100100, 0b00100000]);
            assert_eq!(bs.len(), 28);
        }

        #[test]
        fn test_push_alphanumeric_data_rejects_unnormalized() {
            let ver = Version::new(1).unwrap();
            let mut bs = BitStream::new(ver.data_bit_capacity(ECLevel::L));
            let res = push_alphanumeric_data(b"AB,C", &mut bs);
            assert_eq!(res, Err(QRError::InvalidChar(',')));
        }

        #[test]
        fn test_push_terminator() {
            let ver = Version::new(1).unwrap();
            let bit_capacity = ver.data_bit_capacity(ECLevel::L);
            let capacity = (bit_capacity + 7) >> 3;
            let mut bs = BitStream::new(bit_capacity);
            bs.push_bits(0b1, 1);
            push_terminator(&mut bs);
            assert_eq!(bs.data(), [0b10000000]);
            assert_eq!(bs.len() & 7, 5);
            for _ in 0..capacity - 1 {
                bs.push_bits(0b11111111, 8);
            }
            // Only 3 bits of room left, so the terminator is truncated
            push_terminator(&mut bs);
            assert_eq!(bs.len(), bit_capacity);
        }

        #[test]
        fn test_push_padding_bits() {
            let ver = Version::new(1).unwrap();
            let mut bs = BitStream::new(ver.data_bit_capacity(ECLevel::L));
            bs.push_bits(1, 1);
            push_padding_bits(&mut bs);
            assert_eq!(bs.data(), [0b10000000]);
            assert_eq!(bs.len() & 7, 0);
        }

        #[test]
        fn test_push_padding_codewords() {
            let ver = Version::new(1).unwrap();
            let mut bs = BitStream::new(ver.data_bit_capacity(ECLevel::L));
            bs.push_bits(1, 1);
            push_padding_bits(&mut bs);
            push_padding_codewords(&mut bs);
            let mut output = vec![0b10000000];
            output.extend(PADDING_CODEWORDS.iter().map(|&pc| pc as u8).cycle().take(18));
            assert_eq!(bs.data(), output);
        }
    }
}
