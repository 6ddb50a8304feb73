// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Implementations of this trait serialize their data into a buffer
/// according to the [Binary Data Serialization].
///
/// Serialization is always in-memory and therefore infallible, so the
/// buffer is anything able to receive bytes rather than an `io::Write`.
///
/// [Binary Data Serialization]: https://core.telegram.org/mtproto/serialize
pub trait Serializable {
    /// Serializes the body into the given buffer.
    fn serialize(&self, buf: &mut impl Extend<u8>);

    /// Convenience function to serialize the object and return its bytes.
    fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        self.serialize(&mut buffer);
        buffer
    }
}

/// Serializes the boolean according to the following definitions:
///
/// * `false` is serialized as `boolFalse#bc799737 = Bool;`.
/// * `true` is serialized as `boolTrue#997275b5 = Bool;`.
impl Serializable for bool {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        if *self { 0x997275b5u32 } else { 0xbc799737u32 }.serialize(buf)
    }
}

/// Serializes the 32-bit signed integer according to `int ? = Int;`.
impl Serializable for i32 {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        buf.extend(self.to_le_bytes())
    }
}

/// Serializes the 32-bit unsigned integer according to `int ? = Int;`.
impl Serializable for u32 {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        buf.extend(self.to_le_bytes())
    }
}

/// Serializes the 64-bit signed integer according to `long ? = Long;`.
impl Serializable for i64 {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        buf.extend(self.to_le_bytes())
    }
}

/// Serializes the 128-bit integer according to `int128 4*[ int ] = Int128;`.
impl Serializable for [u8; 16] {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        buf.extend(self.iter().copied())
    }
}

/// Serializes the 256-bit integer according to `int256 8*[ int ] = Int256;`.
impl Serializable for [u8; 32] {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        buf.extend(self.iter().copied())
    }
}

/// Serializes the 64-bit floating point according to `double ? = Double;`.
impl Serializable for f64 {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        buf.extend(self.to_le_bytes())
    }
}

/// Serializes a vector of serializable items according to
/// `vector#1cb5c415 {t:Type} # [ t ] = Vector t;`.
impl<T: Serializable> Serializable for Vec<T> {
    #[allow(clippy::unreadable_literal)]
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        0x1cb5c415u32.serialize(buf);
        (self.len() as i32).serialize(buf);
        for x in self {
            x.serialize(buf);
        }
    }
}

/// Serializes a raw vector (no constructor identifier) of serializable items.
impl<T: Serializable> Serializable for crate::RawVec<T> {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        (self.0.len() as i32).serialize(buf);
        for x in self.0.iter() {
            x.serialize(buf);
        }
    }
}

/// Serializes a UTF-8 string according to `string ? = String;`.
impl Serializable for String {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.as_bytes().serialize(buf)
    }
}

/// Serializes a vector of bytes as a byte-string according to
/// `string ? = String;`.
impl Serializable for Vec<u8> {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.as_slice().serialize(buf)
    }
}

/// Serializes a byte-string according to `string ? = String;`.
///
/// Lengths below 254 fit in a single byte, longer strings use a marker
/// byte followed by the 24-bit length. Both forms pad to 4 bytes.
impl Serializable for &[u8] {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        let len = if self.len() <= 253 {
            buf.extend([self.len() as u8]);
            self.len() + 1
        } else {
            buf.extend([
                254,
                (self.len() & 0xff) as u8,
                ((self.len() >> 8) & 0xff) as u8,
                ((self.len() >> 16) & 0xff) as u8,
            ]);
            self.len()
        };

        buf.extend(self.iter().copied());
        buf.extend((0..(4 - (len % 4)) % 4).map(|_| 0));
    }
}

/// Serializes the unparsed blob as-is, with no length prefix.
impl Serializable for crate::Blob {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        buf.extend(self.0.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_bool() {
        assert_eq!(true.to_bytes(), [0xb5, 0x75, 0x72, 0x99]);
        assert_eq!(false.to_bytes(), [0x37, 0x97, 0x79, 0xbc]);
    }

    #[test]
    fn serialize_ints() {
        assert_eq!((-1i32).to_bytes(), [0xff, 0xff, 0xff, 0xff]);
        assert_eq!(1i64.to_bytes(), [1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(i32::MIN.to_bytes(), [0, 0, 0, 0x80]);
    }

    #[test]
    fn serialize_vec() {
        assert_eq!(
            Vec::<i32>::new().to_bytes(),
            [0x15, 0xc4, 0xb5, 0x1c, 0, 0, 0, 0]
        );
        assert_eq!(
            vec![0x7f_i32].to_bytes(),
            [0x15, 0xc4, 0xb5, 0x1c, 1, 0, 0, 0, 0x7f, 0, 0, 0]
        );
        assert_eq!(crate::RawVec(vec![0x7f_i32]).to_bytes(), [1, 0, 0, 0, 0x7f, 0, 0, 0]);
    }

    #[test]
    fn serialize_strings() {
        fn test_string(string: &str, prefix: &[u8], suffix: &[u8]) {
            let bytes = string.to_owned().to_bytes();
            let expected = {
                let mut tmp = prefix.to_vec();
                tmp.extend(string.as_bytes());
                tmp.extend(suffix);
                tmp
            };
            assert_eq!(bytes, expected);
        }

        test_string("", &[0x00], &[0x00, 0x00, 0x00]);
        test_string("Hi", &[0x02], &[0x00]);
        test_string("Hi!", &[0x03], &[]);
        test_string("Hello", &[0x05], &[0x00, 0x00]);
        test_string(&"x".repeat(256), &[0xfe, 0x00, 0x01, 0x00], &[]);
    }
}
