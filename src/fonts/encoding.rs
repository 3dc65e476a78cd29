//! WinAnsi text encoding for the standard Helvetica font.
//!
//! Base-14 fonts are single-byte fonts. Words are encoded as WinAnsi
//! (Windows-1252); characters outside that code page are replaced by `?`.

/// Byte used for characters WinAnsi cannot represent.
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Map a Unicode codepoint to its WinAnsi byte.
///
/// 0x00-0x7F and 0xA0-0xFF map directly. The 0x80-0x9F range holds
/// typographic characters that differ from Latin-1.
pub fn unicode_to_winansi(codepoint: u32) -> Option<u8> {
    if codepoint < 0x80 || (0xA0..=0xFF).contains(&codepoint) {
        return Some(codepoint as u8);
    }

    match codepoint {
        0x20AC => Some(0x80), // Euro sign
        0x201A => Some(0x82), // Single low-9 quotation mark
        0x0192 => Some(0x83), // Latin small letter f with hook
        0x201E => Some(0x84), // Double low-9 quotation mark
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86), // Dagger
        0x2021 => Some(0x87), // Double dagger
        0x02C6 => Some(0x88), // Modifier letter circumflex accent
        0x2030 => Some(0x89), // Per mille sign
        0x0160 => Some(0x8A), // Latin capital letter S with caron
        0x2039 => Some(0x8B), // Single left-pointing angle quotation mark
        0x0152 => Some(0x8C), // Latin capital ligature OE
        0x017D => Some(0x8E), // Latin capital letter Z with caron
        0x2018 => Some(0x91), // Left single quotation mark
        0x2019 => Some(0x92), // Right single quotation mark
        0x201C => Some(0x93), // Left double quotation mark
        0x201D => Some(0x94), // Right double quotation mark
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x02DC => Some(0x98), // Small tilde
        0x2122 => Some(0x99), // Trade mark sign
        0x0161 => Some(0x9A), // Latin small letter s with caron
        0x203A => Some(0x9B), // Single right-pointing angle quotation mark
        0x0153 => Some(0x9C), // Latin small ligature oe
        0x017E => Some(0x9E), // Latin small letter z with caron
        0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
        _ => None,
    }
}

/// Text encoded as WinAnsi bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinAnsiText {
    /// One byte per input character
    pub bytes: Vec<u8>,
    /// Characters that were replaced by [`REPLACEMENT_BYTE`]
    pub replaced: Vec<char>,
}

/// Encode `text` as WinAnsi, replacing unsupported characters.
///
/// ```
/// use krucindiko::fonts::encoding::encode_winansi;
///
/// let encoded = encode_winansi("ĉevalo");
/// assert_eq!(encoded.bytes, b"?evalo");
/// assert_eq!(encoded.replaced, vec!['ĉ']);
/// ```
pub fn encode_winansi(text: &str) -> WinAnsiText {
    let mut bytes = Vec::with_capacity(text.len());
    let mut replaced = Vec::new();

    for ch in text.chars() {
        match unicode_to_winansi(ch as u32) {
            Some(byte) => bytes.push(byte),
            None => {
                bytes.push(REPLACEMENT_BYTE);
                replaced.push(ch);
            },
        }
    }

    WinAnsiText { bytes, replaced }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winansi_mapping() {
        assert_eq!(unicode_to_winansi('A' as u32), Some(0x41));
        assert_eq!(unicode_to_winansi('é' as u32), Some(0xE9));
        assert_eq!(unicode_to_winansi('€' as u32), Some(0x80));
        assert_eq!(unicode_to_winansi('š' as u32), Some(0x9A));
        assert_eq!(unicode_to_winansi(0x81), None);
        assert_eq!(unicode_to_winansi('ŝ' as u32), None);
    }

    #[test]
    fn test_encode_plain() {
        let encoded = encode_winansi("kato");
        assert_eq!(encoded.bytes, b"kato");
        assert!(encoded.replaced.is_empty());
    }

    #[test]
    fn test_encode_esperanto_letters() {
        let encoded = encode_winansi("ĝis ŭaŭ");
        assert_eq!(encoded.bytes, b"?is ?a?");
        assert_eq!(encoded.replaced, vec!['ĝ', 'ŭ', 'ŭ']);
    }

    #[test]
    fn test_encode_latin1() {
        let encoded = encode_winansi("café");
        assert_eq!(encoded.bytes, vec![b'c', b'a', b'f', 0xE9]);
    }
}
