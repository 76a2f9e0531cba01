//! Byte-level decoding of CSV fields.

use std::borrow::Cow;

use retail_model::SourceEncoding;

/// Cell values treated as missing after trimming.
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode raw field bytes with the given source encoding.
pub fn decode_field(bytes: &[u8], encoding: SourceEncoding) -> Cow<'_, str> {
    match encoding {
        // Every ISO-8859-1 byte is the Unicode code point of the same value.
        SourceEncoding::Latin1 => {
            if bytes.is_ascii() {
                String::from_utf8_lossy(bytes)
            } else {
                Cow::Owned(bytes.iter().map(|&byte| char::from(byte)).collect())
            }
        }
        SourceEncoding::Utf8 => String::from_utf8_lossy(bytes),
    }
}

/// Decode a header name, dropping a leading byte-order mark.
pub fn decode_header(bytes: &[u8], encoding: SourceEncoding) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    decode_field(bytes, encoding)
        .trim()
        .trim_matches('\u{feff}')
        .to_string()
}

pub fn is_missing_token(value: &str) -> bool {
    MISSING_TOKENS.contains(&value)
}

/// Trim a decoded cell and map missing tokens to `None`.
pub fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if is_missing_token(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Make header names usable as frame column names.
///
/// Blank headers become `Unnamed: <idx>`; repeated names get a `.<n>`
/// suffix in order of appearance.
pub fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(raw.len());
    for (idx, name) in raw.into_iter().enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name
        };
        let mut candidate = base.clone();
        let mut suffix = 1usize;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.push(candidate);
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_maps_high_bytes() {
        let decoded = decode_field(b"Caf\xe9", SourceEncoding::Latin1);
        assert_eq!(decoded, "Café");
        let pound = decode_field(b"\xa3", SourceEncoding::Latin1);
        assert_eq!(pound, "£");
    }

    #[test]
    fn utf8_replaces_invalid_bytes() {
        let decoded = decode_field(b"Caf\xe9", SourceEncoding::Utf8);
        assert_eq!(decoded, "Caf\u{fffd}");
    }

    #[test]
    fn header_bom_is_removed() {
        assert_eq!(
            decode_header(b"\xef\xbb\xbfInvoiceNo", SourceEncoding::Latin1),
            "InvoiceNo"
        );
        assert_eq!(
            decode_header(b"\xef\xbb\xbfInvoiceNo", SourceEncoding::Utf8),
            "InvoiceNo"
        );
    }

    #[test]
    fn missing_tokens_become_none() {
        assert_eq!(normalize_cell("  "), None);
        assert_eq!(normalize_cell("NaN"), None);
        assert_eq!(normalize_cell("n/a"), None);
        assert_eq!(normalize_cell(" UK "), Some("UK".to_string()));
        assert_eq!(normalize_cell("Nancy"), Some("Nancy".to_string()));
    }

    #[test]
    fn headers_are_made_unique() {
        let headers = unique_headers(vec![
            "A".to_string(),
            String::new(),
            "A".to_string(),
            "A".to_string(),
        ]);
        assert_eq!(headers, vec!["A", "Unnamed: 1", "A.1", "A.2"]);
    }
}
