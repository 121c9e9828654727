//! Encoding of diagram source into a rendering service URL.
//!
//! The source is compressed with raw DEFLATE and written with the 64-symbol
//! alphabet PlantUML servers expect (`0-9A-Za-z-_`), without padding.

use std::io::{self, Write};

use base64::{
    Engine,
    alphabet::Alphabet,
    engine::{GeneralPurpose, general_purpose},
};
use flate2::{Compression, write::DeflateEncoder};

const PLANTUML_ALPHABET: Alphabet =
    match Alphabet::new("0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_") {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("PlantUML alphabet must have 64 unique symbols"),
    };

const PLANTUML_ENGINE: GeneralPurpose =
    GeneralPurpose::new(&PLANTUML_ALPHABET, general_purpose::NO_PAD);

/// Compresses and encodes `source` for embedding in a URL.
///
/// The output depends only on `source` and contains only URL-safe characters.
pub fn encode_source(source: &str) -> io::Result<String> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(source.as_bytes())?;
    let compressed = encoder.finish()?;
    Ok(PLANTUML_ENGINE.encode(compressed))
}

/// Builds the request URL for `source` below `base_url`.
///
/// ```
/// # use umlgen::strategy::request_url;
/// let url = request_url("http://localhost:8080/img/", "@startuml\nA -> B\n@enduml").unwrap();
/// assert!(url.starts_with("http://localhost:8080/img/"));
/// ```
pub fn request_url(base_url: &str, source: &str) -> io::Result<String> {
    Ok(format!("{base_url}{}", encode_source(source)?))
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use flate2::read::DeflateDecoder;

    use super::*;

    const SOURCE: &str = "@startuml\nactor User\nUser -> App : turn on the light\n@enduml\n";

    #[test]
    fn test_encoding_is_deterministic() {
        assert_eq!(encode_source(SOURCE).unwrap(), encode_source(SOURCE).unwrap());
        assert_ne!(
            encode_source(SOURCE).unwrap(),
            encode_source("@startuml\n@enduml\n").unwrap()
        );
    }

    #[test]
    fn test_encoding_uses_url_safe_alphabet() {
        let encoded = encode_source(SOURCE).unwrap();
        assert!(!encoded.is_empty());
        assert!(
            encoded
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "unexpected character in {encoded}"
        );
    }

    #[test]
    fn test_encoding_decodes_to_source() {
        let encoded = encode_source(SOURCE).unwrap();

        let compressed = PLANTUML_ENGINE.decode(encoded).unwrap();
        let mut decoded = String::new();
        DeflateDecoder::new(compressed.as_slice())
            .read_to_string(&mut decoded)
            .unwrap();

        assert_eq!(decoded, SOURCE);
    }

    #[test]
    fn test_request_url_appends_to_base() {
        let url = request_url("http://www.plantuml.com/plantuml/img/", SOURCE).unwrap();
        assert_eq!(
            url,
            format!(
                "http://www.plantuml.com/plantuml/img/{}",
                encode_source(SOURCE).unwrap()
            )
        );
    }
}
