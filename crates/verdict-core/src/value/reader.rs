//! Text reader for structured-value documents
//!
//! Materializes the textual form of a schema document into a sequence of
//! data-model [`Element`]s: scalars, annotations (`a::b::value`), strings,
//! symbols, blobs and clobs, lists, bags, structs, and `//` line comments.
//! What those elements *mean* as schema definitions is decided elsewhere;
//! this module only reads them.
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::value::{Decimal, Element, Struct, Timestamp, Value};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Read a whole document into its top-level elements
pub fn read_document(text: &str) -> Result<Vec<Element>> {
    Reader::new(text).read_document()
}

/// Recursive-descent reader over the document bytes.
///
/// Scanning is byte-oriented; non-ASCII input is only meaningful inside
/// string and clob literals, where it passes through unchanged.
struct Reader<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Reader<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    fn read_document(mut self) -> Result<Vec<Element>> {
        let mut elements = Vec::new();
        loop {
            self.skip_trivia();
            if self.peek().is_none() {
                return Ok(elements);
            }
            elements.push(self.read_element()?);
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.position).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.position + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.position += 1;
        Some(byte)
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.source[self.position..].starts_with(prefix)
    }

    fn error<M: Into<String>>(&self, message: M) -> Error {
        Error::invalid_document(format!(
            "{} at offset {}",
            message.into(),
            self.position
        ))
    }

    /// Skip whitespace and `//` line comments
    fn skip_trivia(&mut self) {
        loop {
            while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
                self.position += 1;
            }
            if self.starts_with("//") {
                while !matches!(self.peek(), None | Some(b'\n')) {
                    self.position += 1;
                }
            } else {
                return;
            }
        }
    }

    /// An annotated or bare value
    fn read_element(&mut self) -> Result<Element> {
        let mut annotations = Vec::new();
        loop {
            self.skip_trivia();
            match self.try_read_annotation() {
                Some(annotation) => annotations.push(annotation),
                None => break,
            }
        }
        let value = self.read_value()?;
        Ok(Element::with_annotations(value, annotations))
    }

    /// Consume `identifier ::` if that is what comes next
    fn try_read_annotation(&mut self) -> Option<String> {
        if !self.peek().is_some_and(is_identifier_start) {
            return None;
        }
        let bytes = self.bytes();
        let mut end = self.position;
        while bytes.get(end).copied().is_some_and(is_identifier_part) {
            end += 1;
        }
        let mut after = end;
        while matches!(bytes.get(after), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            after += 1;
        }
        if !self.source[after..].starts_with("::") {
            return None;
        }
        let annotation = self.source[self.position..end].to_string();
        self.position = after + 2;
        Some(annotation)
    }

    fn read_value(&mut self) -> Result<Value> {
        match self.peek() {
            None => Err(self.error("unexpected end of document, expected a value")),
            Some(b'[') => self.read_list(),
            Some(b'(') => self.read_bag(),
            Some(b'{') if self.peek_at(1) == Some(b'{') => self.read_lob(),
            Some(b'{') => self.read_struct(),
            Some(b'"') => Ok(Value::String(self.read_string()?)),
            Some(b'-' | b'+' | b'0'..=b'9') => self.read_number_or_timestamp(),
            Some(c) if is_identifier_start(c) => Ok(self.read_keyword_or_symbol()),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c as char))),
        }
    }

    fn read_keyword_or_symbol(&mut self) -> Value {
        let start = self.position;
        while self.peek().is_some_and(is_identifier_part) {
            self.position += 1;
        }
        match &self.source[start..self.position] {
            "null" => Value::Null,
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            symbol => Value::Symbol(symbol.to_string()),
        }
    }

    /// Scan the maximal numeric-looking token, then decide what it is.
    ///
    /// Four digits followed by `-` or `T` make a timestamp; a `d` or `.`
    /// makes a decimal; an `e` makes a float; anything else is an int.
    fn read_number_or_timestamp(&mut self) -> Result<Value> {
        let start = self.position;
        while self.peek().is_some_and(|c| {
            c.is_ascii_digit()
                || matches!(c, b'.' | b'-' | b'+' | b':' | b'T' | b'Z' | b'd' | b'D' | b'e' | b'E')
        }) {
            self.position += 1;
        }
        let token = &self.source[start..self.position];
        let bytes = token.as_bytes();
        let is_timestamp = bytes.len() >= 5
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && matches!(bytes[4], b'-' | b'T');
        if is_timestamp {
            return Ok(Value::Timestamp(Timestamp::parse(token)?));
        }
        if token.contains(['e', 'E']) {
            return token
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| self.error(format!("'{}' is not a float", token)));
        }
        if token.contains(['.', 'd', 'D']) {
            return Ok(Value::Decimal(token.parse::<Decimal>()?));
        }
        token
            .parse::<i128>()
            .map(Value::Int)
            .map_err(|_| self.error(format!("'{}' is not an int", token)))
    }

    fn read_string(&mut self) -> Result<String> {
        self.bump(); // opening quote
        let mut bytes = Vec::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(b'"') => break,
                Some(b'\\') => match self.bump() {
                    Some(b'"') => bytes.push(b'"'),
                    Some(b'\\') => bytes.push(b'\\'),
                    Some(b'/') => bytes.push(b'/'),
                    Some(b'n') => bytes.push(b'\n'),
                    Some(b't') => bytes.push(b'\t'),
                    Some(b'r') => bytes.push(b'\r'),
                    Some(b'0') => bytes.push(0),
                    Some(c) => {
                        return Err(
                            self.error(format!("unknown escape sequence '\\{}'", c as char))
                        )
                    }
                    None => return Err(self.error("unterminated string")),
                },
                Some(byte) => bytes.push(byte),
            }
        }
        String::from_utf8(bytes).map_err(|_| self.error("string is not valid UTF-8"))
    }

    fn read_list(&mut self) -> Result<Value> {
        self.bump(); // '['
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => return Err(self.error("unterminated list")),
                Some(b']') => {
                    self.bump();
                    return Ok(Value::List(items));
                }
                _ => {
                    items.push(self.read_element()?);
                    self.skip_trivia();
                    if self.peek() == Some(b',') {
                        self.bump();
                    } else if self.peek() != Some(b']') {
                        return Err(self.error("expected ',' or ']' in list"));
                    }
                }
            }
        }
    }

    fn read_bag(&mut self) -> Result<Value> {
        self.bump(); // '('
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => return Err(self.error("unterminated bag")),
                Some(b')') => {
                    self.bump();
                    return Ok(Value::Bag(items));
                }
                Some(b',') => {
                    self.bump();
                }
                _ => items.push(self.read_element()?),
            }
        }
    }

    fn read_struct(&mut self) -> Result<Value> {
        self.bump(); // '{'
        let mut fields = Struct::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => return Err(self.error("unterminated struct")),
                Some(b'}') => {
                    self.bump();
                    return Ok(Value::Struct(fields));
                }
                _ => {
                    let name = self.read_field_name()?;
                    self.skip_trivia();
                    if self.bump() != Some(b':') {
                        return Err(self.error(format!("expected ':' after field '{}'", name)));
                    }
                    fields.push(name, self.read_element()?);
                    self.skip_trivia();
                    if self.peek() == Some(b',') {
                        self.bump();
                    } else if self.peek() != Some(b'}') {
                        return Err(self.error("expected ',' or '}' in struct"));
                    }
                }
            }
        }
    }

    fn read_field_name(&mut self) -> Result<String> {
        match self.peek() {
            Some(b'"') => self.read_string(),
            Some(c) if is_identifier_start(c) => {
                let start = self.position;
                while self.peek().is_some_and(is_identifier_part) {
                    self.position += 1;
                }
                Ok(self.source[start..self.position].to_string())
            }
            _ => Err(self.error("expected a field name")),
        }
    }

    /// `{{ base64 }}` blob or `{{ "text" }}` clob
    fn read_lob(&mut self) -> Result<Value> {
        self.position += 2; // '{{'
        self.skip_trivia();
        if self.peek() == Some(b'"') {
            let text = self.read_string()?;
            self.skip_trivia();
            if !self.starts_with("}}") {
                return Err(self.error("expected '}}' after clob"));
            }
            self.position += 2;
            return Ok(Value::Clob(text.into_bytes()));
        }
        let start = self.position;
        while !self.starts_with("}}") {
            if self.bump().is_none() {
                return Err(self.error("unterminated blob"));
            }
        }
        let encoded: String = self.source[start..self.position]
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        self.position += 2;
        BASE64
            .decode(&encoded)
            .map(Value::Blob)
            .map_err(|e| self.error(format!("blob is not valid base64: {}", e)))
    }
}

fn is_identifier_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte == b'$'
}

fn is_identifier_part(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Precision;

    fn one(text: &str) -> Element {
        let mut elements = read_document(text).expect("document should read");
        assert_eq!(elements.len(), 1, "expected one element in {:?}", text);
        elements.remove(0)
    }

    #[test]
    fn test_scalars() {
        assert_eq!(one("null").value(), &Value::Null);
        assert_eq!(one("true").value(), &Value::Bool(true));
        assert_eq!(one("-42").value(), &Value::Int(-42));
        assert_eq!(one("1.5").value(), &Value::Decimal("1.5".parse().unwrap()));
        assert_eq!(one("2e3").value(), &Value::Float(2000.0));
        assert_eq!(one("word").value(), &Value::Symbol("word".to_string()));
        assert_eq!(
            one("\"a\\nb\"").value(),
            &Value::String("a\nb".to_string())
        );
    }

    #[test]
    fn test_timestamps_are_not_ints() {
        match one("2020-01-01T10:00Z").value() {
            Value::Timestamp(t) => assert_eq!(t.precision(), Precision::Minute),
            other => panic!("expected a timestamp, got {:?}", other),
        }
        assert_eq!(one("2020").value(), &Value::Int(2020));
        match one("2020T").value() {
            Value::Timestamp(t) => assert_eq!(t.precision(), Precision::Year),
            other => panic!("expected a timestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_annotations() {
        let element = one("exclusive::5");
        assert!(element.has_annotation("exclusive"));
        assert_eq!(element.value(), &Value::Int(5));

        let element = one("a::b::day");
        assert_eq!(element.annotations(), ["a", "b"]);
        assert_eq!(element.value(), &Value::Symbol("day".to_string()));
    }

    #[test]
    fn test_containers() {
        let list = one("[1, exclusive::2, 3]");
        match list.value() {
            Value::List(items) => {
                assert_eq!(items.len(), 3);
                assert!(items[1].has_annotation("exclusive"));
            }
            other => panic!("expected a list, got {:?}", other),
        }
        match one("(1 2 3)").value() {
            Value::Bag(items) => assert_eq!(items.len(), 3),
            other => panic!("expected a bag, got {:?}", other),
        }
        match one("{a: 1, a: 2, b: \"x\"}").value() {
            Value::Struct(fields) => {
                assert_eq!(fields.len(), 3);
                assert_eq!(fields.get_all("a").count(), 2);
            }
            other => panic!("expected a struct, got {:?}", other),
        }
    }

    #[test]
    fn test_lobs() {
        assert_eq!(one("{{AQID}}").value(), &Value::Blob(vec![1, 2, 3]));
        assert_eq!(one("{{AQ ID}}").value(), &Value::Blob(vec![1, 2, 3]));
        assert_eq!(
            one("{{\"text\"}}").value(),
            &Value::Clob(b"text".to_vec())
        );
    }

    #[test]
    fn test_comments_and_multiple_top_level_values() {
        let elements = read_document(
            "// header comment\n1 // trailing\n[2] // done\n",
        )
        .expect("document should read");
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].value(), &Value::Int(1));
    }

    #[test]
    fn test_malformed_documents() {
        assert!(read_document("\"unterminated").is_err());
        assert!(read_document("[1, 2").is_err());
        assert!(read_document("{a 1}").is_err());
        assert!(read_document("{{not base64!}}").is_err());
        assert!(read_document("@").is_err());
        assert!(read_document("1..2").is_err());
    }
}
