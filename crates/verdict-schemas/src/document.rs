//! The data-model handle
//!
//! Schema documents arrive as text; the document model turns that text
//! into data-model elements. The default wraps the engine's own reader,
//! and the handle exists so a system can swap in another materialization
//! of the same data model.
//!
//! Copyright (c) 2025 Verdict Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use verdict_core::value::reader;
use verdict_core::Element;

/// Materializes document text into data-model elements
pub trait DocumentModel: fmt::Debug + Send + Sync {
    fn read_document(&self, text: &str) -> verdict_core::Result<Vec<Element>>;
}

/// The default document model, backed by `verdict_core::value::reader`
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDocumentModel;

impl DocumentModel for TextDocumentModel {
    fn read_document(&self, text: &str) -> verdict_core::Result<Vec<Element>> {
        reader::read_document(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_reads_documents() {
        let elements = TextDocumentModel
            .read_document("range::[1, 5] day")
            .expect("document should read");
        assert_eq!(elements.len(), 2);
        assert!(elements[0].has_annotation("range"));
    }

    #[test]
    fn test_default_model_propagates_reader_errors() {
        assert!(TextDocumentModel.read_document("[1, 2").is_err());
    }
}
