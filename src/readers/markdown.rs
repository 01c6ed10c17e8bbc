//! Line-by-line scanning of documents into fenced blocks.

use std::io::BufRead;
use std::sync::Arc;

use crate::model::{CodeBlock, CodeLine};
use crate::text_location::TextLocation;

use super::fence::{parse_header, Fence, FenceHeader, HeaderKind};

/// A closed, classified fence ready to be committed to a block table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedBlock {
    /// Target table and key.
    pub kind: HeaderKind,
    /// Whether to extend the existing block instead of replacing it.
    pub append: bool,
    /// The fenced lines, opening and closing delimiters excluded.
    pub block: CodeBlock,
}

#[derive(Debug)]
enum State {
    Outside,
    Inside {
        fence: Fence,
        /// `None` for anonymous fences: scanned for the close, content dropped.
        header: Option<FenceHeader>,
        language: Option<Arc<str>>,
        block: CodeBlock,
    },
}

/// Two-state scanner over the lines of one document.
///
/// Line numbers count every physical line fed, inside fences or not, so the
/// provenance of a code line always matches the document.
#[derive(Debug)]
pub struct DocumentScanner {
    document: Arc<str>,
    line_number: usize,
    state: State,
    scanned: Vec<ScannedBlock>,
}

impl DocumentScanner {
    /// Creates a scanner for the document identified by `document`.
    pub fn new(document: impl Into<Arc<str>>) -> Self {
        Self {
            document: document.into(),
            line_number: 0,
            state: State::Outside,
            scanned: Vec::new(),
        }
    }

    /// Feeds the next physical line, terminator included.
    pub fn feed(&mut self, line: &str) {
        self.line_number += 1;

        if let State::Inside { fence, .. } = &self.state {
            if fence.is_closed_by(line) {
                if let State::Inside { header, block, .. } =
                    std::mem::replace(&mut self.state, State::Outside)
                {
                    self.close(header, block);
                }
                return;
            }
        }

        if let State::Inside {
            language, block, ..
        } = &mut self.state
        {
            let location = TextLocation::new(self.document.clone(), self.line_number);
            block.push(CodeLine::new(line, location, language.clone()));
            return;
        }

        if let Some(fence) = Fence::opening(line) {
            let header = parse_header(line);
            let language = header
                .as_ref()
                .and_then(|h| h.language.as_deref())
                .map(Arc::from);
            self.state = State::Inside {
                fence: header.as_ref().map(|h| h.fence).unwrap_or(fence),
                header,
                language,
                block: CodeBlock::new(),
            };
        }
    }

    fn close(&mut self, header: Option<FenceHeader>, block: CodeBlock) {
        let Some(header) = header else {
            return;
        };
        tracing::debug!(
            "{}:{}: closed {:?} ({} lines{})",
            self.document,
            self.line_number,
            header.kind,
            block.len(),
            if header.append { ", appending" } else { "" }
        );
        self.scanned.push(ScannedBlock {
            kind: header.kind,
            append: header.append,
            block,
        });
    }

    /// Ends the scan and returns the closed blocks in document order.
    ///
    /// A fence still open at the end of the document is dropped.
    pub fn finish(self) -> Vec<ScannedBlock> {
        if let State::Inside { header, .. } = &self.state {
            tracing::debug!(
                "{}: fence {:?} not closed before end of document, discarded",
                self.document,
                header.as_ref().map(|h| &h.kind)
            );
        }
        self.scanned
    }
}

/// Scans a whole in-memory document.
pub fn scan_document(text: &str, document: impl Into<Arc<str>>) -> Vec<ScannedBlock> {
    let mut scanner = DocumentScanner::new(document);
    for line in text.split_inclusive('\n') {
        scanner.feed(line);
    }
    scanner.finish()
}

/// Scans a document from a reader.
///
/// Fails if the reader fails, including on invalid UTF-8; nothing scanned so
/// far is returned in that case.
pub fn scan_reader<R: BufRead>(
    mut reader: R,
    document: impl Into<Arc<str>>,
) -> std::io::Result<Vec<ScannedBlock>> {
    let mut scanner = DocumentScanner::new(document);
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        scanner.feed(&line);
    }
    Ok(scanner.finish())
}
