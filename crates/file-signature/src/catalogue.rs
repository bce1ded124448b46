//! One-call inspection over the built-in registries.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builtin;
use crate::error::ParserError;
use crate::output::{FileInfo, ParserOutput};
use crate::parser::{self, ParserRegistry};
use crate::registry::SignatureRegistry;
use crate::signature::{SignatureError, SignatureMatch};

/// Signature registry and parser registry, built together and shared
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct Catalogue {
    signatures: SignatureRegistry,
    parsers: ParserRegistry,
}

impl Catalogue {
    pub fn new(signatures: SignatureRegistry, parsers: ParserRegistry) -> Self {
        Self { signatures, parsers }
    }

    /// Build both registries from the static tables.
    pub fn builtin() -> Result<Self, SignatureError> {
        let catalogue = Self::new(builtin::builtin()?, parser::builtin()?);
        debug!(
            signatures = catalogue.signatures.len(),
            parsers = catalogue.parsers.len(),
            "catalogue ready"
        );
        Ok(catalogue)
    }

    pub fn signatures(&self) -> &SignatureRegistry {
        &self.signatures
    }

    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    /// Run the matcher and the parser dispatch over `buffer`.
    pub fn inspect(&self, buffer: &[u8], info: &FileInfo) -> Inspection {
        let mut matches = self.signatures.find_all_matches(buffer).into_iter();
        let signature = matches.next();
        let alternatives: Vec<SignatureMatch> = matches.collect();

        let parsed = match self.parsers.dispatch(buffer, info) {
            Ok(output) => ParseOutcome::Parsed(output),
            Err(e) if e.is_unknown_format() => ParseOutcome::Unrecognised,
            Err(e) => ParseOutcome::Failed(e),
        };

        Inspection {
            file: info.clone(),
            signature,
            alternatives,
            parsed,
        }
    }
}

/// What the parser stage produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ParseOutcome {
    Parsed(ParserOutput),
    Failed(ParserError),
    /// No parser recognised the buffer.
    Unrecognised,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inspection {
    pub file: FileInfo,
    /// Best catalogue match.
    pub signature: Option<SignatureMatch>,
    /// Remaining catalogue matches, most specific first.
    pub alternatives: Vec<SignatureMatch>,
    pub parsed: ParseOutcome,
}

impl Inspection {
    /// Neither the catalogue nor any parser recognised the buffer.
    pub fn is_unknown(&self) -> bool {
        self.signature.is_none() && matches!(self.parsed, ParseOutcome::Unrecognised)
    }

    pub fn output(&self) -> Option<&ParserOutput> {
        match &self.parsed {
            ParseOutcome::Parsed(output) => Some(output),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ParserError> {
        match &self.parsed {
            ParseOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Display name: the parsed format if a parser ran, otherwise the best
    /// catalogue match.
    pub fn format_name(&self) -> Option<&str> {
        self.output()
            .map(|o| o.file.format.as_str())
            .or_else(|| self.signature.as_ref().map(|s| s.name.as_str()))
    }

    /// The match whose bytes should be highlighted.
    pub fn highlighted(&self) -> Option<&SignatureMatch> {
        self.output()
            .map(|o| &o.signature)
            .or(self.signature.as_ref())
    }
}
