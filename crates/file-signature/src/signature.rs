//! Signature patterns and the per-signature match predicate.
//!
//! A signature is authored as a string of two-character hex groups, where
//! `??` stands for a byte that may take any value:
//!
//! ```text
//! FF D8 FF E1 ?? ?? 45 78 69 66 00
//! ```
//!
//! Whitespace is insignificant.  The pattern is anchored at a fixed offset
//! (default 0) and compared byte-for-byte; there is no searching.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token used in pattern strings for "any byte".
pub const WILDCARD_TOKEN: &str = "??";

//  Pattern element

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternElement {
    Literal(u8),
    Wildcard,
}

impl PatternElement {
    pub fn is_wildcard(self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

//  Error

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Signature pattern for '{name}' is empty")]
    EmptyPattern { name: String },

    #[error(
        "Invalid signature pattern '{pattern}': group '{group}' at byte {index} is neither a hex byte nor '??'"
    )]
    InvalidGroup {
        pattern: String,
        group: String,
        index: usize,
    },

    #[error("Invalid signature pattern '{pattern}': dangling character '{character}'")]
    DanglingCharacter { pattern: String, character: char },
}

/// Parse the pattern mini-language into its elements.
pub fn parse_pattern(pattern: &str) -> Result<Vec<PatternElement>, SignatureError> {
    let compact: Vec<char> = pattern.chars().filter(|c| !c.is_whitespace()).collect();

    let mut elements = Vec::with_capacity(compact.len() / 2);
    for (index, group) in compact.chunks(2).enumerate() {
        match *group {
            ['?', '?'] => elements.push(PatternElement::Wildcard),
            [hi, lo] => {
                let (Some(hi), Some(lo)) = (hi.to_digit(16), lo.to_digit(16)) else {
                    return Err(SignatureError::InvalidGroup {
                        pattern: pattern.to_string(),
                        group: group.iter().collect(),
                        index,
                    });
                };
                elements.push(PatternElement::Literal((hi * 16 + lo) as u8));
            }
            [character] => {
                return Err(SignatureError::DanglingCharacter {
                    pattern: pattern.to_string(),
                    character,
                });
            }
            _ => unreachable!("chunks(2) yields one or two characters"),
        }
    }

    Ok(elements)
}

//  Signature

/// A named, offset-anchored byte pattern.
#[derive(Debug, Clone)]
pub struct Signature {
    name: String,
    description: Option<String>,
    offset: usize,
    pattern: Vec<PatternElement>,
    source: String,
}

impl Signature {
    /// Build a signature anchored at offset 0.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, SignatureError> {
        let name = name.into();
        let elements = parse_pattern(pattern)?;
        if elements.is_empty() {
            return Err(SignatureError::EmptyPattern { name });
        }
        Ok(Self {
            name,
            description: None,
            offset: 0,
            pattern: elements,
            source: pattern.trim().to_string(),
        })
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn pattern(&self) -> &[PatternElement] {
        &self.pattern
    }

    /// The pattern exactly as authored.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of literal (non-wildcard) bytes in the pattern.
    pub fn specificity(&self) -> usize {
        self.pattern.iter().filter(|e| !e.is_wildcard()).count()
    }

    /// Same name, anchor and pattern.  Descriptions are not compared.
    pub fn is_duplicate_of(&self, other: &Signature) -> bool {
        self.name == other.name && self.offset == other.offset && self.pattern == other.pattern
    }

    /// Compare the pattern against `buffer` at the signature's offset.
    ///
    /// A buffer too short to hold the whole pattern never matches.
    pub fn matches(&self, buffer: &[u8]) -> Option<SignatureMatch> {
        let end = self.offset.checked_add(self.pattern.len())?;
        let window = buffer.get(self.offset..end)?;

        let mut relevant_bytes = Vec::with_capacity(self.pattern.len());
        for (i, (element, &byte)) in self.pattern.iter().zip(window).enumerate() {
            match *element {
                PatternElement::Wildcard => continue,
                PatternElement::Literal(expected) if expected == byte => {
                    relevant_bytes.push(self.offset + i);
                }
                PatternElement::Literal(_) => return None,
            }
        }

        Some(SignatureMatch {
            name: self.name.clone(),
            description: self.description.clone(),
            signature_offset: self.offset,
            pattern_length: self.pattern.len(),
            relevant_bytes,
        })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

//  Match result

/// Outcome of a successful [`Signature::matches`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureMatch {
    pub name: String,
    pub description: Option<String>,
    pub signature_offset: usize,
    /// Pattern length including wildcards.
    pub pattern_length: usize,
    /// Absolute indices of the literal bytes that were compared, ascending.
    pub relevant_bytes: Vec<usize>,
}

impl SignatureMatch {
    pub fn specificity(&self) -> usize {
        self.relevant_bytes.len()
    }

    /// Ordering key: literal bytes compared, then total pattern length.
    pub fn rank(&self) -> (usize, usize) {
        (self.specificity(), self.pattern_length)
    }

    /// Strictly outranks `other`; equal ranks keep whichever came first.
    pub fn outranks(&self, other: &SignatureMatch) -> bool {
        self.rank() > other.rank()
    }

    pub fn is_relevant(&self, index: usize) -> bool {
        self.relevant_bytes.binary_search(&index).is_ok()
    }
}
