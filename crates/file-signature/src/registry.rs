//! Signature registry and best-match selection.

use tracing::{debug, trace};

use crate::signature::{Signature, SignatureMatch};

/// Append-only, ordered collection of signatures.
///
/// Registration order matters: when two matches rank equally the one
/// registered first is kept.
#[derive(Debug, Clone, Default)]
pub struct SignatureRegistry {
    signatures: Vec<Signature>,
}

impl SignatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `signatures`, dropping exact duplicates.
    pub fn from_signatures(signatures: impl IntoIterator<Item = Signature>) -> Self {
        let mut registry = Self::new();
        for signature in signatures {
            registry.register(signature);
        }
        registry
    }

    /// Append `signature`.  Returns `false` if an exact duplicate was
    /// already registered, in which case the registry is unchanged.
    pub fn register(&mut self, signature: Signature) -> bool {
        if self.signatures.iter().any(|s| s.is_duplicate_of(&signature)) {
            debug!(
                name = signature.name(),
                pattern = signature.source(),
                "dropping duplicate signature"
            );
            return false;
        }
        self.signatures.push(signature);
        true
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signature> {
        self.signatures.iter()
    }

    /// Most specific matching signature, or `None` for an unrecognised buffer.
    pub fn find_best_match(&self, buffer: &[u8]) -> Option<SignatureMatch> {
        let mut best: Option<SignatureMatch> = None;

        for candidate in self.signatures.iter().filter_map(|s| s.matches(buffer)) {
            let replace = match &best {
                Some(current) => {
                    if candidate.rank() == current.rank() {
                        trace!(
                            kept = %current.name,
                            other = %candidate.name,
                            "equal-rank signatures, keeping first registered"
                        );
                    }
                    candidate.outranks(current)
                }
                None => true,
            };
            if replace {
                best = Some(candidate);
            }
        }

        match &best {
            Some(m) => {
                debug!(name = %m.name, specificity = m.specificity(), "best signature match")
            }
            None => debug!(len = buffer.len(), "no signature matched"),
        }
        best
    }

    /// Every matching signature, best first.  Equal ranks stay in
    /// registration order.
    pub fn find_all_matches(&self, buffer: &[u8]) -> Vec<SignatureMatch> {
        let mut matches: Vec<SignatureMatch> =
            self.signatures.iter().filter_map(|s| s.matches(buffer)).collect();
        matches.sort_by(|a, b| b.rank().cmp(&a.rank()));
        matches
    }
}

impl<'a> IntoIterator for &'a SignatureRegistry {
    type Item = &'a Signature;
    type IntoIter = std::slice::Iter<'a, Signature>;

    fn into_iter(self) -> Self::IntoIter {
        self.signatures.iter()
    }
}

/// Best signature for `buffer` according to `registry`.
pub fn find_best_signature(registry: &SignatureRegistry, buffer: &[u8]) -> Option<SignatureMatch> {
    registry.find_best_match(buffer)
}
