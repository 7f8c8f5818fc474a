use std::collections::BTreeMap;

use super::tokenizer::tokenize;

/// Term-frequency vector normalized by the document's most frequent term.
///
/// Each document is normalized on its own; there is no corpus-wide
/// document-frequency component. Terms are kept ordered so repeated scoring
/// sums in the same order and yields identical bits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    weights: BTreeMap<String, f64>,
}

impl TermVector {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for token in tokens {
            *counts.entry(token.into()).or_insert(0) += 1;
        }

        let max = counts.values().copied().max().unwrap_or(0);
        if max == 0 {
            return Self::default();
        }

        let weights = counts
            .into_iter()
            .map(|(term, count)| (term, f64::from(count) / f64::from(max)))
            .collect();

        Self { weights }
    }

    pub fn from_text(text: &str) -> Self {
        Self::from_tokens(tokenize(text))
    }

    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.weights
            .values()
            .map(|weight| weight * weight)
            .sum::<f64>()
            .sqrt()
    }

    /// Cosine similarity in `[0, 1]`; zero when either vector is empty.
    pub fn cosine(&self, other: &TermVector) -> f64 {
        let left = self.norm();
        let right = other.norm();
        if left == 0.0 || right == 0.0 {
            return 0.0;
        }

        let dot: f64 = self
            .weights
            .iter()
            .map(|(term, weight)| weight * other.weight(term))
            .sum();

        (dot / (left * right)).clamp(0.0, 1.0)
    }
}
