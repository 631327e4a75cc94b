//! Sparse TF-IDF vectors
//!
//! Weights use smoothed inverse document frequency
//! `idf(t) = ln((1 + n) / (1 + df(t))) + 1` times raw term counts, then the
//! vector is scaled to unit length. Vectors are kept as `(term id, weight)`
//! pairs sorted by term id so dot products are a linear merge.

use std::collections::{BTreeMap, HashMap};

use super::tokenizer::tokenize;

/// Sparse vector sorted by term id
pub type SparseVector = Vec<(usize, f32)>;

/// Fitted vocabulary with inverse document frequencies
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfIdfVectorizer {
    /// Fit the vocabulary and idf weights on `documents`
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut df: Vec<usize> = Vec::new();

        for doc in documents {
            let mut seen: Vec<usize> = tokenize(doc.as_ref())
                .into_iter()
                .map(|token| {
                    let next = vocabulary.len();
                    *vocabulary.entry(token).or_insert(next)
                })
                .collect();
            seen.sort_unstable();
            seen.dedup();

            for id in seen {
                if id >= df.len() {
                    df.resize(id + 1, 0);
                }
                df[id] += 1;
            }
        }

        let n = documents.len() as f32;
        let idf = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0)
            .collect();

        Self { vocabulary, idf }
    }

    /// Number of known terms
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Idf weight of `term`, if known
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&id| self.idf[id])
    }

    /// Project `text` into the fitted space; unknown terms are ignored
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(&id) = self.vocabulary.get(&token) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(id, tf)| (id, tf * self.idf[id]))
            .collect();
        l2_normalize(&mut vector);
        vector
    }
}

/// Scale `vector` to unit length; zero vectors stay zero
pub fn l2_normalize(vector: &mut SparseVector) {
    let norm = vector.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, w) in vector.iter_mut() {
            *w /= norm;
        }
    }
}

/// Dot product of two id-sorted sparse vectors
///
/// For unit vectors this is the cosine similarity.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f32 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;

    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    dot.clamp(0.0, 1.0)
}
