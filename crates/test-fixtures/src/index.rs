//! In-memory hybrid index: hashed bag-of-words vectors for dense search and
//! BM25 for sparse search. Deterministic, so rankings are stable across runs.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use quarry_core::errors::QuarryResult;
use quarry_core::models::{Document, Metadata, SearchHit};
use quarry_core::traits::{DenseSearch, Embedder, SparseSearch};

const BM25_K1: f64 = 1.2;
const BM25_B: f64 = 0.75;

/// Lowercased word tokens. Each CJK ideograph is its own token.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    for c in text.chars().flat_map(char::to_lowercase) {
        if is_cjk(c) {
            flush(&mut word, &mut tokens);
            tokens.push(c.to_string());
        } else if c.is_alphanumeric() {
            word.push(c);
        } else {
            flush(&mut word, &mut tokens);
        }
    }
    flush(&mut word, &mut tokens);
    tokens
}

fn flush(word: &mut String, tokens: &mut Vec<String>) {
    if !word.is_empty() {
        tokens.push(std::mem::take(word));
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c as u32, 0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF)
}

/// Feature-hashing embedder over unigrams and bigrams, L2-normalized.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dims: usize,
}

impl HashingEmbedder {
    pub fn new(dims: usize) -> Self {
        Self { dims: dims.max(1) }
    }

    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let tokens = tokenize(text);
        let mut vector = vec![0.0f32; self.dims];
        let bigrams = tokens.windows(2).map(|w| format!("{} {}", w[0], w[1]));
        for feature in tokens.iter().cloned().chain(bigrams) {
            let mut hasher = DefaultHasher::new();
            feature.hash(&mut hasher);
            let h = hasher.finish();
            let sign = if h >> 63 == 1 { -1.0 } else { 1.0 };
            vector[(h % self.dims as u64) as usize] += sign;
        }
        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(256)
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, text: &str) -> QuarryResult<Vec<f32>> {
        Ok(self.embed_text(text))
    }
}

struct Entry {
    id: String,
    content: String,
    metadata: Metadata,
    vector: Vec<f32>,
    term_freq: HashMap<String, usize>,
    len: usize,
}

impl Entry {
    fn hit(&self, score: f64) -> SearchHit {
        SearchHit::new(&self.id, &self.content, score).with_metadata(self.metadata.clone())
    }
}

/// Small in-memory collection searchable both ways.
#[derive(Default)]
pub struct InMemoryIndex {
    embedder: HashingEmbedder,
    entries: Vec<Entry>,
    doc_freq: HashMap<String, usize>,
    total_len: usize,
}

impl InMemoryIndex {
    pub fn new(embedder: HashingEmbedder) -> Self {
        Self {
            embedder,
            ..Self::default()
        }
    }

    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let mut index = Self::default();
        for document in documents {
            index.ingest(document);
        }
        index
    }

    /// Add a document, returning its id. A string `id` in the metadata is
    /// used when present.
    pub fn ingest(&mut self, document: Document) -> String {
        let (content, metadata) = document.into_parts();
        let id = metadata
            .get("id")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("doc-{}", self.entries.len() + 1));

        let tokens = tokenize(&content);
        let mut term_freq = HashMap::new();
        for token in &tokens {
            *term_freq.entry(token.clone()).or_insert(0) += 1;
        }
        for term in term_freq.keys() {
            *self.doc_freq.entry(term.clone()).or_insert(0) += 1;
        }
        self.total_len += tokens.len();

        self.entries.push(Entry {
            id: id.clone(),
            vector: self.embedder.embed_text(&content),
            content,
            metadata,
            term_freq,
            len: tokens.len(),
        });
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn top_k(&self, mut scored: Vec<(usize, f64)>, k: usize) -> Vec<SearchHit> {
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored
            .into_iter()
            .take(k)
            .map(|(i, score)| self.entries[i].hit(score))
            .collect()
    }

    fn bm25(&self, entry: &Entry, terms: &[String]) -> f64 {
        let n = self.entries.len() as f64;
        let avg_len = (self.total_len as f64 / n).max(1.0);
        terms
            .iter()
            .filter_map(|term| {
                let tf = *entry.term_freq.get(term)? as f64;
                let df = *self.doc_freq.get(term)? as f64;
                let idf = (1.0 + (n - df + 0.5) / (df + 0.5)).ln();
                let norm = BM25_K1 * (1.0 - BM25_B + BM25_B * entry.len as f64 / avg_len);
                Some(idf * tf * (BM25_K1 + 1.0) / (tf + norm))
            })
            .sum()
    }
}

impl Embedder for InMemoryIndex {
    fn embed(&self, text: &str) -> QuarryResult<Vec<f32>> {
        self.embedder.embed(text)
    }
}

impl DenseSearch for InMemoryIndex {
    fn dense_search(&self, query_vector: &[f32], k: usize) -> QuarryResult<Vec<SearchHit>> {
        let scored = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let dot: f32 = entry
                    .vector
                    .iter()
                    .zip(query_vector)
                    .map(|(a, b)| a * b)
                    .sum();
                (i, f64::from(dot))
            })
            .collect();
        Ok(self.top_k(scored, k))
    }
}

impl SparseSearch for InMemoryIndex {
    fn sparse_search(&self, query: &str, k: usize) -> QuarryResult<Vec<SearchHit>> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }
        let mut terms = tokenize(query);
        terms.sort();
        terms.dedup();
        let scored = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, self.bm25(entry, &terms)))
            .filter(|(_, score)| *score > 0.0)
            .collect();
        Ok(self.top_k(scored, k))
    }
}
