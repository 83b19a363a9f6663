//! SQLite-backed FAQ passage index with brute-force cosine search.
//!
//! Passage counts are small (hundreds, not millions), so every search scans
//! the language/category slice and scores it in memory.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::info;
use uuid::Uuid;

use crate::i18n::Lang;
use crate::pipeline::embedding::EmbeddingModel;

use super::FaqError;

/// One scored passage returned from a search.
#[derive(Debug, Clone)]
pub struct ScoredPassage {
    pub id: Uuid,
    pub document: String,
    pub content: String,
    pub language: String,
    pub category: Option<String>,
    pub score: f32,
}

/// Persistent FAQ passage index.
#[derive(Debug)]
pub struct FaqStore {
    conn: Connection,
}

impl FaqStore {
    pub fn open(path: &Path) -> Result<Self, FaqError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// In-memory index, used by tests.
    pub fn open_memory() -> Result<Self, FaqError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, FaqError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS faq_passages (
                id        TEXT PRIMARY KEY,
                document  TEXT NOT NULL,
                content   TEXT NOT NULL,
                language  TEXT NOT NULL,
                category  TEXT,
                embedding BLOB NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_faq_language ON faq_passages(language);",
        )?;
        Ok(Self { conn })
    }

    pub fn add_passage(
        &self,
        document: &str,
        content: &str,
        lang: Lang,
        category: Option<&str>,
        embedding: &[f32],
    ) -> Result<Uuid, FaqError> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO faq_passages (id, document, content, language, category, embedding)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id.to_string(),
                document,
                content,
                lang.code(),
                category,
                vec_to_blob(embedding),
            ],
        )?;
        Ok(id)
    }

    /// Split a document on blank lines and index each non-empty paragraph.
    /// Returns the number of passages added.
    pub fn ingest_document(
        &self,
        document: &str,
        text: &str,
        lang: Lang,
        category: Option<&str>,
        embedder: &impl EmbeddingModel,
    ) -> Result<usize, FaqError> {
        let mut added = 0;
        for paragraph in text.split("\n\n") {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() {
                continue;
            }
            let embedding = embedder.embed(paragraph).map_err(FaqError::Embedding)?;
            self.add_passage(document, paragraph, lang, category, &embedding)?;
            added += 1;
        }
        info!(document, passages = added, lang = %lang, "ingested FAQ document");
        Ok(added)
    }

    /// Top-k passages by cosine similarity, optionally restricted to a
    /// language and a category.
    pub fn search(
        &self,
        query_embedding: &[f32],
        lang: Option<Lang>,
        category: Option<&str>,
        k: usize,
    ) -> Result<Vec<ScoredPassage>, FaqError> {
        let mut sql = String::from(
            "SELECT id, document, content, language, category, embedding
             FROM faq_passages WHERE 1=1",
        );
        let mut args: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
        if let Some(lang) = lang {
            sql.push_str(" AND language = ?");
            args.push(Box::new(lang.code().to_string()));
        }
        if let Some(category) = category {
            sql.push_str(" AND category = ?");
            args.push(Box::new(category.to_string()));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
            |row| {
                let id: String = row.get(0)?;
                let blob: Vec<u8> = row.get(5)?;
                Ok((
                    id,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    blob,
                ))
            },
        )?;

        let mut scored = Vec::new();
        for row in rows {
            let (id, document, content, language, category, blob) = row?;
            let embedding = blob_to_vec(&blob);
            let score = cosine_similarity(query_embedding, &embedding);
            scored.push(ScoredPassage {
                id: id.parse().unwrap_or_else(|_| Uuid::nil()),
                document,
                content,
                language,
                category,
                score,
            });
        }

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }

    pub fn count(&self) -> Result<usize, FaqError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM faq_passages", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

fn vec_to_blob(vec: &[f32]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(vec.len() * 4);
    for value in vec {
        blob.extend_from_slice(&value.to_le_bytes());
    }
    blob
}

fn blob_to_vec(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
