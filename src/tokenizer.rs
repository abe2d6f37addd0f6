use hf_hub::{api::sync::Api, Repo, RepoType};
use tokenizers::Tokenizer;
use tracing::info;

use crate::error::{Error, Result};

/// Maps a string to the length of its encoded token-id sequence. Each text is
/// encoded independently; the id sequence length is the only value consumed.
pub trait TokenCounter {
    fn count(&self, text: &str) -> Result<usize>;
}

/// Pretrained subword tokenizer, fetched from the hub once at startup and
/// reused for every text of every dataset.
pub struct PretrainedTokenCounter {
    tokenizer: Tokenizer,
}

impl PretrainedTokenCounter {
    pub fn from_hub(repo_id: &str) -> Result<Self> {
        info!("loading tokenizer from {repo_id}");
        let api = Api::new()?;
        let repo = api.repo(Repo::new(repo_id.to_string(), RepoType::Model));
        let tokenizer_path = repo.get("tokenizer.json")?;
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| Error::Tokenizer(format!("failed to load {repo_id}: {e}")))?;

        Ok(Self { tokenizer })
    }
}

impl TokenCounter for PretrainedTokenCounter {
    fn count(&self, text: &str) -> Result<usize> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| Error::Tokenizer(e.to_string()))?;

        Ok(encoding.get_ids().len())
    }
}
