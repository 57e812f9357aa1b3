//! Tag operations

use tracing::{debug, info, instrument};

use cadence_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;

impl GitRepo {
    /// Every tag that resolves to a commit
    ///
    /// Annotated tags are peeled; their trimmed message is kept. Tags on
    /// trees or blobs are skipped.
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let names = self.repo.tag_names(None)?;
        let tags: Vec<TagInfo> = names
            .iter()
            .flatten()
            .filter_map(|name| match self.find_tag(name) {
                Ok(tag) => tag,
                Err(err) => {
                    debug!(name, error = %err, "skipping tag");
                    None
                }
            })
            .collect();

        debug!(count = tags.len(), "listed tags");
        Ok(tags)
    }

    /// Look up one tag by short name
    pub fn find_tag(&self, name: &str) -> Result<Option<TagInfo>> {
        let reference = match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(reference) => reference,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(GitError::Git2(e)),
        };

        let commit = reference.peel_to_commit()?;
        let mut info = TagInfo::new(name, commit.id().to_string());
        if let Ok(tag) = reference.peel_to_tag() {
            if let Some(message) = tag.message() {
                info = info.with_message(message.trim());
            }
        }
        Ok(Some(info))
    }

    /// Tag HEAD, annotated when a message is given
    #[instrument(skip(self, message), fields(annotated = message.is_some()))]
    pub fn create_tag(&self, name: &str, message: Option<&str>) -> Result<TagInfo> {
        if self.find_tag(name)?.is_some() {
            return Err(GitError::TagExists(name.to_string()));
        }

        let head = self.head_commit()?;
        match message {
            Some(msg) => {
                let sig = self.repo.signature()?;
                self.repo.tag(name, head.as_object(), &sig, msg, false)?;
            }
            None => {
                self.repo.tag_lightweight(name, head.as_object(), false)?;
            }
        }

        info!(name, "created tag");
        Ok(TagInfo::new(name, head.id().to_string()))
    }
}
