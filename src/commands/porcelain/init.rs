use crate::areas::config::{
    CREATED_KEY, NAME_KEY, OWNER_KEY, RepoConfig, VISIBILITY_KEY, Visibility,
};
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, RepoName, UserName};
use crate::artifacts::core::atomic_file::write_atomically;
use crate::artifacts::objects::commit::Timestamp;
use crate::errors::{IoResultExt, Result};

impl Repository {
    /// Lay out an empty repository at this handle's root
    ///
    /// HEAD names `main`, whose ref file exists but is empty. The index and the commit log
    /// start empty and the config records the owner, the name and private visibility.
    pub fn init(&self, owner: &UserName, name: &RepoName) -> Result<()> {
        std::fs::create_dir_all(self.path()).at_path(self.path())?;
        self.database().init()?;
        self.refs().init()?;
        self.workspace().init()?;

        let main = BranchName::default_branch();
        self.refs().set_current_branch(&main)?;
        if !self.refs().branch_exists(&main) {
            self.refs().create_branch(&main, None)?;
        }

        let index_path = self.index_path();
        if !index_path.exists() {
            write_atomically(&index_path, b"")?;
        }
        let log_path = self.commit_log().path();
        if !log_path.exists() {
            write_atomically(log_path, b"")?;
        }

        let mut config = RepoConfig::default();
        config.set(NAME_KEY, name.to_string());
        config.set(OWNER_KEY, owner.to_string());
        config.set(VISIBILITY_KEY, Visibility::Private.to_string());
        config.set(CREATED_KEY, Timestamp::now().to_string());
        config.save(&self.config_path())?;

        tracing::debug!(path = %self.path().display(), "initialized repository");
        Ok(())
    }
}
