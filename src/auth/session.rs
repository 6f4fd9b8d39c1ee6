//! Session token persistence

use std::sync::Arc;

use crate::storage::{Storage, StorageResult, TOKEN_KEY};

pub struct Session {
    storage: Arc<dyn Storage>,
    token: Option<String>,
}

impl Session {
    pub fn load(storage: Arc<dyn Storage>) -> StorageResult<Self> {
        let token = storage.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        Ok(Self { storage, token })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn store_token(&mut self, token: String) -> StorageResult<()> {
        self.storage.set(TOKEN_KEY, &token)?;
        self.token = Some(token);
        Ok(())
    }

    pub fn clear(&mut self) -> StorageResult<()> {
        self.storage.remove(TOKEN_KEY)?;
        self.token = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_token_lifecycle() {
        let storage = Arc::new(MemoryStorage::default());
        let mut session = Session::load(storage.clone()).unwrap();
        assert!(!session.is_authenticated());

        session.store_token("tok-1".to_string()).unwrap();
        assert_eq!(Session::load(storage.clone()).unwrap().token(), Some("tok-1"));

        session.clear().unwrap();
        assert!(!session.is_authenticated());
        assert!(!Session::load(storage).unwrap().is_authenticated());
    }
}
