use super::*;

use std::sync::{Arc, Mutex};

/// A [`ContactManager`] that can be handed to several threads.
///
/// The lock is held for the whole mutate-then-save step, so two writers never
/// interleave on the contact file.
#[derive(Clone)]
pub struct SharedContactManager {
    inner: Arc<Mutex<ContactManager>>,
}

impl SharedContactManager {
    pub fn new(manager: ContactManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    pub fn open(storage: Box<dyn ContactStore>) -> Self {
        Self::new(ContactManager::open(storage))
    }

    pub fn add_contact(&self, name: &str, phone: &str, email: &str) -> Result<(), AppError> {
        self.inner.lock()?.add_contact(name, phone, email)
    }

    pub fn update_contact(
        &self,
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<Contact, AppError> {
        self.inner.lock()?.update_contact(name, phone, email)
    }

    pub fn delete_contact(&self, name: &str) -> Result<Contact, AppError> {
        self.inner.lock()?.delete_contact(name)
    }

    /// Matches are copied out so the lock is not held while the caller iterates.
    pub fn search(&self, query: &str, field: SearchField) -> Result<Vec<Contact>, AppError> {
        let manager = self.inner.lock()?;
        Ok(manager.search(query, field).cloned().collect())
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.inner.lock()?.book().len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }

    /// Hands back the inner manager once every other handle is gone.
    pub fn into_inner(self) -> Result<ContactManager, AppError> {
        let mutex = Arc::into_inner(self.inner).ok_or_else(|| {
            AppError::Lock("contact manager is still shared".to_string())
        })?;
        Ok(mutex.into_inner()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonStorage;
    use std::thread;

    #[test]
    fn concurrent_adds_all_reach_the_file() -> Result<(), AppError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("contactbook.json");
        let shared = SharedContactManager::open(Box::new(JsonStorage::new(&path)));

        thread::scope(|s| {
            for worker in 0..4 {
                let shared = shared.clone();
                s.spawn(move || -> Result<(), AppError> {
                    for i in 0..25 {
                        shared.add_contact(
                            &format!("User{worker}-{i}"),
                            &format!("0800{i:04}"),
                            &format!("user{worker}.{i}@example.com"),
                        )?;
                    }
                    Ok(())
                });
            }
        });

        assert_eq!(shared.len()?, 100);
        shared.into_inner()?.close()?;

        let reopened = ContactManager::open(Box::new(JsonStorage::new(&path)));
        assert_eq!(reopened.book().len(), 100);
        Ok(())
    }

    #[test]
    fn only_one_of_racing_duplicates_wins() -> Result<(), AppError> {
        let shared = SharedContactManager::open(Box::new(crate::storage::MemStorage::default()));

        let results: Vec<Result<(), AppError>> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let shared = shared.clone();
                    s.spawn(move || shared.add_contact("Alice", &format!("{i}"), "a@x.com"))
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|_| Err(AppError::Lock("panicked".into()))))
                .collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            results
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| matches!(e, AppError::DuplicateKey(_)))
        );
        assert_eq!(shared.search("alice", SearchField::Name)?.len(), 1);
        Ok(())
    }

    #[test]
    fn into_inner_refuses_while_shared() -> Result<(), AppError> {
        let shared = SharedContactManager::open(Box::new(crate::storage::MemStorage::default()));
        let other = shared.clone();

        assert!(matches!(shared.into_inner(), Err(AppError::Lock(_))));
        assert!(other.is_empty()?);
        Ok(())
    }
}
