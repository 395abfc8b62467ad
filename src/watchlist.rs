use crate::collectors::VolumeInfoProvider;
use crate::models::volume::VolumeState;
use anyhow::Result;

/// Persistent home of the watched identifiers.
///
/// `load` runs once at startup; `save` runs only right after a successful
/// add or remove, always with the complete ordered list.
pub trait WatchStore {
    fn load(&self) -> Result<Vec<String>>;
    fn save(&mut self, ids: &[&str]) -> Result<()>;
}

/// One monitored volume together with the state from its latest poll.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedVolume {
    pub id:    String,
    pub state: VolumeState,
}

/// Ordered, duplicate-free set of watched volumes.
#[derive(Debug)]
pub struct WatchList<S> {
    volumes: Vec<WatchedVolume>,
    store:   S,
}

impl<S: WatchStore> WatchList<S> {
    /// Read the store and poll every member once. Blank and repeated
    /// entries are dropped; the store itself is not rewritten.
    pub fn load(store: S, provider: &dyn VolumeInfoProvider) -> Result<Self> {
        let mut volumes: Vec<WatchedVolume> = Vec::new();
        for id in store.load()? {
            if id.is_empty() || volumes.iter().any(|v| v.id == id) {
                continue;
            }
            let state = VolumeState::from_query(provider.query(&id));
            volumes.push(WatchedVolume { id, state });
        }
        Ok(Self { volumes, store })
    }

    /// Append `id` and persist. Returns `Ok(false)` if it is already watched.
    /// If the store can't be written the list is left as it was.
    pub fn add(&mut self, id: &str, provider: &dyn VolumeInfoProvider) -> Result<bool> {
        if self.contains(id) {
            return Ok(false);
        }
        let state = VolumeState::from_query(provider.query(id));
        self.volumes.push(WatchedVolume { id: id.to_string(), state });

        if let Err(e) = self.persist() {
            self.volumes.pop();
            return Err(e);
        }
        log::info!("watching {}", id);
        Ok(true)
    }

    /// Drop `id` and persist. Returns `Ok(false)` if it wasn't watched.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let idx = match self.volumes.iter().position(|v| v.id == id) {
            Some(i) => i,
            None    => return Ok(false),
        };
        let removed = self.volumes.remove(idx);

        if let Err(e) = self.persist() {
            self.volumes.insert(idx, removed);
            return Err(e);
        }
        log::info!("stopped watching {}", id);
        Ok(true)
    }

    /// Re-query every member. Each volume is handled on its own, so one
    /// failing query only marks that volume unreadable.
    pub fn refresh(&mut self, provider: &dyn VolumeInfoProvider) {
        for vol in &mut self.volumes {
            vol.state = VolumeState::from_query(provider.query(&vol.id));
        }
    }

    pub fn members(&self) -> Vec<&str> {
        self.volumes.iter().map(|v| v.id.as_str()).collect()
    }

    pub fn volumes(&self) -> &[WatchedVolume] {
        &self.volumes
    }

    pub fn contains(&self, id: &str) -> bool {
        self.volumes.iter().any(|v| v.id == id)
    }

    pub fn len(&self) -> usize { self.volumes.len() }
    pub fn is_empty(&self) -> bool { self.volumes.is_empty() }

    fn persist(&mut self) -> Result<()> {
        let ids: Vec<&str> = self.volumes.iter().map(|v| v.id.as_str()).collect();
        self.store.save(&ids)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::volume::{ColorTier, VolumeError, VolumeStats};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    const GIB: u64 = 1024 * 1024 * 1024;

    /// Provider answering from a fixed table; unknown ids are not ready.
    #[derive(Default)]
    pub(crate) struct FakeProvider {
        pub stats:  HashMap<String, VolumeStats>,
        pub failed: Vec<String>,
        pub calls:  RefCell<Vec<String>>,
    }

    impl FakeProvider {
        pub fn with(mut self, id: &str, total_gib: u64, free_gib: u64) -> Self {
            self.stats.insert(id.to_string(), VolumeStats {
                total_bytes: total_gib * GIB,
                free_bytes:  free_gib * GIB,
                avail_bytes: free_gib * GIB,
            });
            self
        }

        pub fn failing(mut self, id: &str) -> Self {
            self.failed.push(id.to_string());
            self
        }
    }

    impl VolumeInfoProvider for FakeProvider {
        fn query(&self, id: &str) -> Result<VolumeStats, VolumeError> {
            self.calls.borrow_mut().push(id.to_string());
            if self.failed.iter().any(|f| f == id) {
                return Err(VolumeError::Stat(nix::errno::Errno::EIO));
            }
            self.stats.get(id).copied().ok_or(VolumeError::NotReady)
        }
    }

    /// In-memory store that records every write and can be told to fail.
    #[derive(Default, Clone)]
    pub(crate) struct MemStore {
        pub initial: Vec<String>,
        pub writes:  Rc<RefCell<Vec<Vec<String>>>>,
        pub fail:    Rc<RefCell<bool>>,
    }

    impl MemStore {
        pub fn last_write(&self) -> Option<Vec<String>> {
            self.writes.borrow().last().cloned()
        }
    }

    impl WatchStore for MemStore {
        fn load(&self) -> Result<Vec<String>> {
            Ok(self.initial.clone())
        }

        fn save(&mut self, ids: &[&str]) -> Result<()> {
            if *self.fail.borrow() {
                anyhow::bail!("disk full");
            }
            self.writes.borrow_mut().push(ids.iter().map(|s| s.to_string()).collect());
            Ok(())
        }
    }

    fn provider() -> FakeProvider {
        FakeProvider::default()
            .with("/", 100, 50)
            .with("/mnt/a", 100, 5)
            .with("/mnt/b", 10, 10)
    }

    #[test]
    fn load_polls_and_dedups_without_writing() {
        let store = MemStore {
            initial: vec!["/".into(), "".into(), "/mnt/a".into(), "/".into()],
            ..Default::default()
        };
        let list = WatchList::load(store.clone(), &provider()).unwrap();
        assert_eq!(list.members(), vec!["/", "/mnt/a"]);
        assert!(list.volumes().iter().all(|v| v.state.is_readable()));
        assert!(store.writes.borrow().is_empty());
    }

    #[test]
    fn add_appends_polls_and_persists() {
        let store = MemStore::default();
        let p = provider();
        let mut list = WatchList::load(store.clone(), &p).unwrap();

        assert!(list.add("/mnt/a", &p).unwrap());
        assert!(list.add("/", &p).unwrap());

        assert_eq!(list.members(), vec!["/mnt/a", "/"]);
        assert_eq!(list.volumes()[0].state.tier(), ColorTier::Warning);
        assert_eq!(store.last_write().unwrap(), vec!["/mnt/a", "/"]);
    }

    #[test]
    fn duplicate_add_is_a_no_op() {
        let once = MemStore::default();
        let twice = MemStore::default();
        let p = provider();

        let mut a = WatchList::load(once.clone(), &p).unwrap();
        a.add("/", &p).unwrap();

        let mut b = WatchList::load(twice.clone(), &p).unwrap();
        assert!(b.add("/", &p).unwrap());
        assert!(!b.add("/", &p).unwrap());

        assert_eq!(a.members(), b.members());
        assert_eq!(once.last_write(), twice.last_write());
        assert_eq!(twice.writes.borrow().len(), 1);
    }

    #[test]
    fn identifiers_are_not_normalised() {
        let p = provider();
        let mut list = WatchList::load(MemStore::default(), &p).unwrap();
        list.add("/mnt/a", &p).unwrap();
        assert!(list.add("/mnt/a/", &p).unwrap());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let store = MemStore::default();
        let p = provider();
        let mut list = WatchList::load(store.clone(), &p).unwrap();
        for id in ["/", "/mnt/a", "/mnt/b"] {
            list.add(id, &p).unwrap();
        }

        assert!(list.remove("/mnt/a").unwrap());
        assert!(!list.remove("/mnt/a").unwrap());
        assert!(!list.remove("/nowhere").unwrap());

        assert_eq!(list.members(), vec!["/", "/mnt/b"]);
        assert_eq!(store.last_write().unwrap(), vec!["/", "/mnt/b"]);
        assert_eq!(store.writes.borrow().len(), 4);
    }

    #[test]
    fn failed_write_rolls_back() {
        let store = MemStore::default();
        let p = provider();
        let mut list = WatchList::load(store.clone(), &p).unwrap();
        list.add("/", &p).unwrap();
        list.add("/mnt/b", &p).unwrap();

        *store.fail.borrow_mut() = true;
        assert!(list.add("/mnt/a", &p).is_err());
        assert!(list.remove("/").is_err());
        assert_eq!(list.members(), vec!["/", "/mnt/b"]);
    }

    #[test]
    fn unknown_volume_is_added_as_unreadable() {
        let p = provider();
        let mut list = WatchList::load(MemStore::default(), &p).unwrap();
        assert!(list.add("/media/cdrom", &p).unwrap());
        assert_eq!(list.volumes()[0].state, VolumeState::Unreadable);
    }

    #[test]
    fn refresh_isolates_failures() {
        let p = provider();
        let mut list = WatchList::load(MemStore::default(), &p).unwrap();
        for id in ["/", "/mnt/a", "/mnt/b"] {
            list.add(id, &p).unwrap();
        }

        let flaky = provider().failing("/mnt/a");
        list.refresh(&flaky);

        let states: Vec<bool> = list.volumes().iter().map(|v| v.state.is_readable()).collect();
        assert_eq!(states, vec![true, false, true]);
        assert_eq!(list.len(), 3);
        assert_eq!(*flaky.calls.borrow(), vec!["/", "/mnt/a", "/mnt/b"]);
    }

    #[test]
    fn state_recovers_on_next_refresh() {
        let p = provider();
        let mut list = WatchList::load(MemStore::default(), &p).unwrap();
        list.add("/mnt/b", &p).unwrap();

        list.refresh(&provider().failing("/mnt/b"));
        assert!(!list.volumes()[0].state.is_readable());

        list.refresh(&p);
        assert!(list.volumes()[0].state.is_readable());
    }
}
