use lifescrum_core::{AppConfig, ScrumError, ScrumResult};
use lifescrum_domain::{RoleDraft, StoryDraft};
use lifescrum_persistence::KeyValueStore;
use lifescrum_state::{Slot, Store};
use mockall::mock;

mock! {
    pub Backend {}

    impl KeyValueStore for Backend {
        fn get(&self, key: &str) -> ScrumResult<Option<String>>;
        fn set(&self, key: &str, value: &str) -> ScrumResult<()>;
        fn remove(&self, key: &str) -> ScrumResult<()>;
        fn keys(&self) -> ScrumResult<Vec<String>>;
    }
}

fn empty_backend() -> MockBackend {
    let mut backend = MockBackend::new();
    backend.expect_get().returning(|_| Ok(None));
    backend
}

#[test]
fn test_open_reads_without_writing() {
    let mut backend = empty_backend();
    backend.expect_set().times(0);

    let store = Store::open(Box::new(backend), AppConfig::default());
    assert_eq!(store.columns().len(), 6);
}

#[test]
fn test_unreadable_slots_fall_back_to_defaults() {
    let mut backend = MockBackend::new();
    backend.expect_get().returning(|key| match Slot::from_key(key) {
        Some(Slot::Sprints) => Err(ScrumError::Storage("locked".to_string())),
        Some(Slot::Columns) => Ok(Some("{\"not\": \"a list\"}".to_string())),
        _ => Ok(None),
    });

    let store = Store::open(Box::new(backend), AppConfig::default());
    assert_eq!(store.sprints().len(), 12);
    assert_eq!(store.columns().len(), 6);
}

#[test]
fn test_mutation_writes_only_its_slot() {
    let mut backend = empty_backend();
    backend
        .expect_set()
        .withf(|key, value| Slot::from_key(key) == Some(Slot::Roles) && value.contains("Coach"))
        .times(1)
        .returning(|_, _| Ok(()));

    let mut store = Store::open(Box::new(backend), AppConfig::default());
    store.add_role(RoleDraft::new("Coach"));
}

#[test]
fn test_failed_write_does_not_fail_mutation() {
    let mut backend = empty_backend();
    backend
        .expect_set()
        .returning(|_, _| Err(ScrumError::Storage("disk full".to_string())));

    let mut store = Store::open(Box::new(backend), AppConfig::default());
    let story = store.add_story(StoryDraft::new("Still here"), None);

    assert!(store.story(&story.id).is_some());
    assert_eq!(store.columns()[0].story_ids, vec![story.id]);
}
