//! Service tests against recording in-memory doubles of both ports.

use std::{
  collections::HashMap,
  sync::{
    Arc, Mutex,
    atomic::{AtomicI64, AtomicUsize, Ordering},
  },
  time::Duration,
};

use thiserror::Error;

use crate::{
  LookupError, LookupStage,
  cache::{CacheLookup, CharacterCache},
  character::{Character, CharacterDetail, CharacterId},
  service::{CacheFaultPolicy, CreateCharacter, FindCharacter},
  store::CharacterStore,
};

const TTL: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
#[error("fake backend failure: {0}")]
struct FakeError(&'static str);

// ─── Store double ────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeStore {
  rows:       Mutex<HashMap<CharacterId, Character>>,
  next_id:    AtomicI64,
  find_calls: AtomicUsize,
  fail:       bool,
}

impl FakeStore {
  fn failing() -> Self { Self { fail: true, ..Default::default() } }

  fn with(id: i64, character: Character) -> Self {
    let store = Self::default();
    store.rows.lock().unwrap().insert(CharacterId(id), character);
    store
  }

  fn find_calls(&self) -> usize { self.find_calls.load(Ordering::SeqCst) }
}

impl CharacterStore for FakeStore {
  type Error = FakeError;

  async fn create(&self, character: Character) -> Result<CharacterId, FakeError> {
    if self.fail {
      return Err(FakeError("insert"));
    }
    let id = CharacterId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
    self.rows.lock().unwrap().insert(id, character);
    Ok(id)
  }

  async fn find_by_id(&self, id: CharacterId) -> Result<Option<CharacterDetail>, FakeError> {
    self.find_calls.fetch_add(1, Ordering::SeqCst);
    if self.fail {
      return Err(FakeError("select"));
    }
    let rows = self.rows.lock().unwrap();
    Ok(rows.get(&id).cloned().map(|c| CharacterDetail::new(id, c)))
  }
}

// ─── Cache double ────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeCache {
  entries:  Mutex<HashMap<CharacterId, CharacterDetail>>,
  sets:     Mutex<Vec<(CharacterDetail, Duration)>>,
  fail_get: bool,
  fail_set: bool,
}

impl FakeCache {
  fn with(detail: CharacterDetail) -> Self {
    let cache = Self::default();
    cache.entries.lock().unwrap().insert(detail.id, detail);
    cache
  }

  fn sets(&self) -> Vec<(CharacterDetail, Duration)> { self.sets.lock().unwrap().clone() }
}

impl CharacterCache for FakeCache {
  type Error = FakeError;

  async fn get(&self, id: CharacterId) -> Result<CacheLookup, FakeError> {
    if self.fail_get {
      return Err(FakeError("get"));
    }
    Ok(match self.entries.lock().unwrap().get(&id) {
      Some(detail) => CacheLookup::Hit(detail.clone()),
      None => CacheLookup::Absent,
    })
  }

  async fn set(&self, detail: &CharacterDetail, ttl: Duration) -> Result<(), FakeError> {
    self.sets.lock().unwrap().push((detail.clone(), ttl));
    if self.fail_set {
      return Err(FakeError("set"));
    }
    self.entries.lock().unwrap().insert(detail.id, detail.clone());
    Ok(())
  }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn ezequiel() -> Character {
  Character {
    name:       "Darth Ezequiel".into(),
    height:     "202".into(),
    mass:       "136".into(),
    hair_color: "none".into(),
    skin_color: "white".into(),
    eye_color:  "yellow".into(),
    birth_year: "41.9BBY".into(),
    gender:     "male".into(),
    homeworld:  "https://swapi.dev/api/planets/1/".into(),
    created:    "2014-12-10T15:18:20.704000Z".into(),
    edited:     "2014-12-20T21:17:50.313000Z".into(),
    url:        "https://swapi.dev/api/people/4/".into(),
  }
}

fn lookup(
  store: FakeStore,
  cache: FakeCache,
) -> (Arc<FakeStore>, Arc<FakeCache>, FindCharacter<FakeStore, FakeCache>) {
  let store = Arc::new(store);
  let cache = Arc::new(cache);
  let find = FindCharacter::new(store.clone(), cache.clone(), TTL);
  (store, cache, find)
}

// ─── Lookup ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn cache_hit_short_circuits_store() {
  let cached = CharacterDetail::new(CharacterId(7), ezequiel());
  let (store, cache, find) = lookup(FakeStore::failing(), FakeCache::with(cached.clone()));

  let found = find.find(CharacterId(7)).await.unwrap();

  assert_eq!(found, cached);
  assert_eq!(store.find_calls(), 0);
  assert!(cache.sets().is_empty());
}

#[tokio::test]
async fn cache_miss_falls_through_and_populates() {
  let (store, cache, find) = lookup(FakeStore::with(42, ezequiel()), FakeCache::default());

  let found = find.find(CharacterId(42)).await.unwrap();

  let expected = CharacterDetail::new(CharacterId(42), ezequiel());
  assert_eq!(found, expected);
  assert_eq!(store.find_calls(), 1);
  assert_eq!(cache.sets(), vec![(expected, TTL)]);
}

#[tokio::test]
async fn second_lookup_is_served_from_cache() {
  let (store, cache, find) = lookup(FakeStore::with(42, ezequiel()), FakeCache::default());

  let first = find.find(CharacterId(42)).await.unwrap();
  let second = find.find(CharacterId(42)).await.unwrap();

  assert_eq!(first, second);
  assert_eq!(store.find_calls(), 1);
  assert_eq!(cache.sets().len(), 1);
}

#[tokio::test]
async fn not_found_propagates_without_caching() {
  let (store, cache, find) = lookup(FakeStore::with(42, ezequiel()), FakeCache::default());

  let err = find.find(CharacterId(99)).await.unwrap_err();

  assert!(matches!(err, LookupError::NotFound(CharacterId(99))));
  assert_eq!(store.find_calls(), 1);
  assert!(cache.sets().is_empty());
}

#[tokio::test]
async fn cache_error_aborts_before_store() {
  let cache = FakeCache { fail_get: true, ..Default::default() };
  let (store, cache, find) = lookup(FakeStore::with(42, ezequiel()), cache);

  let err = find.find(CharacterId(42)).await.unwrap_err();

  assert!(matches!(err, LookupError::CacheUnavailable { .. }));
  assert_eq!(err.id(), CharacterId(42));
  assert_eq!(err.stage(), Some(LookupStage::CacheLookup));
  assert_eq!(store.find_calls(), 0);
  assert!(cache.sets().is_empty());
}

#[tokio::test]
async fn store_error_propagates_without_caching() {
  let (store, cache, find) = lookup(FakeStore::failing(), FakeCache::default());

  let err = find.find(CharacterId(42)).await.unwrap_err();

  assert!(matches!(err, LookupError::StoreUnavailable { .. }));
  assert_eq!(err.stage(), Some(LookupStage::StoreLookup));
  assert_eq!(store.find_calls(), 1);
  assert!(cache.sets().is_empty());
}

#[tokio::test]
async fn failed_population_fails_the_lookup() {
  let cache = FakeCache { fail_set: true, ..Default::default() };
  let (store, cache, find) = lookup(FakeStore::with(42, ezequiel()), cache);

  let err = find.find(CharacterId(42)).await.unwrap_err();

  assert!(matches!(err, LookupError::CacheUnavailable { .. }));
  assert_eq!(err.stage(), Some(LookupStage::CachePopulate));
  assert!(err.to_string().contains("cache populate"), "{err}");
  assert_eq!(store.find_calls(), 1);
  assert_eq!(cache.sets().len(), 1);
}

#[tokio::test]
async fn degrade_policy_falls_through_on_cache_read_error() {
  let cache = FakeCache { fail_get: true, ..Default::default() };
  let (store, cache, find) = lookup(FakeStore::with(42, ezequiel()), cache);
  let find = find.with_fault_policy(CacheFaultPolicy::Degrade);

  let found = find.find(CharacterId(42)).await.unwrap();

  assert_eq!(found.character, ezequiel());
  assert_eq!(store.find_calls(), 1);
  assert_eq!(cache.sets().len(), 1);
}

#[tokio::test]
async fn degrade_policy_returns_value_when_population_fails() {
  let cache = FakeCache { fail_set: true, ..Default::default() };
  let (_store, _cache, find) = lookup(FakeStore::with(42, ezequiel()), cache);
  let find = find.with_fault_policy(CacheFaultPolicy::Degrade);

  let found = find.find(CharacterId(42)).await.unwrap();

  assert_eq!(found, CharacterDetail::new(CharacterId(42), ezequiel()));
}

#[tokio::test]
async fn degrade_policy_still_reports_not_found() {
  let cache = FakeCache { fail_get: true, fail_set: true, ..Default::default() };
  let (_store, cache, find) = lookup(FakeStore::default(), cache);
  let find = find.with_fault_policy(CacheFaultPolicy::Degrade);

  let err = find.find(CharacterId(99)).await.unwrap_err();

  assert!(err.is_not_found());
  assert!(cache.sets().is_empty());
}

// ─── Creation ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_distinct_ids_for_equal_records() {
  let store = Arc::new(FakeStore::default());
  let create = CreateCharacter::new(store.clone());

  let a = create.create(ezequiel()).await.unwrap();
  let b = create.create(ezequiel()).await.unwrap();

  assert_ne!(a, b);
  assert_eq!(store.rows.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn create_passes_store_errors_through() {
  let create = CreateCharacter::new(Arc::new(FakeStore::failing()));

  let err = create.create(ezequiel()).await.unwrap_err();

  assert_eq!(err.0, "insert");
}

// ─── Types ───────────────────────────────────────────────────────────────────

#[test]
fn character_id_parses_and_displays() {
  let id: CharacterId = "42".parse().unwrap();
  assert_eq!(id, CharacterId(42));
  assert_eq!(id.to_string(), "42");
  assert!("forty-two".parse::<CharacterId>().is_err());
}
