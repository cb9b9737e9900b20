/// In-memory storage backend
///
/// Mirrors the PostgreSQL constraints that matter to callers: unique
/// usernames, unique favourite pairs, favourites referencing existing movies,
/// cascading favourite removal, and newest-first movie listing.
///
/// Two switches simulate backend failures:
/// - [`InMemoryStore::set_offline`] fails every operation
/// - [`InMemoryStore::fail_access_logs`] fails only access log writes
///
/// [`InMemoryStore::hold_access_logs`] stalls access log writes until the
/// returned gate is notified, one write per `notify_one`.

use super::{Store, StoreError, StoreResult};
use crate::models::{AccessLogEntry, CreateMovie, CreateUser, Movie, RankingRow, User};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

#[derive(Default)]
struct State {
    users: BTreeMap<i64, User>,
    movies: BTreeMap<i64, Movie>,
    favorites: BTreeSet<(i64, i64)>,
    access_logs: Vec<AccessLogEntry>,
    next_user_id: i64,
    next_movie_id: i64,
    next_log_id: i64,
}

/// Process-local store
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    offline: AtomicBool,
    failing_access_logs: AtomicBool,
    access_log_gate: Mutex<Option<Arc<Notify>>>,
}

impl InMemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every operation fail with [`StoreError::Unavailable`]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Makes access log writes fail while everything else keeps working
    pub fn fail_access_logs(&self, failing: bool) {
        self.failing_access_logs.store(failing, Ordering::SeqCst);
    }

    /// Stalls every later access log write until the returned gate lets it through
    pub fn hold_access_logs(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        if let Ok(mut slot) = self.access_log_gate.lock() {
            *slot = Some(gate.clone());
        }
        gate
    }

    /// Snapshot of every access log entry, oldest first
    pub fn access_logs(&self) -> Vec<AccessLogEntry> {
        self.state
            .lock()
            .map(|state| state.access_logs.clone())
            .unwrap_or_default()
    }

    /// Number of stored users
    pub fn user_count(&self) -> usize {
        self.state
            .lock()
            .map(|state| state.users.len())
            .unwrap_or_default()
    }

    fn state(&self) -> StoreResult<MutexGuard<'_, State>> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn insert_user(state: &mut State, data: CreateUser) -> User {
        state.next_user_id += 1;
        let user = User {
            id: state.next_user_id,
            username: data.username,
            password_hash: data.password_hash,
            role: data.role,
        };
        state.users.insert(user.id, user.clone());
        user
    }

    fn username_taken(state: &State, username: &str) -> bool {
        state.users.values().any(|u| u.username == username)
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut state = self.state()?;
        if Self::username_taken(&state, &data.username) {
            return Err(StoreError::UniqueViolation(format!(
                "username '{}' already exists",
                data.username
            )));
        }
        Ok(Self::insert_user(&mut state, data))
    }

    async fn create_user_if_absent(&self, data: CreateUser) -> StoreResult<bool> {
        let mut state = self.state()?;
        if Self::username_taken(&state, &data.username) {
            return Ok(false);
        }
        Self::insert_user(&mut state, data);
        Ok(true)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let state = self.state()?;
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn append_access_log(&self, user_id: i64) -> StoreResult<AccessLogEntry> {
        let gate = self
            .access_log_gate
            .lock()
            .ok()
            .and_then(|slot| slot.clone());
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.failing_access_logs.load(Ordering::SeqCst) {
            return Err(StoreError::Database("access_logs is not writable".to_string()));
        }
        let mut state = self.state()?;
        state.next_log_id += 1;
        let entry = AccessLogEntry {
            id: state.next_log_id,
            user_id,
            accessed_at: Utc::now(),
        };
        state.access_logs.push(entry.clone());
        Ok(entry)
    }

    async fn access_ranking(&self) -> StoreResult<Vec<RankingRow>> {
        let state = self.state()?;

        let mut counts: HashMap<i64, i64> = HashMap::new();
        for entry in &state.access_logs {
            *counts.entry(entry.user_id).or_default() += 1;
        }

        let mut rows: Vec<RankingRow> = counts
            .into_iter()
            .filter_map(|(user_id, acessos)| {
                state.users.get(&user_id).map(|user| RankingRow {
                    username: user.username.clone(),
                    acessos,
                })
            })
            .collect();

        rows.sort_by(|a, b| b.acessos.cmp(&a.acessos).then_with(|| a.username.cmp(&b.username)));
        Ok(rows)
    }

    async fn list_movies(&self) -> StoreResult<Vec<Movie>> {
        let state = self.state()?;
        Ok(state.movies.values().rev().cloned().collect())
    }

    async fn create_movie(&self, data: CreateMovie) -> StoreResult<i64> {
        let mut state = self.state()?;
        state.next_movie_id += 1;
        let id = state.next_movie_id;
        state.movies.insert(
            id,
            Movie {
                id,
                title: data.title,
                director: data.director,
                year: data.year,
                genre: data.genre,
            },
        );
        Ok(id)
    }

    async fn delete_movie(&self, id: i64) -> StoreResult<bool> {
        let mut state = self.state()?;
        let existed = state.movies.remove(&id).is_some();
        state.favorites.retain(|&(_, movie_id)| movie_id != id);
        Ok(existed)
    }

    async fn add_favorite(&self, user_id: i64, movie_id: i64) -> StoreResult<()> {
        let mut state = self.state()?;
        if !state.users.contains_key(&user_id) {
            return Err(StoreError::ForeignKeyViolation(format!("user {} does not exist", user_id)));
        }
        if !state.movies.contains_key(&movie_id) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "movie {} does not exist",
                movie_id
            )));
        }
        state.favorites.insert((user_id, movie_id));
        Ok(())
    }

    async fn list_favorites(&self, user_id: i64) -> StoreResult<Vec<Movie>> {
        let state = self.state()?;
        Ok(state
            .favorites
            .iter()
            .filter(|&&(uid, _)| uid == user_id)
            .filter_map(|(_, movie_id)| state.movies.get(movie_id).cloned())
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.state().map(|_| ())
    }
}
