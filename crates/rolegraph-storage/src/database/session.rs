// ============================================================================
// Sessions - concurrent access to one shared database
// ============================================================================

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use parking_lot::Mutex;
use rolegraph_catalog::ObjectId;

use crate::{Database, StorageError};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// One connection to a shared [`Database`].
///
/// Every call locks the whole database for its duration, so structural
/// catalog changes from different sessions are serialized. An explicit
/// transaction belongs to the session that opened it; other sessions are
/// refused until it commits or rolls back.
#[derive(Debug)]
pub struct Session {
    id: u64,
    database: Arc<Mutex<Database>>,
    user: Mutex<SessionUser>,
}

/// Who the session acts as. Once the user is known by id, renames of that
/// user (and rollbacks of those renames) are followed through the catalog.
#[derive(Debug, Clone)]
struct SessionUser {
    name: Option<String>,
    id: Option<ObjectId>,
}

impl SessionUser {
    fn resolve(&self, db: &Database) -> Option<String> {
        self.id
            .and_then(|id| db.catalog.grantee(id))
            .filter(|g| g.is_user() && g.is_valid())
            .map(|g| g.name().to_string())
            .or_else(|| self.name.clone())
    }

    /// Pick up a rename done by the last statement. When the current name
    /// no longer resolves (a rename rolled back), keep the known id.
    fn observe(&self, db: &Database) -> Self {
        let name = db.current_user().map(str::to_string);
        let id = name
            .as_deref()
            .and_then(|n| db.catalog.find_user(n))
            .map(|u| u.id())
            .or(self.id);
        SessionUser { name, id }
    }
}

impl Session {
    /// Open a session on `database` acting as `user`
    pub fn new(database: Arc<Mutex<Database>>, user: Option<String>) -> Self {
        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        log::debug!("Opened session {} as {:?}", id, user);
        Session { id, database, user: Mutex::new(SessionUser { name: user, id: None }) }
    }

    /// Wrap a fresh database and open the first session on it
    pub fn open(database: Database, user: Option<String>) -> Self {
        Session::new(Arc::new(Mutex::new(database)), user)
    }

    /// Another session on the same database
    pub fn connect(&self, user: Option<String>) -> Self {
        Session::new(Arc::clone(&self.database), user)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Name of the user this session acts as, following renames
    pub fn user(&self) -> Option<String> {
        let db = self.database.lock();
        self.user.lock().resolve(&db)
    }

    pub fn database(&self) -> Arc<Mutex<Database>> {
        Arc::clone(&self.database)
    }

    /// Run `f` against the locked database with this session's user.
    ///
    /// Fails if another session holds an open transaction.
    pub fn with_database<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Database) -> Result<T, E>,
        E: From<StorageError>,
    {
        let mut db = self.database.lock();
        if let Some(owner) = db.transaction_owner() {
            if owner != self.id {
                return Err(StorageError::TransactionError(format!(
                    "Catalog is locked by a transaction of session {}",
                    owner
                ))
                .into());
            }
        } else if db.in_transaction() {
            return Err(StorageError::TransactionError(
                "Catalog is locked by a transaction outside any session".to_string(),
            )
            .into());
        }
        let user = self.user.lock().resolve(&db);
        db.set_current_user(user);
        let result = f(&mut *db);
        let mut user = self.user.lock();
        *user = user.observe(&db);
        result
    }

    /// Run `f` atomically: commit if it succeeds, roll back if it fails.
    ///
    /// Inside this session's explicit transaction, a failure only rolls back
    /// to the state before `f` ran.
    pub fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Database) -> Result<T, E>,
        E: From<StorageError>,
    {
        self.with_database(|db| {
            if db.in_transaction() {
                let savepoint = format!("session_{}_statement", self.id);
                db.create_savepoint(savepoint.clone())?;
                let result = f(db);
                if result.is_err() {
                    db.rollback_to_savepoint(&savepoint)?;
                }
                db.release_savepoint(&savepoint)?;
                return result;
            }

            db.begin_session_transaction(self.id)?;
            match f(db) {
                Ok(value) => {
                    db.commit_transaction()?;
                    Ok(value)
                }
                Err(e) => {
                    db.rollback_transaction()?;
                    Err(e)
                }
            }
        })
    }

    /// Open an explicit transaction owned by this session
    pub fn begin(&self) -> Result<(), StorageError> {
        self.with_database(|db| db.begin_session_transaction(self.id))
    }

    pub fn commit(&self) -> Result<(), StorageError> {
        self.with_database(|db| db.commit_transaction())
    }

    pub fn rollback(&self) -> Result<(), StorageError> {
        self.with_database(|db| db.rollback_transaction())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let mut db = self.database.lock();
        if db.transaction_owner() == Some(self.id) {
            log::warn!("Session {} closed with an open transaction, rolling back", self.id);
            if let Err(e) = db.rollback_transaction() {
                log::error!("Rollback on close of session {} failed: {}", self.id, e);
            }
        }
    }
}
