// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::path::Path;
use std::sync::Mutex;

use crate::storage::Storage;
use crate::types::{
    known_datacenters, ChannelState, Datacenter, EntityEntry, PeerKind, UpdatesState,
    UserIdentity,
};

const VERSION: i64 = 1;

struct Database(sqlite::Connection);

/// Releases the write savepoint on drop, so that every internal write is
/// atomic regardless of whether an outer transaction is open.
struct WriteGuard<'c>(&'c sqlite::Connection);

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        self.0.execute("RELEASE write_guard").unwrap();
    }
}

/// SQLite-backed storage, one file per account. This is the recommended
/// backend.
///
/// The file contents grant full access to the account, so a warning is
/// logged when other users of the machine can read it.
pub struct SqliteStorage {
    database: Mutex<Database>,
}

impl Database {
    fn init(&self) -> sqlite::Result<()> {
        let mut user_version = self
            .fetch_one("PRAGMA user_version", &[], |stmt| stmt.read::<i64, _>(0))?
            .unwrap_or(0);
        if user_version == VERSION {
            return Ok(());
        }

        if user_version == 0 {
            self.migrate_v0_to_v1()?;
            user_version += 1;
        }
        if user_version == VERSION {
            // PRAGMA values cannot be bound, but `VERSION` is not input.
            self.0.execute(format!("PRAGMA user_version = {VERSION}"))?;
        }
        Ok(())
    }

    fn migrate_v0_to_v1(&self) -> sqlite::Result<()> {
        let _guard = self.write_guard()?;
        self.0.execute(
            "CREATE TABLE datacenter (
                id INTEGER NOT NULL,
                ipv4 TEXT,
                ipv6 TEXT,
                port INTEGER NOT NULL,
                is_media INTEGER NOT NULL,
                is_home INTEGER NOT NULL,
                PRIMARY KEY (id))",
        )?;
        self.0.execute(
            "CREATE TABLE auth_key (
                dc_id INTEGER NOT NULL,
                key BLOB NOT NULL,
                PRIMARY KEY (dc_id))",
        )?;
        self.0.execute(
            "CREATE TABLE session (
                self_id INTEGER,
                self_is_bot INTEGER,
                pts INTEGER,
                qts INTEGER,
                date INTEGER,
                seq INTEGER)",
        )?;
        self.0.execute(
            "CREATE TABLE channel_state (
                channel_id INTEGER NOT NULL,
                pts INTEGER NOT NULL,
                PRIMARY KEY (channel_id))",
        )?;
        self.0.execute(
            "CREATE TABLE entity (
                id INTEGER NOT NULL,
                kind INTEGER NOT NULL,
                access_hash INTEGER,
                username TEXT,
                phone TEXT,
                PRIMARY KEY (id))",
        )?;

        self.seed_datacenters()
    }

    fn seed_datacenters(&self) -> sqlite::Result<()> {
        for dc in known_datacenters() {
            self.insert_datacenter(&dc)?;
        }
        Ok(())
    }

    fn insert_datacenter(&self, dc: &Datacenter) -> sqlite::Result<()> {
        let mut stmt = self.0.prepare(
            "INSERT OR REPLACE INTO datacenter VALUES
                (:id, :ipv4, :ipv6, :port, :is_media, :is_home)",
        )?;
        stmt.bind((":id", dc.id as i64))?;
        if let Some(ipv4) = dc.ipv4 {
            stmt.bind((":ipv4", ipv4.to_string().as_str()))?;
        }
        if let Some(ipv6) = dc.ipv6 {
            stmt.bind((":ipv6", ipv6.to_string().as_str()))?;
        }
        stmt.bind((":port", dc.port as i64))?;
        stmt.bind((":is_media", dc.is_media as i64))?;
        stmt.bind((":is_home", dc.is_home as i64))?;
        stmt.next()?;
        Ok(())
    }

    /// Nested-transaction-safe guard for multi-statement writes.
    fn write_guard(&self) -> sqlite::Result<WriteGuard<'_>> {
        self.0.execute("SAVEPOINT write_guard")?;
        Ok(WriteGuard(&self.0))
    }

    fn fetch_one<T, F: FnOnce(sqlite::Statement) -> sqlite::Result<T>>(
        &self,
        statement: &str,
        bindings: &[(&str, sqlite::Value)],
        select: F,
    ) -> sqlite::Result<Option<T>> {
        let mut statement = self.0.prepare(statement)?;
        statement.bind(bindings)?;
        let result = match statement.next()? {
            sqlite::State::Row => Some(select(statement)?),
            sqlite::State::Done => None,
        };
        Ok(result)
    }

    fn fetch_all<T, F: FnMut(&sqlite::Statement) -> sqlite::Result<T>>(
        &self,
        statement: &str,
        bindings: &[(&str, sqlite::Value)],
        mut select: F,
    ) -> sqlite::Result<Vec<T>> {
        let mut result = Vec::new();
        let mut statement = self.0.prepare(statement)?;
        statement.bind(bindings)?;
        while statement.next()? == sqlite::State::Row {
            result.push(select(&statement)?);
        }
        Ok(result)
    }

    fn session_row_exists(&self) -> bool {
        self.fetch_one("SELECT 1 FROM session LIMIT 1", &[], |_| Ok(()))
            .unwrap()
            .is_some()
    }
}

impl SqliteStorage {
    /// Open (or create) the session database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> sqlite::Result<Self> {
        let database = Database(sqlite::Connection::open(&path)?);
        database.init()?;
        warn_if_world_readable(path.as_ref());
        Ok(Self {
            database: Mutex::new(database),
        })
    }
}

#[cfg(unix)]
fn warn_if_world_readable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = std::fs::metadata(path) {
        let mode = metadata.permissions().mode();
        if mode & 0o077 != 0 {
            log::warn!(
                "session file {:?} has mode {:o}; it holds the account's keys and \
                 should not be readable by other users",
                path,
                mode & 0o777
            );
        }
    }
}

#[cfg(not(unix))]
fn warn_if_world_readable(_path: &Path) {}

impl Storage for SqliteStorage {
    fn load_datacenter(&self, id: i32) -> Option<Datacenter> {
        let db = self.database.lock().unwrap();
        db.fetch_one(
            "SELECT * FROM datacenter WHERE id = :id LIMIT 1",
            &[(":id", sqlite::Value::Integer(id as i64))],
            |stmt| {
                Ok(Datacenter {
                    id: stmt.read::<i64, _>("id")? as i32,
                    ipv4: stmt
                        .read::<Option<String>, _>("ipv4")?
                        .map(|addr| addr.parse().unwrap()),
                    ipv6: stmt
                        .read::<Option<String>, _>("ipv6")?
                        .map(|addr| addr.parse().unwrap()),
                    port: stmt.read::<i64, _>("port")? as u16,
                    is_media: stmt.read::<i64, _>("is_media")? != 0,
                    is_home: stmt.read::<i64, _>("is_home")? != 0,
                })
            },
        )
        .unwrap()
    }

    fn save_datacenter(&self, dc: &Datacenter) {
        let db = self.database.lock().unwrap();
        db.insert_datacenter(dc).unwrap();
    }

    fn home_datacenter(&self) -> Option<i32> {
        let db = self.database.lock().unwrap();
        db.fetch_one(
            "SELECT id FROM datacenter WHERE is_home != 0 LIMIT 1",
            &[],
            |stmt| Ok(stmt.read::<i64, _>("id")? as i32),
        )
        .unwrap()
    }

    fn set_home_datacenter(&self, id: i32) {
        let db = self.database.lock().unwrap();
        let _guard = db.write_guard().unwrap();
        db.0.execute("UPDATE datacenter SET is_home = 0").unwrap();
        let mut stmt =
            db.0.prepare("UPDATE datacenter SET is_home = 1 WHERE id = :id")
                .unwrap();
        stmt.bind((":id", id as i64)).unwrap();
        stmt.next().unwrap();
    }

    fn load_auth_key(&self, dc_id: i32) -> Option<[u8; 256]> {
        let db = self.database.lock().unwrap();
        db.fetch_one(
            "SELECT key FROM auth_key WHERE dc_id = :dc_id LIMIT 1",
            &[(":dc_id", sqlite::Value::Integer(dc_id as i64))],
            |stmt| Ok(stmt.read::<Vec<u8>, _>("key")?),
        )
        .unwrap()
        .map(|key| key.try_into().expect("stored auth key of invalid length"))
    }

    fn save_auth_key(&self, dc_id: i32, key: &[u8; 256]) {
        let db = self.database.lock().unwrap();
        let mut stmt =
            db.0.prepare("INSERT OR REPLACE INTO auth_key VALUES (:dc_id, :key)")
                .unwrap();
        stmt.bind((":dc_id", dc_id as i64)).unwrap();
        stmt.bind((":key", key.as_slice())).unwrap();
        stmt.next().unwrap();
    }

    fn clear_auth_key(&self, dc_id: i32) {
        let db = self.database.lock().unwrap();
        let mut stmt =
            db.0.prepare("DELETE FROM auth_key WHERE dc_id = :dc_id")
                .unwrap();
        stmt.bind((":dc_id", dc_id as i64)).unwrap();
        stmt.next().unwrap();
    }

    fn auth_key_datacenters(&self) -> Vec<i32> {
        let db = self.database.lock().unwrap();
        db.fetch_all("SELECT dc_id FROM auth_key ORDER BY dc_id", &[], |stmt| {
            Ok(stmt.read::<i64, _>("dc_id")? as i32)
        })
        .unwrap()
    }

    fn load_identity(&self) -> Option<UserIdentity> {
        let db = self.database.lock().unwrap();
        db.fetch_one("SELECT * FROM session LIMIT 1", &[], |stmt| {
            Ok(stmt
                .read::<Option<i64>, _>("self_id")?
                .map(|id| UserIdentity {
                    id,
                    is_bot: stmt
                        .read::<Option<i64>, _>("self_is_bot")
                        .unwrap_or(None)
                        .unwrap_or(0)
                        != 0,
                }))
        })
        .unwrap()
        .flatten()
    }

    fn save_identity(&self, identity: &UserIdentity) {
        let db = self.database.lock().unwrap();
        let _guard = db.write_guard().unwrap();
        let mut stmt = if db.session_row_exists() {
            db.0.prepare("UPDATE session SET self_id = :self_id, self_is_bot = :self_is_bot")
                .unwrap()
        } else {
            db.0.prepare(
                "INSERT INTO session VALUES (:self_id, :self_is_bot, NULL, NULL, NULL, NULL)",
            )
            .unwrap()
        };
        stmt.bind((":self_id", identity.id)).unwrap();
        stmt.bind((":self_is_bot", identity.is_bot as i64)).unwrap();
        stmt.next().unwrap();
    }

    fn load_update_state(&self) -> Option<UpdatesState> {
        let db = self.database.lock().unwrap();
        db.fetch_one("SELECT * FROM session LIMIT 1", &[], |stmt| {
            Ok(stmt.read::<Option<i64>, _>("pts")?.map(|pts| UpdatesState {
                pts: pts as i32,
                qts: stmt.read::<Option<i64>, _>("qts").unwrap_or(None).unwrap_or(0) as i32,
                date: stmt
                    .read::<Option<i64>, _>("date")
                    .unwrap_or(None)
                    .unwrap_or(0) as i32,
                seq: stmt.read::<Option<i64>, _>("seq").unwrap_or(None).unwrap_or(0) as i32,
            }))
        })
        .unwrap()
        .flatten()
    }

    fn save_update_state(&self, state: &UpdatesState) {
        let db = self.database.lock().unwrap();
        let _guard = db.write_guard().unwrap();
        let mut stmt = if db.session_row_exists() {
            db.0.prepare("UPDATE session SET pts = :pts, qts = :qts, date = :date, seq = :seq")
                .unwrap()
        } else {
            db.0.prepare("INSERT INTO session VALUES (NULL, NULL, :pts, :qts, :date, :seq)")
                .unwrap()
        };
        stmt.bind((":pts", state.pts as i64)).unwrap();
        stmt.bind((":qts", state.qts as i64)).unwrap();
        stmt.bind((":date", state.date as i64)).unwrap();
        stmt.bind((":seq", state.seq as i64)).unwrap();
        stmt.next().unwrap();
    }

    fn load_channel_state(&self, channel_id: i64) -> Option<i32> {
        let db = self.database.lock().unwrap();
        db.fetch_one(
            "SELECT pts FROM channel_state WHERE channel_id = :channel_id LIMIT 1",
            &[(":channel_id", sqlite::Value::Integer(channel_id))],
            |stmt| Ok(stmt.read::<i64, _>("pts")? as i32),
        )
        .unwrap()
    }

    fn save_channel_state(&self, channel_id: i64, pts: i32) {
        let db = self.database.lock().unwrap();
        let mut stmt =
            db.0.prepare("INSERT OR REPLACE INTO channel_state VALUES (:channel_id, :pts)")
                .unwrap();
        stmt.bind((":channel_id", channel_id)).unwrap();
        stmt.bind((":pts", pts as i64)).unwrap();
        stmt.next().unwrap();
    }

    fn load_channel_states(&self) -> Vec<ChannelState> {
        let db = self.database.lock().unwrap();
        db.fetch_all(
            "SELECT * FROM channel_state ORDER BY channel_id",
            &[],
            |stmt| {
                Ok(ChannelState {
                    channel_id: stmt.read::<i64, _>("channel_id")?,
                    pts: stmt.read::<i64, _>("pts")? as i32,
                })
            },
        )
        .unwrap()
    }

    fn get_entity(&self, id: i64) -> Option<EntityEntry> {
        let db = self.database.lock().unwrap();
        db.fetch_one(
            "SELECT * FROM entity WHERE id = :id LIMIT 1",
            &[(":id", sqlite::Value::Integer(id))],
            |stmt| {
                Ok(EntityEntry {
                    id: stmt.read::<i64, _>("id")?,
                    kind: PeerKind::from_code(stmt.read::<i64, _>("kind")? as i32)
                        .expect("stored entity of unknown kind"),
                    hash: stmt.read::<Option<i64>, _>("access_hash")?,
                    username: stmt.read::<Option<String>, _>("username")?,
                    phone: stmt.read::<Option<String>, _>("phone")?,
                })
            },
        )
        .unwrap()
    }

    fn put_entity(&self, entity: &EntityEntry) {
        let db = self.database.lock().unwrap();
        let mut stmt = db
            .0
            .prepare("INSERT OR REPLACE INTO entity VALUES (:id, :kind, :access_hash, :username, :phone)")
            .unwrap();
        stmt.bind((":id", entity.id)).unwrap();
        stmt.bind((":kind", entity.kind.to_code() as i64)).unwrap();
        if let Some(hash) = entity.hash {
            stmt.bind((":access_hash", hash)).unwrap();
        }
        if let Some(ref username) = entity.username {
            stmt.bind((":username", username.as_str())).unwrap();
        }
        if let Some(ref phone) = entity.phone {
            stmt.bind((":phone", phone.as_str())).unwrap();
        }
        stmt.next().unwrap();
    }

    fn begin_transaction(&self) {
        let db = self.database.lock().unwrap();
        db.0.execute("BEGIN TRANSACTION").unwrap();
    }

    fn commit(&self) {
        let db = self.database.lock().unwrap();
        db.0.execute("COMMIT").unwrap();
    }

    fn rollback(&self) {
        let db = self.database.lock().unwrap();
        db.0.execute("ROLLBACK").unwrap();
    }

    fn wipe(&self) {
        let db = self.database.lock().unwrap();
        let _guard = db.write_guard().unwrap();
        for table in ["datacenter", "auth_key", "session", "channel_state", "entity"] {
            db.0.execute(format!("DELETE FROM {table}")).unwrap();
        }
        db.seed_datacenters().unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_DC;

    fn storage() -> SqliteStorage {
        SqliteStorage::open(":memory:").unwrap()
    }

    #[test]
    fn fresh_storage_knows_primary_datacenters() {
        let storage = storage();
        let dc = storage.load_datacenter(DEFAULT_DC).unwrap();
        assert_eq!(dc.port, 443);
        assert!(dc.is_home);
        assert_eq!(storage.home_datacenter(), Some(DEFAULT_DC));
        assert_eq!(storage.load_datacenter(99), None);
    }

    #[test]
    fn exercise_sqlite_storage() {
        let storage = storage();

        storage.set_home_datacenter(5);
        assert_eq!(storage.home_datacenter(), Some(5));

        assert_eq!(storage.load_auth_key(2), None);
        storage.save_auth_key(2, &[3; 256]);
        storage.save_auth_key(5, &[5; 256]);
        assert_eq!(storage.load_auth_key(2), Some([3; 256]));
        assert_eq!(storage.auth_key_datacenters(), vec![2, 5]);
        storage.clear_auth_key(2);
        assert_eq!(storage.load_auth_key(2), None);

        assert_eq!(storage.load_identity(), None);
        storage.save_identity(&UserIdentity {
            id: 777000,
            is_bot: false,
        });
        assert_eq!(
            storage.load_identity(),
            Some(UserIdentity {
                id: 777000,
                is_bot: false
            })
        );

        assert_eq!(storage.load_update_state(), None);
        let state = UpdatesState {
            pts: 1,
            qts: 2,
            date: 3,
            seq: 4,
        };
        storage.save_update_state(&state);
        assert_eq!(storage.load_update_state(), Some(state));
        // Saving the state kept the identity, and vice versa.
        assert!(storage.load_identity().is_some());

        storage.save_channel_state(100, 7);
        storage.save_channel_state(50, 6);
        assert_eq!(storage.load_channel_state(100), Some(7));
        assert_eq!(
            storage.load_channel_states(),
            vec![
                ChannelState {
                    channel_id: 50,
                    pts: 6
                },
                ChannelState {
                    channel_id: 100,
                    pts: 7
                },
            ]
        );

        let entity = EntityEntry {
            id: 10,
            kind: PeerKind::Channel,
            hash: Some(-1),
            username: Some("durov".into()),
            phone: None,
        };
        storage.put_entity(&entity);
        assert_eq!(storage.get_entity(10), Some(entity));

        storage.wipe();
        assert_eq!(storage.load_auth_key(5), None);
        assert_eq!(storage.load_identity(), None);
        assert_eq!(storage.get_entity(10), None);
        assert_eq!(storage.home_datacenter(), Some(DEFAULT_DC));
    }

    #[test]
    fn sign_in_writes_are_transactional() {
        let storage = storage();

        storage.begin_transaction();
        storage.save_auth_key(2, &[1; 256]);
        storage.save_identity(&UserIdentity {
            id: 1,
            is_bot: false,
        });
        storage.rollback();
        assert_eq!(storage.load_auth_key(2), None);
        assert_eq!(storage.load_identity(), None);

        storage.begin_transaction();
        storage.save_auth_key(2, &[1; 256]);
        storage.save_identity(&UserIdentity {
            id: 1,
            is_bot: false,
        });
        storage.commit();
        assert_eq!(storage.load_auth_key(2), Some([1; 256]));
        assert!(storage.load_identity().is_some());
    }
}
