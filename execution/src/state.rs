use anyhow::{Context as _, Result};
use arcade_types::{
    execution::{Key, Value},
    ledger::{GlobalConfig, PlayerState},
};
use bytes::{Buf, BufMut};
use commonware_codec::{Encode, EncodeSize, Error, Read, ReadExt, Write};
use commonware_cryptography::{
    ed25519::PublicKey,
    sha256::{Digest, Sha256},
    Hasher,
};
use commonware_runtime::{Clock, Metrics, Spawner, Storage};
use commonware_storage::adb::any::variable::Any as AnyAdb;
use commonware_storage::translator::Translator;
use std::future::Future;

#[cfg(any(test, feature = "mocks"))]
use std::collections::HashMap;

pub type Adb<E, T> = AnyAdb<E, Digest, Value, Sha256, T>;

pub trait State {
    fn get(&self, key: &Key) -> impl Future<Output = Result<Option<Value>>>;
    fn insert(&mut self, key: Key, value: Value) -> impl Future<Output = Result<()>>;
    fn delete(&mut self, key: &Key) -> impl Future<Output = Result<()>>;

    fn apply(&mut self, changes: Vec<(Key, Status)>) -> impl Future<Output = Result<()>> {
        async {
            for (key, status) in changes {
                match status {
                    Status::Update(value) => self.insert(key, value).await?,
                    Status::Delete => self.delete(&key).await?,
                }
            }
            Ok(())
        }
    }
}

impl<E: Spawner + Metrics + Clock + Storage, T: Translator> State for Adb<E, T> {
    async fn get(&self, key: &Key) -> Result<Option<Value>> {
        let key_hash = Sha256::hash(&key.encode());
        AnyAdb::get(self, &key_hash).await.context("adb get")
    }

    async fn insert(&mut self, key: Key, value: Value) -> Result<()> {
        let key_hash = Sha256::hash(&key.encode());
        self.update(key_hash, value).await.context("adb update")?;
        Ok(())
    }

    async fn delete(&mut self, key: &Key) -> Result<()> {
        let key_hash = Sha256::hash(&key.encode());
        AnyAdb::delete(self, key_hash).await.context("adb delete")?;
        Ok(())
    }
}

#[cfg(any(test, feature = "mocks"))]
#[derive(Default)]
pub struct Memory {
    state: HashMap<Key, Value>,
}

#[cfg(any(test, feature = "mocks"))]
impl State for Memory {
    async fn get(&self, key: &Key) -> Result<Option<Value>> {
        Ok(self.state.get(key).cloned())
    }

    async fn insert(&mut self, key: Key, value: Value) -> Result<()> {
        self.state.insert(key, value);
        Ok(())
    }

    async fn delete(&mut self, key: &Key) -> Result<()> {
        self.state.remove(key);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::large_enum_variant)]
pub enum Status {
    Update(Value),
    Delete,
}

impl Write for Status {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Status::Update(value) => {
                0u8.write(writer);
                value.write(writer);
            }
            Status::Delete => 1u8.write(writer),
        }
    }
}

impl Read for Status {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let kind = u8::read(reader)?;
        match kind {
            0 => Ok(Status::Update(Value::read(reader)?)),
            1 => Ok(Status::Delete),
            _ => Err(Error::InvalidEnum(kind)),
        }
    }
}

impl EncodeSize for Status {
    fn encode_size(&self) -> usize {
        1 + match self {
            Status::Update(value) => value.encode_size(),
            Status::Delete => 0,
        }
    }
}

/// Fetch a player record, falling back to the all-zero record for accounts
/// that have never transacted.
pub async fn load_player<S: State>(state: &S, public: &PublicKey) -> Result<PlayerState> {
    Ok(match state.get(&Key::Player(public.clone())).await? {
        Some(Value::Player(player)) => player,
        _ => PlayerState::default(),
    })
}

/// Fetch the global configuration, if one has been installed.
pub async fn load_config<S: State>(state: &S) -> Result<Option<GlobalConfig>> {
    Ok(match state.get(&Key::Config).await? {
        Some(Value::Config(config)) => Some(config),
        _ => None,
    })
}
