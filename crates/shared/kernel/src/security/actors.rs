use fxhash::FxHashMap;
use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;
use vconf_domain::config::ActorConfig;

#[vconf_derive::config_error]
pub enum ActorError {
    #[error("Actor directory error{}: {message}", format_context(.context))]
    Duplicate { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// A user that can create configuration snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub username: String,
    pub superuser: bool,
}

/// Lookup of actors by username or API token.
pub trait ActorDirectory: Debug + Send + Sync {
    fn by_username(&self, username: &str) -> Option<Actor>;
    fn by_token(&self, token: &str) -> Option<Actor>;
}

#[derive(Debug, Default)]
struct Directory {
    actors: FxHashMap<String, Actor>,
    tokens: FxHashMap<String, String>,
}

/// Immutable in-memory [`ActorDirectory`], usually built from the settings file.
#[derive(Debug, Clone, Default)]
pub struct MemoryActors {
    inner: Arc<Directory>,
}

impl MemoryActors {
    /// # Errors
    /// Fails when a username or a token is declared twice.
    pub fn from_config(actors: &[ActorConfig]) -> Result<Self, ActorError> {
        let mut directory = Directory::default();

        for entry in actors {
            let actor = Actor { username: entry.username.clone(), superuser: entry.superuser };
            if directory.actors.insert(entry.username.clone(), actor).is_some() {
                return Err(ActorError::Duplicate {
                    message: format!("username '{}' is declared twice", entry.username).into(),
                    context: None,
                });
            }
            if let Some(token) = &entry.token
                && directory.tokens.insert(token.clone(), entry.username.clone()).is_some()
            {
                return Err(ActorError::Duplicate {
                    message: "the same token is assigned to two actors".into(),
                    context: Some(entry.username.clone().into()),
                });
            }
        }

        Ok(Self { inner: Arc::new(directory) })
    }

    pub fn len(&self) -> usize {
        self.inner.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.actors.is_empty()
    }
}

impl ActorDirectory for MemoryActors {
    fn by_username(&self, username: &str) -> Option<Actor> {
        self.inner.actors.get(username).cloned()
    }

    fn by_token(&self, token: &str) -> Option<Actor> {
        self.inner.tokens.get(token).and_then(|username| self.by_username(username))
    }
}
