//! The Executor - single entry point to the tree store.
//!
//! The Executor routes commands to the tree handlers and converts results
//! to outputs. Clones share the same tree and key generator.

use std::sync::Arc;

use parking_lot::Mutex;

use firetest_core::{PushKeyGenerator, Tree, Value};

use crate::handlers;
use crate::{Command, Output, Result};

/// The command executor - single entry point to the tree store.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and cheap to clone. Every command takes the
/// tree lock once, so concurrent commands are serialized and each one is
/// observed atomically.
///
/// # Example
///
/// ```
/// use firetest_executor::{Command, Executor, Output, Value};
///
/// let executor = Executor::new();
/// let name = executor
///     .execute(Command::Push { path: "msgs".into(), value: Value::from("hi") })?
///     .into_name()
///     .unwrap();
///
/// let got = executor.execute(Command::Get { path: format!("msgs/{}", name).as_str().into() })?;
/// assert_eq!(got, Output::Value(Value::from("hi")));
/// # Ok::<(), firetest_executor::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    tree: Arc<Mutex<Tree>>,
    keys: Arc<PushKeyGenerator>,
}

impl Default for Executor {
    fn default() -> Self {
        Executor::new()
    }
}

impl Executor {
    /// Create an executor over an empty tree.
    pub fn new() -> Self {
        Executor::with_key_generator(PushKeyGenerator::new())
    }

    /// Create an executor over an empty tree using `keys` for Push.
    pub fn with_key_generator(keys: PushKeyGenerator) -> Self {
        Self {
            tree: Arc::new(Mutex::new(Tree::new())),
            keys: Arc::new(keys),
        }
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error. A failed command leaves the
    /// tree unchanged.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        tracing::debug!(
            target: "firetest::executor",
            command = cmd.name(),
            path = %cmd.path(),
            "execute"
        );

        match cmd {
            Command::Set { path, value } => handlers::tree::set(&self.tree, path, value),
            Command::Update { path, value } => handlers::tree::update(&self.tree, path, value),
            Command::Push { path, value } => {
                handlers::tree::push(&self.tree, &self.keys, path, value)
            }
            Command::Get { path } => handlers::tree::get(&self.tree, path),
            Command::Delete { path } => handlers::tree::delete(&self.tree, path),
        }
    }

    /// Execute multiple commands sequentially.
    ///
    /// Each command runs under its own lock acquisition; the batch as a
    /// whole is not atomic.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    /// Shared handle to the underlying tree.
    pub fn tree(&self) -> &Arc<Mutex<Tree>> {
        &self.tree
    }

    /// Projection of the whole tree.
    pub fn snapshot(&self) -> Value {
        self.tree.lock().project(&firetest_core::Path::root())
    }
}
