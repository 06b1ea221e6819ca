use crate::TodoResult;

/// Key holding the serialized collection of lists.
pub const TODO_LISTS_KEY: &str = "todoLists";

/// Key holding the colour theme preference.
pub const THEME_KEY: &str = "theme";

/// Synchronous string key-value storage.
///
/// Models browser local storage: every value is a string, reads and writes
/// complete immediately, and writes may fail when the medium is full or
/// unavailable. Implementations use interior mutability so one medium can be
/// shared by the list store and the theme preference.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> TodoResult<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> TodoResult<()>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> TodoResult<()>;
}
