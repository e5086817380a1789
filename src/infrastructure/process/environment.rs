use std::collections::{BTreeMap, BTreeSet};
use std::ffi::{OsStr, OsString};

/// Environment handed to a child process
///
/// A snapshot of a base environment plus an explicit overlay. The overlay is
/// merged over the base when the child is spawned; the calling process's own
/// environment is never modified.
///
/// Removals match names case-insensitively when `ignore_case` is set, which is
/// the default on Windows hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionEnvironment {
    base: BTreeMap<OsString, OsString>,
    overlay: BTreeMap<OsString, OsString>,
    removed: BTreeSet<OsString>,
    ignore_case: bool,
}

impl Default for ExecutionEnvironment {
    fn default() -> Self {
        Self {
            base: BTreeMap::new(),
            overlay: BTreeMap::new(),
            removed: BTreeSet::new(),
            ignore_case: cfg!(windows),
        }
    }
}

impl ExecutionEnvironment {
    /// Snapshot the environment of the current process
    pub fn inherited() -> Self {
        Self::from_vars(std::env::vars_os())
    }

    /// Build from an explicit set of variables
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            base: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            ..Self::default()
        }
    }

    /// Treat variable names as case-insensitive when removing them
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self.removed = std::mem::take(&mut self.removed)
            .into_iter()
            .map(|key| self.removal_key(&key))
            .collect();
        self
    }

    fn removal_key(&self, key: &OsStr) -> OsString {
        if self.ignore_case {
            OsString::from(key.to_string_lossy().to_ascii_uppercase())
        } else {
            key.to_os_string()
        }
    }

    fn is_removed(&self, key: &OsStr) -> bool {
        self.removed.contains(&self.removal_key(key))
    }

    /// Add a variable to the overlay
    pub fn with_var(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.overlay.insert(key.into(), value.into());
        self
    }

    /// Drop a variable from the resolved environment
    pub fn without_var(mut self, key: impl Into<OsString>) -> Self {
        let key: OsString = key.into();
        let removal_key = self.removal_key(&key);
        let overlay = std::mem::take(&mut self.overlay);
        self.overlay = overlay
            .into_iter()
            .filter(|(k, _)| self.removal_key(k) != removal_key)
            .collect();
        self.removed.insert(removal_key);
        self
    }

    /// Variables layered over the base snapshot
    pub fn overlay(&self) -> &BTreeMap<OsString, OsString> {
        &self.overlay
    }

    /// Look up a variable in the resolved environment
    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = key.as_ref();
        if let Some(value) = self.overlay.get(key) {
            return Some(value.as_os_str());
        }
        if self.is_removed(key) {
            return None;
        }
        self.base.get(key).map(OsString::as_os_str)
    }

    pub fn contains(&self, key: impl AsRef<OsStr>) -> bool {
        self.get(key).is_some()
    }

    /// Base snapshot with removals applied and the overlay merged on top
    pub fn resolved(&self) -> BTreeMap<OsString, OsString> {
        let mut vars: BTreeMap<OsString, OsString> = self
            .base
            .iter()
            .filter(|(key, _)| !self.is_removed(key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        vars.extend(self.overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
        vars
    }
}
