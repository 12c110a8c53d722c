//! In-memory storage backend with the same contract the kernel store
//! honors: slash-separated paths, zero-filled gaps on far writes, rename
//! replacing regular destinations.

use hearth_abi::services::{ObjectKind, StorageError, StorageObject, StorageResult, StorageService};
use spin::Mutex;

struct Node {
    parent: usize,
    name: Vec<u8>,
    kind: ObjectKind,
    data: Vec<u8>,
    alive: bool,
}

struct StoreState {
    nodes: Vec<Node>,
}

const ROOT: usize = 0;

pub struct RamStore {
    state: Mutex<StoreState>,
}

impl Default for RamStore {
    fn default() -> Self {
        Self::new()
    }
}

fn components(path: &[u8]) -> impl Iterator<Item = &[u8]> {
    path.split(|&b| b == b'/').filter(|c| !c.is_empty())
}

impl RamStore {
    pub fn new() -> Self {
        let root = Node {
            parent: ROOT,
            name: Vec::new(),
            kind: ObjectKind::Directory,
            data: Vec::new(),
            alive: true,
        };
        Self {
            state: Mutex::new(StoreState { nodes: vec![root] }),
        }
    }

    /// Drop in a file with contents, creating parent directories. Test
    /// setup only.
    pub fn seed_file(&self, path: &[u8], contents: &[u8]) {
        let mut state = self.state.lock();
        let mut parent = ROOT;
        let parts: Vec<&[u8]> = components(path).collect();
        assert!(!parts.is_empty(), "seed path needs a file name");
        for part in &parts[..parts.len() - 1] {
            parent = match find_child(&state, parent, part) {
                Some(idx) => idx,
                None => push_node(&mut state, parent, part, ObjectKind::Directory),
            };
        }
        let name = parts[parts.len() - 1];
        let idx = match find_child(&state, parent, name) {
            Some(idx) => idx,
            None => push_node(&mut state, parent, name, ObjectKind::Regular),
        };
        state.nodes[idx].data = contents.to_vec();
    }

    /// Current contents of a regular file, if it exists.
    pub fn contents(&self, path: &[u8]) -> Option<Vec<u8>> {
        let state = self.state.lock();
        let idx = walk(&state, path).ok()?;
        (state.nodes[idx].kind == ObjectKind::Regular).then(|| state.nodes[idx].data.clone())
    }

    pub fn exists(&self, path: &[u8]) -> bool {
        walk(&self.state.lock(), path).is_ok()
    }
}

fn find_child(state: &StoreState, parent: usize, name: &[u8]) -> Option<usize> {
    state
        .nodes
        .iter()
        .position(|n| n.alive && n.parent == parent && n.name == name && !n.name.is_empty())
}

fn push_node(state: &mut StoreState, parent: usize, name: &[u8], kind: ObjectKind) -> usize {
    state.nodes.push(Node {
        parent,
        name: name.to_vec(),
        kind,
        data: Vec::new(),
        alive: true,
    });
    state.nodes.len() - 1
}

/// Resolve a full path to a node index.
fn walk(state: &StoreState, path: &[u8]) -> StorageResult<usize> {
    if path.is_empty() {
        return Err(StorageError::InvalidPath);
    }
    let mut current = ROOT;
    for part in components(path) {
        if state.nodes[current].kind != ObjectKind::Directory {
            return Err(StorageError::NotDirectory);
        }
        current = find_child(state, current, part).ok_or(StorageError::NotFound)?;
    }
    Ok(current)
}

/// Resolve everything but the last component, returning the parent index
/// and the final name.
fn walk_parent<'p>(state: &StoreState, path: &'p [u8]) -> StorageResult<(usize, &'p [u8])> {
    let parts: Vec<&[u8]> = components(path).collect();
    let Some((&name, dirs)) = parts.split_last() else {
        return Err(StorageError::InvalidPath);
    };
    let mut current = ROOT;
    for part in dirs {
        if state.nodes[current].kind != ObjectKind::Directory {
            return Err(StorageError::NotDirectory);
        }
        current = find_child(state, current, part).ok_or(StorageError::NotFound)?;
    }
    if state.nodes[current].kind != ObjectKind::Directory {
        return Err(StorageError::NotDirectory);
    }
    Ok((current, name))
}

fn regular(state: &StoreState, object: StorageObject) -> StorageResult<usize> {
    let idx = object as usize;
    let node = state.nodes.get(idx).ok_or(StorageError::Io)?;
    if !node.alive {
        return Err(StorageError::Io);
    }
    if node.kind != ObjectKind::Regular {
        return Err(StorageError::IsDirectory);
    }
    Ok(idx)
}

impl StorageService for RamStore {
    fn resolve(&self, path: &[u8]) -> StorageResult<(StorageObject, ObjectKind)> {
        let state = self.state.lock();
        let idx = walk(&state, path)?;
        Ok((idx as StorageObject, state.nodes[idx].kind))
    }

    fn length(&self, object: StorageObject) -> StorageResult<u64> {
        let state = self.state.lock();
        let idx = regular(&state, object)?;
        Ok(state.nodes[idx].data.len() as u64)
    }

    fn read_at(&self, object: StorageObject, offset: u64, buf: &mut [u8]) -> StorageResult<usize> {
        let state = self.state.lock();
        let idx = regular(&state, object)?;
        let data = &state.nodes[idx].data;
        let offset = offset as usize;
        if offset >= data.len() {
            return Ok(0);
        }
        let take = buf.len().min(data.len() - offset);
        buf[..take].copy_from_slice(&data[offset..offset + take]);
        Ok(take)
    }

    fn write_at(&self, object: StorageObject, offset: u64, buf: &[u8]) -> StorageResult<usize> {
        let mut state = self.state.lock();
        let idx = regular(&state, object)?;
        let data = &mut state.nodes[idx].data;
        let offset = offset as usize;
        let end = offset + buf.len();
        if data.len() < end {
            data.resize(end, 0);
        }
        data[offset..end].copy_from_slice(buf);
        Ok(buf.len())
    }

    fn set_length(&self, object: StorageObject, len: u64) -> StorageResult<()> {
        let mut state = self.state.lock();
        let idx = regular(&state, object)?;
        state.nodes[idx].data.resize(len as usize, 0);
        Ok(())
    }

    fn create_file(&self, path: &[u8]) -> StorageResult<StorageObject> {
        let mut state = self.state.lock();
        let (parent, name) = walk_parent(&state, path)?;
        if find_child(&state, parent, name).is_some() {
            return Err(StorageError::Exists);
        }
        let idx = push_node(&mut state, parent, name, ObjectKind::Regular);
        Ok(idx as StorageObject)
    }

    fn create_dir(&self, path: &[u8]) -> StorageResult<()> {
        let mut state = self.state.lock();
        let (parent, name) = walk_parent(&state, path)?;
        if find_child(&state, parent, name).is_some() {
            return Err(StorageError::Exists);
        }
        push_node(&mut state, parent, name, ObjectKind::Directory);
        Ok(())
    }

    fn remove(&self, path: &[u8]) -> StorageResult<()> {
        let mut state = self.state.lock();
        let idx = walk(&state, path)?;
        if state.nodes[idx].kind == ObjectKind::Directory {
            return Err(StorageError::IsDirectory);
        }
        state.nodes[idx].alive = false;
        Ok(())
    }

    fn rename(&self, from: &[u8], to: &[u8]) -> StorageResult<()> {
        let mut state = self.state.lock();
        let src = walk(&state, from)?;
        let (parent, name) = walk_parent(&state, to)?;
        if let Some(existing) = find_child(&state, parent, name) {
            if existing == src {
                return Ok(());
            }
            if state.nodes[existing].kind == ObjectKind::Directory {
                return Err(StorageError::IsDirectory);
            }
            state.nodes[existing].alive = false;
        }
        state.nodes[src].parent = parent;
        state.nodes[src].name = name.to_vec();
        Ok(())
    }

    fn release(&self, _object: StorageObject) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_nested_paths() {
        let store = RamStore::new();
        store.seed_file(b"/wads/doom1.wad", b"IWAD");
        let (_, kind) = store.resolve(b"/wads/doom1.wad").unwrap();
        assert_eq!(kind, ObjectKind::Regular);
        let (_, kind) = store.resolve(b"/wads").unwrap();
        assert_eq!(kind, ObjectKind::Directory);
        assert_eq!(store.resolve(b"/missing"), Err(StorageError::NotFound));
        assert_eq!(store.resolve(b""), Err(StorageError::InvalidPath));
    }

    #[test]
    fn relative_and_doubled_slashes_normalize() {
        let store = RamStore::new();
        store.seed_file(b"cfg/default.cfg", b"x");
        assert!(store.exists(b"/cfg//default.cfg"));
        assert!(store.exists(b"cfg/default.cfg"));
    }

    #[test]
    fn far_write_zero_fills_the_gap() {
        let store = RamStore::new();
        let obj = store.create_file(b"/gap.bin").unwrap();
        store.write_at(obj, 4, b"xy").unwrap();
        assert_eq!(store.contents(b"/gap.bin").unwrap(), b"\0\0\0\0xy");
    }

    #[test]
    fn rename_replaces_regular_target() {
        let store = RamStore::new();
        store.seed_file(b"/a.tmp", b"new");
        store.seed_file(b"/a.cfg", b"old");
        store.rename(b"/a.tmp", b"/a.cfg").unwrap();
        assert_eq!(store.contents(b"/a.cfg").unwrap(), b"new");
        assert!(!store.exists(b"/a.tmp"));
    }

    #[test]
    fn remove_rejects_directories() {
        let store = RamStore::new();
        store.seed_file(b"/dir/file", b"");
        assert_eq!(store.remove(b"/dir"), Err(StorageError::IsDirectory));
        store.remove(b"/dir/file").unwrap();
        assert!(!store.exists(b"/dir/file"));
        assert!(store.exists(b"/dir"));
    }
}
