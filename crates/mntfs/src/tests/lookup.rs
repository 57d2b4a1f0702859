use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Error;
use crate::memory::new_fs;
use crate::{EntryType, FS, NodeID, NodeIdAllocator, ROOT_ID, read_dir};

fn ids_by_name(entries: &[crate::DirEntry]) -> HashMap<String, u64> {
    entries
        .iter()
        .map(|e| (e.name.clone(), e.id.as_u64()))
        .collect()
}

#[tokio::test]
async fn test_root_is_inode_one() {
    let fs = new_fs();
    let root = fs.root();

    assert_eq!(root.id(), ROOT_ID);
    assert!(root.id().is_root());
    assert_eq!(root.name(), "");
    assert!(root.same_node(&fs.root()));
}

#[tokio::test]
async fn test_fresh_root_is_empty() {
    let fs = new_fs();
    let entries = read_dir(&fs.root()).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_lookup_creates_directory() {
    let fs = new_fs();
    let foo = fs.root().lookup("foo").await.unwrap();

    let md = foo.attributes();
    assert_eq!(foo.name(), "foo");
    assert_eq!(md.id, NodeID::new(2));
    assert_eq!(md.entry_type, EntryType::Directory);
    assert_eq!(md.permissions, 0o755);
    assert_eq!(md.nlink, 2);
}

#[tokio::test]
async fn test_lookup_is_idempotent() {
    let fs = new_fs();
    let root = fs.root();

    let first = root.lookup("foo").await.unwrap();
    let second = root.lookup("foo").await.unwrap();

    assert_eq!(first.id(), second.id());
    assert!(first.same_node(&second));
    assert_eq!(first.attributes(), second.attributes());
}

#[tokio::test]
async fn test_distinct_names_get_distinct_ids() {
    let fs = new_fs();
    let root = fs.root();

    let mut seen = Vec::new();
    for name in ["a", "b", "c", "d", "e"] {
        seen.push(root.lookup(name).await.unwrap().id());
    }

    // Strictly increasing from the root, no gaps and no repeats.
    let expected: Vec<_> = (2..=6).map(NodeID::new).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_lookup_below_leaf_is_not_found() {
    let fs = new_fs();
    let foo = fs.root().lookup("foo").await.unwrap();

    let err = foo.lookup("baz").await.unwrap_err();
    assert_eq!(err, Error::not_found("/foo/baz"));
    assert!(err.is_not_found());

    // Even a name that exists under the root.
    let err = foo.lookup("foo").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_leaf_lists_nothing() {
    let fs = new_fs();
    let foo = fs.root().lookup("foo").await.unwrap();
    assert!(read_dir(&foo).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_after_lookups() {
    let fs = new_fs();
    let root = fs.root();

    let mut created = HashMap::new();
    for name in ["a", "b", "c"] {
        let node = root.lookup(name).await.unwrap();
        created.insert(name.to_string(), node.id().as_u64());
    }

    let entries = read_dir(&root).await.unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.entry_type == EntryType::Directory));
    assert_eq!(ids_by_name(&entries), created);
}

#[tokio::test]
async fn test_listing_is_a_snapshot() {
    let fs = new_fs();
    let root = fs.root();
    root.lookup("before").await.unwrap();

    let entries = root.entries().await.unwrap();
    root.lookup("after").await.unwrap();

    use futures::TryStreamExt;
    let listed: Vec<_> = entries.try_collect().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "before");
}

#[tokio::test]
async fn test_timestamps_are_fixed() {
    let fs = new_fs();
    let root = fs.root();
    let first = root.lookup("t").await.unwrap().attributes();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let again = root.lookup("t").await.unwrap().attributes();
    assert_eq!(first.created, again.created);
    assert_eq!(first.modified, again.modified);
    assert_eq!(first.accessed, again.accessed);
}

#[tokio::test]
async fn test_shared_allocator_continues_sequence() {
    let ids = Arc::new(NodeIdAllocator::new());
    let fs = FS::new(ids.clone());

    assert_eq!(fs.root().id(), NodeID::new(1));
    assert_eq!(ids.next(), NodeID::new(2));
    assert_eq!(fs.root().lookup("x").await.unwrap().id(), NodeID::new(3));
}

#[tokio::test]
async fn test_scenario() {
    let fs = new_fs();
    let root = fs.root();

    assert!(read_dir(&root).await.unwrap().is_empty());

    let foo = root.lookup("foo").await.unwrap();
    assert_eq!(foo.id().as_u64(), 2);
    assert_eq!(root.lookup("foo").await.unwrap().id().as_u64(), 2);
    assert_eq!(root.lookup("bar").await.unwrap().id().as_u64(), 3);

    let listed = ids_by_name(&read_dir(&root).await.unwrap());
    let expected = HashMap::from([("foo".to_string(), 2), ("bar".to_string(), 3)]);
    assert_eq!(listed, expected);

    let err = foo.lookup("baz").await.unwrap_err();
    assert!(err.is_not_found());
}
