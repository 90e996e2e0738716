//! Collision resolution: probe candidates `-00`, `-01`, ... until one is free or already holds
//! the same bytes as the source.
//!
//! Workers in one process serialize on a candidate path through [`ClaimRegistry`]: the claim is
//! taken before the existence check and, for a free slot, held until the write is verified.
//! Other processes are handled by the create-if-absent write in the copy step.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Condvar, Mutex, PoisonError};

use crate::engine::capabilities::ContentComparator;
use crate::engine::fs_ops::{Slot, probe_slot};
use crate::engine::naming;
use crate::error::OrganizeError;
use crate::events::Event;
use crate::{DestinationCandidate, ImageMetadata};

/// In-process registry of destination paths currently being probed or written.
#[derive(Debug, Default)]
pub struct ClaimRegistry {
    claimed: Mutex<HashSet<PathBuf>>,
    released: Condvar,
}

impl ClaimRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until no other worker holds `path`, then hold it until the returned guard drops.
    pub fn claim(&self, path: &Path) -> Claim<'_> {
        let mut claimed = self.claimed.lock().unwrap_or_else(PoisonError::into_inner);
        while claimed.contains(path) {
            claimed = self
                .released
                .wait(claimed)
                .unwrap_or_else(PoisonError::into_inner);
        }
        claimed.insert(path.to_path_buf());
        Claim {
            registry: self,
            path: path.to_path_buf(),
        }
    }

    pub fn is_claimed(&self, path: &Path) -> bool {
        self.claimed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
    }
}

/// RAII hold on one destination path.
#[derive(Debug)]
pub struct Claim<'a> {
    registry: &'a ClaimRegistry,
    path: PathBuf,
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        let mut claimed = self
            .registry
            .claimed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        claimed.remove(&self.path);
        self.registry.released.notify_all();
    }
}

/// Where a file should go. For a free slot the claim is still held.
#[derive(Debug)]
pub struct Resolution<'a> {
    pub candidate: DestinationCandidate,
    /// Absolute destination path.
    pub path: PathBuf,
    /// The slot already holds the source's bytes.
    pub duplicate: bool,
    claim: Option<Claim<'a>>,
}

impl Resolution<'_> {
    /// Release the slot early (also released on drop).
    pub fn release(&mut self) {
        self.claim.take();
    }
}

pub struct CollisionResolver<'a> {
    dest_root: &'a Path,
    comparator: &'a dyn ContentComparator,
    claims: &'a ClaimRegistry,
    max_index: u32,
}

impl<'a> CollisionResolver<'a> {
    pub fn new(
        dest_root: &'a Path,
        comparator: &'a dyn ContentComparator,
        claims: &'a ClaimRegistry,
        max_index: u32,
    ) -> Self {
        Self {
            dest_root,
            comparator,
            claims,
            max_index,
        }
    }

    /// Resolve starting at index 0.
    pub fn resolve(
        &self,
        meta: &ImageMetadata,
        ext: &str,
        source: &Path,
        events: &mut Vec<Event>,
    ) -> Result<Resolution<'a>, OrganizeError> {
        self.resolve_from(meta, ext, source, 0, events)
    }

    /// Resolve starting at `start`. Used to re-probe a slot another process won.
    pub fn resolve_from(
        &self,
        meta: &ImageMetadata,
        ext: &str,
        source: &Path,
        start: u32,
        events: &mut Vec<Event>,
    ) -> Result<Resolution<'a>, OrganizeError> {
        let claims: &'a ClaimRegistry = self.claims;
        let mut index = start;
        loop {
            let candidate = naming::candidate(meta, ext, index);
            let path = self.dest_root.join(&candidate.full_path);
            if index > self.max_index {
                return Err(OrganizeError::CollisionLimit {
                    path,
                    limit: self.max_index,
                });
            }

            let claim = claims.claim(&path);
            let slot = probe_slot(&path).map_err(|source| OrganizeError::Probe {
                path: path.clone(),
                source,
            })?;
            match slot {
                Slot::Free => {
                    return Ok(Resolution {
                        candidate,
                        path,
                        duplicate: false,
                        claim: Some(claim),
                    });
                }
                Slot::File => {
                    let same = self.comparator.same_content(&path, source).map_err(|e| {
                        OrganizeError::Compare {
                            existing: path.clone(),
                            path: source.to_path_buf(),
                            source: e,
                        }
                    })?;
                    if same {
                        return Ok(Resolution {
                            candidate,
                            path,
                            duplicate: true,
                            claim: None,
                        });
                    }
                }
                Slot::Other => {}
            }
            drop(claim);
            events.push(Event::CollisionEscalated {
                source: source.to_path_buf(),
                occupied: path,
            });
            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::hashing::HashComparator;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    fn meta() -> ImageMetadata {
        let taken_at = NaiveDate::from_ymd_opt(2023, 6, 1)
            .and_then(|d| d.and_hms_opt(10, 20, 30))
            .unwrap();
        ImageMetadata::new("Canon5D", taken_at)
    }

    #[test]
    fn free_slot_keeps_claim_until_dropped() {
        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("src.jpg");
        std::fs::write(&src, b"a").unwrap();
        let claims = ClaimRegistry::new();
        let resolver = CollisionResolver::new(root.path(), &HashComparator, &claims, 10);
        let mut events = Vec::new();

        let mut res = resolver.resolve(&meta(), ".jpg", &src, &mut events).unwrap();
        assert!(!res.duplicate);
        assert_eq!(res.candidate.index, 0);
        assert!(claims.is_claimed(&res.path));
        res.release();
        assert!(!claims.is_claimed(&res.path));
        assert!(events.is_empty());
    }

    #[test]
    fn escalates_past_different_content_and_stops_at_duplicate() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("2023/06");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("2023-06-01-102030-Canon5D-00.jpg"), b"other").unwrap();
        std::fs::write(dir.join("2023-06-01-102030-Canon5D-01.jpg"), b"mine").unwrap();
        let src = root.path().join("src.jpg");
        std::fs::write(&src, b"mine").unwrap();

        let claims = ClaimRegistry::new();
        let resolver = CollisionResolver::new(root.path(), &HashComparator, &claims, 10);
        let mut events = Vec::new();
        let res = resolver.resolve(&meta(), ".jpg", &src, &mut events).unwrap();
        assert!(res.duplicate);
        assert_eq!(res.candidate.index, 1);
        assert_eq!(events.len(), 1);
        assert!(!claims.is_claimed(&res.path));
    }

    #[test]
    fn directory_in_the_way_is_a_collision() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("2023/06/2023-06-01-102030-Canon5D-00.jpg"))
            .unwrap();
        let src = root.path().join("src.jpg");
        std::fs::write(&src, b"mine").unwrap();
        let claims = ClaimRegistry::new();
        let resolver = CollisionResolver::new(root.path(), &HashComparator, &claims, 10);
        let res = resolver
            .resolve(&meta(), ".jpg", &src, &mut Vec::new())
            .unwrap();
        assert_eq!(res.candidate.index, 1);
        assert!(!res.duplicate);
    }

    #[test]
    fn gives_up_past_max_index() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("2023/06");
        std::fs::create_dir_all(&dir).unwrap();
        for i in 0..=2 {
            std::fs::write(
                dir.join(format!("2023-06-01-102030-Canon5D-{i:02}.jpg")),
                format!("other {i}"),
            )
            .unwrap();
        }
        let src = root.path().join("src.jpg");
        std::fs::write(&src, b"mine").unwrap();
        let claims = ClaimRegistry::new();
        let resolver = CollisionResolver::new(root.path(), &HashComparator, &claims, 2);
        let err = resolver
            .resolve(&meta(), ".jpg", &src, &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, OrganizeError::CollisionLimit { limit: 2, .. }));
    }

    #[test]
    fn claim_blocks_second_holder() {
        let claims = Arc::new(ClaimRegistry::new());
        let path = PathBuf::from("/dest/2023/06/x.jpg");
        let first = claims.claim(&path);
        let acquired = Arc::new(AtomicBool::new(false));

        let handle = {
            let claims = Arc::clone(&claims);
            let acquired = Arc::clone(&acquired);
            let path = path.clone();
            thread::spawn(move || {
                let _second = claims.claim(&path);
                acquired.store(true, Ordering::SeqCst);
            })
        };
        thread::sleep(Duration::from_millis(50));
        assert!(!acquired.load(Ordering::SeqCst));
        drop(first);
        handle.join().unwrap();
        assert!(acquired.load(Ordering::SeqCst));
        assert!(!claims.is_claimed(&path));
    }
}
